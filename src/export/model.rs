use crate::core::calculator::{TimelineItem, build_timeline};
use crate::db::locations::load_locations;
use crate::db::participants::load_participants;
use crate::db::vehicles::load_vehicles;
use crate::errors::AppResult;
use crate::models::{Block, Day, Location, Movement, Participant, Vehicle};
use crate::utils::formatting::{describe_arrival, time_or_placeholder};
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;

/// Names used to turn ids into readable itinerary cells.
#[derive(Debug, Default)]
pub struct Directory {
    pub locations: HashMap<String, String>,
    pub participants: HashMap<String, String>,
    pub vehicles: HashMap<String, String>,
}

impl Directory {
    pub fn new(locations: &[Location], participants: &[Participant], vehicles: &[Vehicle]) -> Self {
        Self {
            locations: locations.iter().map(|l| (l.id.clone(), l.name.clone())).collect(),
            participants: participants
                .iter()
                .map(|p| (p.id.clone(), p.name.clone()))
                .collect(),
            vehicles: vehicles.iter().map(|v| (v.id.clone(), v.label.clone())).collect(),
        }
    }

    /// Names of everything currently stored.
    pub fn load(conn: &Connection) -> AppResult<Self> {
        Ok(Self::new(
            &load_locations(conn)?,
            &load_participants(conn)?,
            &load_vehicles(conn)?,
        ))
    }

    fn name<'a>(map: &'a HashMap<String, String>, id: &'a str) -> &'a str {
        map.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn location(&self, id: &str) -> String {
        if id.is_empty() {
            String::new()
        } else {
            Self::name(&self.locations, id).to_string()
        }
    }

    pub fn vehicle(&self, id: &str) -> String {
        Self::name(&self.vehicles, id).to_string()
    }

    pub fn people(&self, ids: &[String]) -> String {
        ids.iter()
            .map(|id| Self::name(&self.participants, id))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// One flat itinerary line: a block or a movement with derived times.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ItineraryRow {
    /// Block or movement id; shown by the CLI, never exported.
    #[serde(skip)]
    pub id: String,
    pub date: String,
    pub kind: String,
    pub category: String,
    pub start: String,
    pub end: String,
    pub title: String,
    pub location: String,
    pub people: String,
    pub vehicles: String,
    pub notes: String,
}

/// Header per CSV / XLSX / PDF
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "date", "kind", "category", "start", "end", "title", "location", "people", "vehicles",
        "notes",
    ]
}

pub(crate) fn row_to_cells(r: &ItineraryRow) -> Vec<String> {
    vec![
        r.date.clone(),
        r.kind.clone(),
        r.category.clone(),
        r.start.clone(),
        r.end.clone(),
        r.title.clone(),
        r.location.clone(),
        r.people.clone(),
        r.vehicles.clone(),
        r.notes.clone(),
    ]
}

pub(crate) fn rows_to_table(rows: &[ItineraryRow]) -> Vec<Vec<String>> {
    rows.iter().map(row_to_cells).collect()
}

fn block_row(date: &str, b: &Block, dir: &Directory) -> ItineraryRow {
    let mut people = b.participants_ids.clone();
    for p in b.advance_participant_ids.iter().chain(&b.met_by_participant_ids) {
        if !people.contains(p) {
            people.push(p.clone());
        }
    }

    ItineraryRow {
        id: b.id.clone(),
        date: date.to_string(),
        kind: "block".into(),
        category: b.block_type.as_str().into(),
        start: b.start_time.clone(),
        end: time_or_placeholder(b.effective_end_time()),
        title: b.title.clone(),
        location: b
            .location_id
            .as_deref()
            .map(|l| dir.location(l))
            .unwrap_or_default(),
        people: dir.people(&people),
        vehicles: String::new(),
        notes: b.notes.clone().unwrap_or_default(),
    }
}

fn movement_row(date: &str, m: &Movement, dir: &Directory) -> ItineraryRow {
    let mut people: Vec<String> = Vec::new();
    let mut vehicles: Vec<String> = Vec::new();

    for va in &m.vehicle_assignments {
        let label = Directory::name(&dir.vehicles, &va.vehicle_id);
        match &va.driver_id {
            Some(d) => vehicles.push(format!(
                "{} (driver: {})",
                label,
                Directory::name(&dir.participants, d)
            )),
            None => vehicles.push(label.to_string()),
        }
        for p in &va.participant_ids {
            if !people.contains(p) {
                people.push(p.clone());
            }
        }
    }

    let route = match (m.from_location_id.is_empty(), m.to_location_id.is_empty()) {
        (true, true) => String::new(),
        _ => format!(
            "{} → {}",
            dir.location(&m.from_location_id),
            dir.location(&m.to_location_id)
        ),
    };

    ItineraryRow {
        id: m.id.clone(),
        date: date.to_string(),
        kind: "movement".into(),
        category: describe_arrival(m),
        start: m.from_time.clone(),
        end: time_or_placeholder(m.arrival_time().as_deref()),
        title: m.title.clone(),
        location: route,
        people: dir.people(&people),
        vehicles: vehicles.join("; "),
        notes: m.notes.clone().unwrap_or_default(),
    }
}

/// Itinerary rows for each day, in timeline order.
pub fn itinerary_rows(days: &[Day], dir: &Directory) -> Vec<ItineraryRow> {
    let mut out = Vec::new();

    for day in days {
        let date = day.date_str();
        for entry in build_timeline(day) {
            out.push(match entry.item {
                TimelineItem::Block(b) => block_row(&date, b, dir),
                TimelineItem::Movement(m) => movement_row(&date, m, dir),
            });
        }
    }

    out
}
