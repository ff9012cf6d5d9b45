use crate::cli::commands::open_pool;
use crate::cli::parser::DayCmd;
use crate::config::Config;
use crate::core::day::DayLogic;
use crate::core::event::EventLogic;
use crate::errors::AppResult;
use crate::export::{Directory, itinerary_rows};
use crate::models::Day;
use crate::ui::messages::{header, success};
use crate::utils::colors::color_for_kind;
use crate::utils::date::{display_date, expand_dates};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &DayCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match cmd {
        DayCmd::Add { event, dates } => {
            let dates = expand_dates(dates)?;
            for day in DayLogic::add(&mut pool, event, &dates)? {
                success(format!("Day {} added: {}", day.date, day.id));
            }
        }

        DayCmd::List { event } => {
            let days = DayLogic::list(&pool, event.as_deref())?;
            if days.is_empty() {
                println!("No days.");
                return Ok(());
            }

            let events = EventLogic::list(&pool)?;
            let mut table = Table::new(vec![
                Column::new("ID", 36),
                Column::new("Date", 24),
                Column::new("Event", 30),
            ])
            .with_separator(&cfg.separator_char);

            for d in days {
                let event_name = events
                    .iter()
                    .find(|e| e.id == d.event_id)
                    .map(|e| e.name.clone())
                    .unwrap_or_else(|| d.event_id.clone());
                table.add_row(vec![d.id.clone(), display_date(d.date, &cfg.show_weekday), event_name]);
            }
            print!("{}", table.render());
        }

        DayCmd::Show { id } => {
            let day = DayLogic::get(&pool, id)?;
            let event = EventLogic::get(&pool, &day.event_id)?;
            let dir = Directory::load(&pool.conn)?;

            header(format!(
                "{} · {}",
                event.name,
                display_date(day.date, &cfg.show_weekday)
            ));
            print_timeline(&day, &dir, cfg);
        }

        DayCmd::Del { id } => {
            let day = DayLogic::delete(&mut pool, id)?;
            success(format!("Day {} deleted", day.date));
        }
    }

    Ok(())
}

/// Blocks and movements of the day in timeline order, with resolved
/// end and arrival times.
pub(crate) fn print_timeline(day: &Day, dir: &Directory, cfg: &Config) {
    let rows = itinerary_rows(std::slice::from_ref(day), dir);
    if rows.is_empty() {
        println!("Nothing planned.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("Start", 5),
        Column::new("End", 5),
        Column::new("Kind", 8),
        Column::new("Title", 28),
        Column::new("Where", 30),
        Column::new("People", 30),
        Column::new("Vehicles", 24),
        Column::new("ID", 36),
    ])
    .with_separator(&cfg.separator_char);

    for r in rows {
        let color = color_for_kind(&r.kind);
        table.add_colored_row(
            vec![r.start, r.end, r.kind, r.title, r.location, r.people, r.vehicles, r.id],
            color,
        );
    }
    print!("{}", table.render());
}
