use crate::cli::commands::open_pool;
use crate::cli::parser::{MovementCmd, MovementFields};
use crate::config::Config;
use crate::core::movement::{ArrivalChange, MovementInput, MovementLogic};
use crate::errors::AppResult;
use crate::export::Directory;
use crate::models::{DrivingTime, Movement};
use crate::ui::messages::{header, success, warning};
use crate::utils::formatting::{describe_arrival, time_or_placeholder};
use crate::utils::time::{normalize_optional_time, normalize_time, parse_duration};

fn to_input(f: &MovementFields) -> AppResult<MovementInput> {
    let arrival = match (&f.arrive, &f.drive) {
        (Some(t), _) => ArrivalChange::Fixed(normalize_time(t)?),
        (None, Some(d)) => {
            let (hours, minutes) = parse_duration(d)?;
            ArrivalChange::Driving(DrivingTime::new(hours, minutes))
        }
        (None, None) => ArrivalChange::Keep,
    };

    Ok(MovementInput {
        title: f.title.clone(),
        description: f.description.clone(),
        from_location_id: f.from.clone(),
        to_location_id: f.to.clone(),
        from_time: normalize_optional_time(f.depart.as_ref())?,
        arrival,
        notes: f.notes.clone(),
    })
}

fn print_saved(action: &str, m: &Movement) {
    success(format!(
        "Movement '{}' {}: {} ({} → {})",
        m.title,
        action,
        m.id,
        m.from_time,
        time_or_placeholder(m.arrival_time().as_deref())
    ));
}

pub fn handle(cmd: &MovementCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match cmd {
        MovementCmd::Add { day, fields } => {
            let m = MovementLogic::add(&mut pool, day, to_input(fields)?)?;
            print_saved("added", &m);
        }

        MovementCmd::Edit { id, fields } => {
            let m = MovementLogic::edit(&mut pool, id, to_input(fields)?)?;
            print_saved("updated", &m);
        }

        MovementCmd::Show { id } => {
            let (day_id, m) = MovementLogic::get(&pool, id)?;
            let dir = Directory::load(&pool.conn)?;
            print_movement(&day_id, &m, &dir);
        }

        MovementCmd::Del { id } => {
            let m = MovementLogic::delete(&mut pool, id)?;
            success(format!("Movement '{}' deleted", m.title));
        }

        MovementCmd::Assign {
            id,
            vehicle,
            driver,
            passengers,
        } => {
            let (m, warnings) =
                MovementLogic::assign(&mut pool, id, vehicle, driver.clone(), passengers.clone())?;
            for w in warnings {
                warning(w);
            }
            success(format!("Vehicle {} assigned to '{}'", vehicle, m.title));
        }

        MovementCmd::Unassign {
            id,
            vehicle,
            passengers,
        } => {
            let m = MovementLogic::unassign(&mut pool, id, vehicle, passengers)?;
            if passengers.is_empty() {
                success(format!("Vehicle {} removed from '{}'", vehicle, m.title));
            } else {
                success(format!("Passengers removed from vehicle {} on '{}'", vehicle, m.title));
            }
        }
    }

    Ok(())
}

fn print_movement(day_id: &str, m: &Movement, dir: &Directory) {
    header(&m.title);

    println!("ID        : {}", m.id);
    println!("Day       : {}", day_id);
    println!(
        "Route     : {} → {}",
        dir.location(&m.from_location_id),
        dir.location(&m.to_location_id)
    );
    println!(
        "Time      : {} → {} ({})",
        m.from_time,
        time_or_placeholder(m.arrival_time().as_deref()),
        describe_arrival(m)
    );
    if let Some(d) = &m.description {
        println!("About     : {}", d);
    }
    if let Some(n) = &m.notes {
        println!("Notes     : {}", n);
    }

    for va in &m.vehicle_assignments {
        let driver = va
            .driver_id
            .as_ref()
            .map(|d| dir.people(std::slice::from_ref(d)))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "Vehicle   : {} | driver: {} | passengers: {}",
            dir.vehicle(&va.vehicle_id),
            driver,
            dir.people(&va.participant_ids)
        );
    }
}
