use crate::cli::commands::open_pool;
use crate::cli::parser::VehicleCmd;
use crate::config::Config;
use crate::core::vehicle::VehicleLogic;
use crate::errors::AppResult;
use crate::models::Vehicle;
use crate::ui::messages::success;
use crate::utils::table::{Column, Table};
use crate::utils::time::normalize_optional_time;

pub fn handle(cmd: &VehicleCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match cmd {
        VehicleCmd::Add {
            label,
            make,
            model,
            license_plate,
            capacity,
            available_from,
            available_to,
            origin,
            notes,
        } => {
            let v = VehicleLogic::add(
                &mut pool,
                Vehicle {
                    id: String::new(),
                    label: label.clone(),
                    make: make.clone(),
                    model: model.clone(),
                    license_plate: license_plate.clone(),
                    capacity: *capacity,
                    available_from: normalize_optional_time(available_from.as_ref())?,
                    available_to: normalize_optional_time(available_to.as_ref())?,
                    origination_location_id: origin.clone(),
                    notes: notes.clone(),
                },
            )?;
            success(format!("Vehicle '{}' created: {}", v.describe(), v.id));
        }

        VehicleCmd::List => {
            let vehicles = VehicleLogic::list(&pool)?;
            if vehicles.is_empty() {
                println!("No vehicles.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 36),
                Column::new("Vehicle", 36),
                Column::new("Plate", 10),
                Column::new("Available", 13),
            ])
            .with_separator(&cfg.separator_char);

            for v in vehicles {
                let window = match (&v.available_from, &v.available_to) {
                    (None, None) => String::new(),
                    (from, to) => format!(
                        "{} → {}",
                        from.as_deref().unwrap_or("--:--"),
                        to.as_deref().unwrap_or("--:--")
                    ),
                };
                table.add_row(vec![
                    v.id.clone(),
                    v.describe(),
                    v.license_plate.clone().unwrap_or_default(),
                    window,
                ]);
            }
            print!("{}", table.render());
        }

        VehicleCmd::Del { id } => {
            let v = VehicleLogic::delete(&mut pool, id)?;
            success(format!("Vehicle '{}' deleted", v.label));
        }
    }

    Ok(())
}
