use crate::cli::commands::open_pool;
use crate::cli::parser::LocationCmd;
use crate::config::Config;
use crate::core::location::{LocationInput, LocationLogic};
use crate::errors::{AppError, AppResult};
use crate::models::LocationType;
use crate::ui::messages::success;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &LocationCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match cmd {
        LocationCmd::Add {
            name,
            address,
            google_maps_link,
            location_type,
            contact,
            site_managers,
        } => {
            let location_type = match location_type {
                Some(t) => LocationType::from_code(t)
                    .ok_or_else(|| AppError::InvalidLocationType(t.clone()))?,
                None => LocationType::default(),
            };

            let loc = LocationLogic::add(
                &mut pool,
                LocationInput {
                    name: name.clone(),
                    address: address.clone(),
                    google_maps_link: google_maps_link.clone(),
                    location_type,
                    contact: contact.clone(),
                    site_manager_ids: site_managers.clone(),
                },
            )?;
            success(format!("Location '{}' created: {}", loc.name, loc.id));
        }

        LocationCmd::List => {
            let locations = LocationLogic::list(&pool)?;
            if locations.is_empty() {
                println!("No locations.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 36),
                Column::new("Name", 28),
                Column::new("Type", 10),
                Column::new("Address", 40),
            ])
            .with_separator(&cfg.separator_char);

            for l in locations {
                table.add_row(vec![
                    l.id,
                    l.name,
                    l.location_type.as_str().to_string(),
                    l.address.unwrap_or_default(),
                ]);
            }
            print!("{}", table.render());
        }

        LocationCmd::Del { id } => {
            let loc = LocationLogic::delete(&mut pool, id)?;
            success(format!("Location '{}' deleted", loc.name));
        }
    }

    Ok(())
}
