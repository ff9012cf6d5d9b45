use crate::cli::commands::open_pool;
use crate::cli::parser::EventCmd;
use crate::config::Config;
use crate::core::event::EventLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::require_date;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &EventCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match cmd {
        EventCmd::Add {
            name,
            start,
            end,
            description,
        } => {
            let ev = EventLogic::add(
                &mut pool,
                name,
                description.clone(),
                require_date(start)?,
                require_date(end)?,
            )?;
            success(format!("Event '{}' created: {}", ev.name, ev.id));
        }

        EventCmd::List => {
            let events = EventLogic::list(&pool)?;
            if events.is_empty() {
                println!("No events.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 36),
                Column::new("Name", 30),
                Column::new("From", 10),
                Column::new("To", 10),
                Column::new("Description", 40),
            ])
            .with_separator(&cfg.separator_char);

            for ev in events {
                table.add_row(vec![
                    ev.id,
                    ev.name,
                    ev.start_date.to_string(),
                    ev.end_date.to_string(),
                    ev.description.unwrap_or_default(),
                ]);
            }
            print!("{}", table.render());
        }

        EventCmd::Del { id } => {
            let ev = EventLogic::delete(&mut pool, id)?;
            success(format!("Event '{}' deleted with all of its days", ev.name));
        }
    }

    Ok(())
}
