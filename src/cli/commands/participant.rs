use crate::cli::commands::open_pool;
use crate::cli::parser::ParticipantCmd;
use crate::config::Config;
use crate::core::block::BlockLogic;
use crate::core::participant::{ParticipantInput, ParticipantLogic};
use crate::errors::AppResult;
use crate::ui::messages::{header, success};
use crate::utils::formatting::time_or_placeholder;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &ParticipantCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match cmd {
        ParticipantCmd::Add {
            name,
            roles,
            email,
            phone,
            languages,
        } => {
            let p = ParticipantLogic::add(
                &mut pool,
                ParticipantInput {
                    name: name.clone(),
                    roles: roles.clone(),
                    email: email.clone(),
                    phone: phone.clone(),
                    languages: languages.clone(),
                },
            )?;
            success(format!("Participant '{}' created: {}", p.name, p.id));
        }

        ParticipantCmd::List => {
            let people = ParticipantLogic::list(&pool)?;
            if people.is_empty() {
                println!("No participants.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 36),
                Column::new("Name", 28),
                Column::new("Roles", 24),
                Column::new("Email", 30),
                Column::new("Blocks", 6),
            ])
            .with_separator(&cfg.separator_char);

            for p in people {
                table.add_row(vec![
                    p.id,
                    p.name,
                    p.roles.join(", "),
                    p.email.unwrap_or_default(),
                    p.assigned_block_ids.len().to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        ParticipantCmd::Show { id } => {
            let p = ParticipantLogic::get(&pool, id)?;

            header(&p.name);
            println!("ID        : {}", p.id);
            if !p.roles.is_empty() {
                println!("Roles     : {}", p.roles.join(", "));
            }
            if let Some(e) = &p.email {
                println!("Email     : {}", e);
            }
            if let Some(ph) = &p.phone {
                println!("Phone     : {}", ph);
            }
            if !p.languages.is_empty() {
                println!("Languages : {}", p.languages.join(", "));
            }

            if p.assigned_block_ids.is_empty() {
                println!("\nNot assigned to any block.");
                return Ok(());
            }

            println!();
            let mut table = Table::new(vec![
                Column::new("Block", 36),
                Column::new("Day", 36),
                Column::new("Time", 13),
                Column::new("Title", 30),
            ])
            .with_separator(&cfg.separator_char);

            for bid in &p.assigned_block_ids {
                let (day_id, b) = BlockLogic::get(&pool, bid)?;
                table.add_row(vec![
                    b.id.clone(),
                    day_id,
                    format!(
                        "{} → {}",
                        b.start_time,
                        time_or_placeholder(b.effective_end_time())
                    ),
                    b.title.clone(),
                ]);
            }
            print!("{}", table.render());
        }

        ParticipantCmd::Del { id } => {
            let p = ParticipantLogic::delete(&mut pool, id)?;
            success(format!("Participant '{}' deleted", p.name));
        }
    }

    Ok(())
}
