use crate::cli::commands::day::print_timeline;
use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::agenda::{agenda, participant_view};
use crate::core::day::DayLogic;
use crate::core::participant::ParticipantLogic;
use crate::db::days::load_full_days;
use crate::errors::AppResult;
use crate::export::Directory;
use crate::ui::messages::header;
use crate::utils::date::display_date;
use crate::utils::formatting::time_or_placeholder;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Agenda { participant, day } = cmd {
        let pool = open_pool(cfg)?;
        let p = ParticipantLogic::get(&pool, participant)?;
        let dir = Directory::load(&pool.conn)?;

        // One day: the participant's own view of it.
        if let Some(day_id) = day {
            let full = DayLogic::get(&pool, day_id)?;
            header(format!(
                "{} · {}",
                p.name,
                display_date(full.date, &cfg.show_weekday)
            ));
            match participant_view(&full, &p.id) {
                Some(view) => print_timeline(&view, &dir, cfg),
                None => println!("{} takes no part in this day.", p.name),
            }
            return Ok(());
        }

        header(format!("Agenda of {}", p.name));

        let days = load_full_days(&pool.conn, None)?;
        let items = agenda(&days, &p.id);
        if items.is_empty() {
            println!("No blocks assigned.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("Date", 24),
            Column::new("Start", 5),
            Column::new("End", 5),
            Column::new("Title", 30),
            Column::new("Where", 30),
            Column::new("Role", 11),
        ])
        .with_separator(&cfg.separator_char);

        for item in items {
            let b = &item.block;
            let role = if b.participants_ids.contains(&p.id) {
                "participant"
            } else if b.advance_participant_ids.contains(&p.id) {
                "advance"
            } else {
                "met by"
            };

            table.add_row(vec![
                display_date(item.date, &cfg.show_weekday),
                b.start_time.clone(),
                time_or_placeholder(b.effective_end_time()),
                b.title.clone(),
                b.location_id
                    .as_deref()
                    .map(|l| dir.location(l))
                    .unwrap_or_default(),
                role.to_string(),
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
