use crate::config::Config;
use crate::core::agenda::participant_view;
use crate::core::event::EventLogic;
use crate::core::participant::ParticipantLogic;
use crate::db::days::load_full_days;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{Directory, itinerary_rows};
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::models::Day;
use crate::ui::messages::warning;
use crate::utils::fs_utils::ensure_writable;
use crate::utils::path::absolute_output_path;

/// What to export and where.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub file: String,
    pub event_id: Option<String>,
    pub participant_id: Option<String>,
    pub force: bool,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Writes the itinerary of the selected days.
    ///
    /// With a participant, every day is reduced to that participant's view
    /// and days they take no part in are skipped. Returns the number of
    /// days exported; nothing is written when there are none.
    pub fn export(pool: &mut DbPool, cfg: &Config, opts: &ExportOptions) -> AppResult<usize> {
        let path = absolute_output_path(&opts.file)?;

        let mut subtitle: Vec<String> = Vec::new();

        if let Some(eid) = &opts.event_id {
            let ev = EventLogic::get(pool, eid)?;
            subtitle.push(format!("{} ({} → {})", ev.name, ev.start_date, ev.end_date));
        }

        let mut days = load_full_days(&pool.conn, opts.event_id.as_deref())?;

        if let Some(pid) = &opts.participant_id {
            let p = ParticipantLogic::get(pool, pid)?;
            subtitle.push(format!("Personal itinerary of {}", p.name));
            days = days
                .iter()
                .filter_map(|d| participant_view(d, pid))
                .collect::<Vec<Day>>();
        }

        if days.is_empty() {
            warning("No days found for the selected filters.");
            return Ok(0);
        }

        if !ensure_writable(&path, opts.force)? {
            warning("Export cancelled, existing file not overwritten.");
            return Ok(0);
        }

        match opts.format {
            ExportFormat::Json => export_json(&days, &path)?,
            format => {
                let dir = Directory::load(&pool.conn)?;
                let rows = itinerary_rows(&days, &dir);

                match format {
                    ExportFormat::Csv => export_csv(&rows, &path)?,
                    ExportFormat::Xlsx => export_xlsx(&rows, &path, &cfg.pdf_title)?,
                    _ => export_pdf(&rows, &path, &cfg.pdf_title, &subtitle.join(" - "))?,
                }
            }
        }

        ttlog_soft(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} days exported as {}", days.len(), opts.format.as_str()),
        );

        Ok(days.len())
    }
}
