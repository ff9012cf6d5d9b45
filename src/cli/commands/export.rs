use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::logic::ExportOptions;
use crate::export::{ExportFormat, ExportLogic};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        participant,
        event,
        force,
    } = cmd
    {
        let format = match format {
            Some(f) => *f,
            None => ExportFormat::from_code(&cfg.default_export_format)?,
        };

        let mut pool = open_pool(cfg)?;
        ExportLogic::export(
            &mut pool,
            cfg,
            &ExportOptions {
                format,
                file: file.clone(),
                event_id: event.clone(),
                participant_id: participant.clone(),
                force: *force,
            },
        )?;
    }
    Ok(())
}
