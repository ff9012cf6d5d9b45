use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::Store;
use crate::ui::messages::{info, success, warning};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let path = expand_tilde(file);
        let (store, migrations) = Store::load_file(&path)?;

        for m in migrations {
            info(format!("Store migration applied: {}", m));
        }

        let mut pool = open_pool(cfg)?;
        let summary = store.import_into(&mut pool)?;

        for w in &summary.warnings {
            warning(w);
        }

        success(format!(
            "Imported {} events, {} days, {} blocks, {} movements, {} participants, {} locations, {} vehicles",
            summary.events,
            summary.days,
            summary.blocks,
            summary.movements,
            summary.participants,
            summary.locations,
            summary.vehicles
        ));
    }
    Ok(())
}
