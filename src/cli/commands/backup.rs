use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        archive,
        force,
    } = cmd
    {
        let mut pool = open_pool(cfg)?;
        let format = compress.then(|| archive.unwrap_or_default());
        BackupLogic::backup(&mut pool, &cfg.database, file, format, *force)?;
    }

    Ok(())
}
