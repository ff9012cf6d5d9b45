pub mod agenda;
pub mod backup;
pub mod block;
pub mod config;
pub mod day;
pub mod db;
pub mod event;
pub mod export;
pub mod import;
pub mod init;
pub mod location;
pub mod log;
pub mod movement;
pub mod participant;
pub mod vehicle;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Opens the configured database and brings its schema up to date.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}
