//! Versioned schema migrations.
//!
//! Every migration has a version string; once applied it is recorded in the
//! `log` table as a `migration_applied` row and never runs again.

use crate::db::db_utils::{table_exists, table_has_column};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result, params};

type MigrationFn = fn(&Connection) -> Result<()>;

/// (version, log message, migration) in application order.
const MIGRATIONS: &[(&str, &str, MigrationFn)] = &[
    (
        "20250301_0001_create_planning_schema",
        "Created planning schema",
        create_planning_schema,
    ),
    (
        "20250322_0002_add_block_end_time_fixed",
        "Added end_time_fixed flag to blocks",
        add_block_end_time_fixed,
    ),
    (
        "20250410_0003_add_vehicle_availability",
        "Added availability window to vehicles",
        add_vehicle_availability,
    ),
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

pub fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

pub fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![version, message],
    )?;
    Ok(())
}

/// Base schema. Blocks start without `end_time_fixed` and vehicles without
/// an availability window; later migrations add them.
fn create_planning_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            description TEXT,
            start_date  TEXT NOT NULL,
            end_date    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS days (
            id       TEXT PRIMARY KEY,
            event_id TEXT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            date     TEXT NOT NULL,
            UNIQUE(event_id, date)
        );

        CREATE TABLE IF NOT EXISTS participants (
            id        TEXT PRIMARY KEY,
            name      TEXT NOT NULL,
            roles     TEXT NOT NULL DEFAULT '[]',
            email     TEXT,
            phone     TEXT,
            languages TEXT NOT NULL DEFAULT '[]'
        );

        CREATE TABLE IF NOT EXISTS locations (
            id               TEXT PRIMARY KEY,
            name             TEXT NOT NULL,
            address          TEXT,
            google_maps_link TEXT,
            type             TEXT NOT NULL DEFAULT 'generic'
                             CHECK(type IN ('hotel','venue','restaurant','generic')),
            contact          TEXT NOT NULL DEFAULT '[]',
            site_manager_ids TEXT NOT NULL DEFAULT '[]'
        );

        CREATE TABLE IF NOT EXISTS vehicles (
            id            TEXT PRIMARY KEY,
            label         TEXT NOT NULL,
            make          TEXT,
            model         TEXT,
            license_plate TEXT,
            capacity      INTEGER,
            notes         TEXT
        );

        CREATE TABLE IF NOT EXISTS blocks (
            id          TEXT PRIMARY KEY,
            day_id      TEXT NOT NULL REFERENCES days(id) ON DELETE CASCADE,
            position    INTEGER NOT NULL DEFAULT 0,
            type        TEXT NOT NULL CHECK(type IN ('activity','break')),
            title       TEXT NOT NULL,
            description TEXT,
            start_time  TEXT NOT NULL,
            end_time    TEXT NOT NULL DEFAULT '',
            location_id TEXT REFERENCES locations(id) ON DELETE SET NULL,
            notes       TEXT,
            attachments TEXT NOT NULL DEFAULT '[]'
        );

        CREATE TABLE IF NOT EXISTS block_participants (
            block_id       TEXT NOT NULL REFERENCES blocks(id) ON DELETE CASCADE,
            participant_id TEXT NOT NULL REFERENCES participants(id) ON DELETE CASCADE,
            role           TEXT NOT NULL CHECK(role IN ('participant','advance','met_by')),
            position       INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (block_id, participant_id, role)
        );

        CREATE TABLE IF NOT EXISTS schedule_items (
            id                 TEXT PRIMARY KEY,
            block_id           TEXT NOT NULL REFERENCES blocks(id) ON DELETE CASCADE,
            position           INTEGER NOT NULL DEFAULT 0,
            time               TEXT NOT NULL,
            description        TEXT NOT NULL DEFAULT '',
            staff_instructions TEXT,
            guest_instructions TEXT,
            notes              TEXT
        );

        CREATE TABLE IF NOT EXISTS movements (
            id               TEXT PRIMARY KEY,
            day_id           TEXT NOT NULL REFERENCES days(id) ON DELETE CASCADE,
            position         INTEGER NOT NULL DEFAULT 0,
            title            TEXT NOT NULL,
            description      TEXT,
            from_location_id TEXT REFERENCES locations(id) ON DELETE SET NULL,
            to_location_id   TEXT REFERENCES locations(id) ON DELETE SET NULL,
            from_time        TEXT NOT NULL,
            to_time_type     TEXT NOT NULL DEFAULT 'fixed' CHECK(to_time_type IN ('fixed','driving')),
            to_time          TEXT NOT NULL DEFAULT '',
            driving_minutes  INTEGER,
            notes            TEXT
        );

        CREATE TABLE IF NOT EXISTS vehicle_assignments (
            id          TEXT PRIMARY KEY,
            movement_id TEXT NOT NULL REFERENCES movements(id) ON DELETE CASCADE,
            position    INTEGER NOT NULL DEFAULT 0,
            vehicle_id  TEXT NOT NULL REFERENCES vehicles(id) ON DELETE CASCADE,
            driver_id   TEXT REFERENCES participants(id) ON DELETE SET NULL
        );

        CREATE TABLE IF NOT EXISTS vehicle_assignment_passengers (
            assignment_id  TEXT NOT NULL REFERENCES vehicle_assignments(id) ON DELETE CASCADE,
            participant_id TEXT NOT NULL REFERENCES participants(id) ON DELETE CASCADE,
            position       INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (assignment_id, participant_id)
        );

        CREATE INDEX IF NOT EXISTS idx_days_event_date ON days(event_id, date);
        CREATE INDEX IF NOT EXISTS idx_blocks_day ON blocks(day_id, position);
        CREATE INDEX IF NOT EXISTS idx_movements_day ON movements(day_id, position);
        CREATE INDEX IF NOT EXISTS idx_block_participants_pid ON block_participants(participant_id);
        CREATE INDEX IF NOT EXISTS idx_schedule_items_block ON schedule_items(block_id, position);
        "#,
    )?;
    Ok(())
}

/// Existing blocks become "auto": their end is derived from schedule items.
fn add_block_end_time_fixed(conn: &Connection) -> Result<()> {
    if !table_has_column(conn, "blocks", "end_time_fixed")? {
        conn.execute(
            "ALTER TABLE blocks ADD COLUMN end_time_fixed INTEGER NOT NULL DEFAULT 0;",
            [],
        )?;
    }
    Ok(())
}

fn add_vehicle_availability(conn: &Connection) -> Result<()> {
    for column in ["available_from", "available_to", "origination_location_id"] {
        if !table_has_column(conn, "vehicles", column)? {
            conn.execute(&format!("ALTER TABLE vehicles ADD COLUMN {} TEXT;", column), [])?;
        }
    }
    Ok(())
}

/// Versions not yet recorded in the `log` table.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    if !table_exists(conn, "log")? {
        return Ok(MIGRATIONS.iter().map(|(v, _, _)| *v).collect());
    }

    let mut out = Vec::new();
    for (version, _, _) in MIGRATIONS {
        if !is_applied(conn, version)? {
            out.push(*version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations, each in its own
/// transaction together with its `migration_applied` marker.
///
/// Invoked by db::initialize::init_db() and `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for (version, message, migration) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        migration(&tx)?;
        mark_applied(&tx, version, message)?;
        tx.commit()?;

        success(format!("Migration applied: {} → {}", version, message));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(applied as usize, MIGRATIONS.len());
        assert!(pending_migrations(&conn).unwrap().is_empty());
    }

    #[test]
    fn fresh_database_has_everything_pending() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(pending_migrations(&conn).unwrap().len(), MIGRATIONS.len());
    }

    #[test]
    fn later_columns_exist_after_migration() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        assert!(table_has_column(&conn, "blocks", "end_time_fixed").unwrap());
        assert!(table_has_column(&conn, "vehicles", "available_from").unwrap());
    }
}
