//! Configuration file migrations.
//!
//! Each migration adds one key (with its default) to an existing YAML file
//! that predates it. Applied versions are recorded in the `log` table, the
//! same way schema migrations are.

use crate::db::migrate::{is_applied, mark_applied};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use rusqlite::Connection;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

struct KeyMigration {
    version: &'static str,
    key: &'static str,
    default: fn() -> String,
    doc: Option<&'static str>,
}

const KEY_MIGRATIONS: &[KeyMigration] = &[
    KeyMigration {
        version: "20250301_cfg_0001_add_default_block_type",
        key: "default_block_type",
        default: super::default_block_type,
        doc: Some("  # default_block_type options: activity | break\n"),
    },
    KeyMigration {
        version: "20250301_cfg_0002_add_separator_char",
        key: "separator_char",
        default: super::default_separator_char,
        doc: None,
    },
    KeyMigration {
        version: "20250322_cfg_0003_add_show_weekday",
        key: "show_weekday",
        default: super::default_show_weekday,
        doc: Some(
            "  # show_weekday options:\n\
             #   None   → do not show weekday\n\
             #   Short  → Mo, Tu, We, Th, Fr, Sa, Su\n\
             #   Medium → Mon, Tue, Wed, Thu, Fri, Sat, Sun\n\
             #   Long   → Monday, Tuesday, ...\n",
        ),
    },
    KeyMigration {
        version: "20250410_cfg_0004_add_export_defaults",
        key: "default_export_format",
        default: super::default_export_format,
        doc: Some("  # default_export_format options: csv | json | xlsx | pdf\n"),
    },
    KeyMigration {
        version: "20250410_cfg_0005_add_pdf_title",
        key: "pdf_title",
        default: super::default_pdf_title,
        doc: None,
    },
];

fn read_mapping(conf_file: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(conf_file)?;
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            conf_file.display()
        ))),
    }
}

/// Keys known to the application that the file does not define yet.
pub fn missing_keys(conf_file: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(conf_file)?;

    let mut out = Vec::new();
    if !map.contains_key("database") {
        out.push("database");
    }
    for m in KEY_MIGRATIONS {
        if !map.contains_key(m.key) {
            out.push(m.key);
        }
    }
    Ok(out)
}

/// Serializes the mapping, injecting documentation comments after the keys
/// that have one.
fn render(map: &Mapping) -> AppResult<String> {
    let serialized = serde_yaml::to_string(map)?;
    let mut out = String::new();

    for line in serialized.lines() {
        out.push_str(line);
        out.push('\n');

        if let Some(doc) = KEY_MIGRATIONS
            .iter()
            .find(|m| line.starts_with(&format!("{}:", m.key)))
            .and_then(|m| m.doc)
        {
            out.push_str(doc);
        }
    }
    Ok(out)
}

/// Adds every missing key with its default value. Versions already recorded
/// are skipped; returns the versions applied by this run.
pub fn run_config_migrations(conn: &Connection, conf_file: &Path) -> AppResult<Vec<&'static str>> {
    if !conf_file.exists() {
        info(format!(
            "No configuration file at {}: nothing to migrate",
            conf_file.display()
        ));
        return Ok(Vec::new());
    }

    let mut map = read_mapping(conf_file)?;
    let mut applied = Vec::new();

    for m in KEY_MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        if !map.contains_key(m.key) {
            map.insert(Value::from(m.key), Value::from((m.default)()));
        }
        applied.push(m);
    }

    if applied.is_empty() {
        return Ok(Vec::new());
    }

    fs::write(conf_file, render(&map)?)?;

    for m in &applied {
        mark_applied(conn, m.version, &format!("Config key '{}' ensured", m.key))?;
        success(format!("Migration applied: {} → {}", m.version, m.key));
    }

    Ok(applied.into_iter().map(|m| m.version).collect())
}
