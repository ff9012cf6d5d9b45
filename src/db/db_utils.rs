//! Small helpers shared by the query modules.

use crate::errors::AppError;
use rusqlite::{Connection, OptionalExtension, Result};

/// String lists (roles, languages, attachments...) are stored as JSON text.
pub fn to_json_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

pub fn from_json_list(raw: Option<String>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

/// Empty strings read back as `None`.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

pub fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Wraps a domain parse failure into the error type row mappers must return.
pub fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_lists_tolerate_garbage() {
        assert_eq!(from_json_list(Some("[\"a\",\"b\"]".into())), ["a", "b"]);
        assert!(from_json_list(Some("not json".into())).is_empty());
        assert!(from_json_list(None).is_empty());
        assert_eq!(to_json_list(&["x".to_string()]), "[\"x\"]");
    }
}
