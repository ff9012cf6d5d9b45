use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use ansi_term::Colour;
use regex::Regex;

const MAX_OP_WIDTH: usize = 60;

/// ANSI colour for an audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" | "assign" | "unassign" => Colour::Yellow,
        "migration_applied" | "config_migration" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "import" => Colour::Cyan,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    fn op_target(&self) -> String {
        if self.target.is_empty() {
            self.operation.clone()
        } else {
            format!("{} ({})", self.operation, self.target)
        }
    }

    fn matches(&self, re: &Regex) -> bool {
        re.is_match(&self.operation) || re.is_match(&self.target) || re.is_match(&self.message)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

pub struct LogLogic;

impl LogLogic {
    /// Audit rows in insertion order, optionally filtered by a regular
    /// expression matched against operation, target and message.
    pub fn load(pool: &DbPool, filter: Option<&str>) -> AppResult<Vec<LogEntry>> {
        let re = filter
            .map(Regex::new)
            .transpose()
            .map_err(|e| AppError::Other(format!("invalid log filter: {}", e)))?;

        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or(raw_date);

            Ok(LogEntry {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                message: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            let entry = r?;
            if re.as_ref().is_none_or(|re| entry.matches(re)) {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    pub fn print_log(pool: &DbPool, filter: Option<&str>) -> AppResult<()> {
        let entries = Self::load(pool, filter)?;

        if entries.is_empty() {
            println!("No log entries.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|e| e.op_target().chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for e in &entries {
            let color = color_for_operation(&e.operation);

            // Pad the plain text, then colour only the operation word.
            let visible = truncate(&e.op_target(), MAX_OP_WIDTH);
            let padding = " ".repeat(op_w.saturating_sub(visible.chars().count()));
            let colored = match visible.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                colored,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::log::ttlog;

    #[test]
    fn filter_matches_any_column() {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        ttlog(&pool.conn, "add", "e1", "Event 'Summit' created").unwrap();
        ttlog(&pool.conn, "del", "b7", "Block 'Lunch' deleted").unwrap();

        let all = LogLogic::load(&pool, None).unwrap();
        assert!(all.len() >= 2);

        let lunch = LogLogic::load(&pool, Some("Lunch")).unwrap();
        assert_eq!(lunch.len(), 1);
        assert_eq!(lunch[0].target, "b7");

        let adds = LogLogic::load(&pool, Some("^add$")).unwrap();
        assert!(adds.iter().all(|e| e.operation == "add"));

        assert!(LogLogic::load(&pool, Some("(")).is_err());
    }

    #[test]
    fn long_targets_are_truncated() {
        let s = truncate(&"x".repeat(80), MAX_OP_WIDTH);
        assert_eq!(s.chars().count(), MAX_OP_WIDTH);
        assert!(s.ends_with("..."));
    }
}
