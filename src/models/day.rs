use super::null_as_default;
use super::{Block, Movement};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A calendar date inside an event, owning its blocks and movements.
///
/// Either list may arrive as `null`; both are treated as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub id: String,
    #[serde(default)]
    pub event_id: String,
    pub date: NaiveDate, // ⇔ days.date (TEXT "YYYY-MM-DD")
    #[serde(default, deserialize_with = "null_as_default")]
    pub blocks: Vec<Block>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub movements: Vec<Movement>,
}

impl Day {
    pub fn new(id: String, event_id: String, date: NaiveDate) -> Self {
        Self {
            id,
            event_id,
            date,
            blocks: Vec::new(),
            movements: Vec::new(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.movements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_lists_become_empty() {
        let json = r#"{"id":"d1","eventId":"e1","date":"2025-06-18","blocks":null,"movements":null}"#;
        let d: Day = serde_json::from_str(json).unwrap();
        assert!(d.is_empty());
        assert_eq!(d.date_str(), "2025-06-18");
    }

    #[test]
    fn missing_lists_become_empty() {
        let json = r#"{"id":"d1","date":"2025-06-18"}"#;
        let d: Day = serde_json::from_str(json).unwrap();
        assert!(d.blocks.is_empty() && d.movements.is_empty());
        assert_eq!(d.event_id, "");
    }
}
