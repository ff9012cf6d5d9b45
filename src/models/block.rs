use super::null_as_default;
use crate::core::calculator::block_end::resolve_block_end_time;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    #[default]
    Activity,
    Break,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Activity => "activity",
            BlockType::Break => "break",
        }
    }

    /// Convert DB / CLI string → enum (case-insensitive)
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "activity" | "a" => Some(BlockType::Activity),
            "break" | "b" => Some(BlockType::Break),
            _ => None,
        }
    }
}

/// A timestamped entry inside a block's own timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: String,
    pub time: String, // HH:mm
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// An activity or break on a day.
///
/// `end_time` only means something when `end_time_fixed` is set; otherwise the
/// end is derived from the schedule items on every read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    #[serde(rename = "type", default)]
    pub block_type: BlockType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: String, // HH:mm
    #[serde(default)]
    pub end_time: String, // HH:mm, stale unless end_time_fixed
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_time_fixed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub participants_ids: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub advance_participant_ids: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub met_by_participant_ids: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub schedule_items: Vec<ScheduleItem>,
}

impl Block {
    /// Effective end time; `None` when auto mode has nothing to derive from.
    pub fn effective_end_time(&self) -> Option<&str> {
        resolve_block_end_time(self)
    }

    /// The end time to persist: verbatim when fixed, empty when auto.
    pub fn stored_end_time(&self) -> &str {
        if self.end_time_fixed {
            &self.end_time
        } else {
            ""
        }
    }

    pub fn set_fixed_end(&mut self, end: String) {
        self.end_time = end;
        self.end_time_fixed = true;
    }

    pub fn set_auto_end(&mut self) {
        self.end_time.clear();
        self.end_time_fixed = false;
    }

    /// Listed as participant, advance party or greeter.
    pub fn involves(&self, participant_id: &str) -> bool {
        self.participants_ids
            .iter()
            .chain(&self.advance_participant_ids)
            .chain(&self.met_by_participant_ids)
            .any(|p| p == participant_id)
    }

    /// Schedule items in chronological order (stored order is insertion order).
    pub fn sorted_schedule(&self) -> Vec<&ScheduleItem> {
        let mut items: Vec<&ScheduleItem> = self.schedule_items.iter().collect();
        items.sort_by(|a, b| a.time.cmp(&b.time));
        items
    }
}
