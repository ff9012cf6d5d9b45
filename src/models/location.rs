use super::null_as_default;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Hotel,
    Venue,
    Restaurant,
    #[default]
    Generic,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Hotel => "hotel",
            LocationType::Venue => "venue",
            LocationType::Restaurant => "restaurant",
            LocationType::Generic => "generic",
        }
    }

    /// Convert DB / CLI string → enum (case-insensitive)
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hotel" => Some(LocationType::Hotel),
            "venue" => Some(LocationType::Venue),
            "restaurant" => Some(LocationType::Restaurant),
            "generic" => Some(LocationType::Generic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps_link: Option<String>,
    #[serde(rename = "type", default)]
    pub location_type: LocationType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub site_manager_ids: Vec<String>,
}
