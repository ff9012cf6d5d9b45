use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub label: String, // e.g. "Van A"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>, // seats
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_from: Option<String>, // HH:mm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_to: Option<String>, // HH:mm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origination_location_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Vehicle {
    /// "Van A (Mercedes Sprinter) - 8 seats"
    pub fn describe(&self) -> String {
        let mut out = self.label.clone();
        if let (Some(make), Some(model)) = (&self.make, &self.model) {
            out.push_str(&format!(" ({} {})", make, model));
        }
        if let Some(c) = self.capacity {
            out.push_str(&format!(" - {} seats", c));
        }
        out
    }
}
