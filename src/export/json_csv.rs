use crate::errors::{AppError, AppResult};
use crate::export::model::ItineraryRow;
use crate::export::notify_export_success;
use crate::models::Day;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Full day model, pretty-printed in the camelCase REST shape.
pub(crate) fn export_json(days: &[Day], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(days)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Itinerary rows; the header comes from the serde field names.
pub(crate) fn export_csv(rows: &[ItineraryRow], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;

    if rows.is_empty() {
        wtr.write_record(crate::export::model::get_headers())?;
    }
    for item in rows {
        wtr.serialize(item)?;
    }

    wtr.flush()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;

    notify_export_success("CSV", path);
    Ok(())
}
