use crate::errors::{AppError, AppResult};
use crate::export::model::{ItineraryRow, get_headers, rows_to_table};
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::ui::messages::info;
use std::path::Path;

/// Itinerary table rendered through `PdfManager`.
pub(crate) fn export_pdf(
    rows: &[ItineraryRow],
    path: &Path,
    title: &str,
    subtitle: &str,
) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = get_headers();
    let data_vec = rows_to_table(rows);

    let mut pdf = PdfManager::new();
    pdf.write_table(title, subtitle, &headers, &data_vec);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
