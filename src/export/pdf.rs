use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_RATIO: f32 = 0.52;

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,
    bold_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Text in the WinAnsi range is kept, anything else becomes `?`.
fn to_pdf_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '→' => b'>',
            '–' | '—' => b'-',
            '…' => 0x85,
            c if (c as u32) < 0x100 => c as u8,
            _ => b'?',
        })
        .collect()
}

impl PdfManager {
    /// A4 landscape: itinerary rows are wide.
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_id = Ref::new(4);

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),

            page_w: 842.0,
            page_h: 595.0,
            margin: 36.0,
            row_h: 18.0,

            next_id: 5,
            font_id,
            bold_id,

            font_size: 8.5,
            header_font_size: 9.0,
            title_font_size: 14.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Registers a page whose content stream is `content`.
    fn push_page(&mut self, content: Content) {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        {
            let mut page = self.pdf.page(page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
                .contents(content_id);

            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(Name(b"F1"), self.font_id);
            fonts.pair(Name(b"F2"), self.bold_id);
        }

        self.pdf.stream(content_id, &content.finish());
    }

    fn draw_text(content: &mut Content, font: &[u8], x: f32, y: f32, size: f32, text: &str) {
        content.begin_text();
        content.set_font(Name(font), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&to_pdf_bytes(text)));
        content.end_text();
    }

    fn fill_rect(content: &mut Content, rgb: (f32, f32, f32), x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
        content.rect(x, y, w, h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_cell_borders(content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    /// Cuts `text` so it fits `width` points at `size`.
    fn fit(text: &str, width: f32, size: f32) -> String {
        let max_chars = ((width - 6.0) / (size * GLYPH_RATIO)).floor().max(1.0) as usize;
        if text.chars().count() <= max_chars {
            return text.to_string();
        }
        let mut s: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        s.push('…');
        s
    }

    fn draw_row(
        &self,
        content: &mut Content,
        y: f32,
        col_widths: &[f32],
        row: &[String],
        bold: bool,
    ) {
        let (font, size): (&[u8], f32) = if bold {
            (&b"F2"[..], self.header_font_size)
        } else {
            (&b"F1"[..], self.font_size)
        };

        let mut x = self.margin;
        for (text, w) in row.iter().zip(col_widths) {
            Self::draw_text(content, font, x + 3.0, y + 5.5, size, &Self::fit(text, *w, size));
            Self::draw_cell_borders(content, x, y, *w, self.row_h);
            x += w;
        }
    }

    /// Column widths proportional to content, scaled to the printable width.
    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let char_w = self.font_size * GLYPH_RATIO;
        let mut widths: Vec<f32> = headers
            .iter()
            .map(|h| h.chars().count() as f32 * char_w + 8.0)
            .collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                let w = (cell.chars().count() as f32 * char_w + 8.0).min(220.0);
                widths[i] = widths[i].max(w);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;
        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn rows_per_page(&self) -> usize {
        let usable = self.page_h - 2.0 * self.margin - 60.0;
        ((usable / self.row_h).floor() as usize).max(1)
    }

    fn draw_page_header_footer(
        &self,
        content: &mut Content,
        title: &str,
        subtitle: &str,
        page: usize,
        pages: usize,
    ) {
        Self::draw_text(
            content,
            b"F2",
            self.margin,
            self.page_h - self.margin,
            self.title_font_size,
            title,
        );
        if !subtitle.is_empty() {
            Self::draw_text(
                content,
                b"F1",
                self.margin,
                self.page_h - self.margin - 16.0,
                self.font_size,
                subtitle,
            );
        }

        let pg = format!("Page {} of {}", page, pages);
        Self::draw_text(
            content,
            b"F1",
            self.page_w - self.margin - 60.0,
            self.margin - 20.0,
            self.font_size,
            &pg,
        );
    }

    /// Multi-page table. The header row repeats on every page; the first
    /// column is used to band rows so each date reads as one group.
    pub fn write_table(
        &mut self,
        title: &str,
        subtitle: &str,
        headers: &[&str],
        rows: &[Vec<String>],
    ) {
        let col_widths = self.compute_col_widths(headers, rows);
        let table_w: f32 = col_widths.iter().sum();
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();

        let per_page = self.rows_per_page();
        let chunks: Vec<&[Vec<String>]> = if rows.is_empty() {
            vec![rows]
        } else {
            rows.chunks(per_page).collect()
        };
        let pages = chunks.len();

        let mut band = false;
        let mut last_key: Option<&str> = None;

        for (idx, chunk) in chunks.into_iter().enumerate() {
            let mut content = Content::new();
            self.draw_page_header_footer(&mut content, title, subtitle, idx + 1, pages);

            let mut y = self.page_h - self.margin - 46.0;

            Self::fill_rect(&mut content, (0.85, 0.87, 0.90), self.margin, y, table_w, self.row_h);
            self.draw_row(&mut content, y, &col_widths, &header_row, true);
            y -= self.row_h;

            for row in chunk {
                let key = row.first().map(String::as_str);
                if key != last_key {
                    band = !band;
                    last_key = key;
                }
                if band {
                    Self::fill_rect(&mut content, (0.96, 0.96, 0.96), self.margin, y, table_w, self.row_h);
                }

                self.draw_row(&mut content, y, &col_widths, row, false);
                y -= self.row_h;
            }

            self.push_page(content);
        }
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .count(self.page_refs.len() as i32)
            .kids(self.page_refs.iter().copied());

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_latin_text_is_replaced() {
        assert_eq!(to_pdf_bytes("Café → Zoo"), b"Caf\xe9 > Zoo".to_vec());
        assert_eq!(to_pdf_bytes("東京"), b"??".to_vec());
    }

    #[test]
    fn long_cells_are_truncated() {
        let s = PdfManager::fit(&"x".repeat(100), 60.0, 8.5);
        assert!(s.chars().count() < 100);
        assert!(s.ends_with('…'));
        assert_eq!(PdfManager::fit("09:00", 60.0, 8.5), "09:00");
    }

    #[test]
    fn produces_a_pdf_document() {
        let mut pdf = PdfManager::new();
        let rows: Vec<Vec<String>> = (0..60)
            .map(|i| vec![format!("2025-06-{:02}", 1 + i / 10), format!("row {}", i)])
            .collect();
        pdf.write_table("Itinerary", "Visit", &["date", "title"], &rows);
        assert!(pdf.page_refs.len() >= 2);

        let path = std::env::temp_dir().join(format!("ritinerary_pdf_{}.pdf", std::process::id()));
        pdf.save(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        let _ = std::fs::remove_file(path);
    }
}
