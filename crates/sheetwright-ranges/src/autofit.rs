use sheetwright_model::Font;

use crate::error::AutoFitError;
use crate::range::{Range, RangeKind};

/// Pixel padding added to the widest cell, matching the spreadsheet UI's
/// cell inset.
const CELL_PADDING_PX: f64 = 5.0;

/// Source of glyph advance widths for auto-fit.
///
/// Widths are in pixels at 96 DPI. `None` means the family or the glyph
/// cannot be measured, which auto-fit reports as an error for the column
/// being fitted.
pub trait FontMetrics {
    fn char_width(&self, family: &str, size_pt: f64, ch: char) -> Option<f64>;
}

fn font_name_size(font: &Font) -> Option<(&str, f64)> {
    Some((font.name.as_deref()?, font.size_pt()?))
}

impl Range<'_> {
    /// Size the covered column to its longest rendered text.
    ///
    /// Only Column ranges fit; other kinds are a no-op. The width is set in
    /// character units of the default font's digit glyph, truncated to 1/256
    /// steps, and the column is marked `custom_width` and `best_fit`. Columns
    /// with no non-empty cells are left alone.
    ///
    /// Each character is measured in the cell's own font when the cell has a
    /// style, else in the default font (the Normal style's font, or the
    /// first font on the stylesheet). A font without a usable name and size
    /// stops the batch with an error naming the sheet and column.
    pub fn auto_fit(&mut self, metrics: &dyn FontMetrics) -> Result<(), AutoFitError> {
        let RangeKind::Column { index } = self.kind else {
            return Ok(());
        };
        let sheet_name = self.doc.sheets[self.sheet].name.clone();
        let col_pos = self.doc.sheets[self.sheet].column_entry(index, index);
        let (min, max) = {
            let column = &self.doc.sheets[self.sheet].columns[col_pos];
            (column.min, column.max)
        };

        // Column width is a multiple of the width of a digit in the default
        // font, so that font has to resolve first.
        let styles = self.doc.styles_mut();
        let normal_font = styles
            .normal_format()
            .map(|(_, format)| format.font_id.unwrap_or_default())
            .map(|font_id| styles.fonts[font_id].clone());
        let default_font = normal_font
            .filter(|font| font_name_size(font).is_some())
            .or_else(|| {
                styles
                    .fonts
                    .first()
                    .cloned()
                    .filter(|font| font_name_size(font).is_some())
            })
            .ok_or_else(|| AutoFitError {
                worksheet: sheet_name.clone(),
                column: min,
            })?;
        let fonts = styles.fonts.clone();
        let cell_formats = styles.cell_formats.clone();
        let Some((default_name, default_size)) = font_name_size(&default_font) else {
            return Err(AutoFitError {
                worksheet: sheet_name,
                column: min,
            });
        };

        // Narrowest and widest character in the default font ('i' and '0').
        let min_char_width = metrics
            .char_width(default_name, default_size, 'i')
            .map(f64::ceil)
            .ok_or_else(|| AutoFitError {
                worksheet: sheet_name.clone(),
                column: min,
            })?;
        let digit_width = metrics
            .char_width(default_name, default_size, '0')
            .map(f64::trunc)
            .filter(|w| *w > 0.0)
            .ok_or_else(|| AutoFitError {
                worksheet: sheet_name.clone(),
                column: min,
            })?;

        let mut fitted: Vec<(u32, f64)> = Vec::new();
        {
            let ws = &self.doc.sheets[self.sheet];
            for col in min..=max {
                let mut max_cell_px = 0f64;
                for cell in ws.cells_in_column(col) {
                    let Some(value) = cell.value.as_ref() else {
                        continue;
                    };
                    let text = self.doc.display_text(value);
                    if text.is_empty() {
                        continue;
                    }
                    let cell_font = match cell.style_index {
                        Some(style_index) => {
                            let font_id = cell_formats[style_index].font_id.unwrap_or_default();
                            &fonts[font_id]
                        }
                        None => &default_font,
                    };
                    let Some((name, size)) = font_name_size(cell_font) else {
                        return Err(AutoFitError {
                            worksheet: sheet_name,
                            column: col,
                        });
                    };

                    // Each character lands on a whole number of pixels, never
                    // narrower than the default font's 'i'.
                    let mut text_px = 0f64;
                    for ch in text.chars() {
                        let width =
                            metrics
                                .char_width(name, size, ch)
                                .ok_or_else(|| AutoFitError {
                                    worksheet: sheet_name.clone(),
                                    column: col,
                                })?;
                        text_px += width.round().max(min_char_width);
                    }
                    max_cell_px = max_cell_px.max(text_px);
                }
                if max_cell_px > 0.0 {
                    let width = ((max_cell_px + CELL_PADDING_PX) / digit_width * 256.0).trunc() / 256.0;
                    fitted.push((col, width));
                }
            }
        }

        let ws = &mut self.doc.sheets[self.sheet];
        for (col, width) in fitted {
            let pos = ws.column_entry(col, col);
            let column = &mut ws.columns[pos];
            column.width = width;
            column.custom_width = true;
            column.best_fit = true;
        }
        Ok(())
    }
}

#[cfg(feature = "system-fonts")]
mod system {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use font_kit::family_name::FamilyName;
    use font_kit::font::Font as LoadedFont;
    use font_kit::properties::Properties;
    use font_kit::source::SystemSource;

    use super::FontMetrics;

    /// Measures glyph advances with fonts installed on the host system.
    /// Loaded fonts are cached per family.
    pub struct SystemFontMetrics {
        source: SystemSource,
        cache: RefCell<HashMap<String, Option<LoadedFont>>>,
    }

    impl SystemFontMetrics {
        pub fn new() -> Self {
            Self {
                source: SystemSource::new(),
                cache: RefCell::new(HashMap::new()),
            }
        }
    }

    impl Default for SystemFontMetrics {
        fn default() -> Self {
            Self::new()
        }
    }

    impl FontMetrics for SystemFontMetrics {
        fn char_width(&self, family: &str, size_pt: f64, ch: char) -> Option<f64> {
            let mut cache = self.cache.borrow_mut();
            let font = cache.entry(family.to_string()).or_insert_with(|| {
                self.source
                    .select_best_match(
                        &[FamilyName::Title(family.to_string())],
                        &Properties::new(),
                    )
                    .ok()
                    .and_then(|handle| handle.load().ok())
            });
            let font = font.as_ref()?;
            let glyph = font.glyph_for_char(ch)?;
            let advance = font.advance(glyph).ok()?;
            let units_per_em = f64::from(font.metrics().units_per_em);
            // Font units to pixels at 96 DPI (1 pt = 4/3 px).
            Some(f64::from(advance.x()) / units_per_em * size_pt * 96.0 / 72.0)
        }
    }
}

#[cfg(feature = "system-fonts")]
pub use system::SystemFontMetrics;
