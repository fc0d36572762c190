use serde::{Deserialize, Serialize};

use crate::address::cell_reference;
use crate::shared_strings::SharedStrings;
use crate::style::CellFormat;
use crate::stylesheet::{BuiltinCellStyle, Stylesheet};
use crate::theme::Theme;
use crate::value::{CellValue, Value};
use crate::worksheet::{Hyperlink, Worksheet};

/// Errors from worksheet collection operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("worksheet name {0:?} is already in use")]
    DuplicateSheetName(String),
    #[error("worksheet index {0} is out of range")]
    SheetOutOfRange(usize),
}

/// A spreadsheet document: worksheets plus the lazily created stylesheet and
/// shared string table.
///
/// Sheet-addressed methods take a sheet position and panic when it is out of
/// range; the range layer validates positions at construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    pub sheets: Vec<Worksheet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<Stylesheet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_strings: Option<SharedStrings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl Document {
    /// A usable new document: one default worksheet, no styling parts yet.
    pub fn new() -> Self {
        Self {
            sheets: vec![Worksheet::new("Sheet1")],
            stylesheet: None,
            shared_strings: None,
            theme: None,
        }
    }

    /// Append a worksheet. With no name, picks the first free `Sheet{n}`.
    pub fn add_sheet(&mut self, name: Option<&str>) -> Result<usize, DocumentError> {
        let name = match name {
            Some(requested) => {
                if self.sheet_by_name(requested).is_some() {
                    return Err(DocumentError::DuplicateSheetName(requested.to_string()));
                }
                requested.to_string()
            }
            None => {
                let mut n = self.sheets.len() + 1;
                loop {
                    let candidate = format!("Sheet{n}");
                    if self.sheet_by_name(&candidate).is_none() {
                        break candidate;
                    }
                    n += 1;
                }
            }
        };
        self.sheets.push(Worksheet::new(name));
        Ok(self.sheets.len() - 1)
    }

    pub fn remove_sheet(&mut self, index: usize) -> Result<Worksheet, DocumentError> {
        if index >= self.sheets.len() {
            return Err(DocumentError::SheetOutOfRange(index));
        }
        Ok(self.sheets.remove(index))
    }

    pub fn sheet(&self, index: usize) -> Option<&Worksheet> {
        self.sheets.get(index)
    }

    pub fn sheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.sheets.get_mut(index)
    }

    pub fn sheet_by_name(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|sheet| sheet.name == name)
    }

    /// The stylesheet, created with its baseline contents on first use.
    pub fn styles_mut(&mut self) -> &mut Stylesheet {
        self.stylesheet.get_or_insert_with(Stylesheet::new)
    }

    /// The shared string table, created empty on first use.
    pub fn shared_strings_mut(&mut self) -> &mut SharedStrings {
        self.shared_strings.get_or_insert_with(SharedStrings::default)
    }

    /// Make sure a builtin style exists, threading the document theme through
    /// to its synthesis. Returns the style's format id.
    pub fn ensure_cell_style(&mut self, style: BuiltinCellStyle) -> u32 {
        let theme = self.theme.as_ref();
        let styles = self.stylesheet.get_or_insert_with(Stylesheet::new);
        styles.ensure_named_style(style, theme)
    }

    /// Merge a builtin style into an existing format.
    pub fn apply_cell_style(&mut self, format: &mut CellFormat, style: BuiltinCellStyle) {
        let theme = self.theme.as_ref();
        let styles = self.stylesheet.get_or_insert_with(Stylesheet::new);
        styles.apply_named_style(format, style, theme);
    }

    /// Restyle one cell with a builtin style: template from the cell's current
    /// format, merge the style in, intern, repoint.
    pub fn apply_cell_style_at(&mut self, sheet: usize, row: u32, col: u32, style: BuiltinCellStyle) {
        let (row_pos, cell_pos) = self.sheets[sheet].cell_entry(row, col);
        let current = self.sheets[sheet].rows[row_pos].cells[cell_pos].style_index;
        let mut format = self.styles_mut().format_template(current);
        self.apply_cell_style(&mut format, style);
        let index = self.styles_mut().cell_formats.intern(format);
        self.sheets[sheet].rows[row_pos].cells[cell_pos].style_index = Some(index);
    }

    /// Write one cell. Text goes through the shared string table; overwriting
    /// a stored string releases the old entry if nothing references it
    /// anymore. Empty text is a no-op.
    pub fn set_cell_value(&mut self, sheet: usize, row: u32, col: u32, value: impl Into<Value>) {
        let stored = match value.into() {
            Value::Number(n) => CellValue::Number(n),
            Value::Bool(b) => CellValue::Boolean(b),
            Value::Text(text) => {
                if text.is_empty() {
                    return;
                }
                CellValue::SharedText(self.shared_strings_mut().intern(text))
            }
        };
        let (row_pos, cell_pos) = self.sheets[sheet].cell_entry(row, col);
        let cell = &mut self.sheets[sheet].rows[row_pos].cells[cell_pos];
        let old = cell.value.replace(stored.clone());
        if let Some(CellValue::SharedText(old_index)) = old {
            if stored != CellValue::SharedText(old_index) {
                self.release_shared_string(old_index);
            }
        }
    }

    /// Clear a cell's value if the cell exists, releasing a stored string.
    pub fn clear_cell_value(&mut self, sheet: usize, row: u32, col: u32) {
        let Some((row_pos, cell_pos)) = self.sheets[sheet].find_cell_position(row, col) else {
            return;
        };
        let old = self.sheets[sheet].rows[row_pos].cells[cell_pos].value.take();
        if let Some(CellValue::SharedText(old_index)) = old {
            self.release_shared_string(old_index);
        }
    }

    /// Drop a shared string entry once no cell on any sheet references it,
    /// shifting every reference above the removed index down by one.
    pub fn release_shared_string(&mut self, index: u32) {
        let referenced = self.sheets.iter().any(|sheet| {
            sheet.rows.iter().any(|row| {
                row.cells
                    .iter()
                    .any(|cell| cell.value == Some(CellValue::SharedText(index)))
            })
        });
        if referenced {
            return;
        }
        let Some(strings) = self.shared_strings.as_mut() else {
            return;
        };
        if strings.remove(index).is_none() {
            return;
        }
        for sheet in &mut self.sheets {
            for row in &mut sheet.rows {
                for cell in &mut row.cells {
                    if let Some(CellValue::SharedText(i)) = &mut cell.value {
                        if *i > index {
                            *i -= 1;
                        }
                    }
                }
            }
        }
    }

    /// Register a hyperlink at a cell and give the cell the Hyperlink style.
    /// A second link at the same cell replaces the first's target.
    pub fn add_hyperlink(&mut self, sheet: usize, row: u32, col: u32, location: impl Into<String>) {
        self.sheets[sheet].cell_entry(row, col);
        self.apply_cell_style_at(sheet, row, col, BuiltinCellStyle::Hyperlink);
        let reference = cell_reference(row, col);
        let links = &mut self.sheets[sheet].hyperlinks;
        match links.iter_mut().find(|link| link.reference == reference) {
            Some(existing) => existing.location = location.into(),
            None => links.push(Hyperlink {
                reference,
                location: location.into(),
            }),
        }
    }

    /// Text a value renders as, resolving shared strings.
    pub fn display_text(&self, value: &CellValue) -> String {
        match value {
            CellValue::Number(n) => n.to_string(),
            CellValue::Boolean(true) => "TRUE".to_string(),
            CellValue::Boolean(false) => "FALSE".to_string(),
            CellValue::SharedText(index) => self
                .shared_strings
                .as_ref()
                .and_then(|strings| strings.get(*index))
                .cloned()
                .unwrap_or_default(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_document_has_one_default_sheet() {
        let doc = Document::new();
        assert_eq!(doc.sheets.len(), 1);
        assert_eq!(doc.sheets[0].name, "Sheet1");
        assert!(doc.stylesheet.is_none());
        assert!(doc.shared_strings.is_none());
    }

    #[test]
    fn auto_names_skip_collisions() {
        let mut doc = Document::new();
        doc.add_sheet(Some("Sheet2")).expect("add named");
        let index = doc.add_sheet(None).expect("add auto");
        assert_eq!(doc.sheets[index].name, "Sheet3");
        assert_eq!(
            doc.add_sheet(Some("Sheet2")),
            Err(DocumentError::DuplicateSheetName("Sheet2".to_string()))
        );
    }

    #[test]
    fn remove_sheet_checks_bounds() {
        let mut doc = Document::new();
        assert_eq!(doc.remove_sheet(5), Err(DocumentError::SheetOutOfRange(5)));
        let removed = doc.remove_sheet(0).expect("remove");
        assert_eq!(removed.name, "Sheet1");
        assert!(doc.sheets.is_empty());
    }

    #[test]
    fn text_values_are_interned_once() {
        let mut doc = Document::new();
        doc.set_cell_value(0, 1, 1, "total");
        doc.set_cell_value(0, 2, 1, "total");
        doc.set_cell_value(0, 3, 1, "other");
        let strings = doc.shared_strings.as_ref().expect("strings");
        assert_eq!(strings.count(), 2);
    }

    #[test]
    fn empty_text_is_skipped() {
        let mut doc = Document::new();
        doc.set_cell_value(0, 1, 1, "");
        assert!(doc.shared_strings.is_none());
        assert!(doc.sheets[0].rows.is_empty());
    }

    #[test]
    fn overwriting_last_reference_releases_and_shifts() {
        let mut doc = Document::new();
        doc.set_cell_value(0, 1, 1, "first");
        doc.set_cell_value(0, 1, 2, "second");
        doc.set_cell_value(0, 2, 1, "second");

        // "first" is only referenced once; overwriting drops it and shifts
        // every other index down.
        doc.set_cell_value(0, 1, 1, 42.0);
        let strings = doc.shared_strings.as_ref().expect("strings");
        assert_eq!(strings.count(), 1);
        assert_eq!(strings.get(0), Some(&"second".to_string()));
        assert_eq!(
            doc.sheets[0].find_cell(1, 2).and_then(|c| c.value.clone()),
            Some(CellValue::SharedText(0))
        );
        assert_eq!(
            doc.sheets[0].find_cell(2, 1).and_then(|c| c.value.clone()),
            Some(CellValue::SharedText(0))
        );
    }

    #[test]
    fn shared_entry_survives_while_still_referenced() {
        let mut doc = Document::new();
        doc.set_cell_value(0, 1, 1, "shared");
        doc.set_cell_value(0, 2, 1, "shared");
        doc.clear_cell_value(0, 1, 1);
        let strings = doc.shared_strings.as_ref().expect("strings");
        assert_eq!(strings.count(), 1);
        doc.clear_cell_value(0, 2, 1);
        assert_eq!(doc.shared_strings.as_ref().expect("strings").count(), 0);
    }

    #[test]
    fn rewriting_same_text_keeps_the_entry() {
        let mut doc = Document::new();
        doc.set_cell_value(0, 1, 1, "same");
        doc.set_cell_value(0, 1, 1, "same");
        assert_eq!(doc.shared_strings.as_ref().expect("strings").count(), 1);
    }

    #[test]
    fn hyperlink_registers_and_styles_the_cell() {
        let mut doc = Document::new();
        doc.add_hyperlink(0, 1, 1, "https://example.com");
        assert_eq!(
            doc.sheets[0].hyperlinks,
            vec![Hyperlink {
                reference: "A1".to_string(),
                location: "https://example.com".to_string(),
            }]
        );
        let cell = doc.sheets[0].find_cell(1, 1).expect("cell");
        let style_index = cell.style_index.expect("styled");
        let styles = doc.stylesheet.as_ref().expect("stylesheet");
        let format = &styles.cell_formats[style_index];
        let font = &styles.fonts[format.font_id.expect("font id")];
        assert!(font.underline);

        // Re-linking the same cell replaces the target.
        doc.add_hyperlink(0, 1, 1, "https://example.org");
        assert_eq!(doc.sheets[0].hyperlinks.len(), 1);
        assert_eq!(doc.sheets[0].hyperlinks[0].location, "https://example.org");
    }

    #[test]
    fn display_text_resolves_values() {
        let mut doc = Document::new();
        doc.set_cell_value(0, 1, 1, "label");
        assert_eq!(doc.display_text(&CellValue::Number(1.5)), "1.5");
        assert_eq!(doc.display_text(&CellValue::Boolean(true)), "TRUE");
        assert_eq!(doc.display_text(&CellValue::SharedText(0)), "label");
    }
}
