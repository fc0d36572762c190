use sheetwright_model::{cell_reference, Alignment, HorizontalAlignment};

use crate::range::{Element, Range, RangeKind};

impl Range<'_> {
    /// Merge the covered cells into one, optionally centering the content.
    ///
    /// Only cell blocks of at least two cells merge; other ranges are a
    /// no-op. The merge record (`"A1:B2"`) is registered once no matter how
    /// often this is called, and every cell after the first loses its value.
    /// Centering restyles the first cell and points the rest at its format,
    /// so the block reads as one centered cell.
    pub fn merge_cells(&mut self, center: bool) {
        let RangeKind::Cells {
            start_row,
            start_col,
            row_count,
            col_count,
        } = self.kind
        else {
            return;
        };
        if row_count * col_count < 2 {
            return;
        }

        let elements = self.materialize();

        let first = cell_reference(start_row, start_col);
        let last = cell_reference(start_row + row_count - 1, start_col + col_count - 1);
        let record = format!("{first}:{last}");
        let ws = &mut self.doc.sheets[self.sheet];
        if !ws.merged_cells.iter().any(|existing| *existing == record) {
            ws.merged_cells.push(record);
        }

        if center {
            let current = self.element_style(&elements[0]);
            let styles = self.doc.styles_mut();
            let mut format = styles.format_template(current);
            let alignment = format.alignment.get_or_insert_with(Alignment::default);
            alignment.horizontal = Some(HorizontalAlignment::Center);
            format.apply_alignment = Some(true);
            let index = styles.cell_formats.intern(format);
            for element in &elements {
                self.set_element_style(element, index);
            }
        }

        // Only the anchor cell keeps its contents.
        for element in elements.iter().skip(1) {
            if let Element::Cell { row_pos, cell_pos } = *element {
                let cell = &self.doc.sheets[self.sheet].rows[row_pos].cells[cell_pos];
                if let Some((row, col)) = sheetwright_model::parse_reference(&cell.reference) {
                    self.doc.clear_cell_value(self.sheet, row, col);
                }
            }
        }
    }
}
