use sheetwright_model::Value;

use crate::range::{Range, RangeKind};

impl Range<'_> {
    /// Write the same value into every addressable cell of the range.
    /// Unbounded axes collapse to a single row or column.
    pub fn set_value(&mut self, value: impl Into<Value>) {
        let value = value.into();
        let rows = self.row_count().unwrap_or(1) as usize;
        let cols = self.col_count().unwrap_or(1) as usize;
        let grid = vec![vec![value; cols]; rows];
        self.set_values_2d(&grid);
    }

    /// Write a one-dimensional run of values, repeated for each covered row.
    /// On a Column range the run goes down the column instead.
    pub fn set_values(&mut self, values: &[Value]) {
        let rows = self.row_count().unwrap_or(1) as usize;
        let grid = vec![values.to_vec(); rows];
        self.set_values_2d(&grid);
    }

    /// Write a two-dimensional grid of values, anchored at the range start.
    ///
    /// Cell blocks clamp the input to their bounds; a Row range takes the
    /// first input row at full width, a Column range transposes the first
    /// input row down the column. Empty text entries are skipped, leaving
    /// those cells untouched.
    pub fn set_values_2d(&mut self, values: &[Vec<Value>]) {
        let start_row = self.start_row();
        let start_col = self.start_col();
        let sheet = self.sheet;
        match self.kind {
            RangeKind::Column { .. } => {
                if let Some(run) = values.first() {
                    for (i, value) in run.iter().enumerate() {
                        self.doc
                            .set_cell_value(sheet, start_row + i as u32, start_col, value.clone());
                    }
                }
            }
            RangeKind::Row { .. } => {
                if let Some(run) = values.first() {
                    for (j, value) in run.iter().enumerate() {
                        self.doc
                            .set_cell_value(sheet, start_row, start_col + j as u32, value.clone());
                    }
                }
            }
            RangeKind::Cells {
                row_count,
                col_count,
                ..
            } => {
                for (i, row_values) in values.iter().take(row_count as usize).enumerate() {
                    for (j, value) in row_values.iter().take(col_count as usize).enumerate() {
                        self.doc.set_cell_value(
                            sheet,
                            start_row + i as u32,
                            start_col + j as u32,
                            value.clone(),
                        );
                    }
                }
            }
        }
    }
}
