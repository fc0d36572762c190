use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::address::{cell_reference, parse_reference, reference_order};
use crate::value::CellValue;

/// Width assigned to a column that has not been given an explicit one.
pub const DEFAULT_COLUMN_WIDTH: f64 = 8.0;

/// A single cell. The reference string is canonical (`A1`, `AA27`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<CellValue>,
}

impl Cell {
    /// The 1-based row of this cell's reference.
    pub fn row(&self) -> Option<u32> {
        parse_reference(&self.reference).map(|(row, _)| row)
    }

    /// The 1-based column of this cell's reference.
    pub fn column(&self) -> Option<u32> {
        parse_reference(&self.reference).map(|(_, col)| col)
    }
}

/// A row of cells, kept sorted by reference order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_index: Option<u32>,
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Row {
    fn new(index: u32) -> Self {
        Self {
            index,
            style_index: None,
            cells: Vec::new(),
        }
    }

    /// Position of the cell at 1-based `col`, if present.
    pub fn cell_position(&self, col: u32) -> Option<usize> {
        let reference = cell_reference(self.index, col);
        self.cells
            .binary_search_by(|cell| reference_order(&cell.reference, &reference))
            .ok()
    }

    pub fn find_cell(&self, col: u32) -> Option<&Cell> {
        self.cell_position(col).map(|pos| &self.cells[pos])
    }
}

/// A column definition covering the 1-based interval `[min, max]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub min: u32,
    pub max: u32,
    pub width: f64,
    #[serde(default)]
    pub custom_width: bool,
    #[serde(default)]
    pub best_fit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_index: Option<u32>,
}

impl Column {
    fn new(min: u32, max: u32) -> Self {
        Self {
            min,
            max,
            width: DEFAULT_COLUMN_WIDTH,
            custom_width: false,
            best_fit: false,
            style_index: None,
        }
    }
}

/// A hyperlink anchored at a cell. Only the target string is recorded;
/// resolving it is a packaging concern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperlink {
    pub reference: String,
    pub location: String,
}

/// One worksheet: rows sorted ascending by index, cells within each row
/// sorted by reference order, plus column definitions, merge records, and
/// hyperlinks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub merged_cells: Vec<String>,
    #[serde(default)]
    pub hyperlinks: Vec<Hyperlink>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            merged_cells: Vec::new(),
            hyperlinks: Vec::new(),
        }
    }

    /// Get or create the row at 1-based `index`, returning its position.
    /// Creation inserts in order; reading back existing rows never moves them.
    pub fn row_entry(&mut self, index: u32) -> usize {
        assert!(index >= 1, "row indices are 1-based");
        let pos = self.rows.partition_point(|row| row.index < index);
        if self.rows.get(pos).map(|row| row.index) != Some(index) {
            self.rows.insert(pos, Row::new(index));
        }
        pos
    }

    pub fn row_mut(&mut self, index: u32) -> &mut Row {
        let pos = self.row_entry(index);
        &mut self.rows[pos]
    }

    pub fn find_row(&self, index: u32) -> Option<&Row> {
        self.rows
            .binary_search_by(|row| row.index.cmp(&index))
            .ok()
            .map(|pos| &self.rows[pos])
    }

    /// Get or create the cell at 1-based `(row, col)`, returning its row and
    /// cell positions.
    ///
    /// A freshly created cell inherits its style index from the first column
    /// definition covering `col` that declares one, else from the row.
    pub fn cell_entry(&mut self, row: u32, col: u32) -> (usize, usize) {
        assert!(col >= 1, "column indices are 1-based");
        let column_style = self.column_style(col);
        let row_pos = self.row_entry(row);
        let row_ref = &mut self.rows[row_pos];
        let reference = cell_reference(row, col);
        let cell_pos = row_ref
            .cells
            .partition_point(|cell| reference_order(&cell.reference, &reference) == Ordering::Less);
        let exists = row_ref
            .cells
            .get(cell_pos)
            .is_some_and(|cell| cell.reference == reference);
        if !exists {
            let style_index = column_style.or(row_ref.style_index);
            row_ref.cells.insert(
                cell_pos,
                Cell {
                    reference,
                    style_index,
                    value: None,
                },
            );
        }
        (row_pos, cell_pos)
    }

    pub fn cell_mut(&mut self, row: u32, col: u32) -> &mut Cell {
        let (row_pos, cell_pos) = self.cell_entry(row, col);
        &mut self.rows[row_pos].cells[cell_pos]
    }

    pub fn find_cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.find_row(row).and_then(|r| r.find_cell(col))
    }

    pub fn find_cell_position(&self, row: u32, col: u32) -> Option<(usize, usize)> {
        let row_pos = self.rows.binary_search_by(|r| r.index.cmp(&row)).ok()?;
        let cell_pos = self.rows[row_pos].cell_position(col)?;
        Some((row_pos, cell_pos))
    }

    /// Get or create the column definition for exactly `[min, max]`,
    /// returning its position. Overlapping definitions are left alone.
    pub fn column_entry(&mut self, min: u32, max: u32) -> usize {
        assert!(min >= 1 && min <= max, "column intervals are 1-based and ordered");
        if let Some(pos) = self
            .columns
            .iter()
            .position(|c| c.min == min && c.max == max)
        {
            return pos;
        }
        self.columns.push(Column::new(min, max));
        self.columns.len() - 1
    }

    pub fn column_mut(&mut self, min: u32, max: u32) -> &mut Column {
        let pos = self.column_entry(min, max);
        &mut self.columns[pos]
    }

    /// Cells of one 1-based column, in ascending row order.
    pub fn cells_in_column(&self, col: u32) -> impl Iterator<Item = &Cell> {
        self.rows.iter().filter_map(move |row| row.find_cell(col))
    }

    /// Style declared by the first column definition covering `col`, if any.
    pub fn column_style(&self, col: u32) -> Option<u32> {
        self.columns
            .iter()
            .find(|c| c.min <= col && col <= c.max && c.style_index.is_some())
            .and_then(|c| c.style_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rows_stay_sorted_under_out_of_order_creation() {
        let mut ws = Worksheet::new("Sheet1");
        ws.row_entry(5);
        ws.row_entry(2);
        ws.row_entry(9);
        ws.row_entry(2);
        let indices: Vec<u32> = ws.rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![2, 5, 9]);
    }

    #[test]
    fn cells_stay_sorted_by_reference_order() {
        let mut ws = Worksheet::new("Sheet1");
        ws.cell_entry(1, 28); // AB1
        ws.cell_entry(1, 2); // B1
        ws.cell_entry(1, 27); // AA1
        ws.cell_entry(1, 2);
        let refs: Vec<&str> = ws.rows[0].cells.iter().map(|c| c.reference.as_str()).collect();
        assert_eq!(refs, vec!["B1", "AA1", "AB1"]);
    }

    #[test]
    fn new_cell_inherits_column_style_over_row_style() {
        let mut ws = Worksheet::new("Sheet1");
        ws.column_mut(2, 4).style_index = Some(7);
        ws.row_mut(1).style_index = Some(3);

        assert_eq!(ws.cell_mut(1, 3).style_index, Some(7));
        assert_eq!(ws.cell_mut(1, 9).style_index, Some(3));

        // An existing cell keeps its style.
        ws.cell_mut(1, 3).style_index = Some(11);
        assert_eq!(ws.cell_mut(1, 3).style_index, Some(11));
    }

    #[test]
    fn uncovered_column_without_style_is_skipped() {
        let mut ws = Worksheet::new("Sheet1");
        ws.column_entry(1, 5);
        ws.column_mut(2, 3).style_index = Some(4);
        // The first covering column has no style, so the styled one wins.
        assert_eq!(ws.column_style(2), Some(4));
        assert_eq!(ws.column_style(5), None);
    }

    #[test]
    fn column_entry_matches_exact_intervals_only() {
        let mut ws = Worksheet::new("Sheet1");
        let a = ws.column_entry(1, 3);
        let b = ws.column_entry(1, 3);
        let c = ws.column_entry(2, 3);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(ws.columns[a].width, DEFAULT_COLUMN_WIDTH);
        assert!(!ws.columns[a].custom_width);
    }
}
