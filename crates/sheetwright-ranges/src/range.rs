use sheetwright_model::Document;

use crate::error::RangeError;

/// What a range covers, inferred from which extents were supplied at
/// construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RangeKind {
    /// A rectangular block of cells.
    Cells {
        start_row: u32,
        start_col: u32,
        row_count: u32,
        col_count: u32,
    },
    /// One whole row: its existing cells plus the row record itself.
    Row { index: u32 },
    /// One whole column: its existing cells plus the column record itself.
    Column { index: u32 },
}

/// A consecutive run of cells, a row, or a column on one worksheet.
///
/// Construction only validates; rows, cells, and column records are written
/// into the sheet lazily, when an operation actually needs them.
#[derive(Debug)]
pub struct Range<'a> {
    pub(crate) doc: &'a mut Document,
    pub(crate) sheet: usize,
    pub(crate) kind: RangeKind,
}

/// A positional handle to one covered sheet element.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Element {
    Cell { row_pos: usize, cell_pos: usize },
    Row { row_pos: usize },
    Column { col_pos: usize },
}

impl<'a> Range<'a> {
    /// Build a range from optional `(start, count)` pairs, both 1-based.
    /// Both pairs make a cell block, rows alone a Row range, columns alone a
    /// Column range; supplying neither, or any zero, is an error.
    pub fn new(
        doc: &'a mut Document,
        sheet: usize,
        rows: Option<(u32, u32)>,
        cols: Option<(u32, u32)>,
    ) -> Result<Self, RangeError> {
        if sheet >= doc.sheets.len() {
            return Err(RangeError::SheetOutOfRange(sheet));
        }
        let kind = match (rows, cols) {
            (None, None) => return Err(RangeError::Unbounded),
            (Some((start_row, row_count)), Some((start_col, col_count))) => {
                if start_row == 0 || row_count == 0 || start_col == 0 || col_count == 0 {
                    return Err(RangeError::ZeroExtent);
                }
                RangeKind::Cells {
                    start_row,
                    start_col,
                    row_count,
                    col_count,
                }
            }
            (Some((index, count)), None) => {
                if index == 0 || count == 0 {
                    return Err(RangeError::ZeroExtent);
                }
                RangeKind::Row { index }
            }
            (None, Some((index, count))) => {
                if index == 0 || count == 0 {
                    return Err(RangeError::ZeroExtent);
                }
                RangeKind::Column { index }
            }
        };
        Ok(Self { doc, sheet, kind })
    }

    /// A rectangular block of cells.
    pub fn cells(
        doc: &'a mut Document,
        sheet: usize,
        start_row: u32,
        start_col: u32,
        row_count: u32,
        col_count: u32,
    ) -> Result<Self, RangeError> {
        Self::new(
            doc,
            sheet,
            Some((start_row, row_count)),
            Some((start_col, col_count)),
        )
    }

    /// A single cell.
    pub fn cell(doc: &'a mut Document, sheet: usize, row: u32, col: u32) -> Result<Self, RangeError> {
        Self::cells(doc, sheet, row, col, 1, 1)
    }

    /// One whole row.
    pub fn row(doc: &'a mut Document, sheet: usize, index: u32) -> Result<Self, RangeError> {
        Self::new(doc, sheet, Some((index, 1)), None)
    }

    /// One whole column.
    pub fn column(doc: &'a mut Document, sheet: usize, index: u32) -> Result<Self, RangeError> {
        Self::new(doc, sheet, None, Some((index, 1)))
    }

    pub fn kind(&self) -> RangeKind {
        self.kind
    }

    /// First covered row; unbounded axes anchor at 1.
    pub(crate) fn start_row(&self) -> u32 {
        match self.kind {
            RangeKind::Cells { start_row, .. } => start_row,
            RangeKind::Row { index } => index,
            RangeKind::Column { .. } => 1,
        }
    }

    /// First covered column; unbounded axes anchor at 1.
    pub(crate) fn start_col(&self) -> u32 {
        match self.kind {
            RangeKind::Cells { start_col, .. } => start_col,
            RangeKind::Row { .. } => 1,
            RangeKind::Column { index } => index,
        }
    }

    /// Row extent, `None` when unbounded (Column ranges).
    pub(crate) fn row_count(&self) -> Option<u32> {
        match self.kind {
            RangeKind::Cells { row_count, .. } => Some(row_count),
            RangeKind::Row { .. } => Some(1),
            RangeKind::Column { .. } => None,
        }
    }

    /// Column extent, `None` when unbounded (Row ranges).
    pub(crate) fn col_count(&self) -> Option<u32> {
        match self.kind {
            RangeKind::Cells { col_count, .. } => Some(col_count),
            RangeKind::Row { .. } => None,
            RangeKind::Column { .. } => Some(1),
        }
    }

    /// Resolve the covered elements into positional handles, creating missing
    /// rows, cells, and column records as needed.
    ///
    /// Cell blocks materialize every covered cell, row-major. Row and Column
    /// ranges pick up only the cells that already exist, then append the row
    /// or column record itself.
    pub(crate) fn materialize(&mut self) -> Vec<Element> {
        let ws = &mut self.doc.sheets[self.sheet];
        let mut elements = Vec::new();
        match self.kind {
            RangeKind::Cells {
                start_row,
                start_col,
                row_count,
                col_count,
            } => {
                // Ascending creation order keeps earlier positions stable as
                // later rows and cells are inserted.
                for row in start_row..start_row + row_count {
                    for col in start_col..start_col + col_count {
                        let (row_pos, cell_pos) = ws.cell_entry(row, col);
                        elements.push(Element::Cell { row_pos, cell_pos });
                    }
                }
            }
            RangeKind::Row { index } => {
                let row_pos = ws.row_entry(index);
                for cell_pos in 0..ws.rows[row_pos].cells.len() {
                    elements.push(Element::Cell { row_pos, cell_pos });
                }
                elements.push(Element::Row { row_pos });
            }
            RangeKind::Column { index } => {
                let col_pos = ws.column_entry(index, index);
                for (row_pos, row) in ws.rows.iter().enumerate() {
                    if let Some(cell_pos) = row.cell_position(index) {
                        elements.push(Element::Cell { row_pos, cell_pos });
                    }
                }
                elements.push(Element::Column { col_pos });
            }
        }
        elements
    }

    pub(crate) fn element_style(&self, element: &Element) -> Option<u32> {
        let ws = &self.doc.sheets[self.sheet];
        match *element {
            Element::Cell { row_pos, cell_pos } => ws.rows[row_pos].cells[cell_pos].style_index,
            Element::Row { row_pos } => ws.rows[row_pos].style_index,
            Element::Column { col_pos } => ws.columns[col_pos].style_index,
        }
    }

    pub(crate) fn set_element_style(&mut self, element: &Element, index: u32) {
        let ws = &mut self.doc.sheets[self.sheet];
        match *element {
            Element::Cell { row_pos, cell_pos } => {
                ws.rows[row_pos].cells[cell_pos].style_index = Some(index);
            }
            Element::Row { row_pos } => ws.rows[row_pos].style_index = Some(index),
            Element::Column { col_pos } => ws.columns[col_pos].style_index = Some(index),
        }
    }
}
