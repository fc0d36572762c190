//! In-memory spreadsheet document model.
//!
//! The centerpiece is the [`Stylesheet`]: six ordered tables (fonts, fills,
//! borders, two cell format tables, named styles) that deduplicate by
//! structural equality, so formatting many cells the same way costs one table
//! entry. [`Document`] ties the stylesheet and shared string table to a set of
//! [`Worksheet`] grids; the companion `sheetwright-ranges` crate layers range
//! operations on top.

pub mod address;
pub mod document;
pub mod intern;
pub mod shared_strings;
pub mod style;
pub mod stylesheet;
pub mod theme;
pub mod value;
pub mod worksheet;

pub use address::{
    cell_reference, column_index, column_letter, parse_reference, reference_column,
    reference_order, reference_row,
};
pub use document::{Document, DocumentError};
pub use intern::InternTable;
pub use shared_strings::SharedStrings;
pub use style::{
    Alignment, Border, BorderEdge, BorderLineStyle, CellFormat, CellStyle, Color, Fill, Font,
    GradientFill, GradientKind, HorizontalAlignment, PatternFill, PatternKind, Protection,
    VerticalAlignment,
};
pub use stylesheet::{BuiltinCellStyle, Stylesheet};
pub use theme::Theme;
pub use value::{CellValue, Value};
pub use worksheet::{Cell, Column, Hyperlink, Row, Worksheet, DEFAULT_COLUMN_WIDTH};
