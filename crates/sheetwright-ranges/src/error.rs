use thiserror::Error;

/// Errors from range construction.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("a range needs a row extent, a column extent, or both")]
    Unbounded,
    #[error("range starts and counts are 1-based and must be at least 1")]
    ZeroExtent,
    #[error("worksheet index {0} is out of range")]
    SheetOutOfRange(usize),
}

/// Auto-fit could not resolve a measurable font for a cell or column.
///
/// Carries enough to tell *which* column on *which* sheet failed; the batch
/// stops at the first unresolvable cell.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot determine a measurable font for column {column} on sheet {worksheet:?}")]
pub struct AutoFitError {
    pub worksheet: String,
    pub column: u32,
}
