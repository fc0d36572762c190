//! Range operations over `sheetwright-model` documents.
//!
//! A [`Range`] addresses a block of cells, a row, or a column on one
//! worksheet and applies styling and values to everything it covers. Style
//! changes cascade through the document stylesheet's interning tables:
//! elements that shared a format before an operation still share one after
//! it, so bulk formatting stays deduplicated.

mod apply;
mod autofit;
mod error;
mod merge;
mod range;
mod style_ops;
mod values;

pub use autofit::FontMetrics;
#[cfg(feature = "system-fonts")]
pub use autofit::SystemFontMetrics;
pub use error::{AutoFitError, RangeError};
pub use range::{Range, RangeKind};
pub use style_ops::{AlignmentUpdate, BorderEdgeUpdate, BorderUpdate, FontUpdate};
