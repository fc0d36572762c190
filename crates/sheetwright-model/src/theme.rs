use serde::{Deserialize, Serialize};

use crate::style::Color;

/// Workbook theme attributes the styling layer consults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Theme {
    /// Hyperlink accent color from the theme palette, if one is defined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hyperlink_color: Option<Color>,
}
