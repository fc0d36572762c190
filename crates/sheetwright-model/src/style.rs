use core::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ARGB color.
///
/// Serialized as an 8-digit `AARRGGBB` hex string, the form styling colors
/// take on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub argb: u32,
}

impl Color {
    pub const fn new_argb(argb: u32) -> Self {
        Self { argb }
    }

    /// Build from a 24-bit RGB value with the alpha channel forced opaque.
    pub const fn from_rgb(rgb: u32) -> Self {
        Self {
            argb: 0xFF00_0000 | (rgb & 0x00FF_FFFF),
        }
    }

    pub const fn black() -> Self {
        Self { argb: 0xFF000000 }
    }

    pub const fn white() -> Self {
        Self { argb: 0xFFFFFFFF }
    }

    fn to_hex(self) -> String {
        format!("{:08X}", self.argb)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 8 {
            return Err(D::Error::custom(
                "color must be an AARRGGBB hex string (8 hex digits)",
            ));
        }
        let argb = u32::from_str_radix(hex, 16).map_err(|_| D::Error::custom("invalid hex"))?;
        Ok(Color { argb })
    }
}

/// Font formatting.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Font {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Font size in 1/100 points (e.g. 1100 = 11pt).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_100pt: Option<u32>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl Font {
    pub fn size_pt(&self) -> Option<f64> {
        self.size_100pt.map(|size| f64::from(size) / 100.0)
    }

    pub fn set_size_pt(&mut self, points: f64) {
        self.size_100pt = Some((points * 100.0).round() as u32);
    }
}

/// Pattern kinds for pattern fills.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    None,
    Solid,
    MediumGray,
    DarkGray,
    LightGray,
    DarkHorizontal,
    DarkVertical,
    DarkDown,
    DarkUp,
    DarkGrid,
    DarkTrellis,
    LightHorizontal,
    LightVertical,
    LightDown,
    LightUp,
    LightGrid,
    LightTrellis,
    Gray125,
    Gray0625,
}

impl Default for PatternKind {
    fn default() -> Self {
        PatternKind::None
    }
}

/// A patterned fill, the common case.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PatternFill {
    #[serde(default)]
    pub pattern: PatternKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
}

/// Direction of a two-color gradient. The `Center` variants transition to the
/// end color at the midpoint and back again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKind {
    Vertical,
    VerticalCenter,
    Horizontal,
    HorizontalCenter,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GradientFill {
    pub kind: GradientKind,
    pub start: Color,
    pub end: Color,
}

/// Fill (background) formatting.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    Pattern(PatternFill),
    Gradient(GradientFill),
}

impl Fill {
    /// The blank fill every stylesheet starts with.
    pub fn none() -> Self {
        Fill::Pattern(PatternFill::default())
    }

    /// The second mandatory stylesheet fill.
    pub fn gray125() -> Self {
        Fill::Pattern(PatternFill {
            pattern: PatternKind::Gray125,
            ..PatternFill::default()
        })
    }
}

impl Default for Fill {
    fn default() -> Self {
        Fill::none()
    }
}

/// Border line style.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderLineStyle {
    Hair,
    Thin,
    Medium,
    Thick,
    Dotted,
    Dashed,
    DashDot,
    DashDotDot,
    Double,
    MediumDashed,
    MediumDashDot,
    MediumDashDotDot,
    SlantDashDot,
}

/// One side of a border. An absent edge means "leave whatever is there".
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct BorderEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<BorderLineStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// Border formatting.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Border {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<BorderEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<BorderEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<BorderEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<BorderEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagonal: Option<BorderEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagonal_up: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagonal_down: Option<bool>,
}

/// Horizontal alignment options.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlignment {
    General,
    Left,
    Center,
    CenterContinuous,
    Right,
    Fill,
    Justify,
    Distributed,
}

/// Vertical alignment options.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
    Justify,
    Distributed,
}

/// Alignment formatting carried inline on a cell format.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Alignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<HorizontalAlignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<VerticalAlignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap_text: Option<bool>,
}

/// Protection formatting carried inline on a cell format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Protection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

/// A cell format record: indices into the fragment tables plus inline
/// alignment/protection and the per-category apply flags.
///
/// Apply flags are three-state. `None` counts as "apply" when a named style is
/// merged in; only an explicit `Some(false)` suppresses a category.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct CellFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_format_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_id: Option<u32>,
    /// Index of the cell-style format this format descends from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protection: Option<Protection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_number_format: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_font: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_fill: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_border: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_alignment: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_protection: Option<bool>,
}

impl CellFormat {
    /// Whether an apply flag permits its category. Unset means yes.
    pub fn applies(flag: Option<bool>) -> bool {
        flag.unwrap_or(true)
    }
}

/// A named cell style record binding a builtin id to a cell-style format.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellStyle {
    pub name: String,
    pub builtin_id: u32,
    pub format_id: u32,
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn color_serializes_as_hex() {
        let color = Color::new_argb(0xFF0563C1);
        assert_eq!(serde_json::to_string(&color).expect("serialize"), "\"FF0563C1\"");
        let parsed: Color = serde_json::from_str("\"#FF0563C1\"").expect("deserialize");
        assert_eq!(parsed, color);
        assert!(serde_json::from_str::<Color>("\"0563C1\"").is_err());
    }

    #[test]
    fn from_rgb_forces_opaque_alpha() {
        assert_eq!(Color::from_rgb(0x0563C1), Color::new_argb(0xFF0563C1));
    }

    #[test]
    fn font_size_is_fixed_point() {
        let mut font = Font::default();
        font.set_size_pt(11.0);
        assert_eq!(font.size_100pt, Some(1100));
        assert_eq!(font.size_pt(), Some(11.0));
        font.set_size_pt(10.5);
        assert_eq!(font.size_100pt, Some(1050));
    }

    #[test]
    fn fills_compare_structurally() {
        assert_eq!(Fill::none(), Fill::Pattern(PatternFill::default()));
        assert_ne!(Fill::none(), Fill::gray125());
        let gradient = Fill::Gradient(GradientFill {
            kind: GradientKind::Horizontal,
            start: Color::white(),
            end: Color::black(),
        });
        assert_ne!(gradient, Fill::none());
    }

    #[test]
    fn apply_flags_default_to_applying() {
        assert!(CellFormat::applies(None));
        assert!(CellFormat::applies(Some(true)));
        assert!(!CellFormat::applies(Some(false)));
    }
}
