use serde::{Deserialize, Serialize};

use crate::intern::InternTable;
use crate::style::{Border, CellFormat, CellStyle, Fill, Font};
use crate::theme::Theme;

/// Font color applied to hyperlinks when the workbook has no theme palette.
const HYPERLINK_FALLBACK_COLOR: crate::style::Color = crate::style::Color::new_argb(0xFF0563C1);

/// The builtin cell styles this layer knows how to synthesize. The numeric ids
/// come from the builtin style registry; anything else is rejected by not
/// being representable here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinCellStyle {
    Normal,
    Hyperlink,
}

impl BuiltinCellStyle {
    pub const fn builtin_id(self) -> u32 {
        match self {
            BuiltinCellStyle::Normal => 0,
            BuiltinCellStyle::Hyperlink => 8,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BuiltinCellStyle::Normal => "Normal",
            BuiltinCellStyle::Hyperlink => "Hyperlink",
        }
    }
}

/// A stylesheet: six ordered, deduplicated tables that cell formats index
/// into.
///
/// `cell_formats` holds the formats cells point at via their style index;
/// `cell_style_formats` holds the formats named styles bind to. Both kinds of
/// format reference the shared `fonts`/`fills`/`borders` fragment tables.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stylesheet {
    pub fonts: InternTable<Font>,
    pub fills: InternTable<Fill>,
    pub borders: InternTable<Border>,
    pub cell_style_formats: InternTable<CellFormat>,
    pub cell_formats: InternTable<CellFormat>,
    pub cell_styles: InternTable<CellStyle>,
}

fn zeroed_format() -> CellFormat {
    CellFormat {
        number_format_id: Some(0),
        font_id: Some(0),
        fill_id: Some(0),
        border_id: Some(0),
        ..CellFormat::default()
    }
}

impl Stylesheet {
    /// The minimum viable stylesheet: a Calibri 11 font, the two mandatory
    /// fills, an empty border, one cell-style format, one cell format, and
    /// the Normal style.
    pub fn new() -> Self {
        Self::with_fragments(
            [Font {
                name: Some("Calibri".to_string()),
                size_100pt: Some(1100),
                ..Font::default()
            }],
            [],
            [],
        )
    }

    /// Like [`Stylesheet::new`] but seeded with extra fragments. The mandatory
    /// leading entries are still created first; supplied fragments that
    /// duplicate them are dropped.
    pub fn with_fragments(
        fonts: impl IntoIterator<Item = Font>,
        fills: impl IntoIterator<Item = Fill>,
        borders: impl IntoIterator<Item = Border>,
    ) -> Self {
        let mut sheet = Stylesheet {
            fonts: InternTable::new(),
            fills: InternTable::new(),
            borders: InternTable::new(),
            cell_style_formats: InternTable::new(),
            cell_formats: InternTable::new(),
            cell_styles: InternTable::new(),
        };

        for font in fonts {
            sheet.fonts.intern(font);
        }
        // A font should always carry a name and size, so only fall back to a
        // blank one when the caller supplied nothing at all.
        if sheet.fonts.is_empty() {
            sheet.fonts.push(Font::default());
        }

        // The first two fills are expected to be exactly these.
        sheet.fills.push(Fill::none());
        sheet.fills.push(Fill::gray125());
        for fill in fills {
            sheet.fills.intern(fill);
        }

        sheet.borders.push(Border::default());
        for border in borders {
            sheet.borders.intern(border);
        }

        sheet.cell_style_formats.push(zeroed_format());
        sheet.cell_formats.push(CellFormat {
            format_id: Some(0),
            ..zeroed_format()
        });

        sheet.ensure_named_style(BuiltinCellStyle::Normal, None);
        sheet
    }

    /// The Normal style's format id and record, if the style is defined.
    pub fn normal_format(&self) -> Option<(u32, &CellFormat)> {
        let style = self
            .cell_styles
            .iter()
            .find(|s| s.builtin_id == BuiltinCellStyle::Normal.builtin_id())?;
        Some((style.format_id, &self.cell_style_formats[style.format_id]))
    }

    /// Make sure `style` exists in the style table, synthesizing its format
    /// and any fragments it needs. Returns the style's format id. Idempotent.
    pub fn ensure_named_style(&mut self, style: BuiltinCellStyle, theme: Option<&Theme>) -> u32 {
        if let Some(existing) = self
            .cell_styles
            .iter()
            .find(|s| s.builtin_id == style.builtin_id())
        {
            return existing.format_id;
        }

        let format = match style {
            BuiltinCellStyle::Normal => zeroed_format(),
            BuiltinCellStyle::Hyperlink => {
                let mut font = self.font_template(None);
                font.underline = true;
                font.color = Some(
                    theme
                        .and_then(|t| t.hyperlink_color)
                        .unwrap_or(HYPERLINK_FALLBACK_COLOR),
                );
                let font_id = self.fonts.intern(font);
                CellFormat {
                    font_id: Some(font_id),
                    apply_number_format: Some(false),
                    apply_fill: Some(false),
                    apply_border: Some(false),
                    apply_alignment: Some(false),
                    apply_protection: Some(false),
                    ..zeroed_format()
                }
            }
        };

        let format_id = self.cell_style_formats.intern(format);
        self.cell_styles.push(CellStyle {
            name: style.name().to_string(),
            builtin_id: style.builtin_id(),
            format_id,
        });
        format_id
    }

    /// Merge a named style into `target`: every category the named format
    /// does not explicitly opt out of is copied over, and the copied
    /// category's apply flag on `target` is reset.
    pub fn apply_named_style(
        &mut self,
        target: &mut CellFormat,
        style: BuiltinCellStyle,
        theme: Option<&Theme>,
    ) {
        let format_id = self.ensure_named_style(style, theme);
        let named = self.cell_style_formats[format_id].clone();

        if CellFormat::applies(named.apply_number_format) {
            target.number_format_id = named.number_format_id;
            target.apply_number_format = None;
        }
        if CellFormat::applies(named.apply_font) {
            target.font_id = named.font_id;
            target.apply_font = None;
        }
        if CellFormat::applies(named.apply_fill) {
            target.fill_id = named.fill_id;
            target.apply_fill = None;
        }
        if CellFormat::applies(named.apply_border) {
            target.border_id = named.border_id;
            target.apply_border = None;
        }
        if CellFormat::applies(named.apply_alignment) {
            target.alignment = named.alignment;
            target.apply_alignment = None;
        }
        if CellFormat::applies(named.apply_protection) {
            target.protection = named.protection;
            target.apply_protection = None;
        }

        target.format_id = Some(format_id);
    }

    /// Template a cell format from an existing style index, or synthesize one
    /// from the Normal style (falling back to a zeroed format).
    ///
    /// # Panics
    ///
    /// Panics if `style_index` is out of range; an index that does not point
    /// into `cell_formats` means the document is corrupt.
    pub fn format_template(&self, style_index: Option<u32>) -> CellFormat {
        if let Some(index) = style_index {
            return self.cell_formats[index].clone();
        }
        match self.normal_format() {
            Some((format_id, normal)) => CellFormat {
                number_format_id: normal.number_format_id,
                font_id: normal.font_id,
                fill_id: normal.fill_id,
                border_id: normal.border_id,
                format_id: Some(format_id),
                ..CellFormat::default()
            },
            None => CellFormat {
                format_id: Some(0),
                ..zeroed_format()
            },
        }
    }

    /// Template a font from an existing style index, the Normal style, or the
    /// first font on the sheet, in that order.
    pub fn font_template(&self, style_index: Option<u32>) -> Font {
        if let Some(index) = style_index {
            let font_id = self.cell_formats[index].font_id.unwrap_or_default();
            return self.fonts[font_id].clone();
        }
        if let Some((_, normal)) = self.normal_format() {
            let font_id = normal.font_id.unwrap_or_default();
            return self.fonts[font_id].clone();
        }
        self.fonts.first().cloned().unwrap_or_default()
    }

    /// Like [`Stylesheet::font_template`] for fills.
    pub fn fill_template(&self, style_index: Option<u32>) -> Fill {
        if let Some(index) = style_index {
            let fill_id = self.cell_formats[index].fill_id.unwrap_or_default();
            return self.fills[fill_id].clone();
        }
        if let Some((_, normal)) = self.normal_format() {
            let fill_id = normal.fill_id.unwrap_or_default();
            return self.fills[fill_id].clone();
        }
        self.fills.first().cloned().unwrap_or_default()
    }

    /// Like [`Stylesheet::font_template`] for borders.
    pub fn border_template(&self, style_index: Option<u32>) -> Border {
        if let Some(index) = style_index {
            let border_id = self.cell_formats[index].border_id.unwrap_or_default();
            return self.borders[border_id].clone();
        }
        if let Some((_, normal)) = self.normal_format() {
            let border_id = normal.border_id.unwrap_or_default();
            return self.borders[border_id].clone();
        }
        self.borders.first().cloned().unwrap_or_default()
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::new()
    }
}
