use sheetwright_model::{
    Alignment, BorderEdge, BorderLineStyle, BuiltinCellStyle, Color, Fill, GradientFill,
    GradientKind, HorizontalAlignment, PatternFill, PatternKind, VerticalAlignment,
};

use crate::apply::{BorderCategory, FillCategory, FontCategory};
use crate::range::Range;

/// Font attributes to change. `None` leaves an attribute as it was.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontUpdate {
    pub name: Option<String>,
    pub size_pt: Option<f64>,
    pub bold: Option<bool>,
    pub underline: Option<bool>,
    pub italic: Option<bool>,
    pub strikethrough: Option<bool>,
    pub color: Option<Color>,
}

/// Style and color for one border edge. `None` leaves that part unchanged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BorderEdgeUpdate {
    pub style: Option<BorderLineStyle>,
    pub color: Option<Color>,
}

impl BorderEdgeUpdate {
    fn is_empty(&self) -> bool {
        self.style.is_none() && self.color.is_none()
    }
}

/// Border edges to change, plus the diagonal direction flags.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BorderUpdate {
    pub left: BorderEdgeUpdate,
    pub right: BorderEdgeUpdate,
    pub top: BorderEdgeUpdate,
    pub bottom: BorderEdgeUpdate,
    pub diagonal: BorderEdgeUpdate,
    pub diagonal_up: Option<bool>,
    pub diagonal_down: Option<bool>,
}

/// Alignment attributes to change. `None` leaves an attribute as it was.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AlignmentUpdate {
    pub horizontal: Option<HorizontalAlignment>,
    pub vertical: Option<VerticalAlignment>,
    pub indent: Option<u32>,
    pub wrap_text: Option<bool>,
}

fn apply_edge(edge: &mut Option<BorderEdge>, update: BorderEdgeUpdate) {
    if update.is_empty() {
        return;
    }
    let edge = edge.get_or_insert_with(BorderEdge::default);
    if let Some(style) = update.style {
        edge.style = Some(style);
    }
    if let Some(color) = update.color {
        edge.color = Some(color);
    }
}

impl Range<'_> {
    /// Change font attributes for every element in this range.
    pub fn set_font(&mut self, update: &FontUpdate) {
        self.apply_style::<FontCategory>(|font| {
            if let Some(name) = &update.name {
                font.name = Some(name.clone());
            }
            if let Some(size) = update.size_pt {
                font.set_size_pt(size);
            }
            if let Some(bold) = update.bold {
                font.bold = bold;
            }
            if let Some(underline) = update.underline {
                font.underline = underline;
            }
            if let Some(italic) = update.italic {
                font.italic = italic;
            }
            if let Some(strikethrough) = update.strikethrough {
                font.strikethrough = strikethrough;
            }
            if let Some(color) = update.color {
                font.color = Some(color);
            }
        });
    }

    /// Replace the fill with a two-color gradient.
    pub fn set_gradient_fill(&mut self, kind: GradientKind, start: Color, end: Color) {
        self.apply_style::<FillCategory>(|fill| {
            *fill = Fill::Gradient(GradientFill { kind, start, end });
        });
    }

    /// Replace the fill with a pattern. Either color may be omitted.
    pub fn set_pattern_fill(
        &mut self,
        pattern: PatternKind,
        foreground: Option<Color>,
        background: Option<Color>,
    ) {
        self.apply_style::<FillCategory>(|fill| {
            *fill = Fill::Pattern(PatternFill {
                pattern,
                foreground,
                background,
            });
        });
    }

    /// Change border edges for every element in this range.
    pub fn set_border(&mut self, update: &BorderUpdate) {
        self.apply_style::<BorderCategory>(|border| {
            apply_edge(&mut border.left, update.left);
            apply_edge(&mut border.right, update.right);
            apply_edge(&mut border.top, update.top);
            apply_edge(&mut border.bottom, update.bottom);
            apply_edge(&mut border.diagonal, update.diagonal);
            if let Some(up) = update.diagonal_up {
                border.diagonal_up = Some(up);
            }
            if let Some(down) = update.diagonal_down {
                border.diagonal_down = Some(down);
            }
        });
    }

    /// Set top, left, right, and bottom edges to the same style and color,
    /// with the diagonal controlled separately.
    pub fn set_outline_border(
        &mut self,
        style: Option<BorderLineStyle>,
        color: Option<Color>,
        diagonal: BorderEdgeUpdate,
        diagonal_up: Option<bool>,
        diagonal_down: Option<bool>,
    ) {
        let edge = BorderEdgeUpdate { style, color };
        self.set_border(&BorderUpdate {
            left: edge,
            right: edge,
            top: edge,
            bottom: edge,
            diagonal,
            diagonal_up,
            diagonal_down,
        });
    }

    /// Change alignment for every element in this range.
    pub fn set_alignment(&mut self, update: &AlignmentUpdate) {
        let update = *update;
        self.apply_format(move |format| {
            let alignment = format.alignment.get_or_insert_with(Alignment::default);
            if let Some(horizontal) = update.horizontal {
                alignment.horizontal = Some(horizontal);
            }
            if let Some(vertical) = update.vertical {
                alignment.vertical = Some(vertical);
            }
            if let Some(indent) = update.indent {
                alignment.indent = Some(indent);
            }
            if let Some(wrap) = update.wrap_text {
                alignment.wrap_text = Some(wrap);
            }
            format.apply_alignment = Some(true);
        });
    }

    /// Restyle every element with a builtin cell style, creating the style
    /// record on first use.
    pub fn apply_cell_style(&mut self, style: BuiltinCellStyle) {
        let elements = self.materialize();
        for element in &elements {
            let current = self.element_style(element);
            let mut format = self.doc.styles_mut().format_template(current);
            self.doc.apply_cell_style(&mut format, style);
            let index = self.doc.styles_mut().cell_formats.intern(format);
            self.set_element_style(element, index);
        }
    }
}
