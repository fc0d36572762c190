use std::collections::HashMap;

use sheetwright_model::{Border, CellFormat, Fill, Font, Stylesheet};

use crate::range::Range;

/// One category of style fragment a range operation can rewrite: how to
/// template it from an element's current format, intern the modified copy,
/// and point a cell format at the result.
pub(crate) trait StyleCategory {
    type Fragment: Clone;

    fn template(styles: &Stylesheet, style_index: Option<u32>) -> Self::Fragment;
    fn intern(styles: &mut Stylesheet, fragment: Self::Fragment) -> u32;
    fn store(format: &mut CellFormat, id: u32);
}

pub(crate) struct FontCategory;

impl StyleCategory for FontCategory {
    type Fragment = Font;

    fn template(styles: &Stylesheet, style_index: Option<u32>) -> Font {
        styles.font_template(style_index)
    }

    fn intern(styles: &mut Stylesheet, fragment: Font) -> u32 {
        styles.fonts.intern(fragment)
    }

    fn store(format: &mut CellFormat, id: u32) {
        format.font_id = Some(id);
        format.apply_font = Some(true);
    }
}

pub(crate) struct FillCategory;

impl StyleCategory for FillCategory {
    type Fragment = Fill;

    fn template(styles: &Stylesheet, style_index: Option<u32>) -> Fill {
        styles.fill_template(style_index)
    }

    fn intern(styles: &mut Stylesheet, fragment: Fill) -> u32 {
        styles.fills.intern(fragment)
    }

    fn store(format: &mut CellFormat, id: u32) {
        format.fill_id = Some(id);
        format.apply_fill = Some(true);
    }
}

pub(crate) struct BorderCategory;

impl StyleCategory for BorderCategory {
    type Fragment = Border;

    fn template(styles: &Stylesheet, style_index: Option<u32>) -> Border {
        styles.border_template(style_index)
    }

    fn intern(styles: &mut Stylesheet, fragment: Border) -> u32 {
        styles.borders.intern(fragment)
    }

    fn store(format: &mut CellFormat, id: u32) {
        format.border_id = Some(id);
        format.apply_border = Some(true);
    }
}

impl Range<'_> {
    /// Rewrite one fragment category across every covered element.
    ///
    /// Elements are materialized first, then each current style index
    /// (including the absent one) is remapped to a new index at most once, so
    /// elements that shared a style before still share one afterwards, and
    /// elements styled differently stay different.
    pub(crate) fn apply_style<C: StyleCategory>(&mut self, mut modify: impl FnMut(&mut C::Fragment)) {
        let elements = self.materialize();
        let mut remap: HashMap<Option<u32>, u32> = HashMap::new();
        for element in &elements {
            let current = self.element_style(element);
            let index = match remap.get(&current) {
                Some(&index) => index,
                None => {
                    let styles = self.doc.styles_mut();
                    let mut format = styles.format_template(current);
                    let mut fragment = C::template(styles, current);
                    modify(&mut fragment);
                    let fragment_id = C::intern(styles, fragment);
                    C::store(&mut format, fragment_id);
                    let index = styles.cell_formats.intern(format);
                    remap.insert(current, index);
                    index
                }
            };
            self.set_element_style(element, index);
        }
    }

    /// Like [`Range::apply_style`] but edits the cell format record directly
    /// (alignment and other format-level attributes).
    pub(crate) fn apply_format(&mut self, mut modify: impl FnMut(&mut CellFormat)) {
        let elements = self.materialize();
        let mut remap: HashMap<Option<u32>, u32> = HashMap::new();
        for element in &elements {
            let current = self.element_style(element);
            let index = match remap.get(&current) {
                Some(&index) => index,
                None => {
                    let styles = self.doc.styles_mut();
                    let mut format = styles.format_template(current);
                    modify(&mut format);
                    let index = styles.cell_formats.intern(format);
                    remap.insert(current, index);
                    index
                }
            };
            self.set_element_style(element, index);
        }
    }
}
