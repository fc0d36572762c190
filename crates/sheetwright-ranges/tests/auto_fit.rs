use pretty_assertions::assert_eq;
use sheetwright_model::Document;
use sheetwright_ranges::{AutoFitError, FontMetrics, FontUpdate, Range};

/// Fixed-width metrics: every Calibri glyph is 7px except a 3px 'i' and a
/// 1.5px '.'. Any other family is unmeasurable.
struct FakeMetrics;

impl FontMetrics for FakeMetrics {
    fn char_width(&self, family: &str, _size_pt: f64, ch: char) -> Option<f64> {
        if family != "Calibri" {
            return None;
        }
        Some(match ch {
            'i' => 3.0,
            '.' => 1.5,
            _ => 7.0,
        })
    }
}

fn fitted_column(doc: &Document, index: u32) -> &sheetwright_model::Column {
    doc.sheets[0]
        .columns
        .iter()
        .find(|c| c.min == index && c.max == index)
        .expect("column record")
}

#[test]
fn column_width_follows_the_widest_cell() {
    let mut doc = Document::new();
    doc.set_cell_value(0, 1, 2, "ab");
    doc.set_cell_value(0, 2, 2, "abc");

    Range::column(&mut doc, 0, 2)
        .expect("range")
        .auto_fit(&FakeMetrics)
        .expect("fit");

    // "abc" is 21px; (21 + 5) / 7 in 1/256 steps is 3.7109375.
    let column = fitted_column(&doc, 2);
    assert_eq!(column.width, 3.7109375);
    assert!(column.custom_width);
    assert!(column.best_fit);
}

#[test]
fn narrow_glyphs_are_clamped_to_the_minimum_character_width() {
    let mut doc = Document::new();
    doc.set_cell_value(0, 1, 1, "..");

    Range::column(&mut doc, 0, 1)
        .expect("range")
        .auto_fit(&FakeMetrics)
        .expect("fit");

    // Each '.' rounds to 2px but is floored at the 3px 'i', so the text
    // measures 6px and (6 + 5) / 7 truncates to 1.5703125.
    assert_eq!(fitted_column(&doc, 1).width, 1.5703125);
}

#[test]
fn numbers_and_booleans_measure_as_their_display_text() {
    let mut doc = Document::new();
    doc.set_cell_value(0, 1, 3, 125.0);
    doc.set_cell_value(0, 2, 3, true);

    Range::column(&mut doc, 0, 3)
        .expect("range")
        .auto_fit(&FakeMetrics)
        .expect("fit");

    // "TRUE" is the widest at 28px; (28 + 5) / 7 truncates to 4.7109375.
    assert_eq!(fitted_column(&doc, 3).width, 4.7109375);
}

#[test]
fn unmeasurable_cell_font_reports_the_column() {
    let mut doc = Document::new();
    doc.set_cell_value(0, 1, 4, "text");
    Range::cell(&mut doc, 0, 1, 4)
        .expect("range")
        .set_font(&FontUpdate {
            name: Some("Missing".to_string()),
            ..FontUpdate::default()
        });

    let err = Range::column(&mut doc, 0, 4)
        .expect("range")
        .auto_fit(&FakeMetrics)
        .expect_err("unmeasurable");
    assert_eq!(
        err,
        AutoFitError {
            worksheet: "Sheet1".to_string(),
            column: 4,
        }
    );
}

#[test]
fn non_column_ranges_do_not_fit() {
    let mut doc = Document::new();
    doc.set_cell_value(0, 1, 1, "text");
    Range::cells(&mut doc, 0, 1, 1, 1, 1)
        .expect("range")
        .auto_fit(&FakeMetrics)
        .expect("no-op");
    Range::row(&mut doc, 0, 1)
        .expect("range")
        .auto_fit(&FakeMetrics)
        .expect("no-op");
    assert!(doc.sheets[0].columns.is_empty());
}

#[test]
fn columns_without_text_keep_their_width() {
    let mut doc = Document::new();
    Range::column(&mut doc, 0, 5)
        .expect("range")
        .auto_fit(&FakeMetrics)
        .expect("fit");

    let column = fitted_column(&doc, 5);
    assert!(!column.custom_width);
    assert!(!column.best_fit);
}
