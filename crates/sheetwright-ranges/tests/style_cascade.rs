use pretty_assertions::assert_eq;
use sheetwright_model::{
    BorderLineStyle, Color, Document, Fill, GradientFill, GradientKind, PatternKind,
};
use sheetwright_ranges::{BorderEdgeUpdate, BorderUpdate, FontUpdate, Range};

fn bold() -> FontUpdate {
    FontUpdate {
        bold: Some(true),
        ..FontUpdate::default()
    }
}

#[test]
fn unstyled_cells_converge_on_one_new_format() {
    let mut doc = Document::new();
    Range::cells(&mut doc, 0, 1, 1, 2, 2).expect("range").set_font(&bold());

    let ws = &doc.sheets[0];
    let indices: Vec<Option<u32>> = ws
        .rows
        .iter()
        .flat_map(|row| row.cells.iter().map(|cell| cell.style_index))
        .collect();
    assert_eq!(indices.len(), 4);
    assert!(indices.iter().all(|index| *index == indices[0]));
    assert!(indices[0].is_some());

    let styles = doc.stylesheet.as_ref().expect("stylesheet");
    // Baseline format plus exactly one new one.
    assert_eq!(styles.cell_formats.len(), 2);
    // Baseline font plus its bold variant.
    assert_eq!(styles.fonts.len(), 2);
    let format = &styles.cell_formats[indices[0].expect("index")];
    assert_eq!(format.apply_font, Some(true));
    assert!(styles.fonts[format.font_id.expect("font id")].bold);
}

#[test]
fn differently_styled_cells_stay_different() {
    let mut doc = Document::new();
    // Pre-style B1 with a solid fill so it diverges from A1.
    Range::cell(&mut doc, 0, 1, 2)
        .expect("range")
        .set_pattern_fill(PatternKind::Solid, Some(Color::black()), None);

    Range::cells(&mut doc, 0, 1, 1, 1, 2).expect("range").set_font(&bold());

    let ws = &doc.sheets[0];
    let a1 = ws.find_cell(1, 1).and_then(|c| c.style_index).expect("A1");
    let b1 = ws.find_cell(1, 2).and_then(|c| c.style_index).expect("B1");
    assert_ne!(a1, b1);

    let styles = doc.stylesheet.as_ref().expect("stylesheet");
    assert!(styles.fonts[styles.cell_formats[a1].font_id.expect("font")].bold);
    assert!(styles.fonts[styles.cell_formats[b1].font_id.expect("font")].bold);
    // B1 kept its fill through the font change.
    assert_eq!(styles.cell_formats[b1].apply_fill, Some(true));
    assert_ne!(styles.cell_formats[b1].fill_id, styles.cell_formats[a1].fill_id);
}

#[test]
fn repeating_an_operation_reuses_existing_formats() {
    let mut doc = Document::new();
    Range::cells(&mut doc, 0, 1, 1, 2, 1).expect("range").set_font(&bold());
    let styles = doc.stylesheet.as_ref().expect("stylesheet");
    let formats = styles.cell_formats.len();
    let fonts = styles.fonts.len();

    // Same change on an overlapping block: everything interns to the same
    // entries.
    Range::cells(&mut doc, 0, 1, 1, 3, 1).expect("range").set_font(&bold());
    let styles = doc.stylesheet.as_ref().expect("stylesheet");
    assert_eq!(styles.cell_formats.len(), formats);
    assert_eq!(styles.fonts.len(), fonts);
}

#[test]
fn row_range_covers_existing_cells_and_the_row_record() {
    let mut doc = Document::new();
    doc.set_cell_value(0, 2, 1, "a");
    doc.set_cell_value(0, 2, 5, "b");

    Range::row(&mut doc, 0, 2).expect("range").set_font(&bold());

    let ws = &doc.sheets[0];
    let row = ws.find_row(2).expect("row");
    assert!(row.style_index.is_some());
    assert_eq!(row.cells.len(), 2);
    assert!(row.cells.iter().all(|cell| cell.style_index == row.style_index));
}

#[test]
fn column_range_styles_cells_across_rows_and_the_column_record() {
    let mut doc = Document::new();
    doc.set_cell_value(0, 1, 3, "x");
    doc.set_cell_value(0, 9, 3, "y");
    doc.set_cell_value(0, 9, 4, "other column");

    Range::column(&mut doc, 0, 3)
        .expect("range")
        .set_gradient_fill(GradientKind::Horizontal, Color::white(), Color::black());

    let ws = &doc.sheets[0];
    let column = ws.columns.iter().find(|c| c.min == 3 && c.max == 3).expect("column");
    let column_style = column.style_index.expect("column styled");
    assert_eq!(
        ws.find_cell(1, 3).and_then(|c| c.style_index),
        Some(column_style)
    );
    assert_eq!(
        ws.find_cell(9, 3).and_then(|c| c.style_index),
        Some(column_style)
    );
    // The neighbour column was not touched.
    assert_eq!(ws.find_cell(9, 4).and_then(|c| c.style_index), None);

    let styles = doc.stylesheet.as_ref().expect("stylesheet");
    let fill_id = styles.cell_formats[column_style].fill_id.expect("fill id");
    assert_eq!(
        styles.fills[fill_id],
        Fill::Gradient(GradientFill {
            kind: GradientKind::Horizontal,
            start: Color::white(),
            end: Color::black(),
        })
    );
}

#[test]
fn border_updates_touch_only_named_edges() {
    let mut doc = Document::new();
    let update = BorderUpdate {
        top: BorderEdgeUpdate {
            style: Some(BorderLineStyle::Thin),
            color: Some(Color::black()),
        },
        ..BorderUpdate::default()
    };
    Range::cell(&mut doc, 0, 1, 1).expect("range").set_border(&update);

    let styles = doc.stylesheet.as_ref().expect("stylesheet");
    let index = doc.sheets[0]
        .find_cell(1, 1)
        .and_then(|c| c.style_index)
        .expect("styled");
    let border_id = styles.cell_formats[index].border_id.expect("border id");
    let border = &styles.borders[border_id];
    let top = border.top.as_ref().expect("top edge");
    assert_eq!(top.style, Some(BorderLineStyle::Thin));
    assert_eq!(top.color, Some(Color::black()));
    assert!(border.left.is_none());
    assert!(border.bottom.is_none());
}

#[test]
fn outline_border_fans_out_to_four_edges() {
    let mut doc = Document::new();
    Range::cell(&mut doc, 0, 1, 1)
        .expect("range")
        .set_outline_border(
            Some(BorderLineStyle::Medium),
            Some(Color::black()),
            BorderEdgeUpdate::default(),
            None,
            None,
        );

    let styles = doc.stylesheet.as_ref().expect("stylesheet");
    let index = doc.sheets[0]
        .find_cell(1, 1)
        .and_then(|c| c.style_index)
        .expect("styled");
    let border = &styles.borders[styles.cell_formats[index].border_id.expect("border id")];
    for edge in [&border.left, &border.right, &border.top, &border.bottom] {
        let edge = edge.as_ref().expect("edge");
        assert_eq!(edge.style, Some(BorderLineStyle::Medium));
    }
    assert!(border.diagonal.is_none());
}
