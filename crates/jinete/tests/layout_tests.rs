//! Integration tests for the request-size / set-position protocol, box
//! layouts and grid layouts.

use jinete::prelude::*;

/// Route logs to the test harness; filter with `RUST_LOG=jinete=trace`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn setup() -> Ui {
    init_tracing();
    let mut ui = Ui::new(UiConfig::new().with_screen_size(320, 200));
    ui.new_manager().unwrap();
    ui
}

/// A plain widget that requests exactly `width` x `height`.
fn sized(ui: &mut Ui, width: i32, height: i32) -> WidgetId {
    let widget = ui.new_widget(WidgetKind::Widget).unwrap();
    ui.set_min_size(widget, Size::new(width, height)).unwrap();
    widget
}

#[test]
fn test_vbox_end_to_end() {
    let mut ui = setup();
    let window = ui.new_window("Layout").unwrap();
    let vbox = ui.new_vbox().unwrap();
    ui.set_child_spacing(vbox, 2).unwrap();
    let first = sized(&mut ui, 10, 10);
    let second = sized(&mut ui, 20, 5);
    ui.add_child(window, vbox).unwrap();
    ui.add_child(vbox, first).unwrap();
    ui.add_child(vbox, second).unwrap();

    assert_eq!(ui.request_size(vbox), Size::new(20, 17));

    ui.set_rect(vbox, Rect::new(0, 0, 20, 17));
    assert_eq!(ui.rect(vbox), Some(Rect::new(0, 0, 20, 17)));
    assert_eq!(ui.rect(first), Some(Rect::new(0, 0, 20, 10)));
    assert_eq!(ui.rect(second), Some(Rect::new(0, 12, 20, 17)));
}

#[test]
fn test_hbox_request_with_borders() {
    let mut ui = setup();
    let hbox = ui.new_hbox().unwrap();
    ui.set_borders(hbox, Borders::uniform(2)).unwrap();
    ui.set_child_spacing(hbox, 1).unwrap();
    for (w, h) in [(10, 4), (5, 9), (7, 1)] {
        let child = sized(&mut ui, w, h);
        ui.add_child(hbox, child).unwrap();
    }
    // 22 + 2 spacing + 4 border, 9 + 4 border
    assert_eq!(ui.request_size(hbox), Size::new(28, 13));

    ui.set_homogeneous(hbox, true);
    assert_eq!(ui.request_size(hbox), Size::new(36, 13));
}

#[test]
fn test_empty_box_requests_borders() {
    let mut ui = setup();
    let vbox = ui.new_vbox().unwrap();
    ui.set_borders(vbox, Borders::new(1, 2, 3, 4)).unwrap();
    assert_eq!(ui.request_size(vbox), Size::new(4, 6));
}

#[test]
fn test_hidden_children_are_skipped() {
    let mut ui = setup();
    let hbox = ui.new_hbox().unwrap();
    let shown = sized(&mut ui, 10, 10);
    let hidden = sized(&mut ui, 50, 50);
    ui.add_child(hbox, shown).unwrap();
    ui.add_child(hbox, hidden).unwrap();
    ui.hide(hidden).unwrap();

    assert_eq!(ui.request_size(hbox), Size::new(10, 10));
}

#[test]
fn test_two_expansive_children_tile_exactly() {
    let mut ui = setup();
    let hbox = ui.new_hbox().unwrap();
    let a = sized(&mut ui, 10, 10);
    let b = sized(&mut ui, 10, 10);
    for child in [a, b] {
        ui.set_expansive(child, true).unwrap();
        ui.add_child(hbox, child).unwrap();
    }

    for width in [100, 101, 57] {
        ui.set_rect(hbox, Rect::new(0, 0, width, 10));
        let ra = ui.rect(a).unwrap();
        let rb = ui.rect(b).unwrap();
        assert_eq!(ra.width() + rb.width(), width);
        assert_eq!(ra.x1, 0);
        assert_eq!(ra.x2, rb.x1);
        assert_eq!(rb.x2, width);
        assert!(rb.width() >= ra.width());
    }
}

#[test]
fn test_slack_with_spacing_and_fixed_child() {
    let mut ui = setup();
    let hbox = ui.new_hbox().unwrap();
    ui.set_child_spacing(hbox, 3).unwrap();
    let fixed = sized(&mut ui, 20, 10);
    let a = sized(&mut ui, 10, 10);
    let b = sized(&mut ui, 10, 10);
    ui.add_child(hbox, fixed).unwrap();
    for child in [a, b] {
        ui.set_expansive(child, true).unwrap();
        ui.add_child(hbox, child).unwrap();
    }

    ui.set_rect(hbox, Rect::new(0, 0, 100, 10));
    assert_eq!(ui.rect(fixed).unwrap().width(), 20);
    let total: i32 = [fixed, a, b].iter().map(|&w| ui.rect(w).unwrap().width()).sum();
    assert_eq!(total + 2 * 3, 100);
    assert_eq!(ui.rect(b).unwrap().x2, 100);
}

#[test]
fn test_layout_is_idempotent() {
    let mut ui = setup();
    let vbox = ui.new_vbox().unwrap();
    ui.set_child_spacing(vbox, 4).unwrap();
    ui.set_borders(vbox, Borders::uniform(3)).unwrap();
    let children: Vec<WidgetId> = (0..3).map(|i| sized(&mut ui, 10 + i, 7)).collect();
    for &child in &children {
        ui.add_child(vbox, child).unwrap();
    }
    ui.set_expansive(children[1], true).unwrap();

    let area = Rect::new(5, 5, 90, 80);
    ui.set_rect(vbox, area);
    let first: Vec<Rect> = children.iter().map(|&c| ui.rect(c).unwrap()).collect();
    ui.set_rect(vbox, area);
    let second: Vec<Rect> = children.iter().map(|&c| ui.rect(c).unwrap()).collect();

    assert_eq!(first, second);
    assert_eq!(first[0], Rect::new(8, 8, 87, 15));
}

#[test]
fn test_homogeneous_ignores_expansive() {
    let mut ui = setup();
    let hbox = ui.new_hbox().unwrap();
    ui.set_homogeneous(hbox, true);
    let a = sized(&mut ui, 5, 5);
    let b = sized(&mut ui, 30, 5);
    ui.set_expansive(b, true).unwrap();
    ui.add_child(hbox, a).unwrap();
    ui.add_child(hbox, b).unwrap();

    ui.set_rect(hbox, Rect::new(0, 0, 60, 5));
    assert_eq!(ui.rect(a), Some(Rect::new(0, 0, 30, 5)));
    assert_eq!(ui.rect(b), Some(Rect::new(30, 0, 60, 5)));
}

#[test]
fn test_overflow_keeps_requested_sizes() {
    let mut ui = setup();
    let vbox = ui.new_vbox().unwrap();
    let a = sized(&mut ui, 10, 30);
    let b = sized(&mut ui, 10, 30);
    ui.add_child(vbox, a).unwrap();
    ui.add_child(vbox, b).unwrap();

    ui.set_rect(vbox, Rect::new(0, 0, 10, 20));
    assert_eq!(ui.rect(a), Some(Rect::new(0, 0, 10, 30)));
    assert_eq!(ui.rect(b), Some(Rect::new(0, 30, 10, 60)));
}

#[test]
fn test_borders_larger_than_rect_never_go_negative() {
    let mut ui = setup();
    let hbox = ui.new_hbox().unwrap();
    ui.set_homogeneous(hbox, true);
    ui.set_borders(hbox, Borders::uniform(10)).unwrap();
    let child = sized(&mut ui, 5, 5);
    ui.add_child(hbox, child).unwrap();

    ui.set_rect(hbox, Rect::new(0, 0, 4, 4));
    let rect = ui.rect(child).unwrap();
    assert!(rect.x2 >= rect.x1);
    assert!(rect.y2 >= rect.y1);
}

#[test]
fn test_nested_boxes() {
    let mut ui = setup();
    let outer = ui.new_vbox().unwrap();
    let row = ui.new_hbox().unwrap();
    let left = sized(&mut ui, 10, 8);
    let right = sized(&mut ui, 15, 6);
    let footer = sized(&mut ui, 40, 4);
    ui.add_child(outer, row).unwrap();
    ui.add_child(outer, footer).unwrap();
    ui.add_child(row, left).unwrap();
    ui.add_child(row, right).unwrap();

    assert_eq!(ui.request_size(outer), Size::new(40, 12));

    ui.set_rect(outer, Rect::new(0, 0, 40, 12));
    assert_eq!(ui.rect(row), Some(Rect::new(0, 0, 40, 8)));
    assert_eq!(ui.rect(left), Some(Rect::new(0, 0, 10, 8)));
    assert_eq!(ui.rect(right), Some(Rect::new(10, 0, 25, 8)));
    assert_eq!(ui.rect(footer), Some(Rect::new(0, 8, 40, 12)));
}

#[test]
fn test_button_requests_text_plus_borders() {
    let mut ui = setup();
    let button = ui.new_button("OK").unwrap();
    let border = ui.theme().button_border;
    let font = ui.font();
    assert_eq!(
        ui.request_size(button),
        Size::new(2 * font.char_width + 2 * border, font.line_height + 2 * border)
    );
}

// =========================================================================
// Grids
// =========================================================================

#[test]
fn test_grid_span_and_expanding_column() {
    let mut ui = setup();
    let grid = ui.new_grid(2, false).unwrap();
    ui.set_child_spacing(grid, 1).unwrap();
    let a = sized(&mut ui, 10, 10);
    let b = sized(&mut ui, 20, 5);
    let footer = sized(&mut ui, 40, 4);
    ui.add_to_grid(grid, a, CellOptions::new()).unwrap();
    ui.add_to_grid(grid, b, CellOptions::new().with_expand(true, false))
        .unwrap();
    let cell = ui
        .add_to_grid(grid, footer, CellOptions::new().with_span(2, 1))
        .unwrap();
    assert_eq!((cell.col, cell.row), (0, 1));

    // The footer's extra width lands on the expanding column: 10 + 29 + 1.
    assert_eq!(ui.request_size(grid), Size::new(40, 15));

    ui.set_rect(grid, Rect::new(0, 0, 50, 15));
    assert_eq!(ui.rect(a), Some(Rect::new(0, 0, 10, 10)));
    assert_eq!(ui.rect(b), Some(Rect::new(11, 0, 50, 10)));
    assert_eq!(ui.rect(footer), Some(Rect::new(0, 11, 50, 15)));
}

#[test]
fn test_grid_same_width_columns_share_slack() {
    let mut ui = setup();
    let grid = ui.new_grid(3, true).unwrap();
    ui.set_child_spacing(grid, 2).unwrap();
    let children: Vec<WidgetId> = [5, 12, 7]
        .into_iter()
        .map(|width| sized(&mut ui, width, 4))
        .collect();
    for &child in &children {
        ui.add_child(grid, child).unwrap();
    }

    assert_eq!(ui.request_size(grid), Size::new(40, 4));

    ui.set_rect(grid, Rect::new(0, 0, 46, 4));
    let rects: Vec<Rect> = children.iter().map(|&c| ui.rect(c).unwrap()).collect();
    assert_eq!(
        rects,
        vec![
            Rect::new(0, 0, 14, 4),
            Rect::new(16, 0, 30, 4),
            Rect::new(32, 0, 46, 4),
        ]
    );
}

#[test]
fn test_grid_places_plain_children_and_skips_hidden_ones() {
    let mut ui = setup();
    let grid = ui.new_grid(2, false).unwrap();
    let children: Vec<WidgetId> = (0..3).map(|_| sized(&mut ui, 10, 10)).collect();
    for &child in &children {
        ui.add_child(grid, child).unwrap();
    }

    assert_eq!(ui.request_size(grid), Size::new(20, 20));
    let last = ui.grid_cell(grid, children[2]).unwrap();
    assert_eq!((last.col, last.row), (0, 1));

    ui.hide(children[2]).unwrap();
    assert_eq!(ui.request_size(grid), Size::new(20, 10));

    ui.remove_child(grid, children[0]).unwrap();
    assert_eq!(ui.request_size(grid), Size::new(10, 10));
    assert_eq!(ui.grid_cell(grid, children[0]), None);
}

#[test]
fn test_add_to_grid_requires_a_grid() {
    let mut ui = setup();
    let hbox = ui.new_hbox().unwrap();
    let child = sized(&mut ui, 10, 10);

    assert_eq!(
        ui.add_to_grid(hbox, child, CellOptions::new()),
        Err(UiError::NotAGrid)
    );
    assert_eq!(ui.parent(child), None);
}
