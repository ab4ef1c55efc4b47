//! Unit tests for resize handle detection, live sizing and commits.

use crate::helpers::TestGridBuilder;
use gridboard::resize::{compute_live_size, detect_handle, fit_span_to_grid, snap_to_cells};
use gridboard::{
    Cell, GridConfig, GridError, Margins, PixelRect, Point, ResizeController, ResizeHandle,
    ResizeOutcome, Size, Span, ValidationService,
};

#[test]
fn test_detect_handle_respects_border_size() {
    let rect = PixelRect::new(100.0, 100.0, 200.0, 100.0);
    assert_eq!(detect_handle(Point::new(290.0, 150.0), &rect, 15.0), Some(ResizeHandle::Width));
    assert_eq!(detect_handle(Point::new(280.0, 150.0), &rect, 15.0), None);
    assert_eq!(detect_handle(Point::new(200.0, 190.0), &rect, 15.0), Some(ResizeHandle::Height));
    assert_eq!(detect_handle(Point::new(299.0, 199.0), &rect, 15.0), Some(ResizeHandle::Both));
    assert_eq!(detect_handle(Point::new(50.0, 50.0), &rect, 15.0), None);
}

#[test]
fn test_live_size_height_handle_fixes_width() {
    let size = compute_live_size(
        ResizeHandle::Height,
        Point::new(0.0, 0.0),
        Point::new(500.0, 80.0),
        Size::new(100.0, 100.0),
        0.0,
        0.0,
    );
    assert_eq!(size, Size::new(100.0, 180.0));
}

#[test]
fn test_snap_to_cells_with_margins() {
    let config = GridConfig::new("g", 10, 10)
        .with_cell_size(100.0, 100.0)
        .with_margins(Margins::uniform(10.0));
    // stride 120: 340 / 120 = 2.83 -> 3, 170 / 120 = 1.42 -> 1
    assert_eq!(snap_to_cells(Size::new(340.0, 170.0), &config), Span::new(3, 1));
}

#[test]
fn test_snap_does_not_clamp_but_fit_does() {
    let config = GridConfig::new("g", 4, 4)
        .with_cell_size(100.0, 100.0)
        .with_margins(Margins::ZERO);
    let proposed = snap_to_cells(Size::new(200.0, 200.0), &config);
    assert_eq!(proposed, Span::new(2, 2));
    assert_eq!(fit_span_to_grid(proposed, Cell::new(4, 4), &config), Span::new(1, 1));

    let unbounded = GridConfig::new("g", 0, 0);
    assert_eq!(fit_span_to_grid(Span::new(9, 9), Cell::new(4, 4), &unbounded), Span::new(9, 9));
}

#[test]
fn test_begin_rejects_locked_and_missing_items() {
    let locked = TestGridBuilder::new("g", 4, 4).locked().with_item("a", 1, 1, 1, 1).build();
    let err = ResizeController::begin(&locked, "a", ResizeHandle::Both, Point::new(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, GridError::NotResizable(_)));

    let grid = TestGridBuilder::new("g", 4, 4).build();
    let err = ResizeController::begin(&grid, "nope", ResizeHandle::Both, Point::new(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, GridError::ItemNotFound { .. }));
}

#[test]
fn test_resize_commit_in_place() {
    let mut grid = TestGridBuilder::new("g", 4, 4).with_item("a", 1, 1, 1, 1).build();
    let validation = ValidationService::new();

    let mut controller =
        ResizeController::begin(&grid, "a", ResizeHandle::Both, Point::new(95.0, 95.0)).unwrap();
    let preview = controller.update(&grid, Point::new(195.0, 295.0), &validation);
    assert!(preview.valid);
    assert_eq!(preview.span(), Span::new(2, 3));
    assert_eq!(controller.live_size(), Size::new(200.0, 300.0));

    let outcome = controller.commit(&mut grid, &validation);
    assert!(outcome.is_committed());
    let item = grid.get_item("a").unwrap();
    assert_eq!((item.col, item.row, item.col_span, item.row_span), (1, 1, 2, 3));
}

#[test]
fn test_resize_into_neighbour_reverts() {
    let mut grid = TestGridBuilder::new("g", 4, 4)
        .with_item("a", 1, 1, 1, 1)
        .with_item("b", 2, 1, 1, 1)
        .build();
    let validation = ValidationService::new();

    let mut controller =
        ResizeController::begin(&grid, "a", ResizeHandle::Width, Point::new(95.0, 50.0)).unwrap();
    let preview = controller.update(&grid, Point::new(195.0, 50.0), &validation);
    assert!(!preview.valid);

    let outcome = controller.commit(&mut grid, &validation);
    assert!(matches!(outcome, ResizeOutcome::Reverted(ref item) if item.span() == Span::UNIT));
    assert_eq!(grid.get_item("a").unwrap().span(), Span::UNIT);
}

#[test]
fn test_resize_conditions_apply_only_to_resize() {
    let mut grid = TestGridBuilder::new("g", 4, 4).with_item("a", 1, 1, 1, 1).build();
    let mut validation = ValidationService::new();
    validation.add_resize_condition(|_, _, item, _| item.col_span * item.row_span <= 2);

    let item = grid.get_item("a").unwrap().clone();
    let too_big = ResizeController::commit_span(&mut grid, &item, Span::new(2, 2), &validation);
    assert!(!too_big.is_committed());
    let fine = ResizeController::commit_span(&mut grid, &item, Span::new(2, 1), &validation);
    assert!(fine.is_committed());
    assert_eq!(fine.item().span(), Span::new(2, 1));
}

#[test]
fn test_min_cell_size_floors_live_size() {
    let grid = TestGridBuilder::new("g", 4, 4).with_item("a", 1, 1, 2, 2).build();
    let mut config = grid.config().clone();
    config.min_cell_width = 60.0;
    config.min_cell_height = 40.0;
    let grid = gridboard::GridModel::with_items(config, grid.items().to_vec()).unwrap();
    let validation = ValidationService::new();

    let mut controller =
        ResizeController::begin(&grid, "a", ResizeHandle::Both, Point::new(0.0, 0.0)).unwrap();
    controller.update(&grid, Point::new(-1000.0, -1000.0), &validation);
    assert_eq!(controller.live_size(), Size::new(60.0, 40.0));
    assert_eq!(controller.proposed_span(), Span::UNIT);
}
