//! Unit tests for GridModel.

use crate::helpers::TestGridBuilder;
use gridboard::{Cell, GridConfig, GridError, GridModel, ItemConfig, Margins, Point, Size, Span, ValidationService};

#[test]
fn test_invalid_config_is_rejected() {
    let err = GridModel::new(GridConfig::new("g", 4, 4).with_cell_size(0.0, 100.0)).unwrap_err();
    assert!(matches!(err, GridError::InvalidConfig(_)));
}

#[test]
fn test_add_remove_update() {
    let mut grid = TestGridBuilder::new("g", 4, 4).build();
    grid.add_item(ItemConfig::new("a", 1, 1, 1, 1)).unwrap();
    grid.add_item(ItemConfig::new("b", 2, 1, 1, 1)).unwrap();
    assert_eq!(grid.len(), 2);

    assert!(grid.update_item(ItemConfig::new("a", 3, 3, 1, 1)));
    assert_eq!(grid.get_item("a").unwrap().cell(), Cell::new(3, 3));
    assert_eq!(grid.items()[0].id, "a", "update keeps z-order slot");
    assert!(!grid.update_item(ItemConfig::new("zzz", 1, 1, 1, 1)));

    let removed = grid.remove_item("a").unwrap();
    assert_eq!(removed.id, "a");
    assert!(!grid.contains("a"));
}

#[test]
fn test_duplicate_id_leaves_grid_untouched() {
    let mut grid = TestGridBuilder::new("g", 4, 4).with_item("a", 1, 1, 1, 1).build();
    let before = grid.items().to_vec();
    let err = grid.add_item(ItemConfig::new("a", 4, 4, 1, 1)).unwrap_err();
    assert!(matches!(err, GridError::DuplicateId { ref id, .. } if id == "a"));
    assert_eq!(grid.items(), before.as_slice());
}

#[test]
fn test_with_items_rejects_duplicates() {
    let result = GridModel::with_items(
        GridConfig::new("g", 4, 4),
        vec![ItemConfig::new("a", 1, 1, 1, 1), ItemConfig::new("a", 2, 2, 1, 1)],
    );
    assert!(matches!(result, Err(GridError::DuplicateId { .. })));
}

#[test]
fn test_collision_and_legal_placement() {
    let grid = TestGridBuilder::new("g", 4, 4).with_item("b", 3, 3, 2, 2).build();
    let validation = ValidationService::new();

    let overlapping = ItemConfig::new("a", 3, 3, 2, 2);
    assert!(grid.has_collision(&overlapping));
    assert!(!grid.is_legal_placement(&overlapping, &validation));

    let clear = ItemConfig::new("a", 1, 1, 2, 2);
    assert!(!grid.has_collision(&clear));
    assert!(grid.is_legal_placement(&clear, &validation));

    let out_of_bounds = ItemConfig::new("a", 4, 1, 2, 1);
    assert!(!grid.is_legal_placement(&out_of_bounds, &validation));
}

#[test]
fn test_resolve_drop_cell_slides_to_boundary() {
    let grid = TestGridBuilder::new("g", 4, 4).build();
    // 2x2 footprint pushed past the bottom-right corner
    assert_eq!(grid.resolve_drop_cell(350.0, 350.0, Span::new(2, 2)), Cell::new(3, 3));
    // only the column overflows
    assert_eq!(grid.resolve_drop_cell(350.0, 0.0, Span::new(2, 1)), Cell::new(3, 1));
}

#[test]
fn test_resolve_drop_cell_unbounded_axis_is_not_clamped() {
    let grid = TestGridBuilder::new("g", 0, 4).build();
    assert_eq!(grid.resolve_drop_cell(900.0, 900.0, Span::new(3, 3)), Cell::new(10, 2));
}

#[test]
fn test_resolve_drop_cell_oversized_footprint_anchors_at_one() {
    let grid = TestGridBuilder::new("g", 2, 2).build();
    assert_eq!(grid.resolve_drop_cell(100.0, 100.0, Span::new(5, 5)), Cell::new(1, 1));
}

#[test]
fn test_item_at_pixel_prefers_topmost() {
    let mut grid = TestGridBuilder::new("g", 4, 4)
        .with_item("bottom", 1, 1, 2, 2)
        .with_item("top", 2, 2, 2, 2)
        .build();
    assert_eq!(grid.item_at_pixel(Point::new(150.0, 150.0)).unwrap().id, "top");
    assert_eq!(grid.item_at_pixel(Point::new(50.0, 50.0)).unwrap().id, "bottom");
    assert!(grid.item_at_pixel(Point::new(350.0, 50.0)).is_none());

    grid.bring_to_front("bottom");
    assert_eq!(grid.item_at_pixel(Point::new(150.0, 150.0)).unwrap().id, "bottom");
}

#[test]
fn test_item_pixel_rect_and_grid_size() {
    let grid = TestGridBuilder::new("g", 3, 2)
        .with_margins(Margins::uniform(10.0))
        .with_item("a", 2, 1, 2, 1)
        .build();
    let rect = grid.item_pixel_rect("a").unwrap();
    assert_eq!(rect.origin, Point::new(130.0, 10.0));
    assert_eq!(rect.size, Size::new(220.0, 100.0));
    assert_eq!(grid.pixel_size(), Some(Size::new(360.0, 240.0)));
    assert!(grid.item_pixel_rect("missing").is_none());
}

#[test]
fn test_nearest_legal_cell_prefers_closest_ring() {
    let grid = TestGridBuilder::new("g", 4, 4)
        .with_item("b", 2, 2, 2, 2)
        .build();
    let validation = ValidationService::new();

    // (2,2) is taken; ring 1 scanned row-major starts at (1,1)
    let candidate = ItemConfig::new("a", 2, 2, 1, 1);
    assert_eq!(grid.nearest_legal_cell(&candidate, &validation, 3), Some(Cell::new(1, 1)));

    // already legal stays put
    let free = ItemConfig::new("a", 4, 4, 1, 1);
    assert_eq!(grid.nearest_legal_cell(&free, &validation, 3), Some(Cell::new(4, 4)));
}

#[test]
fn test_snapshot_clones_state() {
    let grid = TestGridBuilder::new("g", 4, 4).with_item("a", 1, 1, 1, 1).build();
    let snapshot = grid.snapshot();
    assert_eq!(snapshot.config.id, "g");
    assert_eq!(snapshot.items.len(), 1);
}
