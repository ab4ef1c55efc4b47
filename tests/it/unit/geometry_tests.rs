//! Unit tests for pixel/cell conversion and footprint math.

use gridboard::geometry::{
    cell_to_pixel, footprint, intersects, is_within_bounds, page_to_grid, pixel_to_cell,
    span_pixel_size, to_rectangle,
};
use gridboard::{Cell, GridConfig, ItemConfig, Margins, Point, Size, Span};

fn grid(columns: u32, rows: u32) -> GridConfig {
    GridConfig::new("g", columns, rows)
        .with_cell_size(100.0, 100.0)
        .with_margins(Margins::ZERO)
}

#[test]
fn test_pixel_to_cell_on_grid_lines() {
    let config = grid(4, 4);
    assert_eq!(pixel_to_cell(200.0, 200.0, &config), Cell::new(3, 3));
    assert_eq!(pixel_to_cell(100.0, 300.0, &config), Cell::new(2, 4));
}

#[test]
fn test_pixel_to_cell_counts_margins_in_stride() {
    let config = GridConfig::new("g", 10, 10)
        .with_cell_size(100.0, 100.0)
        .with_margins(Margins::uniform(10.0));
    // stride = 120
    assert_eq!(pixel_to_cell(240.0, 119.0, &config), Cell::new(3, 2));
    assert_eq!(pixel_to_cell(59.0, 61.0, &config), Cell::new(1, 2));
}

#[test]
fn test_pixel_to_cell_never_below_one() {
    let config = grid(0, 0);
    assert_eq!(pixel_to_cell(-1000.0, -1.0, &config), Cell::new(1, 1));
}

#[test]
fn test_cell_to_pixel_top_left() {
    let config = grid(4, 4);
    assert_eq!(cell_to_pixel(1, 1, &config), Point::new(0.0, 0.0));
    assert_eq!(cell_to_pixel(4, 2, &config), Point::new(300.0, 100.0));
}

#[test]
fn test_round_trip_without_margins() {
    let config = grid(8, 8);
    for col in 1..=8 {
        for row in 1..=8 {
            let p = cell_to_pixel(col, row, &config);
            assert_eq!(pixel_to_cell(p.x, p.y, &config), Cell::new(col, row));
        }
    }
}

#[test]
fn test_footprint_is_inclusive() {
    let rect = to_rectangle(&ItemConfig::new("a", 3, 2, 2, 3));
    assert_eq!((rect.left, rect.top, rect.right, rect.bottom), (3, 2, 4, 4));
}

#[test]
fn test_adjacent_footprints_do_not_intersect() {
    let left = footprint(Cell::new(1, 1), Span::new(2, 2));
    let right = footprint(Cell::new(3, 1), Span::new(2, 2));
    let below = footprint(Cell::new(1, 3), Span::new(1, 1));
    assert!(!intersects(&left, &right));
    assert!(!intersects(&left, &below));
    assert!(intersects(&left, &left));
}

#[test]
fn test_bounds_edge_cases() {
    let config = grid(4, 4);
    assert!(is_within_bounds(4, 4, 1, 1, &config));
    assert!(!is_within_bounds(4, 4, 2, 1, &config));
    assert!(!is_within_bounds(1, 4, 1, 2, &config));

    let wide_open = grid(4, 0);
    assert!(is_within_bounds(1, 500, 4, 10, &wide_open));
    assert!(!is_within_bounds(2, 500, 4, 10, &wide_open));
}

#[test]
fn test_bounds_do_not_overflow() {
    let config = grid(4, 4);
    assert!(!is_within_bounds(u32::MAX, 1, u32::MAX, 1, &config));
}

#[test]
fn test_span_pixel_size() {
    let config = GridConfig::new("g", 4, 4)
        .with_cell_size(100.0, 50.0)
        .with_margins(Margins::from_css(&[5.0, 10.0]));
    // horizontal margins 20, vertical margins 10
    assert_eq!(span_pixel_size(Span::new(1, 1), &config), Size::new(100.0, 50.0));
    assert_eq!(span_pixel_size(Span::new(3, 2), &config), Size::new(340.0, 110.0));
}

#[test]
fn test_page_to_grid_applies_origin_and_offset() {
    let local = page_to_grid(
        Point::new(500.0, 400.0),
        Point::new(200.0, 100.0),
        Point::new(30.0, 20.0),
    );
    assert_eq!(local, Point::new(270.0, 280.0));
}
