//! Replay script integration tests.

use crate::helpers::event_names;
use gridboard::replay::{PointerEvent, ReplayScript};
use gridboard::GridError;
use std::io::Write;
use tempfile::NamedTempFile;

const CROSS_GRID_SCRIPT: &str = r#"{
  "settings": { "grid": { "cell_width": 100.0, "cell_height": 100.0 } },
  "grids": [
    {
      "config": { "id": "left", "column_count": 4, "row_count": 4, "cell_width": 100.0, "cell_height": 100.0,
                  "margins": { "top": 0.0, "right": 0.0, "bottom": 0.0, "left": 0.0 } },
      "bounds": { "origin": { "x": 0.0, "y": 0.0 }, "size": { "width": 400.0, "height": 400.0 } },
      "items": [{ "id": "a" }]
    },
    {
      "config": { "id": "right", "column_count": 4, "row_count": 4, "cell_width": 100.0, "cell_height": 100.0,
                  "margins": { "top": 0.0, "right": 0.0, "bottom": 0.0, "left": 0.0 } },
      "bounds": { "origin": { "x": 500.0, "y": 0.0 }, "size": { "width": 400.0, "height": 400.0 } }
    }
  ],
  "events": [
    { "type": "down", "grid": "left", "x": 50.0, "y": 50.0 },
    { "type": "move", "x": 250.0, "y": 50.0, "grid": "left" },
    { "type": "move", "x": 750.0, "y": 250.0, "hit_test": true },
    { "type": "up" }
  ]
}"#;

#[test]
fn test_replay_cross_grid_drag() {
    let script = ReplayScript::from_json(CROSS_GRID_SCRIPT).unwrap();
    assert_eq!(script.events.len(), 4);

    let report = script.run().unwrap();
    assert!(report.layout.grid("left").unwrap().items.is_empty());
    let moved = &report.layout.grid("right").unwrap().items[0];
    assert_eq!((moved.id.as_str(), moved.col, moved.row), ("a", 3, 3));

    let names = event_names(&report.events);
    assert_eq!(names.first(), Some(&"drag_started"));
    assert!(names.contains(&"drop_committed"));
}

#[test]
fn test_replay_resize_and_external_drop() {
    let script = ReplayScript {
        events: vec![
            PointerEvent::Down {
                grid: "g".into(),
                x: 95.0,
                y: 95.0,
            },
            PointerEvent::Move {
                x: 195.0,
                y: 95.0,
                grid: None,
                hit_test: false,
            },
            PointerEvent::Up,
            PointerEvent::External {
                item: gridboard::ItemConfig::new("new", 1, 1, 1, 1),
                x: 0.0,
                y: 0.0,
            },
            PointerEvent::Move {
                x: 300.0,
                y: 300.0,
                grid: Some("g".into()),
                hit_test: false,
            },
            PointerEvent::Up,
            PointerEvent::BringToFront { item: "a".into() },
        ],
        ..ReplayScript::from_json(
            r#"{ "grids": [{ "config": { "id": "g", "column_count": 4, "row_count": 4,
                 "cell_width": 100.0, "cell_height": 100.0,
                 "margins": { "top": 0.0, "right": 0.0, "bottom": 0.0, "left": 0.0 } },
                 "bounds": { "origin": { "x": 0.0, "y": 0.0 }, "size": { "width": 400.0, "height": 400.0 } },
                 "items": [{ "id": "a" }] }] }"#,
        )
        .unwrap()
    };

    let report = script.run().unwrap();
    let items = &report.layout.grid("g").unwrap().items;
    let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["new", "a"]);
    assert_eq!((items[1].col_span, items[1].row_span), (2, 1));
    assert_eq!((items[0].col, items[0].row), (4, 4));
}

#[test]
fn test_replay_aborts_on_structural_error() {
    let script = ReplayScript::from_json(
        r#"{ "grids": [{ "config": { "id": "g", "column_count": 2, "row_count": 2 },
             "bounds": { "origin": { "x": 0.0, "y": 0.0 }, "size": { "width": 10.0, "height": 10.0 } },
             "items": [{ "id": "a" }, { "id": "a", "col": 2 }] }] }"#,
    )
    .unwrap();
    assert!(matches!(script.run(), Err(GridError::DuplicateId { .. })));
}

#[test]
fn test_replay_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CROSS_GRID_SCRIPT.as_bytes()).unwrap();
    let script = ReplayScript::load(file.path()).unwrap();
    assert_eq!(script.grids.len(), 2);

    assert!(ReplayScript::from_json(r#"{ "events": [{ "type": "jump" }] }"#).is_err());
}
