//! Unit tests for gridboard.

mod geometry_tests;
mod grid_model_tests;
mod resize_tests;
