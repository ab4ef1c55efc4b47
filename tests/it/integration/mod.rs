//! Integration tests for gridboard.

mod replay_tests;
