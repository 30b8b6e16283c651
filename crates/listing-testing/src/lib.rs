//! Testing utilities for the listing widgets.
//!
//! This crate provides the tools the widget tests are written with:
//! - A headless terminal on ratatui's `TestBackend`
//! - Input simulation for keyboard and mouse events
//! - A harness driving a widget state through input sequences
//! - Deterministic JSON fixtures

pub mod fixtures;
pub mod input;
pub mod terminal;
pub mod widget_tests;

// Re-exports
pub use fixtures::Fixtures;
pub use input::InputSequence;
pub use terminal::TestTerminal;
pub use widget_tests::{
    assert_handles_any_area, assert_handles_rapid_input, assert_navigation_safe, WidgetHarness,
};
