//! TUI Frontend (ratatui-based)
//!
//! Implements the Frontend trait using ratatui for terminal rendering.
//! It wraps crossterm for event handling and terminal management.

pub mod app;
mod image_view;
mod media_view;
mod menu_view;
mod overlay;
mod text_view;

pub use app::TuiFrontend;
