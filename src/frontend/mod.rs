//! Frontend abstraction layer
//!
//! This module defines the `Frontend` trait the terminal frontend implements.
//! It provides a unified interface for event polling, rendering, and cleanup.

pub mod events;
pub mod tui;

use crate::core::AppCore;
use anyhow::Result;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

/// Frontend trait
///
/// Separates rendering concerns from business logic. The frontend reads
/// `AppCore` to draw and converts native input into `FrontendEvent`s.
pub trait Frontend {
    /// Poll for user input events
    ///
    /// Returns all pending events (keyboard, mouse, resize, paste) converted
    /// to the frontend-agnostic `FrontendEvent` enum, empty if there were none.
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Render the current application state
    ///
    /// Mutable because panels learn their drawable size here: the text
    /// viewer repaginates and the image viewer refits when the area changes.
    fn render(&mut self, core: &mut AppCore) -> Result<()>;

    /// Restore the terminal before exit
    fn cleanup(&mut self) -> Result<()>;
}
