//! Panel state structs (rendering-agnostic)
//!
//! These structs hold the panels' data and the operations on it, but contain
//! no rendering logic. The frontend reads them to draw and reports the
//! geometry it drew with back through `set_page_geometry` / `set_viewport`.

pub mod image_viewer;
pub mod media_player;
pub mod text_viewer;

pub use image_viewer::{ImageViewerState, LoadedImage, ZoomLimits};
pub use media_player::{MediaPlayerState, PlaybackState};
pub use text_viewer::TextViewerState;
