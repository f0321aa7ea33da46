//! Data layer - Pure state without UI coupling
//!
//! View identity, menu layout, prompt and notice state.
//! NO imports from frontend/ or any rendering code.

pub mod ui_state;

pub use ui_state::*;
