//! Core application logic
//!
//! Gesture vocabulary, dispatch table, view navigation, input routing and the
//! `AppCore` that ties the panels together.
//! NO imports from frontend/ or rendering code.

pub mod actions;
pub mod app_core;
pub mod commands;
pub mod input_router;
pub mod navigator;
pub mod panel;
pub mod router;

pub use app_core::AppCore;
