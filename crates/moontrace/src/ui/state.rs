//! UI-facing state types owned by [`crate::app::App`].

pub mod app_mode;
pub mod text_panel;
