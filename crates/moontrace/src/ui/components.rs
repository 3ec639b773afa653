//! Reusable widgets composed by the pages.

pub mod file_panel;
pub mod header;
pub mod prompt_input;
pub mod result_pages;
pub mod status_bar;
