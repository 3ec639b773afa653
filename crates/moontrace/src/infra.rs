//! Adapters for processes and files outside the UI loop.

pub mod ascii;
pub mod assistant;
