//! Full-screen UI page modules.

pub mod main_view;
pub mod verification;
