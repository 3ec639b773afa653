//! `AppMode`-specific key handling modules.

pub(crate) mod main_view;
pub(crate) mod verification;
