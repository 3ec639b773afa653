//! Plain data types shared by the app, infra, and UI layers.

pub mod attachment;
pub mod history;
pub mod input;
pub mod verification;
