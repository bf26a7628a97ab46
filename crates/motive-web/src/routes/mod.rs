//! Route handlers.

pub mod analyze;
pub mod health;
pub mod models;
