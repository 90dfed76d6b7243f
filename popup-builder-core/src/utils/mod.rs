//! Utility module

pub mod datetime;
pub mod lenient;
