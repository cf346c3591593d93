//! Database models and the queries that operate on them.

pub mod booking;

pub use booking::*;
