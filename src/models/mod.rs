//! Database models and DTOs for mock records.

pub mod mock;
