//! Business logic services.

pub mod activation;
pub mod listing;
pub mod path;
pub mod resolution;
