//! Business logic services.

pub mod limits;
