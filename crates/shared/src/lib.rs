//! Shared utilities and common types for the Competiscore backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Access token validation
//! - Pagination envelope
//! - Common validation logic

pub mod jwt;
pub mod pagination;
pub mod validation;
