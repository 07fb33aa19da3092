//! Shared utilities and common types for the CMS admin backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Text normalization and validation helpers
//! - Placeholder token scanning and substitution
//! - Offset pagination parameters
//! - Partial-update deserialization helpers

pub mod pagination;
pub mod patch;
pub mod placeholders;
pub mod validation;
