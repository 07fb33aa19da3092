//! Domain layer for the CMS admin backend.
//!
//! This crate contains:
//! - Domain models (ContentBlock, EmailTemplate, NotificationTemplate)
//! - Persistence port traits and in-memory implementations
//! - Seed sources for shipped default content
//! - Validation, default seeding and template variable services
//! - Domain error types

pub mod error;
pub mod models;
pub mod rendering;
pub mod repositories;
pub mod seeds;
pub mod services;

pub use error::{DomainError, DomainResult, ValidationError};
