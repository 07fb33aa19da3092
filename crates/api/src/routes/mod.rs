//! HTTP route handlers.

pub mod admin_cms;
pub mod cms;
pub mod health;
