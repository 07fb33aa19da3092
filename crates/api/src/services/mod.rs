//! Application services.

pub mod email_renderer;
pub mod pool_metrics;
pub mod seeding;

pub use email_renderer::HtmlEmailRenderer;
pub use pool_metrics::{spawn_pool_metrics, POOL_METRICS_INTERVAL};
pub use seeding::run_seeding;
