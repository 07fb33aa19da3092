//! Database entity definitions (row mappings).

pub mod content_block;
pub mod email_template;
pub mod notification_template;

pub use content_block::ContentBlockEntity;
pub use email_template::EmailTemplateEntity;
pub use notification_template::NotificationTemplateEntity;
