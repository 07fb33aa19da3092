//! Domain models for the CMS admin backend.

pub mod content_block;
pub mod email_template;
pub mod notification_template;

pub use content_block::{
    normalize_category, ContentBlock, ContentBlockQuery, CreateContentBlockRequest,
    NewContentBlock, PublicContentBlock, TermsOfService, UpdateContentBlockRequest,
    DEFAULT_CATEGORY,
};
pub use email_template::{
    CreateEmailTemplateRequest, EmailTemplate, EmailTemplateSearchQuery, NewEmailTemplate,
    UpdateEmailTemplateRequest,
};
pub use notification_template::{
    CreateNotificationTemplateRequest, NewNotificationTemplate, NotificationTemplate,
    NotificationTemplateFilter, NotificationTemplatePatch, TemplateType,
    UpdateNotificationTemplateRequest,
};
