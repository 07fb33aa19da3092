use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use domain::rendering::TemplateRenderer;
use domain::repositories::{
    ContentBlockStore, EmailTemplateStore, InMemoryContentBlockStore, InMemoryEmailTemplateStore,
    InMemoryNotificationTemplateStore, NotificationTemplateStore,
};
use domain::seeds::{FileSeedSource, SeedSource};
use domain::services::{
    ContentBlockService, DefaultsSeeder, EmailTemplateService, NotificationTemplateAdminService,
};
use persistence::{ContentBlockRepository, EmailTemplateRepository, NotificationTemplateRepository};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{admin_cms, cms, health};
use crate::services::HtmlEmailRenderer;

/// Store implementations behind the services.
#[derive(Clone)]
pub struct Repositories {
    pub content_blocks: Arc<dyn ContentBlockStore>,
    pub email_templates: Arc<dyn EmailTemplateStore>,
    pub notification_templates: Arc<dyn NotificationTemplateStore>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            content_blocks: Arc::new(ContentBlockRepository::new(pool.clone())),
            email_templates: Arc::new(EmailTemplateRepository::new(pool.clone())),
            notification_templates: Arc::new(NotificationTemplateRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            content_blocks: Arc::new(InMemoryContentBlockStore::new()),
            email_templates: Arc::new(InMemoryEmailTemplateStore::new()),
            notification_templates: Arc::new(InMemoryNotificationTemplateStore::new()),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Absent when running over in-memory stores.
    pub pool: Option<PgPool>,
    pub repositories: Repositories,
    pub seeds: Arc<dyn SeedSource>,
    pub renderer: Arc<dyn TemplateRenderer>,
}

impl AppState {
    /// PostgreSQL stores, seed files from `seed.dir`, built-in email renderer.
    pub fn new(config: Config, pool: PgPool) -> Self {
        let seeds = Arc::new(FileSeedSource::new(config.seed.dir.clone()));
        let renderer = Arc::new(HtmlEmailRenderer::new(&config.email));
        Self {
            repositories: Repositories::postgres(pool.clone()),
            pool: Some(pool),
            seeds,
            renderer,
            config: Arc::new(config),
        }
    }

    pub fn in_memory(config: Config, seeds: Arc<dyn SeedSource>) -> Self {
        let renderer = Arc::new(HtmlEmailRenderer::new(&config.email));
        Self {
            config: Arc::new(config),
            pool: None,
            repositories: Repositories::in_memory(),
            seeds,
            renderer,
        }
    }

    pub fn content_blocks(&self) -> ContentBlockService {
        ContentBlockService::new(self.repositories.content_blocks.clone(), self.seeds.clone())
    }

    pub fn email_templates(&self) -> EmailTemplateService {
        EmailTemplateService::new(
            self.repositories.email_templates.clone(),
            self.seeds.clone(),
            self.renderer.clone(),
        )
    }

    pub fn notification_templates(&self) -> NotificationTemplateAdminService {
        NotificationTemplateAdminService::new(
            self.repositories.notification_templates.clone(),
            self.seeds.clone(),
        )
    }

    pub fn seeder(&self) -> DefaultsSeeder {
        DefaultsSeeder::new(
            self.content_blocks(),
            self.email_templates(),
            self.notification_templates(),
        )
    }
}

pub fn router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    let admin_routes = Router::new()
        .route(
            "/blocks",
            get(admin_cms::list_blocks).post(admin_cms::create_block),
        )
        .route(
            "/blocks/import-missing",
            post(admin_cms::import_missing_blocks),
        )
        .route(
            "/blocks/ensure-defaults",
            post(admin_cms::ensure_default_blocks),
        )
        .route(
            "/blocks/load-terms-default",
            post(admin_cms::load_terms_default),
        )
        .route(
            "/blocks/:id",
            get(admin_cms::get_block)
                .put(admin_cms::update_block)
                .delete(admin_cms::delete_block),
        )
        .route(
            "/email-templates",
            get(admin_cms::list_email_templates).post(admin_cms::create_email_template),
        )
        .route(
            "/email-templates/load-defaults",
            post(admin_cms::load_default_email_templates),
        )
        .route(
            "/email-templates/import-missing",
            post(admin_cms::import_missing_email_templates),
        )
        .route(
            "/email-templates/:id",
            get(admin_cms::get_email_template)
                .put(admin_cms::update_email_template)
                .delete(admin_cms::delete_email_template),
        )
        .route(
            "/notification-templates",
            get(admin_cms::list_notification_templates)
                .post(admin_cms::create_notification_template),
        )
        .route(
            "/notification-templates/import-missing",
            post(admin_cms::import_missing_notification_templates),
        )
        .route(
            "/notification-templates/:id",
            get(admin_cms::get_notification_template)
                .put(admin_cms::update_notification_template)
                .delete(admin_cms::delete_notification_template),
        )
        .route("/variables", get(admin_cms::supported_template_variables))
        .route("/seed", post(admin_cms::seed_defaults));

    let public_routes = Router::new()
        .route("/terms-of-service", get(cms::terms_of_service))
        .route("/blocks/:key", get(cms::get_public_block));

    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        .nest("/api/v1/admin/cms", admin_routes)
        .nest("/api/v1/cms", public_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
