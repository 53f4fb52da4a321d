use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::ShortenService;
use crate::infrastructure::persistence::PgLinkRepository;

/// Shared application state injected into HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub shorten_service: Arc<ShortenService<PgLinkRepository>>,
    pub base_url: String,
}

impl AppState {
    pub fn new(
        db: Arc<PgPool>,
        shorten_service: Arc<ShortenService<PgLinkRepository>>,
        base_url: String,
    ) -> Self {
        Self {
            db,
            shorten_service,
            base_url,
        }
    }
}
