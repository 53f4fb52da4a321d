#![allow(dead_code)]

use shortr::application::services::ShortenService;
use shortr::infrastructure::persistence::PgLinkRepository;
use shortr::state::AppState;
use shortr::utils::code_generator::CodeGenerator;
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_BASE_URL: &str = "http://sho.rt";

pub fn create_test_state(pool: PgPool) -> AppState {
    let pool = Arc::new(pool);
    let link_repo = Arc::new(PgLinkRepository::new(pool.clone()));
    let shorten_service = Arc::new(ShortenService::new(link_repo, CodeGenerator::new()));

    AppState::new(pool, shorten_service, TEST_BASE_URL.to_string())
}

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) {
    sqlx::query("INSERT INTO short_links (code, original_url) VALUES ($1, $2)")
        .bind(code)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_links(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn find_original_url(pool: &PgPool, code: &str) -> Option<String> {
    sqlx::query_scalar("SELECT original_url FROM short_links WHERE code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await
        .unwrap()
}
