//! URL shortening and resolution service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::NewShortLink;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_normalizer::normalize_url;

/// Maximum insert attempts before giving up on code generation.
///
/// With 62^7 possible codes a collision is vanishingly rare at realistic
/// table sizes; the loop is a safety net against the write race, not a
/// primary mechanism.
const MAX_ATTEMPTS: usize = 3;

/// Service for creating and resolving shortened links.
///
/// Normalizes input URLs, generates random codes, and relies on the store's
/// uniqueness constraint to arbitrate concurrent writers: the losing insert
/// reports a violation and a fresh code is drawn.
pub struct ShortenService<R: LinkRepository> {
    repository: Arc<R>,
    generator: CodeGenerator,
}

impl<R: LinkRepository> ShortenService<R> {
    /// Creates a new shortening service.
    pub fn new(repository: Arc<R>, generator: CodeGenerator) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Shortens a URL and returns the full short URL.
    ///
    /// The input is validated and re-serialized to its canonical ASCII form;
    /// that form is what gets persisted. Up to [`MAX_ATTEMPTS`] random codes
    /// are tried; a uniqueness violation on the code means another writer won
    /// the race, so the attempt is discarded and a new code is drawn. Any
    /// other persistence failure is final.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the URL is blank, unparseable,
    /// uses a scheme other than `http`/`https`, or has no host.
    ///
    /// Returns [`AppError::ExhaustedRetries`] if every attempt collided.
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn shorten(&self, raw_url: &str, base_url: &str) -> Result<String, AppError> {
        let original_url = normalize_url(raw_url)?;

        for _ in 0..MAX_ATTEMPTS {
            let code = self.generator.generate();
            let new_link = NewShortLink {
                code,
                original_url: original_url.clone(),
            };

            match self.repository.insert(new_link).await {
                Ok(link) => {
                    return Ok(format!(
                        "{}/r/{}",
                        base_url.trim_end_matches('/'),
                        link.code
                    ));
                }
                // Collision: discard the code and draw a new one
                Err(AppError::UniqueViolation { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        tracing::warn!(
            attempts = MAX_ATTEMPTS,
            "short code generation exhausted its retry budget"
        );
        Err(AppError::exhausted_retries(
            "failed to generate a unique short code",
            json!({ "attempts": MAX_ATTEMPTS }),
        ))
    }

    /// Resolves a short code to its stored URL.
    ///
    /// Absence is an expected outcome, not an error: `Ok(None)` means no link
    /// carries this code and the boundary layer turns it into a not-found
    /// response.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve(&self, code: &str) -> Result<Option<String>, AppError> {
        let link = self.repository.find_by_code(code).await?;
        Ok(link.map(|l| l.original_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortLink;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    fn service(mock: MockLinkRepository) -> ShortenService<MockLinkRepository> {
        ShortenService::new(Arc::new(mock), CodeGenerator::new())
    }

    fn echo_insert(new_link: NewShortLink) -> Result<ShortLink, AppError> {
        Ok(ShortLink::new(
            1,
            new_link.code,
            new_link.original_url,
            Utc::now(),
        ))
    }

    fn collision() -> AppError {
        AppError::unique_violation("Short code already exists", json!({}))
    }

    #[tokio::test]
    async fn test_shorten_success() {
        let mut mock = MockLinkRepository::new();
        mock.expect_insert().times(1).returning(echo_insert);

        let result = service(mock)
            .shorten("https://example.com/path?q=1", "http://sho.rt")
            .await;

        let short_url = result.unwrap();
        let code = short_url.strip_prefix("http://sho.rt/r/").unwrap();
        assert_eq!(code.len(), 7);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_shorten_persists_normalized_url() {
        let mut mock = MockLinkRepository::new();
        mock.expect_insert()
            .withf(|new_link| new_link.original_url == "https://example.com/path")
            .times(1)
            .returning(echo_insert);

        let result = service(mock)
            .shorten("https://EXAMPLE.COM:443/path", "http://sho.rt")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_shorten_trims_trailing_slash_on_base_url() {
        let mut mock = MockLinkRepository::new();
        mock.expect_insert().times(1).returning(echo_insert);

        let short_url = service(mock)
            .shorten("https://example.com", "http://sho.rt/")
            .await
            .unwrap();

        assert!(short_url.starts_with("http://sho.rt/r/"));
        assert!(!short_url.contains("//r/"));
    }

    #[tokio::test]
    async fn test_shorten_invalid_url_never_hits_the_store() {
        let mut mock = MockLinkRepository::new();
        mock.expect_insert().times(0);

        let result = service(mock).shorten("not a url", "http://sho.rt").await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidInput { .. }
        ));
    }

    #[tokio::test]
    async fn test_shorten_blank_url() {
        let mut mock = MockLinkRepository::new();
        mock.expect_insert().times(0);

        let result = service(mock).shorten("   ", "http://sho.rt").await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidInput { .. }
        ));
    }

    #[tokio::test]
    async fn test_shorten_unsupported_scheme() {
        let mut mock = MockLinkRepository::new();
        mock.expect_insert().times(0);

        let result = service(mock)
            .shorten("ftp://x.com/file", "http://sho.rt")
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidInput { .. }
        ));
    }

    #[tokio::test]
    async fn test_shorten_retries_on_collision() {
        let mut seq = mockall::Sequence::new();
        let mut mock = MockLinkRepository::new();

        mock.expect_insert()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Err(collision()));
        mock.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(echo_insert);

        let result = service(mock)
            .shorten("https://example.com", "http://sho.rt")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_shorten_fails_after_three_collisions() {
        let mut mock = MockLinkRepository::new();
        mock.expect_insert().times(3).returning(|_| Err(collision()));

        let result = service(mock)
            .shorten("https://example.com", "http://sho.rt")
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::ExhaustedRetries { .. }
        ));
    }

    #[tokio::test]
    async fn test_shorten_other_storage_errors_are_not_retried() {
        let mut mock = MockLinkRepository::new();
        mock.expect_insert()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let result = service(mock)
            .shorten("https://example.com", "http://sho.rt")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut mock = MockLinkRepository::new();
        mock.expect_find_by_code()
            .withf(|code| code == "aB3xY9z")
            .times(1)
            .returning(|code| {
                Ok(Some(ShortLink::new(
                    1,
                    code.to_string(),
                    "https://example.com/target".to_string(),
                    Utc::now(),
                )))
            });

        let result = service(mock).resolve("aB3xY9z").await;

        assert_eq!(
            result.unwrap(),
            Some("https://example.com/target".to_string())
        );
    }

    #[tokio::test]
    async fn test_resolve_absent_is_not_an_error() {
        let mut mock = MockLinkRepository::new();
        mock.expect_find_by_code().times(1).returning(|_| Ok(None));

        let result = service(mock).resolve("missing1").await;

        assert_eq!(result.unwrap(), None);
    }
}
