//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use sqlx::PgPool;

use crate::config::{Config, SiteConfig};
use crate::db;
use crate::services::token::TokenService;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap. Everything inside is
/// read-only after startup; per-request handlers share it without
/// locking.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// PostgreSQL connection pool.
    db: PgPool,

    /// Immutable site configuration (languages, protected paths).
    site: SiteConfig,

    /// Session token signing/verification.
    tokens: TokenService,

    /// Whether the auth cookie carries the Secure attribute.
    cookie_secure: bool,

    /// Development mode (mounts the seed endpoint).
    dev_mode: bool,
}

impl AppState {
    /// Create new application state, connecting to the database and
    /// running migrations.
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = db::create_pool(config)
            .await
            .context("failed to create database pool")?;

        db::run_migrations(&pool)
            .await
            .context("failed to run migrations")?;

        Self::with_pool(config, SiteConfig::default(), pool)
    }

    /// Create application state around an existing pool.
    ///
    /// Used by tests with a lazily connecting pool; does not run
    /// migrations.
    pub fn with_pool(config: &Config, site: SiteConfig, pool: PgPool) -> Result<Self> {
        if config.jwt_secret.len() < 32 {
            bail!("JWT_SECRET must be at least 32 bytes");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                db: pool,
                site,
                tokens: TokenService::new(config.jwt_secret.as_bytes()),
                cookie_secure: config.cookie_secure,
                dev_mode: config.dev_mode,
            }),
        })
    }

    /// Get the database pool.
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get the site configuration.
    pub fn site(&self) -> &SiteConfig {
        &self.inner.site
    }

    /// Get the token service.
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }

    /// Whether auth cookies are marked Secure.
    pub fn cookie_secure(&self) -> bool {
        self.inner.cookie_secure
    }

    /// Whether development-only routes are mounted.
    pub fn dev_mode(&self) -> bool {
        self.inner.dev_mode
    }
}
