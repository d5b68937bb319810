//! Configuration loaded from environment variables, plus the immutable
//! site configuration (languages, protected paths) built at startup.

use std::env;

use anyhow::{Context, Result};

/// A language the portal serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    /// Full language code (e.g. "en-US").
    pub code: String,

    /// Human-readable name.
    pub name: String,

    /// URL slug (e.g. "en"). Unique and immutable once published —
    /// slugs appear in bookmarked URLs.
    pub slug: String,
}

impl Language {
    pub fn new(code: &str, name: &str, slug: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
        }
    }
}

/// Immutable site configuration shared across all requests.
///
/// Constructed once at startup and passed into the router and middleware
/// via [`crate::state::AppState`]; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    languages: Vec<Language>,
    /// Full code of the default language (e.g. "en-US").
    default_language: String,
    /// Path prefixes (without leading slash) that require authentication.
    protected_paths: Vec<String>,
}

impl SiteConfig {
    pub fn new(
        languages: Vec<Language>,
        default_language: String,
        protected_paths: Vec<String>,
    ) -> Self {
        Self {
            languages,
            default_language,
            protected_paths,
        }
    }

    /// All configured languages.
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Slug of the default language.
    ///
    /// Falls back to "en" if the configured default code matches no
    /// language, so callers always get a usable slug.
    pub fn default_slug(&self) -> &str {
        self.languages
            .iter()
            .find(|l| l.code == self.default_language)
            .map_or("en", |l| l.slug.as_str())
    }

    /// Look up a language by its URL slug.
    pub fn language_by_slug(&self, slug: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.slug == slug)
    }

    /// Protected path prefixes (locale-stripped, without leading slash).
    pub fn protected_paths(&self) -> &[String] {
        &self.protected_paths
    }

    /// Check whether a locale-stripped relative path is protected.
    ///
    /// Matching is case-sensitive exact-prefix, not regex.
    pub fn is_protected(&self, relative_path: &str) -> bool {
        self.protected_paths
            .iter()
            .any(|p| relative_path.starts_with(p.as_str()))
    }

    /// Extract the locale slug from a URL prefix.
    ///
    /// Returns `Some((slug, remaining_path))` if the path starts with a
    /// configured slug. The prefix must be followed by `/` or be the
    /// entire path, preventing false matches like `/enterprise`.
    /// Matching is case-sensitive.
    pub fn split_locale_prefix<'a>(&self, path: &'a str) -> Option<(&str, &'a str)> {
        let trimmed = path.strip_prefix('/')?;

        let (candidate, rest) = match trimmed.find('/') {
            Some(pos) => (&trimmed[..pos], &trimmed[pos..]),
            None => (trimmed, ""),
        };

        let language = self.language_by_slug(candidate)?;

        if rest.is_empty() {
            // Bare prefix like "/tw" → slug "tw", path "/"
            Some((language.slug.as_str(), "/"))
        } else {
            Some((language.slug.as_str(), rest))
        }
    }
}

impl Default for SiteConfig {
    /// The portal's shipped configuration: American English (default)
    /// and Traditional Chinese, with the standard protected sections.
    fn default() -> Self {
        Self::new(
            vec![
                Language::new("en-US", "American English", "en"),
                Language::new("zh-TW", "Traditional Chinese", "tw"),
            ],
            "en-US".to_string(),
            vec![
                "dashboard".to_string(),
                "profile".to_string(),
                "settings".to_string(),
                "orders".to_string(),
                "invoices".to_string(),
            ],
        )
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// Secret used to sign session tokens. Must be at least 32 bytes.
    pub jwt_secret: String,

    /// Whether the auth cookie carries the `Secure` attribute.
    /// Disable only for local development over plain HTTP.
    pub cookie_secure: bool,

    /// Development mode: mounts the seed endpoint. Never enable in
    /// production.
    pub dev_mode: bool,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let jwt_secret =
            env::var("JWT_SECRET").context("JWT_SECRET environment variable is required")?;

        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        let dev_mode = env::var("DEV_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            jwt_secret,
            cookie_secure,
            dev_mode,
            cors_allowed_origins,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn default_site_has_en_and_tw() {
        let site = SiteConfig::default();
        assert_eq!(site.languages().len(), 2);
        assert_eq!(site.default_slug(), "en");
        assert!(site.language_by_slug("en").is_some());
        assert!(site.language_by_slug("tw").is_some());
        assert!(site.language_by_slug("fr").is_none());
    }

    #[test]
    fn split_locale_prefix_with_path() {
        let site = SiteConfig::default();
        assert_eq!(
            site.split_locale_prefix("/en/dashboard"),
            Some(("en", "/dashboard"))
        );
        assert_eq!(
            site.split_locale_prefix("/tw/orders/123"),
            Some(("tw", "/orders/123"))
        );
    }

    #[test]
    fn split_locale_prefix_bare() {
        let site = SiteConfig::default();
        assert_eq!(site.split_locale_prefix("/en"), Some(("en", "/")));
        assert_eq!(site.split_locale_prefix("/tw"), Some(("tw", "/")));
    }

    #[test]
    fn split_locale_prefix_no_false_match() {
        let site = SiteConfig::default();
        // "enterprise" starts with "en" but is not the slug "en"
        assert_eq!(site.split_locale_prefix("/enterprise"), None);
        assert_eq!(site.split_locale_prefix("/twilight/zone"), None);
    }

    #[test]
    fn split_locale_prefix_unknown_or_root() {
        let site = SiteConfig::default();
        assert_eq!(site.split_locale_prefix("/fr/page"), None);
        assert_eq!(site.split_locale_prefix("/"), None);
        assert_eq!(site.split_locale_prefix("/about"), None);
    }

    #[test]
    fn split_locale_prefix_case_sensitive() {
        let site = SiteConfig::default();
        assert_eq!(site.split_locale_prefix("/EN/dashboard"), None);
        assert_eq!(site.split_locale_prefix("/Tw"), None);
    }

    #[test]
    fn protected_prefix_matching() {
        let site = SiteConfig::default();
        assert!(site.is_protected("dashboard"));
        assert!(site.is_protected("dashboard/widgets"));
        assert!(site.is_protected("invoices"));
        assert!(site.is_protected("orders/42"));
        assert!(!site.is_protected("login"));
        assert!(!site.is_protected("about"));
        // Case-sensitive: "Dashboard" is not protected
        assert!(!site.is_protected("Dashboard"));
    }

    #[test]
    fn default_slug_falls_back_when_code_unknown() {
        let site = SiteConfig::new(
            vec![Language::new("fr-FR", "French", "fr")],
            "xx-XX".to_string(),
            vec![],
        );
        assert_eq!(site.default_slug(), "en");
    }
}
