//! Locale resolution and redirect middleware.
//!
//! Every request outside the reserved prefixes must carry a locale
//! prefix (`/en/...`, `/tw/...`). Requests without one are redirected
//! to the same path prefixed with the best-matching locale from the
//! Accept-Language header, preserving the query string. Prefixed paths
//! pass through unchanged, so the redirect is idempotent.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::SiteConfig;
use crate::state::AppState;

/// Path prefixes that bypass locale handling entirely: the API
/// namespace, static assets, and the health endpoint.
const RESERVED_PREFIXES: &[&str] = &["/api", "/static", "/images"];

/// Check whether a path is exempt from locale prefixing.
fn is_reserved(path: &str) -> bool {
    RESERVED_PREFIXES.iter().any(|p| path.starts_with(p))
        || path == "/favicon.ico"
        || path == "/health"
}

/// Resolve the best-matching locale slug for an Accept-Language header.
///
/// Entries are considered in header order; quality weights are ignored.
/// For each entry, an exact slug match wins, then a base-language match
/// against the configured language codes (e.g. "en-GB" → code "en-US"
/// → slug "en"). Falls back to the default slug — there is no error
/// path, a valid slug is always returned.
pub fn resolve_locale<'a>(site: &'a SiteConfig, accept_language: Option<&str>) -> &'a str {
    if let Some(raw) = accept_language {
        for entry in raw.split(',') {
            let Some(tag) = entry.split(';').next() else {
                continue;
            };
            let tag = tag.trim();
            if tag.is_empty() {
                continue;
            }

            if let Some(language) = site.language_by_slug(tag) {
                return &language.slug;
            }

            let base = tag.split('-').next().unwrap_or(tag);
            if let Some(language) = site.languages().iter().find(|l| l.code.starts_with(base)) {
                return &language.slug;
            }
        }
    }

    site.default_slug()
}

/// Middleware that redirects locale-less paths to their localized form.
pub async fn localize_path(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path();

    if is_reserved(path) {
        return next.run(request).await;
    }

    // Already prefixed — pass through unchanged.
    if state.site().split_locale_prefix(path).is_some() {
        return next.run(request).await;
    }

    let accept_language = request
        .headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());
    let locale = resolve_locale(state.site(), accept_language);

    let location = match request.uri().query() {
        Some(query) => format!("/{locale}{path}?{query}"),
        None => format!("/{locale}{path}"),
    };

    tracing::debug!(from = %path, to = %location, "redirecting to localized path");

    // 307 keeps the original method on re-issue.
    (
        StatusCode::TEMPORARY_REDIRECT,
        [(header::LOCATION, location)],
    )
        .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn site() -> SiteConfig {
        SiteConfig::default()
    }

    #[test]
    fn reserved_paths() {
        assert!(is_reserved("/api/auth/login"));
        assert!(is_reserved("/static/app.css"));
        assert!(is_reserved("/images/logo.png"));
        assert!(is_reserved("/favicon.ico"));
        assert!(is_reserved("/health"));
        assert!(!is_reserved("/about"));
        assert!(!is_reserved("/en/dashboard"));
        // "/healthcheck" is a page, not the health endpoint
        assert!(!is_reserved("/healthcheck"));
    }

    #[test]
    fn resolve_exact_slug_match() {
        let site = site();
        assert_eq!(resolve_locale(&site, Some("en")), "en");
        assert_eq!(resolve_locale(&site, Some("tw")), "tw");
    }

    #[test]
    fn resolve_base_language_fallback() {
        let site = site();
        // "fr-FR" and "fr" match nothing; "en" matches the slug
        assert_eq!(resolve_locale(&site, Some("fr-FR,fr;q=0.9,en;q=0.8")), "en");
        // "en-GB" → base "en" → code "en-US" → slug "en"
        assert_eq!(resolve_locale(&site, Some("en-GB")), "en");
        // "zh-CN" → base "zh" → code "zh-TW" → slug "tw"
        assert_eq!(resolve_locale(&site, Some("zh-CN")), "tw");
    }

    #[test]
    fn resolve_honors_header_order_not_weights() {
        let site = site();
        // "tw" comes first; its low weight is ignored
        assert_eq!(resolve_locale(&site, Some("tw;q=0.1,en;q=0.9")), "tw");
    }

    #[test]
    fn resolve_defaults_when_nothing_matches() {
        let site = site();
        assert_eq!(resolve_locale(&site, Some("ja,ko;q=0.9")), "en");
        assert_eq!(resolve_locale(&site, Some("")), "en");
        assert_eq!(resolve_locale(&site, None), "en");
    }

    #[test]
    fn resolve_skips_empty_entries() {
        let site = site();
        assert_eq!(resolve_locale(&site, Some(",, tw")), "tw");
    }
}
