//! Path protection gate.
//!
//! Classifies each request path (after stripping its locale prefix)
//! as protected or public. Protected paths require a valid session
//! token in the `authToken` cookie; without one the gate redirects to
//! the localized login page. The gate verifies signature and expiry
//! only — the fresh database read happens in the session-check route.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::services::token::token_from_headers;
use crate::state::AppState;

/// Middleware enforcing authentication on protected path prefixes.
pub async fn protect_paths(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let site = state.site();

    let (locale, relative) = {
        let path = request.uri().path();
        match site.split_locale_prefix(path) {
            Some((slug, rest)) => (slug.to_string(), rest.trim_start_matches('/').to_string()),
            // No locale prefix: reserved paths land here (the locale
            // middleware redirects everything else first).
            None => (
                site.default_slug().to_string(),
                path.trim_start_matches('/').to_string(),
            ),
        }
    };

    if !site.is_protected(&relative) {
        return next.run(request).await;
    }

    let claims = token_from_headers(request.headers())
        .and_then(|token| state.tokens().verify(&token).ok());

    match claims {
        Some(claims) => {
            tracing::debug!(user = %claims.sub, path = %relative, "authenticated access");
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        None => {
            tracing::debug!(path = %relative, "unauthenticated access to protected path");
            Redirect::to(&format!("/{locale}/login")).into_response()
        }
    }
}
