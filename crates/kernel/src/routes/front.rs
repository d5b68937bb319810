//! Locale-prefixed portal pages.
//!
//! Placeholder views only; the interesting behavior lives in the
//! middleware that gets requests here. Every route is mounted under
//! `/{locale}`, and handlers 404 on slugs the site does not serve
//! (the locale middleware has already redirected bare paths).

use axum::Router;
use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::get;

use crate::config::Language;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Render a minimal portal page.
fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html><head><title>{title}</title></head>
<body style="font-family: sans-serif; max-width: 640px; margin: 60px auto; padding: 2rem;">
<h1>{title}</h1>
{body}
</body></html>"#
    ))
}

/// Look up the language for a path slug, 404 on unknown slugs.
fn language<'a>(state: &'a AppState, slug: &str) -> AppResult<&'a Language> {
    state
        .site()
        .language_by_slug(slug)
        .ok_or(AppError::NotFound)
}

async fn home(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> AppResult<Html<String>> {
    let language = language(&state, &locale)?;
    let body = format!(
        r#"<p>Client Asset Portal — {}</p>
<ul>
<li><a href="/{locale}/dashboard">Dashboard</a></li>
<li><a href="/{locale}/invoices">View Invoices</a></li>
<li><a href="/{locale}/orders">Order Products</a></li>
<li><a href="/{locale}/rewards">Rewards</a></li>
</ul>
<p><a href="/{locale}/login">Log in</a> · <a href="/{locale}/signup">Sign up</a></p>"#,
        language.name
    );
    Ok(page("Client Asset Portal", &body))
}

async fn login_page(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> AppResult<Html<String>> {
    language(&state, &locale)?;
    Ok(page(
        "Log in",
        r#"<form method="post" action="/api/auth/login">
<p><label>Email<br><input type="email" name="email" required></label></p>
<p><label>Password<br><input type="password" name="password" required></label></p>
<p><button type="submit">Log in</button></p>
</form>"#,
    ))
}

async fn signup_page(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> AppResult<Html<String>> {
    language(&state, &locale)?;
    Ok(page(
        "Sign up",
        r#"<form method="post" action="/api/auth/signup">
<p><label>Name<br><input type="text" name="name" required></label></p>
<p><label>Email<br><input type="email" name="email" required></label></p>
<p><label>Password<br><input type="password" name="password" minlength="6" required></label></p>
<p><button type="submit">Sign up</button></p>
</form>"#,
    ))
}

async fn dashboard(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> AppResult<Html<String>> {
    language(&state, &locale)?;
    let body = format!(
        r#"<ul>
<li><a href="/{locale}/invoices">View Invoices</a></li>
<li><a href="/{locale}/orders">Order Products</a></li>
<li><a href="/{locale}/rewards">Rewards</a></li>
<li><a href="/{locale}/profile">Profile</a></li>
<li><a href="/{locale}/settings">Settings</a></li>
</ul>"#
    );
    Ok(page("Dashboard", &body))
}

async fn invoices(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> AppResult<Html<String>> {
    language(&state, &locale)?;
    Ok(page("Invoices", "<p>No invoices yet.</p>"))
}

async fn orders(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> AppResult<Html<String>> {
    language(&state, &locale)?;
    Ok(page("Orders", "<p>No orders yet.</p>"))
}

async fn rewards(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> AppResult<Html<String>> {
    language(&state, &locale)?;
    Ok(page("Rewards", "<p>No rewards yet.</p>"))
}

async fn profile(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> AppResult<Html<String>> {
    language(&state, &locale)?;
    Ok(page("Profile", "<p>Profile details.</p>"))
}

async fn settings(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> AppResult<Html<String>> {
    language(&state, &locale)?;
    Ok(page("Settings", "<p>Settings.</p>"))
}

/// Create the portal page router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{locale}", get(home))
        .route("/{locale}/login", get(login_page))
        .route("/{locale}/signup", get(signup_page))
        .route("/{locale}/dashboard", get(dashboard))
        .route("/{locale}/invoices", get(invoices))
        .route("/{locale}/orders", get(orders))
        .route("/{locale}/rewards", get(rewards))
        .route("/{locale}/profile", get(profile))
        .route("/{locale}/settings", get(settings))
}
