//! Development seed endpoint.
//!
//! Creates a fixed local-development account. Mounted only when
//! `DEV_MODE` is enabled; this route must never exist in a
//! production-facing deployment.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{CreateUser, CreateUserError, User};
use crate::state::AppState;

const SEED_NAME: &str = "Test User";
const SEED_EMAIL: &str = "test@example.com";
const SEED_PASSWORD: &str = "P@$$wOrd";

/// Seed handler. Idempotent: re-seeding reports the existing account.
///
/// POST /api/seed
async fn seed(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let result = User::create(
        state.db(),
        CreateUser {
            name: SEED_NAME.to_string(),
            email: SEED_EMAIL.to_string(),
            password: SEED_PASSWORD.to_string(),
        },
    )
    .await;

    match result {
        Ok(user) => {
            info!(user_id = %user.id, "seeded development user");
            Ok(Json(json!({
                "message": "Database seeded successfully!",
                "userId": user.id,
            })))
        }
        Err(CreateUserError::DuplicateEmail) => {
            let existing = User::find_by_email(state.db(), SEED_EMAIL).await?;
            Ok(Json(json!({
                "message": "Database already seeded",
                "userId": existing.map(|u| u.id),
            })))
        }
        Err(e) => Err(AppError::Internal(anyhow::Error::new(e))),
    }
}

/// Create the seed router. Only mounted in development mode.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/seed", post(seed))
}
