//! Registration and login handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use vastra_core::UserId;

use crate::error::Result;
use crate::models::User;
use crate::services::{AuthService, TokenService};
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// The user profile plus a fresh bearer token.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    pub token: String,
}

fn auth_response(user: User, tokens: &TokenService) -> Result<AuthResponse> {
    let token = tokens
        .issue(user.id)
        .map_err(|e| crate::error::AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        id: user.id,
        name: user.name,
        email: user.email.into_inner(),
        is_admin: user.is_admin,
        token,
    })
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let auth = AuthService::new(state.pool());
    let user = auth.register(&body.name, &body.email, &body.password).await?;

    tracing::info!(user_id = %user.id, "account registered");

    let response = auth_response(user, state.tokens())?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<AuthResponse>> {
    let auth = AuthService::new(state.pool());
    let user = auth.login(&body.email, &body.password).await?;

    let response = auth_response(user, state.tokens())?;
    Ok(Json(response))
}
