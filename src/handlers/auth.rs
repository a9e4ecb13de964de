// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{error::AppError, response::Envelope},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, LoginUserPayload, RegisterUserPayload},
};

// Handler de registro
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Usuário criado, com token", body = AuthResponse),
        (status = 400, description = "Payload inválido"),
        (status = 409, description = "Usuário ou e-mail já existe")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (user, token) = app_state.auth_service.register_user(&payload).await?;

    app_state
        .audit_service
        .record(Some(user.id), "REGISTER", "users", Some(user.id), None)
        .await;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(AuthResponse { token, user })),
    ))
}

// Handler de login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Credenciais aceitas", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas ou conta desativada")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (user, token) = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    tracing::info!("User logged in: {}", user.email);

    app_state
        .audit_service
        .record(Some(user.id), "LOGIN", "users", Some(user.id), None)
        .await;

    Ok(Json(Envelope::new(AuthResponse { token, user })))
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Usuário autenticado", body = crate::models::auth::User),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> impl IntoResponse {
    Json(Envelope::new(user))
}
