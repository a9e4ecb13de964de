// src/handlers/notifications.rs

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        response::{Envelope, ListEnvelope},
    },
    config::AppState,
    middleware::auth::AuthenticatedUser,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct NotificationListQuery {
    pub limit: Option<i64>,
}

// GET /api/notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    params(NotificationListQuery),
    responses(
        (status = 200, description = "Notificações do usuário", body = Vec<crate::models::notification::Notification>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_notifications(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<NotificationListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let notifications = app_state.notification_service.list(user.0.id, limit).await?;
    Ok(Json(ListEnvelope::new(notifications)))
}

// GET /api/notifications/unread-count
#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    tag = "Notifications",
    responses((status = 200, description = "Total de não lidas")),
    security(("api_jwt" = []))
)]
pub async fn get_unread_count(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let count = app_state.notification_service.unread_count(user.0.id).await?;
    Ok(Json(json!({
        "success": true,
        "data": { "count": count },
    })))
}

// PUT /api/notifications/{id}/read
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    tag = "Notifications",
    params(("id" = Uuid, Path, description = "ID da notificação")),
    responses(
        (status = 200, description = "Marcada como lida", body = crate::models::notification::Notification),
        (status = 404, description = "Notificação inexistente ou de outro usuário")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_notification_read(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let notification = app_state
        .notification_service
        .mark_read(id, user.0.id)
        .await?;
    Ok(Json(Envelope::new(notification)))
}

// PUT /api/notifications/read-all
#[utoipa::path(
    put,
    path = "/api/notifications/read-all",
    tag = "Notifications",
    responses((status = 200, description = "Todas marcadas como lidas")),
    security(("api_jwt" = []))
)]
pub async fn mark_all_notifications_read(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state
        .notification_service
        .mark_all_read(user.0.id)
        .await?;
    Ok(Json(json!({
        "success": true,
        "data": { "updated": updated },
    })))
}
