// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::{
    common::{error::AppError, response::Envelope},
    config::AppState,
    middleware::rbac::{CanReadAuditLogs, CanReadDashboard, RequireCapability},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct AuditLogQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// GET /api/dashboard/stats (somente gerente)
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Indicadores globais", body = crate::models::dashboard::DashboardStats),
        (status = 403, description = "Somente gerente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_dashboard_stats(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanReadDashboard>,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.dashboard_service.stats().await?;
    Ok(Json(Envelope::new(stats)))
}

// GET /api/dashboard/audit-logs (somente gerente)
#[utoipa::path(
    get,
    path = "/api/dashboard/audit-logs",
    tag = "Dashboard",
    params(AuditLogQuery),
    responses(
        (status = 200, description = "Trilha de auditoria, mais recente primeiro"),
        (status = 403, description = "Somente gerente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_audit_logs(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanReadAuditLogs>,
    Query(query): Query<AuditLogQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let offset = query.offset.unwrap_or(0).max(0);

    let (rows, total) = app_state.audit_service.list(limit, offset).await?;

    Ok(Json(json!({
        "success": true,
        "count": rows.len(),
        "total": total,
        "data": rows,
    })))
}
