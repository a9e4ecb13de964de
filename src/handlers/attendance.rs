// src/handlers/attendance.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{CanWriteAttendance, RequireCapability},
    },
    models::attendance::BulkAttendanceRecord,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceTableQuery {
    pub project_id: Option<Uuid>,
    pub attendance_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct BulkSavePayload {
    pub project_id: Uuid,
    pub attendance_date: NaiveDate,

    #[validate(nested)]
    pub attendance_records: Vec<BulkAttendanceRecord>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceHistoryQuery {
    pub project_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub employee_id: Option<Uuid>,
}

// GET /api/attendance/table — a tabela do dia, com o elenco completo
#[utoipa::path(
    get,
    path = "/api/attendance/table",
    tag = "Attendance",
    params(AttendanceTableQuery),
    responses(
        (status = 200, description = "Uma linha por funcionário ativo", body = Vec<crate::models::attendance::DayTableRow>),
        (status = 400, description = "Parâmetros obrigatórios ausentes"),
        (status = 403, description = "Sem acesso à obra")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_attendance_table(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<AttendanceTableQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (project_id, date) = match (query.project_id, query.attendance_date) {
        (Some(p), Some(d)) => (p, d),
        _ => {
            return Err(AppError::BadRequest(
                "project_id and attendance_date are required".to_string(),
            ))
        }
    };

    app_state
        .access_service
        .ensure_project_access(&user.0, project_id)
        .await?;

    let rows = app_state.attendance_service.day_table(project_id, date).await?;

    Ok(Json(json!({
        "success": true,
        "count": rows.len(),
        "date": date,
        "data": rows,
    })))
}

// POST /api/attendance/bulk-save — upsert em lote, tudo ou nada
#[utoipa::path(
    post,
    path = "/api/attendance/bulk-save",
    tag = "Attendance",
    request_body = BulkSavePayload,
    responses(
        (status = 200, description = "Lote aplicado atomicamente"),
        (status = 400, description = "Registro aponta para funcionário de outra obra"),
        (status = 403, description = "Papel sem permissão ou sem acesso à obra")
    ),
    security(("api_jwt" = []))
)]
pub async fn bulk_save_attendance(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireCapability<CanWriteAttendance>,
    Json(payload): Json<BulkSavePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .access_service
        .ensure_project_access(&user.0, payload.project_id)
        .await?;

    let records_saved = app_state
        .attendance_service
        .bulk_save(
            payload.project_id,
            payload.attendance_date,
            &payload.attendance_records,
            user.0.id,
        )
        .await?;

    app_state
        .audit_service
        .record(
            Some(user.0.id),
            "CREATE",
            "attendance",
            None,
            Some(json!({
                "project_id": payload.project_id,
                "attendance_date": payload.attendance_date,
                "records": records_saved,
            })),
        )
        .await;

    Ok(Json(json!({
        "success": true,
        "message": "Attendance saved successfully",
        "records_saved": records_saved,
    })))
}

// GET /api/attendance/history
#[utoipa::path(
    get,
    path = "/api/attendance/history",
    tag = "Attendance",
    params(AttendanceHistoryQuery),
    responses(
        (status = 200, description = "Histórico filtrado", body = Vec<crate::models::attendance::AttendanceHistoryRow>),
        (status = 400, description = "project_id ausente"),
        (status = 403, description = "Sem acesso à obra")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_attendance_history(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<AttendanceHistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let project_id = query
        .project_id
        .ok_or_else(|| AppError::BadRequest("project_id is required".to_string()))?;

    app_state
        .access_service
        .ensure_project_access(&user.0, project_id)
        .await?;

    let rows = app_state
        .attendance_service
        .history(project_id, query.start_date, query.end_date, query.employee_id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "count": rows.len(),
        "data": rows,
    })))
}
