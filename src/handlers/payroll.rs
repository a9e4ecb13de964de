// src/handlers/payroll.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    common::{error::AppError, response::Envelope},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{CanWritePayroll, RequireCapability},
    },
    models::payroll::PayrollStatus,
    services::report_service,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GeneratePayrollPayload {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PayrollListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<PayrollStatus>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PayrollExportQuery {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MarkPaidPayload {
    pub paid_date: NaiveDate,
}

// POST /api/payroll/generate (somente gerente)
#[utoipa::path(
    post,
    path = "/api/payroll/generate",
    tag = "Payroll",
    request_body = GeneratePayrollPayload,
    responses(
        (status = 200, description = "Fotografias geradas", body = Vec<crate::models::payroll::PayrollSnapshot>),
        (status = 400, description = "Período inválido"),
        (status = 403, description = "Somente gerente"),
        (status = 409, description = "Período já gerado")
    ),
    security(("api_jwt" = []))
)]
pub async fn generate_payroll(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireCapability<CanWritePayroll>,
    Json(payload): Json<GeneratePayrollPayload>,
) -> Result<impl IntoResponse, AppError> {
    let snapshots = app_state
        .payroll_service
        .generate(payload.period_start, payload.period_end, user.0.id)
        .await?;

    app_state
        .audit_service
        .record(
            Some(user.0.id),
            "CREATE",
            "payroll",
            None,
            serde_json::to_value(&payload).ok(),
        )
        .await;

    Ok(Json(json!({
        "success": true,
        "message": format!("Payroll generated for {} employees", snapshots.len()),
        "data": snapshots,
    })))
}

// GET /api/payroll
#[utoipa::path(
    get,
    path = "/api/payroll",
    tag = "Payroll",
    params(PayrollListQuery),
    responses(
        (status = 200, description = "Fotografias paginadas", body = Vec<crate::models::payroll::PayrollSnapshot>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_payrolls(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<PayrollListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * limit;

    let (rows, total) = app_state.payroll_service.list(query.status, limit, offset).await?;

    let total_pages = (total + limit - 1) / limit;

    Ok(Json(json!({
        "success": true,
        "data": rows,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total,
            "total_pages": total_pages,
        },
    })))
}

// GET /api/payroll/export?period_start&period_end — planilha XLSX
#[utoipa::path(
    get,
    path = "/api/payroll/export",
    tag = "Payroll",
    params(PayrollExportQuery),
    responses(
        (status = 200, description = "Planilha XLSX do período", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 404, description = "Nenhuma folha gerada no período")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_payroll(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<PayrollExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (rows, _summary) = app_state
        .payroll_service
        .by_period(query.period_start, query.period_end)
        .await?;

    let buffer = app_state.report_service.payroll_export_workbook(&rows)?;
    let filename = report_service::payroll_export_filename(query.period_start, query.period_end);

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        buffer,
    ))
}

// GET /api/payroll/{period_start}/{period_end}
#[utoipa::path(
    get,
    path = "/api/payroll/period/{period_start}/{period_end}",
    tag = "Payroll",
    params(
        ("period_start" = NaiveDate, Path, description = "Início do período"),
        ("period_end" = NaiveDate, Path, description = "Fim do período")
    ),
    responses(
        (status = 200, description = "Fotografias do período com resumo"),
        (status = 404, description = "Nenhuma folha gerada no período")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_payroll_by_period(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path((period_start, period_end)): Path<(NaiveDate, NaiveDate)>,
) -> Result<impl IntoResponse, AppError> {
    let (rows, summary) = app_state
        .payroll_service
        .by_period(period_start, period_end)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": rows,
        "summary": summary,
    })))
}

// PUT /api/payroll/{id}/mark-paid (somente gerente)
#[utoipa::path(
    put,
    path = "/api/payroll/{id}/mark-paid",
    tag = "Payroll",
    params(("id" = Uuid, Path, description = "ID da fotografia")),
    request_body = MarkPaidPayload,
    responses(
        (status = 200, description = "Marcada como paga", body = crate::models::payroll::PayrollSnapshot),
        (status = 404, description = "Fotografia inexistente"),
        (status = 409, description = "Fotografia cancelada")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_payroll_paid(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireCapability<CanWritePayroll>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MarkPaidPayload>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = app_state
        .payroll_service
        .mark_paid(id, payload.paid_date)
        .await?;

    app_state
        .audit_service
        .record(
            Some(user.0.id),
            "UPDATE",
            "payroll",
            Some(id),
            serde_json::to_value(&payload).ok(),
        )
        .await;

    Ok(Json(json!({
        "success": true,
        "message": "Payroll marked as paid",
        "data": snapshot,
    })))
}

// PUT /api/payroll/{id}/cancel (somente gerente)
#[utoipa::path(
    put,
    path = "/api/payroll/{id}/cancel",
    tag = "Payroll",
    params(("id" = Uuid, Path, description = "ID da fotografia")),
    responses(
        (status = 200, description = "Cancelada", body = crate::models::payroll::PayrollSnapshot),
        (status = 404, description = "Fotografia inexistente"),
        (status = 409, description = "Fotografia já paga")
    ),
    security(("api_jwt" = []))
)]
pub async fn cancel_payroll(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireCapability<CanWritePayroll>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = app_state.payroll_service.cancel(id).await?;

    app_state
        .audit_service
        .record(Some(user.0.id), "UPDATE", "payroll", Some(id), None)
        .await;

    Ok(Json(Envelope::new(snapshot)))
}

// GET /api/payroll/employee/{employee_id} — últimos 12 períodos
#[utoipa::path(
    get,
    path = "/api/payroll/employee/{employee_id}",
    tag = "Payroll",
    params(("employee_id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 200, description = "Histórico de folha do funcionário", body = Vec<crate::models::payroll::PayrollSnapshot>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_employee_payroll_history(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(employee_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state.payroll_service.employee_history(employee_id).await?;
    Ok(Json(json!({
        "success": true,
        "data": rows,
    })))
}
