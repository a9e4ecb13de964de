// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{CanExportInventory, RequireCapability},
    },
    services::report_service,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct PayrollReportQuery {
    pub project_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub format: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct InventoryReportQuery {
    pub project_id: Option<Uuid>,
    pub format: Option<String>,
}

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn attachment(content_type: &str, filename: String, buffer: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        buffer,
    )
        .into_response()
}

// GET /api/reports/payroll?project_id&start_date&end_date&format={json|pdf|excel}
#[utoipa::path(
    get,
    path = "/api/reports/payroll",
    tag = "Reports",
    params(PayrollReportQuery),
    responses(
        (status = 200, description = "Relatório em JSON, PDF ou XLSX"),
        (status = 400, description = "Parâmetros ausentes ou formato desconhecido"),
        (status = 403, description = "Sem acesso à obra"),
        (status = 404, description = "Obra inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn payroll_report(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<PayrollReportQuery>,
) -> Result<Response, AppError> {
    let project_id = query
        .project_id
        .ok_or_else(|| AppError::BadRequest("project_id is required".to_string()))?;
    let (start_date, end_date) = match (query.start_date, query.end_date) {
        (Some(s), Some(e)) => (s, e),
        _ => {
            return Err(AppError::BadRequest(
                "start_date and end_date are required".to_string(),
            ))
        }
    };

    // Predicado de acesso antes da existência da obra: um 403 não
    // revela nada sobre obras alheias.
    app_state
        .access_service
        .ensure_project_access(&user.0, project_id)
        .await?;

    let (info, rows) = app_state
        .report_service
        .payroll_report_data(project_id, start_date, end_date)
        .await?;

    match query.format.as_deref().unwrap_or("json") {
        "pdf" => {
            let buffer = app_state.report_service.payroll_pdf(&info, &rows)?;
            let filename = report_service::payroll_report_filename(
                &info.project_code,
                start_date,
                end_date,
                "pdf",
            );
            Ok(attachment("application/pdf", filename, buffer))
        }
        "excel" => {
            let buffer = app_state.report_service.payroll_workbook(&info, &rows)?;
            let filename = report_service::payroll_report_filename(
                &info.project_code,
                start_date,
                end_date,
                "xlsx",
            );
            Ok(attachment(XLSX_CONTENT_TYPE, filename, buffer))
        }
        "json" => {
            let summary = report_service::payroll_summary(&rows);
            Ok(Json(json!({
                "success": true,
                "project": info,
                "data": rows,
                "summary": summary,
            }))
            .into_response())
        }
        other => Err(AppError::BadRequest(format!("Unknown format: {other}"))),
    }
}

// GET /api/reports/inventory?project_id&format={json|pdf|excel}
#[utoipa::path(
    get,
    path = "/api/reports/inventory",
    tag = "Reports",
    params(InventoryReportQuery),
    responses(
        (status = 200, description = "Relatório em JSON, PDF ou XLSX"),
        (status = 400, description = "Parâmetros ausentes ou formato desconhecido"),
        (status = 403, description = "Papel sem permissão ou sem acesso à obra"),
        (status = 404, description = "Obra inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn inventory_report(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireCapability<CanExportInventory>,
    Query(query): Query<InventoryReportQuery>,
) -> Result<Response, AppError> {
    let project_id = query
        .project_id
        .ok_or_else(|| AppError::BadRequest("project_id is required".to_string()))?;

    app_state
        .access_service
        .ensure_project_access(&user.0, project_id)
        .await?;

    let (project, items, summary) = app_state
        .report_service
        .inventory_report_data(project_id)
        .await?;

    match query.format.as_deref().unwrap_or("json") {
        "pdf" => {
            let buffer = app_state
                .report_service
                .inventory_pdf(&project, &items, &summary)?;
            let filename =
                report_service::inventory_report_filename(&project.project_code, "pdf");
            Ok(attachment("application/pdf", filename, buffer))
        }
        "excel" => {
            let buffer = app_state
                .report_service
                .inventory_workbook(&project, &items, &summary)?;
            let filename =
                report_service::inventory_report_filename(&project.project_code, "xlsx");
            Ok(attachment(XLSX_CONTENT_TYPE, filename, buffer))
        }
        "json" => Ok(Json(json!({
            "success": true,
            "project": project,
            "data": items,
            "summary": summary,
        }))
        .into_response()),
        other => Err(AppError::BadRequest(format!("Unknown format: {other}"))),
    }
}
