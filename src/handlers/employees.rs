// src/handlers/employees.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::{
        error::AppError,
        response::{Envelope, ListEnvelope},
    },
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{CanDeleteEmployees, CanWriteEmployees, RequireCapability},
    },
};

// A diária precisa ser positiva (não apenas não-negativa).
fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() || val.is_zero() {
        let mut err = ValidationError::new("range");
        err.message = Some("The value must be positive.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EmployeeListQuery {
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEmployeePayload {
    pub project_id: Uuid,

    #[validate(length(min = 1, message = "Full name is required."))]
    pub full_name: String,

    #[validate(length(min = 1, message = "Position is required."))]
    pub position: String,

    pub phone_number: Option<String>,

    #[validate(custom(function = "validate_positive"))]
    pub rate_per_day: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployeePayload {
    #[validate(length(min = 1, message = "Full name is required."))]
    pub full_name: String,

    #[validate(length(min = 1, message = "Position is required."))]
    pub position: String,

    pub phone_number: Option<String>,

    #[validate(custom(function = "validate_positive"))]
    pub rate_per_day: Decimal,
}

// GET /api/employees/project/{project_id}
#[utoipa::path(
    get,
    path = "/api/employees/project/{project_id}",
    tag = "Employees",
    params(
        ("project_id" = Uuid, Path, description = "ID da obra"),
        EmployeeListQuery
    ),
    responses(
        (status = 200, description = "Funcionários da obra", body = Vec<crate::models::employee::Employee>),
        (status = 403, description = "Sem acesso à obra")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_project_employees(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(project_id): Path<Uuid>,
    Query(query): Query<EmployeeListQuery>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .access_service
        .ensure_project_access(&user.0, project_id)
        .await?;

    let employees = app_state
        .employee_service
        .list(project_id, query.is_active, query.search.as_deref())
        .await?;

    Ok(Json(ListEnvelope::new(employees)))
}

// POST /api/employees
#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "Employees",
    request_body = CreateEmployeePayload,
    responses(
        (status = 201, description = "Funcionário criado", body = crate::models::employee::Employee),
        (status = 403, description = "Papel sem permissão ou sem acesso à obra")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_employee(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireCapability<CanWriteEmployees>,
    Json(payload): Json<CreateEmployeePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .access_service
        .ensure_project_access(&user.0, payload.project_id)
        .await?;

    let employee = app_state
        .employee_service
        .create(
            payload.project_id,
            &payload.full_name,
            &payload.position,
            payload.phone_number.as_deref(),
            payload.rate_per_day,
            user.0.id,
        )
        .await?;

    app_state
        .audit_service
        .record(
            Some(user.0.id),
            "CREATE",
            "employees",
            Some(employee.id),
            serde_json::to_value(&payload).ok(),
        )
        .await;

    Ok((StatusCode::CREATED, Json(Envelope::new(employee))))
}

// PUT /api/employees/{id}
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    request_body = UpdateEmployeePayload,
    responses(
        (status = 200, description = "Funcionário atualizado", body = crate::models::employee::Employee),
        (status = 404, description = "Funcionário inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_employee(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireCapability<CanWriteEmployees>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // 404 primeiro (como na origem); o acesso é checado contra a obra
    // do próprio funcionário.
    let current = app_state.employee_service.find(id).await?;
    app_state
        .access_service
        .ensure_project_access(&user.0, current.project_id)
        .await?;

    let employee = app_state
        .employee_service
        .update(
            id,
            &payload.full_name,
            &payload.position,
            payload.phone_number.as_deref(),
            payload.rate_per_day,
        )
        .await?;

    app_state
        .audit_service
        .record(
            Some(user.0.id),
            "UPDATE",
            "employees",
            Some(id),
            serde_json::to_value(&payload).ok(),
        )
        .await;

    Ok(Json(Envelope::new(employee)))
}

// DELETE /api/employees/{id} — exclusão lógica, somente gerente
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 200, description = "Funcionário desativado", body = crate::models::employee::Employee),
        (status = 404, description = "Funcionário inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_employee(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireCapability<CanDeleteEmployees>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let current = app_state.employee_service.find(id).await?;
    app_state
        .access_service
        .ensure_project_access(&user.0, current.project_id)
        .await?;

    let employee = app_state.employee_service.deactivate(id).await?;

    app_state
        .audit_service
        .record(Some(user.0.id), "DELETE", "employees", Some(id), None)
        .await;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Employee deleted successfully",
        "data": employee,
    })))
}
