// src/handlers/inventory.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
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
        rbac::{CanDeleteInventory, CanWriteExpenses, CanWriteInventory, RequireCapability},
    },
};

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("The value cannot be negative.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct InventoryListQuery {
    pub project_id: Option<Uuid>,
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateItemPayload {
    pub project_id: Uuid,

    #[validate(length(min = 1, message = "Item name is required."))]
    pub item_name: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub quantity: Decimal,

    #[validate(length(min = 1, message = "Unit is required."))]
    pub unit: String,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub unit_price: Decimal,

    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateItemPayload {
    #[validate(length(min = 1, message = "Item name is required."))]
    pub item_name: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub quantity: Decimal,

    #[validate(length(min = 1, message = "Unit is required."))]
    pub unit: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub unit_price: Decimal,

    pub category: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ExpenseListQuery {
    pub project_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateExpensePayload {
    pub project_id: Uuid,

    #[validate(length(min = 1, message = "Expense type is required."))]
    pub expense_type: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub amount: Decimal,

    pub expense_date: NaiveDate,
    pub receipt_number: Option<String>,
    pub category: Option<String>,
}

// GET /api/inventory?project_id&category?&search?
#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "Inventory",
    params(InventoryListQuery),
    responses(
        (status = 200, description = "Materiais da obra", body = Vec<crate::models::inventory::InventoryItem>),
        (status = 400, description = "project_id ausente"),
        (status = 403, description = "Sem acesso à obra")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_project_inventory(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<InventoryListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let project_id = query
        .project_id
        .ok_or_else(|| AppError::BadRequest("project_id is required".to_string()))?;

    app_state
        .access_service
        .ensure_project_access(&user.0, project_id)
        .await?;

    let items = app_state
        .inventory_service
        .list(project_id, query.category.as_deref(), query.search.as_deref())
        .await?;

    Ok(Json(ListEnvelope::new(items)))
}

// POST /api/inventory
#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = "Inventory",
    request_body = CreateItemPayload,
    responses(
        (status = 201, description = "Item criado", body = crate::models::inventory::InventoryItem),
        (status = 403, description = "Papel sem permissão ou sem acesso à obra")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_inventory_item(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireCapability<CanWriteInventory>,
    Json(payload): Json<CreateItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .access_service
        .ensure_project_access(&user.0, payload.project_id)
        .await?;

    let item = app_state
        .inventory_service
        .create(
            payload.project_id,
            &payload.item_name,
            payload.description.as_deref(),
            payload.quantity,
            &payload.unit,
            payload.unit_price,
            payload.category.as_deref(),
            user.0.id,
        )
        .await?;

    app_state
        .audit_service
        .record(
            Some(user.0.id),
            "CREATE",
            "inventory",
            Some(item.id),
            serde_json::to_value(&payload).ok(),
        )
        .await;

    Ok((StatusCode::CREATED, Json(Envelope::new(item))))
}

// PUT /api/inventory/{id}
#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do item")),
    request_body = UpdateItemPayload,
    responses(
        (status = 200, description = "Item atualizado", body = crate::models::inventory::InventoryItem),
        (status = 404, description = "Item inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_inventory_item(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireCapability<CanWriteInventory>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let current = app_state.inventory_service.find(id).await?;
    app_state
        .access_service
        .ensure_project_access(&user.0, current.project_id)
        .await?;

    let item = app_state
        .inventory_service
        .update(
            id,
            &payload.item_name,
            payload.description.as_deref(),
            payload.quantity,
            &payload.unit,
            payload.unit_price,
            payload.category.as_deref(),
        )
        .await?;

    app_state
        .audit_service
        .record(
            Some(user.0.id),
            "UPDATE",
            "inventory",
            Some(id),
            serde_json::to_value(&payload).ok(),
        )
        .await;

    Ok(Json(Envelope::new(item)))
}

// DELETE /api/inventory/{id} (somente gerente)
#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do item")),
    responses(
        (status = 200, description = "Item removido"),
        (status = 404, description = "Item inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_inventory_item(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireCapability<CanDeleteInventory>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let current = app_state.inventory_service.find(id).await?;
    app_state
        .access_service
        .ensure_project_access(&user.0, current.project_id)
        .await?;

    app_state.inventory_service.delete(id).await?;

    app_state
        .audit_service
        .record(Some(user.0.id), "DELETE", "inventory", Some(id), None)
        .await;

    Ok(Json(json!({
        "success": true,
        "message": "Item deleted successfully",
    })))
}

// GET /api/inventory/expenses
#[utoipa::path(
    get,
    path = "/api/inventory/expenses",
    tag = "Inventory",
    params(ExpenseListQuery),
    responses(
        (status = 200, description = "Despesas da obra", body = Vec<crate::models::inventory::Expense>),
        (status = 400, description = "project_id ausente"),
        (status = 403, description = "Sem acesso à obra")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_project_expenses(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<ExpenseListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let project_id = query
        .project_id
        .ok_or_else(|| AppError::BadRequest("project_id is required".to_string()))?;

    app_state
        .access_service
        .ensure_project_access(&user.0, project_id)
        .await?;

    let expenses = app_state
        .inventory_service
        .list_expenses(
            project_id,
            query.start_date,
            query.end_date,
            query.category.as_deref(),
        )
        .await?;

    Ok(Json(ListEnvelope::new(expenses)))
}

// POST /api/inventory/expenses
#[utoipa::path(
    post,
    path = "/api/inventory/expenses",
    tag = "Inventory",
    request_body = CreateExpensePayload,
    responses(
        (status = 201, description = "Despesa criada", body = crate::models::inventory::Expense),
        (status = 403, description = "Papel sem permissão ou sem acesso à obra")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_expense(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireCapability<CanWriteExpenses>,
    Json(payload): Json<CreateExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .access_service
        .ensure_project_access(&user.0, payload.project_id)
        .await?;

    let expense = app_state
        .inventory_service
        .create_expense(
            payload.project_id,
            &payload.expense_type,
            payload.description.as_deref(),
            payload.amount,
            payload.expense_date,
            payload.receipt_number.as_deref(),
            payload.category.as_deref(),
            user.0.id,
        )
        .await?;

    app_state
        .audit_service
        .record(
            Some(user.0.id),
            "CREATE",
            "expenses",
            Some(expense.id),
            serde_json::to_value(&payload).ok(),
        )
        .await;

    Ok((StatusCode::CREATED, Json(Envelope::new(expense))))
}
