// src/models/employee.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Funcionário de uma obra. Nunca é removido fisicamente: a exclusão é
// lógica (is_active = false) para preservar o histórico de presença e folha.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: Uuid,
    pub project_id: Uuid,
    pub employee_code: String,
    pub full_name: String,
    pub position: String,
    pub phone_number: Option<String>,
    pub rate_per_day: Decimal,
    pub is_active: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
