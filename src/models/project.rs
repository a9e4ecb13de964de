// src/models/project.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Uma obra/canteiro. É o "tenant" que escopa funcionários,
// estoque, despesas e presenças.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Project {
    pub id: Uuid,
    pub project_name: String,
    pub project_code: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Vínculo N:N entre usuário e obra. A existência da linha (ou o papel
// manager) é a única entrada do predicado de acesso.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ProjectAssignment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub assigned_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProjectPayload {
    #[validate(length(min = 1, message = "Project name is required."))]
    pub project_name: String,

    #[validate(length(min = 1, message = "Project code is required."))]
    pub project_code: String,

    pub location: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssignUserPayload {
    pub user_id: Uuid,
    pub project_id: Uuid,
}

// Indicadores resumidos de uma obra.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectStats {
    pub employee_count: i64,
    pub month_attendance: i64,
    pub inventory_value: Decimal,
    pub month_expenses: Decimal,
}
