// src/models/audit.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Entrada da trilha de auditoria. Somente inserida, nunca alterada.
// user_id é referência anulável: o usuário pode ser desativado depois.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub action: String,
    pub table_name: String,
    pub record_id: Option<Uuid>,
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AuditLogWithUser {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub entry: AuditLogEntry,
    pub user_name: Option<String>,
}
