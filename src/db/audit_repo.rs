// src/db/audit_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{audit::AuditLogWithUser, dashboard::RecentActivity},
};

// Repositório da trilha de auditoria. A tabela só recebe INSERT.
#[derive(Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        user_id: Option<Uuid>,
        action: &str,
        table_name: &str,
        record_id: Option<Uuid>,
        details: Option<serde_json::Value>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO audit_logs (user_id, action, table_name, record_id, details)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user_id)
        .bind(action)
        .bind(table_name)
        .bind(record_id)
        .bind(details)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<AuditLogWithUser>, AppError> {
        let rows = sqlx::query_as::<_, AuditLogWithUser>(
            "SELECT al.*, u.full_name AS user_name
             FROM audit_logs al
             LEFT JOIN users u ON al.user_id = u.id
             ORDER BY al.created_at DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM audit_logs")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    pub async fn recent(&self, limit: i64) -> Result<Vec<RecentActivity>, AppError> {
        let rows = sqlx::query_as::<_, RecentActivity>(
            "SELECT al.action, al.table_name, al.created_at, u.full_name AS user_name
             FROM audit_logs al
             LEFT JOIN users u ON al.user_id = u.id
             ORDER BY al.created_at DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
