// src/services/audit_service.rs

use uuid::Uuid;

use crate::{common::error::AppError, db::AuditRepository, models::audit::AuditLogWithUser};

// Trilha de auditoria como efeito colateral de toda mutação.
// A gravação é melhor esforço: falha vira log, nunca erro da requisição.
#[derive(Clone)]
pub struct AuditService {
    audit_repo: AuditRepository,
}

impl AuditService {
    pub fn new(audit_repo: AuditRepository) -> Self {
        Self { audit_repo }
    }

    pub async fn record(
        &self,
        user_id: Option<Uuid>,
        action: &str,
        table_name: &str,
        record_id: Option<Uuid>,
        details: Option<serde_json::Value>,
    ) {
        if let Err(e) = self
            .audit_repo
            .insert(user_id, action, table_name, record_id, details)
            .await
        {
            tracing::warn!("Failed to write audit log ({action} {table_name}): {e}");
        }
    }

    pub async fn list(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<AuditLogWithUser>, i64), AppError> {
        let rows = self.audit_repo.list(limit, offset).await?;
        let total = self.audit_repo.count().await?;
        Ok((rows, total))
    }
}
