// src/db/enquiry_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::enquiry::{Enquiry, EnquiryStatus, EnquiryWithNames},
};

const SELECT_WITH_NAMES: &str =
    "SELECT q.*, fu.full_name AS from_name, tu.full_name AS to_name
     FROM enquiries q
     JOIN users fu ON q.from_user = fu.id
     JOIN users tu ON q.to_user = tu.id";

#[derive(Clone)]
pub struct EnquiryRepository {
    pool: PgPool,
}

impl EnquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        from_user: Uuid,
        to_user: Uuid,
        subject: &str,
        message: &str,
        attachment_url: Option<&str>,
    ) -> Result<Enquiry, AppError> {
        let enquiry = sqlx::query_as::<_, Enquiry>(
            "INSERT INTO enquiries (from_user, to_user, subject, message, attachment_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(from_user)
        .bind(to_user)
        .bind(subject)
        .bind(message)
        .bind(attachment_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(enquiry)
    }

    // Gerente enxerga tudo; os demais, só o que enviaram ou receberam.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        see_all: bool,
    ) -> Result<Vec<EnquiryWithNames>, AppError> {
        let sql = format!(
            "{SELECT_WITH_NAMES}
             WHERE $1 OR q.from_user = $2 OR q.to_user = $2
             ORDER BY q.created_at DESC"
        );
        let rows = sqlx::query_as::<_, EnquiryWithNames>(&sql)
            .bind(see_all)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Enquiry>, AppError> {
        let enquiry = sqlx::query_as::<_, Enquiry>("SELECT * FROM enquiries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(enquiry)
    }

    pub async fn respond(
        &self,
        id: Uuid,
        response: &str,
        responded_by: Uuid,
    ) -> Result<Option<Enquiry>, AppError> {
        let enquiry = sqlx::query_as::<_, Enquiry>(
            "UPDATE enquiries
             SET response = $1, responded_by = $2, responded_at = now(), status = 'responded'
             WHERE id = $3
             RETURNING *",
        )
        .bind(response)
        .bind(responded_by)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(enquiry)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: EnquiryStatus,
    ) -> Result<Option<Enquiry>, AppError> {
        let enquiry = sqlx::query_as::<_, Enquiry>(
            "UPDATE enquiries SET status = $1 WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(enquiry)
    }

    pub async fn pending_count(&self, user_id: Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM enquiries WHERE to_user = $1 AND status = 'pending'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
