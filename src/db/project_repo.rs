// src/db/project_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::project::{Project, ProjectAssignment, ProjectStats},
};

#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        project_name: &str,
        project_code: &str,
        location: Option<&str>,
        description: Option<&str>,
        created_by: Uuid,
    ) -> Result<Project, AppError> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (project_name, project_code, location, description, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(project_name)
        .bind(project_code)
        .bind(location)
        .bind(description)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(
                        "A project with this code already exists".to_string(),
                    );
                }
            }
            AppError::DatabaseError(e)
        })
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    pub async fn list_all(&self) -> Result<Vec<Project>, AppError> {
        let projects =
            sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY project_name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(projects)
    }

    // Obras visíveis para um usuário não-gerente: apenas as atribuídas.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT p.* FROM projects p
             JOIN project_assignments pa ON pa.project_id = p.id
             WHERE pa.user_id = $1
             ORDER BY p.project_name ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(projects)
    }

    // A consulta do predicado de acesso: existe vínculo (usuário, obra)?
    pub async fn assignment_exists(
        &self,
        user_id: Uuid,
        project_id: Uuid,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM project_assignments
                 WHERE user_id = $1 AND project_id = $2
             )",
        )
        .bind(user_id)
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn assign(
        &self,
        user_id: Uuid,
        project_id: Uuid,
        assigned_by: Uuid,
    ) -> Result<ProjectAssignment, AppError> {
        sqlx::query_as::<_, ProjectAssignment>(
            "INSERT INTO project_assignments (user_id, project_id, assigned_by)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(user_id)
        .bind(project_id)
        .bind(assigned_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(
                        "User is already assigned to this project".to_string(),
                    );
                }
            }
            AppError::DatabaseError(e)
        })
    }

    pub async fn stats(&self, project_id: Uuid) -> Result<ProjectStats, AppError> {
        let employee_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM employees WHERE project_id = $1 AND is_active = TRUE",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;

        let month_attendance = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attendance
             WHERE project_id = $1
               AND EXTRACT(MONTH FROM attendance_date) = EXTRACT(MONTH FROM CURRENT_DATE)
               AND EXTRACT(YEAR FROM attendance_date) = EXTRACT(YEAR FROM CURRENT_DATE)",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;

        let inventory_value = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(total_value), 0) FROM inventory WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;

        let month_expenses = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses
             WHERE project_id = $1
               AND EXTRACT(MONTH FROM expense_date) = EXTRACT(MONTH FROM CURRENT_DATE)
               AND EXTRACT(YEAR FROM expense_date) = EXTRACT(YEAR FROM CURRENT_DATE)",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(ProjectStats {
            employee_count,
            month_attendance,
            inventory_value,
            month_expenses,
        })
    }
}
