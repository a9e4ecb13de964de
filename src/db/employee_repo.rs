// src/db/employee_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::employee::Employee};

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Listagem com filtros opcionais conjuntivos.
    // Os casts explícitos permitem parâmetros nulos em consultas runtime.
    pub async fn list(
        &self,
        project_id: Uuid,
        is_active: Option<bool>,
        search: Option<&str>,
    ) -> Result<Vec<Employee>, AppError> {
        let pattern = search.map(|s| format!("%{s}%"));

        let employees = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees
             WHERE project_id = $1
               AND ($2::boolean IS NULL OR is_active = $2)
               AND ($3::text IS NULL
                    OR full_name ILIKE $3
                    OR position ILIKE $3
                    OR phone_number ILIKE $3)
             ORDER BY full_name ASC",
        )
        .bind(project_id)
        .bind(is_active)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    pub async fn list_active(&self, project_id: Uuid) -> Result<Vec<Employee>, AppError> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees
             WHERE project_id = $1 AND is_active = TRUE
             ORDER BY lower(full_name) ASC, id ASC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    // IDs de todos os funcionários da obra (ativos ou não), para validar
    // que um lote de presença não injeta registros de outra obra.
    pub async fn ids_for_project<'e, E>(
        &self,
        executor: E,
        project_id: Uuid,
    ) -> Result<Vec<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ids =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM employees WHERE project_id = $1")
                .bind(project_id)
                .fetch_all(executor)
                .await?;
        Ok(ids)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    // Último código emitido no formato 'EMP-NNNN'.
    pub async fn last_employee_code(&self) -> Result<Option<String>, AppError> {
        let code = sqlx::query_scalar::<_, String>(
            "SELECT employee_code FROM employees
             WHERE employee_code LIKE 'EMP-%'
             ORDER BY employee_code DESC
             LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(code)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        project_id: Uuid,
        employee_code: &str,
        full_name: &str,
        position: &str,
        phone_number: Option<&str>,
        rate_per_day: Decimal,
        created_by: Uuid,
    ) -> Result<Employee, AppError> {
        let employee = sqlx::query_as::<_, Employee>(
            "INSERT INTO employees
                 (project_id, employee_code, full_name, position, phone_number, rate_per_day, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(project_id)
        .bind(employee_code)
        .bind(full_name)
        .bind(position)
        .bind(phone_number)
        .bind(rate_per_day)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(employee)
    }

    pub async fn update(
        &self,
        id: Uuid,
        full_name: &str,
        position: &str,
        phone_number: Option<&str>,
        rate_per_day: Decimal,
    ) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>(
            "UPDATE employees
             SET full_name = $1, position = $2, phone_number = $3, rate_per_day = $4,
                 updated_at = now()
             WHERE id = $5
             RETURNING *",
        )
        .bind(full_name)
        .bind(position)
        .bind(phone_number)
        .bind(rate_per_day)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }

    // Exclusão lógica: o histórico de presença e folha permanece íntegro.
    pub async fn deactivate(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>(
            "UPDATE employees SET is_active = FALSE, updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }
}
