// src/db/payroll_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::payroll::{
        PayrollAggregate, PayrollReportRow, PayrollSnapshot, PayrollStatus, PayrollWithEmployee,
    },
};

#[derive(Clone)]
pub struct PayrollRepository {
    pool: PgPool,
}

impl PayrollRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Agregado de presença por funcionário ativo, com semântica de
    // LEFT JOIN: quem não tem presença no período aparece com zeros.
    // Só linhas 'present' contam para dias e horas.
    pub async fn aggregate_for_period<'e, E>(
        &self,
        executor: E,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<Vec<PayrollAggregate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, PayrollAggregate>(
            "SELECT e.id AS employee_id,
                    e.full_name,
                    e.rate_per_day,
                    COALESCE(SUM(a.hours_worked) FILTER (WHERE a.status = 'present'), 0) AS total_hours,
                    COUNT(a.id) FILTER (WHERE a.status = 'present') AS days_present
             FROM employees e
             LEFT JOIN attendance a
               ON a.employee_id = e.id
              AND a.attendance_date BETWEEN $1 AND $2
             WHERE e.is_active = TRUE
             GROUP BY e.id, e.full_name, e.rate_per_day
             ORDER BY lower(e.full_name) ASC, e.id ASC",
        )
        .bind(period_start)
        .bind(period_end)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    pub async fn period_exists(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM payroll WHERE period_start = $1 AND period_end = $2
             )",
        )
        .bind(period_start)
        .bind(period_end)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_snapshot<'e, E>(
        &self,
        executor: E,
        employee_id: Uuid,
        period_start: NaiveDate,
        period_end: NaiveDate,
        total_days: i32,
        total_hours: Decimal,
        rate_per_day: Decimal,
        gross_amount: Decimal,
        deductions: Decimal,
        net_amount: Decimal,
        processed_by: Uuid,
    ) -> Result<PayrollSnapshot, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let snapshot = sqlx::query_as::<_, PayrollSnapshot>(
            "INSERT INTO payroll
                 (employee_id, period_start, period_end, total_days, total_hours,
                  rate_per_day, gross_amount, deductions, net_amount, processed_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(employee_id)
        .bind(period_start)
        .bind(period_end)
        .bind(total_days)
        .bind(total_hours)
        .bind(rate_per_day)
        .bind(gross_amount)
        .bind(deductions)
        .bind(net_amount)
        .bind(processed_by)
        .fetch_one(executor)
        .await?;
        Ok(snapshot)
    }

    pub async fn list(
        &self,
        status: Option<PayrollStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PayrollWithEmployee>, AppError> {
        let rows = sqlx::query_as::<_, PayrollWithEmployee>(
            "SELECT p.*, e.employee_code, e.full_name, e.position
             FROM payroll p
             JOIN employees e ON p.employee_id = e.id
             WHERE ($1::payroll_status IS NULL OR p.status = $1)
             ORDER BY p.period_end DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count(&self, status: Option<PayrollStatus>) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM payroll WHERE ($1::payroll_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn by_period(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<Vec<PayrollWithEmployee>, AppError> {
        let rows = sqlx::query_as::<_, PayrollWithEmployee>(
            "SELECT p.*, e.employee_code, e.full_name, e.position
             FROM payroll p
             JOIN employees e ON p.employee_id = e.id
             WHERE p.period_start = $1 AND p.period_end = $2
             ORDER BY e.full_name ASC",
        )
        .bind(period_start)
        .bind(period_end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PayrollSnapshot>, AppError> {
        let snapshot = sqlx::query_as::<_, PayrollSnapshot>("SELECT * FROM payroll WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(snapshot)
    }

    pub async fn mark_paid(
        &self,
        id: Uuid,
        paid_date: NaiveDate,
    ) -> Result<Option<PayrollSnapshot>, AppError> {
        let snapshot = sqlx::query_as::<_, PayrollSnapshot>(
            "UPDATE payroll
             SET status = 'paid', paid_date = $1, updated_at = now()
             WHERE id = $2
             RETURNING *",
        )
        .bind(paid_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(snapshot)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: PayrollStatus,
    ) -> Result<Option<PayrollSnapshot>, AppError> {
        let snapshot = sqlx::query_as::<_, PayrollSnapshot>(
            "UPDATE payroll SET status = $1, updated_at = now()
             WHERE id = $2
             RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(snapshot)
    }

    pub async fn employee_history(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<PayrollSnapshot>, AppError> {
        let rows = sqlx::query_as::<_, PayrollSnapshot>(
            "SELECT * FROM payroll
             WHERE employee_id = $1
             ORDER BY period_end DESC
             LIMIT 12",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // Relatório por obra: dias presentes, horas e valor (diária x dias),
    // omitindo quem não tem nenhum registro no período.
    pub async fn project_report(
        &self,
        project_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PayrollReportRow>, AppError> {
        let rows = sqlx::query_as::<_, PayrollReportRow>(
            "SELECT e.id AS employee_id,
                    e.full_name,
                    e.position,
                    e.rate_per_day,
                    COUNT(a.id) FILTER (WHERE a.status = 'present') AS days_worked,
                    COALESCE(SUM(a.hours_worked) FILTER (WHERE a.status = 'present'), 0) AS total_hours,
                    e.rate_per_day * COUNT(a.id) FILTER (WHERE a.status = 'present') AS total_amount
             FROM employees e
             LEFT JOIN attendance a
               ON a.employee_id = e.id
              AND a.attendance_date BETWEEN $2 AND $3
             WHERE e.project_id = $1 AND e.is_active = TRUE
             GROUP BY e.id, e.full_name, e.position, e.rate_per_day
             HAVING COUNT(a.id) > 0
             ORDER BY e.full_name ASC",
        )
        .bind(project_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
