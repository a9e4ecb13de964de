// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::common::error::AppError;

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn total_employees(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM employees WHERE is_active = TRUE",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn today_attendance(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attendance WHERE attendance_date = CURRENT_DATE",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn inventory_value(&self) -> Result<Decimal, AppError> {
        let value = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(total_value), 0) FROM inventory",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(value)
    }

    pub async fn month_expenses(&self) -> Result<Decimal, AppError> {
        let value = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses
             WHERE EXTRACT(MONTH FROM expense_date) = EXTRACT(MONTH FROM CURRENT_DATE)
               AND EXTRACT(YEAR FROM expense_date) = EXTRACT(YEAR FROM CURRENT_DATE)",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(value)
    }

    pub async fn pending_enquiries(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM enquiries WHERE status = 'pending'",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    // Folha do mês corrente na mesma semântica do agregador:
    // uma diária por linha de presença 'present'.
    pub async fn month_payroll(&self) -> Result<Decimal, AppError> {
        let value = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(e.rate_per_day), 0)
             FROM attendance a
             JOIN employees e ON a.employee_id = e.id
             WHERE a.status = 'present'
               AND EXTRACT(MONTH FROM a.attendance_date) = EXTRACT(MONTH FROM CURRENT_DATE)
               AND EXTRACT(YEAR FROM a.attendance_date) = EXTRACT(YEAR FROM CURRENT_DATE)",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(value)
    }
}
