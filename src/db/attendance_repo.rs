// src/db/attendance_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::attendance::{AttendanceHistoryRow, AttendanceRecord, AttendanceStatus},
};

#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn records_for_date(
        &self,
        project_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let records = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT * FROM attendance
             WHERE project_id = $1 AND attendance_date = $2",
        )
        .bind(project_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    // Upsert chaveado pela restrição UNIQUE (employee_id, attendance_date).
    // Nunca insere duplicata: o conflito sobrescreve no lugar.
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert<'e, E>(
        &self,
        executor: E,
        project_id: Uuid,
        employee_id: Uuid,
        attendance_date: NaiveDate,
        status: AttendanceStatus,
        hours_worked: Decimal,
        comment: Option<&str>,
        created_by: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "INSERT INTO attendance
                 (project_id, employee_id, attendance_date, status, hours_worked, comment, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (employee_id, attendance_date)
             DO UPDATE SET
                 status = EXCLUDED.status,
                 hours_worked = EXCLUDED.hours_worked,
                 comment = EXCLUDED.comment,
                 updated_at = now()",
        )
        .bind(project_id)
        .bind(employee_id)
        .bind(attendance_date)
        .bind(status)
        .bind(hours_worked)
        .bind(comment)
        .bind(created_by)
        .execute(executor)
        .await?;
        Ok(())
    }

    // Histórico com filtros conjuntivos opcionais.
    pub async fn history(
        &self,
        project_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        employee_id: Option<Uuid>,
    ) -> Result<Vec<AttendanceHistoryRow>, AppError> {
        let rows = sqlx::query_as::<_, AttendanceHistoryRow>(
            "SELECT a.id, a.attendance_date, a.status, a.hours_worked, a.comment,
                    e.full_name, e.position, e.rate_per_day
             FROM attendance a
             JOIN employees e ON a.employee_id = e.id
             WHERE a.project_id = $1
               AND ($2::date IS NULL OR a.attendance_date >= $2)
               AND ($3::date IS NULL OR a.attendance_date <= $3)
               AND ($4::uuid IS NULL OR a.employee_id = $4)
             ORDER BY a.attendance_date DESC, e.full_name ASC",
        )
        .bind(project_id)
        .bind(start_date)
        .bind(end_date)
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
