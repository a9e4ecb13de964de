// src/models/payroll.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payroll_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    Pending,
    Processed,
    Paid,
    Cancelled,
}

// Fotografia imutável de pagamento: a diária é copiada por valor na
// geração, então reajustes posteriores do funcionário não alteram
// fotografias já existentes.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct PayrollSnapshot {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_days: i32,
    pub total_hours: Decimal,
    pub rate_per_day: Decimal,
    pub gross_amount: Decimal,
    pub deductions: Decimal,
    pub net_amount: Decimal,
    pub status: PayrollStatus,
    pub paid_date: Option<NaiveDate>,
    pub processed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Fotografia + dados do funcionário, para listagens e exportação.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PayrollWithEmployee {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub payroll: PayrollSnapshot,
    pub employee_code: String,
    pub full_name: String,
    pub position: String,
}

// Agregado de presença por funcionário dentro de um período,
// calculado com semântica de LEFT JOIN: funcionário sem nenhuma
// presença ainda aparece, com zeros.
#[derive(Debug, Clone, FromRow)]
pub struct PayrollAggregate {
    pub employee_id: Uuid,
    pub full_name: String,
    pub rate_per_day: Decimal,
    pub total_hours: Decimal,
    pub days_present: i64,
}

// Linha do relatório de folha por obra. Só entram funcionários com ao
// menos um registro de presença no período.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct PayrollReportRow {
    pub employee_id: Uuid,
    pub full_name: String,
    pub position: String,
    pub rate_per_day: Decimal,
    pub days_worked: i64,
    pub total_hours: Decimal,
    pub total_amount: Decimal,
}

// Resumo de um período já gerado.
#[derive(Debug, Serialize, ToSchema)]
pub struct PeriodSummary {
    pub total_employees: usize,
    pub total_gross: Decimal,
    pub total_deductions: Decimal,
    pub total_net: Decimal,
    pub paid_count: usize,
    pub pending_count: usize,
}
