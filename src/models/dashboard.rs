// src/models/dashboard.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RecentActivity {
    pub action: String,
    pub table_name: String,
    pub created_at: DateTime<Utc>,
    pub user_name: Option<String>,
}

// Indicadores globais (visão do gerente).
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_employees: i64,
    pub today_attendance: i64,
    pub inventory_value: Decimal,
    pub month_expenses: Decimal,
    pub pending_enquiries: i64,
    pub month_payroll: Decimal,
    pub recent_activities: Vec<RecentActivity>,
}
