// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Item de material de uma obra.
// total_value é coluna gerada no banco (quantity * unit_price).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct InventoryItem {
    pub id: Uuid,
    pub project_id: Uuid,
    pub item_name: String,
    pub description: Option<String>,
    pub quantity: Decimal,
    pub unit: String,
    pub unit_price: Decimal,
    pub total_value: Decimal,
    pub category: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Expense {
    pub id: Uuid,
    pub project_id: Uuid,
    pub expense_type: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub expense_date: NaiveDate,
    pub receipt_number: Option<String>,
    pub category: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct InventorySummary {
    pub total_items: i64,
    pub total_quantity: Decimal,
    pub total_value: Decimal,
}
