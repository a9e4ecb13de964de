// src/db/inventory_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{Expense, InventoryItem, InventorySummary},
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Materiais
    // ---

    pub async fn list(
        &self,
        project_id: Uuid,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<InventoryItem>, AppError> {
        let pattern = search.map(|s| format!("%{s}%"));

        let items = sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM inventory
             WHERE project_id = $1
               AND ($2::text IS NULL OR category = $2)
               AND ($3::text IS NULL OR item_name ILIKE $3 OR description ILIKE $3)
             ORDER BY created_at DESC",
        )
        .bind(project_id)
        .bind(category)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<InventoryItem>, AppError> {
        let item = sqlx::query_as::<_, InventoryItem>("SELECT * FROM inventory WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        project_id: Uuid,
        item_name: &str,
        description: Option<&str>,
        quantity: Decimal,
        unit: &str,
        unit_price: Decimal,
        category: Option<&str>,
        created_by: Uuid,
    ) -> Result<InventoryItem, AppError> {
        let item = sqlx::query_as::<_, InventoryItem>(
            "INSERT INTO inventory
                 (project_id, item_name, description, quantity, unit, unit_price, category, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(project_id)
        .bind(item_name)
        .bind(description)
        .bind(quantity)
        .bind(unit)
        .bind(unit_price)
        .bind(category)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        item_name: &str,
        description: Option<&str>,
        quantity: Decimal,
        unit: &str,
        unit_price: Decimal,
        category: Option<&str>,
    ) -> Result<Option<InventoryItem>, AppError> {
        let item = sqlx::query_as::<_, InventoryItem>(
            "UPDATE inventory
             SET item_name = $1, description = $2, quantity = $3, unit = $4,
                 unit_price = $5, category = $6, updated_at = now()
             WHERE id = $7
             RETURNING *",
        )
        .bind(item_name)
        .bind(description)
        .bind(quantity)
        .bind(unit)
        .bind(unit_price)
        .bind(category)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    // Exclusão física, como no restante do estoque (sem histórico atrelado).
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn report_rows(&self, project_id: Uuid) -> Result<Vec<InventoryItem>, AppError> {
        let items = sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM inventory
             WHERE project_id = $1
             ORDER BY category ASC NULLS LAST, item_name ASC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn summary(&self, project_id: Uuid) -> Result<InventorySummary, AppError> {
        let summary = sqlx::query_as::<_, InventorySummary>(
            "SELECT COUNT(*) AS total_items,
                    COALESCE(SUM(quantity), 0) AS total_quantity,
                    COALESCE(SUM(total_value), 0) AS total_value
             FROM inventory
             WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }

    // ---
    // Despesas
    // ---

    pub async fn list_expenses(
        &self,
        project_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        category: Option<&str>,
    ) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            "SELECT * FROM expenses
             WHERE project_id = $1
               AND ($2::date IS NULL OR expense_date >= $2)
               AND ($3::date IS NULL OR expense_date <= $3)
               AND ($4::text IS NULL OR category = $4)
             ORDER BY expense_date DESC",
        )
        .bind(project_id)
        .bind(start_date)
        .bind(end_date)
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(expenses)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_expense(
        &self,
        project_id: Uuid,
        expense_type: &str,
        description: Option<&str>,
        amount: Decimal,
        expense_date: NaiveDate,
        receipt_number: Option<&str>,
        category: Option<&str>,
        created_by: Uuid,
    ) -> Result<Expense, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            "INSERT INTO expenses
                 (project_id, expense_type, description, amount, expense_date, receipt_number, category, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(project_id)
        .bind(expense_type)
        .bind(description)
        .bind(amount)
        .bind(expense_date)
        .bind(receipt_number)
        .bind(category)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(expense)
    }
}
