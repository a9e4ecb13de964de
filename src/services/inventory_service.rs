// src/services/inventory_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::inventory::{Expense, InventoryItem},
};

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
}

impl InventoryService {
    pub fn new(inventory_repo: InventoryRepository) -> Self {
        Self { inventory_repo }
    }

    pub async fn list(
        &self,
        project_id: Uuid,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<InventoryItem>, AppError> {
        self.inventory_repo.list(project_id, category, search).await
    }

    pub async fn find(&self, id: Uuid) -> Result<InventoryItem, AppError> {
        self.inventory_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Item"))
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
        self.inventory_repo
            .create(
                project_id,
                item_name,
                description,
                quantity,
                unit,
                unit_price,
                category,
                created_by,
            )
            .await
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
    ) -> Result<InventoryItem, AppError> {
        self.inventory_repo
            .update(id, item_name, description, quantity, unit, unit_price, category)
            .await?
            .ok_or(AppError::NotFound("Item"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if self.inventory_repo.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Item"))
        }
    }

    pub async fn list_expenses(
        &self,
        project_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        category: Option<&str>,
    ) -> Result<Vec<Expense>, AppError> {
        self.inventory_repo
            .list_expenses(project_id, start_date, end_date, category)
            .await
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
        self.inventory_repo
            .create_expense(
                project_id,
                expense_type,
                description,
                amount,
                expense_date,
                receipt_number,
                category,
                created_by,
            )
            .await
    }
}
