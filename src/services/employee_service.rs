// src/services/employee_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{common::error::AppError, db::EmployeeRepository, models::employee::Employee};

// Próximo código sequencial no formato EMP-NNNN.
pub(crate) fn next_employee_code(last: Option<&str>) -> String {
    let next = last
        .and_then(|code| code.strip_prefix("EMP-"))
        .and_then(|n| n.parse::<u32>().ok())
        .map(|n| n + 1)
        .unwrap_or(1);
    format!("EMP-{next:04}")
}

#[derive(Clone)]
pub struct EmployeeService {
    employee_repo: EmployeeRepository,
}

impl EmployeeService {
    pub fn new(employee_repo: EmployeeRepository) -> Self {
        Self { employee_repo }
    }

    pub async fn list(
        &self,
        project_id: Uuid,
        is_active: Option<bool>,
        search: Option<&str>,
    ) -> Result<Vec<Employee>, AppError> {
        self.employee_repo.list(project_id, is_active, search).await
    }

    pub async fn find(&self, id: Uuid) -> Result<Employee, AppError> {
        self.employee_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Employee"))
    }

    pub async fn create(
        &self,
        project_id: Uuid,
        full_name: &str,
        position: &str,
        phone_number: Option<&str>,
        rate_per_day: Decimal,
        created_by: Uuid,
    ) -> Result<Employee, AppError> {
        let last = self.employee_repo.last_employee_code().await?;
        let code = next_employee_code(last.as_deref());

        self.employee_repo
            .create(
                project_id,
                &code,
                full_name,
                position,
                phone_number,
                rate_per_day,
                created_by,
            )
            .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        full_name: &str,
        position: &str,
        phone_number: Option<&str>,
        rate_per_day: Decimal,
    ) -> Result<Employee, AppError> {
        self.employee_repo
            .update(id, full_name, position, phone_number, rate_per_day)
            .await?
            .ok_or(AppError::NotFound("Employee"))
    }

    // "Excluir" é desativar: o histórico de presença/folha fica intacto.
    pub async fn deactivate(&self, id: Uuid) -> Result<Employee, AppError> {
        self.employee_repo
            .deactivate(id)
            .await?
            .ok_or(AppError::NotFound("Employee"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_start_at_one_and_increment() {
        assert_eq!(next_employee_code(None), "EMP-0001");
        assert_eq!(next_employee_code(Some("EMP-0001")), "EMP-0002");
        assert_eq!(next_employee_code(Some("EMP-0042")), "EMP-0043");
        assert_eq!(next_employee_code(Some("EMP-9999")), "EMP-10000");
    }

    #[test]
    fn unparseable_codes_restart_the_sequence() {
        assert_eq!(next_employee_code(Some("EMP-abc")), "EMP-0001");
        assert_eq!(next_employee_code(Some("garbage")), "EMP-0001");
    }
}
