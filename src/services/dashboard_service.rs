// src/services/dashboard_service.rs

use crate::{
    common::error::AppError,
    db::{AuditRepository, DashboardRepository},
    models::dashboard::DashboardStats,
};

#[derive(Clone)]
pub struct DashboardService {
    dashboard_repo: DashboardRepository,
    audit_repo: AuditRepository,
}

impl DashboardService {
    pub fn new(dashboard_repo: DashboardRepository, audit_repo: AuditRepository) -> Self {
        Self {
            dashboard_repo,
            audit_repo,
        }
    }

    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        Ok(DashboardStats {
            total_employees: self.dashboard_repo.total_employees().await?,
            today_attendance: self.dashboard_repo.today_attendance().await?,
            inventory_value: self.dashboard_repo.inventory_value().await?,
            month_expenses: self.dashboard_repo.month_expenses().await?,
            pending_enquiries: self.dashboard_repo.pending_enquiries().await?,
            month_payroll: self.dashboard_repo.month_payroll().await?,
            recent_activities: self.audit_repo.recent(10).await?,
        })
    }
}
