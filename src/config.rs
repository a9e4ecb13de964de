// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        AttendanceRepository, AuditRepository, DashboardRepository, EmployeeRepository,
        EnquiryRepository, InventoryRepository, NotificationRepository, PayrollRepository,
        ProjectRepository, UserRepository,
    },
    services::{
        access::AccessService,
        attendance_service::AttendanceService,
        audit_service::AuditService,
        auth::AuthService,
        dashboard_service::DashboardService,
        employee_service::EmployeeService,
        enquiry_service::EnquiryService,
        inventory_service::InventoryService,
        notification_service::{LogMailer, NotificationService},
        payroll_service::PayrollService,
        project_service::ProjectService,
        report_service::ReportService,
    },
};

// Serviços de processo: construídos uma única vez na subida,
// injetados nos handlers via estado, nunca reconstruídos por requisição.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub access_service: AccessService,
    pub project_service: ProjectService,
    pub employee_service: EmployeeService,
    pub attendance_service: AttendanceService,
    pub payroll_service: PayrollService,
    pub inventory_service: InventoryService,
    pub enquiry_service: EnquiryService,
    pub notification_service: NotificationService,
    pub report_service: ReportService,
    pub dashboard_service: DashboardService,
    pub audit_service: AuditService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        let fonts_dir = env::var("FONTS_DIR").unwrap_or_else(|_| "./fonts".to_string());

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let project_repo = ProjectRepository::new(db_pool.clone());
        let employee_repo = EmployeeRepository::new(db_pool.clone());
        let attendance_repo = AttendanceRepository::new(db_pool.clone());
        let payroll_repo = PayrollRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let enquiry_repo = EnquiryRepository::new(db_pool.clone());
        let notification_repo = NotificationRepository::new(db_pool.clone());
        let audit_repo = AuditRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let notification_service = NotificationService::new(
            notification_repo,
            user_repo.clone(),
            Arc::new(LogMailer),
        );

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret);
        let access_service = AccessService::new(project_repo.clone());
        let project_service = ProjectService::new(project_repo.clone(), user_repo.clone());
        let employee_service = EmployeeService::new(employee_repo.clone());
        let attendance_service = AttendanceService::new(
            attendance_repo,
            employee_repo,
            db_pool.clone(),
        );
        let payroll_service = PayrollService::new(
            payroll_repo.clone(),
            notification_service.clone(),
            db_pool.clone(),
        );
        let inventory_service = InventoryService::new(inventory_repo.clone());
        let enquiry_service = EnquiryService::new(
            enquiry_repo,
            user_repo,
            notification_service.clone(),
        );
        let report_service = ReportService::new(
            payroll_repo,
            inventory_repo,
            project_repo,
            fonts_dir,
        );
        let dashboard_service = DashboardService::new(dashboard_repo, audit_repo.clone());
        let audit_service = AuditService::new(audit_repo);

        Ok(Self {
            db_pool,
            auth_service,
            access_service,
            project_service,
            employee_service,
            attendance_service,
            payroll_service,
            inventory_service,
            enquiry_service,
            notification_service,
            report_service,
            dashboard_service,
            audit_service,
        })
    }
}
