// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Projects ---
        handlers::projects::get_my_projects,
        handlers::projects::get_all_projects,
        handlers::projects::create_project,
        handlers::projects::assign_user_to_project,
        handlers::projects::get_project_stats,

        // --- Employees ---
        handlers::employees::get_project_employees,
        handlers::employees::create_employee,
        handlers::employees::update_employee,
        handlers::employees::delete_employee,

        // --- Attendance ---
        handlers::attendance::get_attendance_table,
        handlers::attendance::bulk_save_attendance,
        handlers::attendance::get_attendance_history,

        // --- Payroll ---
        handlers::payroll::generate_payroll,
        handlers::payroll::get_payrolls,
        handlers::payroll::export_payroll,
        handlers::payroll::get_payroll_by_period,
        handlers::payroll::mark_payroll_paid,
        handlers::payroll::cancel_payroll,
        handlers::payroll::get_employee_payroll_history,

        // --- Inventory ---
        handlers::inventory::get_project_inventory,
        handlers::inventory::create_inventory_item,
        handlers::inventory::update_inventory_item,
        handlers::inventory::delete_inventory_item,
        handlers::inventory::get_project_expenses,
        handlers::inventory::create_expense,

        // --- Enquiries ---
        handlers::enquiries::create_enquiry,
        handlers::enquiries::get_user_enquiries,
        handlers::enquiries::get_pending_count,
        handlers::enquiries::get_enquiry_by_id,
        handlers::enquiries::respond_to_enquiry,
        handlers::enquiries::update_enquiry_status,

        // --- Notifications ---
        handlers::notifications::get_notifications,
        handlers::notifications::get_unread_count,
        handlers::notifications::mark_notification_read,
        handlers::notifications::mark_all_notifications_read,

        // --- Reports ---
        handlers::reports::payroll_report,
        handlers::reports::inventory_report,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard_stats,
        handlers::dashboard::get_audit_logs,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Projects ---
            models::project::Project,
            models::project::ProjectAssignment,
            models::project::CreateProjectPayload,
            models::project::AssignUserPayload,
            models::project::ProjectStats,

            // --- Employees ---
            models::employee::Employee,
            handlers::employees::CreateEmployeePayload,
            handlers::employees::UpdateEmployeePayload,

            // --- Attendance ---
            models::attendance::AttendanceStatus,
            models::attendance::AttendanceRecord,
            models::attendance::DayTableRow,
            models::attendance::AttendanceHistoryRow,
            models::attendance::BulkAttendanceRecord,
            handlers::attendance::BulkSavePayload,

            // --- Payroll ---
            models::payroll::PayrollStatus,
            models::payroll::PayrollSnapshot,
            models::payroll::PayrollReportRow,
            models::payroll::PeriodSummary,
            handlers::payroll::GeneratePayrollPayload,
            handlers::payroll::MarkPaidPayload,

            // --- Inventory ---
            models::inventory::InventoryItem,
            models::inventory::Expense,
            models::inventory::InventorySummary,
            handlers::inventory::CreateItemPayload,
            handlers::inventory::UpdateItemPayload,
            handlers::inventory::CreateExpensePayload,

            // --- Enquiries ---
            models::enquiry::EnquiryStatus,
            models::enquiry::Enquiry,
            handlers::enquiries::CreateEnquiryPayload,
            handlers::enquiries::RespondEnquiryPayload,
            handlers::enquiries::UpdateEnquiryStatusPayload,

            // --- Notifications ---
            models::notification::Notification,

            // --- Dashboard / Audit ---
            models::audit::AuditLogEntry,
            models::dashboard::RecentActivity,
            models::dashboard::DashboardStats,

            // --- Reports ---
            services::report_service::PeriodInfo,
            services::report_service::PayrollReportSummary,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e registro"),
        (name = "Users", description = "Dados do usuário autenticado"),
        (name = "Projects", description = "Obras e vínculos de acesso"),
        (name = "Employees", description = "Funcionários por obra"),
        (name = "Attendance", description = "Tabela diária de presença"),
        (name = "Payroll", description = "Geração e pagamento de folha"),
        (name = "Inventory", description = "Materiais e despesas"),
        (name = "Enquiries", description = "Consultas entre papéis"),
        (name = "Notifications", description = "Notificações do usuário"),
        (name = "Reports", description = "Relatórios em JSON/PDF/XLSX"),
        (name = "Dashboard", description = "Indicadores e auditoria")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
