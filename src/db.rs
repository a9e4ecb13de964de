pub mod user_repo;
pub use user_repo::UserRepository;
pub mod project_repo;
pub use project_repo::ProjectRepository;
pub mod employee_repo;
pub use employee_repo::EmployeeRepository;
pub mod attendance_repo;
pub use attendance_repo::AttendanceRepository;
pub mod payroll_repo;
pub use payroll_repo::PayrollRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod enquiry_repo;
pub use enquiry_repo::EnquiryRepository;
pub mod notification_repo;
pub use notification_repo::NotificationRepository;
pub mod audit_repo;
pub use audit_repo::AuditRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
