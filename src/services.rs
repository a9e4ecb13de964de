pub mod access;
pub mod audit_service;
pub mod attendance_service;
pub mod auth;
pub mod dashboard_service;
pub mod employee_service;
pub mod enquiry_service;
pub mod inventory_service;
pub mod notification_service;
pub mod payroll_service;
pub mod project_service;
pub mod report_service;
