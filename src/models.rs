pub mod attendance;
pub mod audit;
pub mod auth;
pub mod dashboard;
pub mod employee;
pub mod enquiry;
pub mod inventory;
pub mod notification;
pub mod payroll;
pub mod project;
