// src/middleware/rbac.rs
//
// Autorização por papel: uma única tabela declarativa
// {papel x recurso x operação} avaliada por um único componente,
// em vez de comparações de string espalhadas pelas rotas.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{common::error::AppError, models::auth::{Role, User}};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Project,
    Employee,
    Attendance,
    Inventory,
    Expense,
    Payroll,
    Enquiry,
    Dashboard,
    AuditLog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
    Delete,
    Export,
}

impl ResourceKind {
    fn label(self) -> &'static str {
        match self {
            ResourceKind::Project => "projects",
            ResourceKind::Employee => "employees",
            ResourceKind::Attendance => "attendance",
            ResourceKind::Inventory => "inventory",
            ResourceKind::Expense => "expenses",
            ResourceKind::Payroll => "payroll",
            ResourceKind::Enquiry => "enquiries",
            ResourceKind::Dashboard => "dashboard",
            ResourceKind::AuditLog => "audit logs",
        }
    }
}

// A tabela de capacidades. Gerente pode tudo; os demais papéis têm
// exatamente as permissões listadas aqui.
pub fn role_allows(role: Role, resource: ResourceKind, operation: Operation) -> bool {
    use Operation::*;
    use ResourceKind::*;

    if role == Role::Manager {
        return true;
    }

    match (role, resource, operation) {
        // Leituras abertas a qualquer papel autenticado (o predicado de
        // acesso por obra ainda se aplica depois).
        (_, Project, Read)
        | (_, Employee, Read)
        | (_, Attendance, Read)
        | (_, Inventory, Read)
        | (_, Expense, Read)
        | (_, Payroll, Read)
        | (_, Payroll, Export)
        | (_, Enquiry, Read) => true,

        // Apontador: cadastro de funcionários e lançamentos de presença.
        (Role::AttendanceClerk, Employee, Write) => true,
        (Role::AttendanceClerk, Attendance, Write) => true,

        // Almoxarife: materiais e despesas.
        (Role::Storeman, Inventory, Write) => true,
        (Role::Storeman, Inventory, Export) => true,
        (Role::Storeman, Expense, Write) => true,

        _ => false,
    }
}

/// O contrato de uma capacidade exigida por rota.
pub trait CapabilityDef: Send + Sync + 'static {
    fn required() -> (ResourceKind, Operation);
}

/// O extrator-guardião: rejeita com 403 quando a tabela nega.
pub struct RequireCapability<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireCapability<T>
where
    T: CapabilityDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<User>()
            .ok_or(AppError::InvalidToken)?;

        let (resource, operation) = T::required();

        if !role_allows(user.role, resource, operation) {
            return Err(AppError::AccessDenied(format!(
                "Access denied. Insufficient permissions for {}.",
                resource.label()
            )));
        }

        Ok(RequireCapability(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS CAPACIDADES (TIPOS)
// ---

macro_rules! capability {
    ($name:ident, $resource:expr, $operation:expr) => {
        pub struct $name;
        impl CapabilityDef for $name {
            fn required() -> (ResourceKind, Operation) {
                ($resource, $operation)
            }
        }
    };
}

capability!(CanManageProjects, ResourceKind::Project, Operation::Write);
capability!(CanWriteEmployees, ResourceKind::Employee, Operation::Write);
capability!(CanDeleteEmployees, ResourceKind::Employee, Operation::Delete);
capability!(CanWriteAttendance, ResourceKind::Attendance, Operation::Write);
capability!(CanWriteInventory, ResourceKind::Inventory, Operation::Write);
capability!(CanDeleteInventory, ResourceKind::Inventory, Operation::Delete);
capability!(CanExportInventory, ResourceKind::Inventory, Operation::Export);
capability!(CanWriteExpenses, ResourceKind::Expense, Operation::Write);
capability!(CanWritePayroll, ResourceKind::Payroll, Operation::Write);
capability!(CanRespondEnquiries, ResourceKind::Enquiry, Operation::Write);
capability!(CanReadDashboard, ResourceKind::Dashboard, Operation::Read);
capability!(CanReadAuditLogs, ResourceKind::AuditLog, Operation::Read);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn manager_is_allowed_everything() {
        for resource in [
            ResourceKind::Project,
            ResourceKind::Employee,
            ResourceKind::Attendance,
            ResourceKind::Inventory,
            ResourceKind::Expense,
            ResourceKind::Payroll,
            ResourceKind::Enquiry,
            ResourceKind::Dashboard,
            ResourceKind::AuditLog,
        ] {
            for operation in [
                Operation::Read,
                Operation::Write,
                Operation::Delete,
                Operation::Export,
            ] {
                assert!(role_allows(Role::Manager, resource, operation));
            }
        }
    }

    #[rstest]
    #[case(Role::AttendanceClerk, ResourceKind::Attendance, Operation::Write, true)]
    #[case(Role::AttendanceClerk, ResourceKind::Employee, Operation::Write, true)]
    #[case(Role::AttendanceClerk, ResourceKind::Employee, Operation::Delete, false)]
    #[case(Role::AttendanceClerk, ResourceKind::Inventory, Operation::Write, false)]
    #[case(Role::AttendanceClerk, ResourceKind::Payroll, Operation::Write, false)]
    #[case(Role::Storeman, ResourceKind::Inventory, Operation::Write, true)]
    #[case(Role::Storeman, ResourceKind::Inventory, Operation::Export, true)]
    #[case(Role::Storeman, ResourceKind::Inventory, Operation::Delete, false)]
    #[case(Role::Storeman, ResourceKind::Attendance, Operation::Write, false)]
    #[case(Role::Storeman, ResourceKind::Expense, Operation::Write, true)]
    #[case(Role::Storeman, ResourceKind::Payroll, Operation::Write, false)]
    #[case(Role::Storeman, ResourceKind::Dashboard, Operation::Read, false)]
    #[case(Role::AttendanceClerk, ResourceKind::AuditLog, Operation::Read, false)]
    #[case(Role::Storeman, ResourceKind::Enquiry, Operation::Write, false)]
    #[case(Role::AttendanceClerk, ResourceKind::Enquiry, Operation::Write, false)]
    fn capability_table_matches_route_gates(
        #[case] role: Role,
        #[case] resource: ResourceKind,
        #[case] operation: Operation,
        #[case] expected: bool,
    ) {
        assert_eq!(role_allows(role, resource, operation), expected);
    }

    #[rstest]
    #[case(Role::Storeman)]
    #[case(Role::AttendanceClerk)]
    fn reads_stay_open_to_every_role(#[case] role: Role) {
        assert!(role_allows(role, ResourceKind::Attendance, Operation::Read));
        assert!(role_allows(role, ResourceKind::Inventory, Operation::Read));
        assert!(role_allows(role, ResourceKind::Payroll, Operation::Read));
        assert!(role_allows(role, ResourceKind::Payroll, Operation::Export));
    }
}
