// src/services/attendance_service.rs
//
// O "livro-razão" de presença: uma linha por (funcionário, data),
// sempre gravada por upsert. A tabela do dia devolve o elenco
// completo da obra, com ausência como estado implícito.

use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AttendanceRepository, EmployeeRepository},
    models::{
        attendance::{
            AttendanceHistoryRow, AttendanceRecord, BulkAttendanceRecord, DayTableRow,
        },
        employee::Employee,
    },
};

// Monta os "registros efetivos" do dia: registro salvo quando existe,
// senão o padrão sintetizado (ausente, 0 horas). Ordenação por nome
// (caso-insensível) com desempate por id, para ser determinística.
fn merge_day_table(
    employees: Vec<Employee>,
    records: Vec<AttendanceRecord>,
) -> Vec<DayTableRow> {
    let mut by_employee: HashMap<Uuid, AttendanceRecord> = records
        .into_iter()
        .map(|r| (r.employee_id, r))
        .collect();

    let mut rows: Vec<DayTableRow> = employees
        .into_iter()
        .map(|e| {
            let record = by_employee.remove(&e.id);
            match record {
                Some(r) => DayTableRow {
                    employee_id: e.id,
                    full_name: e.full_name,
                    position: e.position,
                    rate_per_day: e.rate_per_day,
                    attendance_id: Some(r.id),
                    status: r.status,
                    hours_worked: r.hours_worked,
                    comment: r.comment,
                },
                None => DayTableRow {
                    employee_id: e.id,
                    full_name: e.full_name,
                    position: e.position,
                    rate_per_day: e.rate_per_day,
                    attendance_id: None,
                    status: Default::default(),
                    hours_worked: Default::default(),
                    comment: None,
                },
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        (a.full_name.to_lowercase(), a.employee_id)
            .cmp(&(b.full_name.to_lowercase(), b.employee_id))
    });
    rows
}

// Primeiro registro do lote que aponta para funcionário de outra obra.
fn first_foreign_employee(
    records: &[BulkAttendanceRecord],
    project_employee_ids: &[Uuid],
) -> Option<Uuid> {
    records
        .iter()
        .map(|r| r.employee_id)
        .find(|id| !project_employee_ids.contains(id))
}

#[derive(Clone)]
pub struct AttendanceService {
    attendance_repo: AttendanceRepository,
    employee_repo: EmployeeRepository,
    pool: PgPool,
}

impl AttendanceService {
    pub fn new(
        attendance_repo: AttendanceRepository,
        employee_repo: EmployeeRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            attendance_repo,
            employee_repo,
            pool,
        }
    }

    pub async fn day_table(
        &self,
        project_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<DayTableRow>, AppError> {
        let employees = self.employee_repo.list_active(project_id).await?;
        let records = self
            .attendance_repo
            .records_for_date(project_id, date)
            .await?;
        Ok(merge_day_table(employees, records))
    }

    // Tudo ou nada: o lote inteiro roda em uma transação. Registro de
    // funcionário de outra obra derruba o lote antes de qualquer escrita.
    pub async fn bulk_save(
        &self,
        project_id: Uuid,
        date: NaiveDate,
        records: &[BulkAttendanceRecord],
        actor: Uuid,
    ) -> Result<usize, AppError> {
        let mut tx = self.pool.begin().await?;

        let project_employee_ids = self
            .employee_repo
            .ids_for_project(&mut *tx, project_id)
            .await?;

        if let Some(foreign) = first_foreign_employee(records, &project_employee_ids) {
            // O drop da transação faz rollback.
            return Err(AppError::BadRequest(format!(
                "Employee {foreign} does not belong to this project"
            )));
        }

        for record in records {
            self.attendance_repo
                .upsert(
                    &mut *tx,
                    project_id,
                    record.employee_id,
                    date,
                    record.status,
                    record.hours_worked,
                    record.comment.as_deref(),
                    actor,
                )
                .await?;
        }

        tx.commit().await?;
        Ok(records.len())
    }

    pub async fn history(
        &self,
        project_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        employee_id: Option<Uuid>,
    ) -> Result<Vec<AttendanceHistoryRow>, AppError> {
        self.attendance_repo
            .history(project_id, start_date, end_date, employee_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::AttendanceStatus;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn employee(id: Uuid, name: &str, rate: i64) -> Employee {
        Employee {
            id,
            project_id: Uuid::nil(),
            employee_code: "EMP-0001".into(),
            full_name: name.into(),
            position: "Mason".into(),
            phone_number: None,
            rate_per_day: Decimal::from(rate),
            is_active: true,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn record(employee_id: Uuid, status: AttendanceStatus, hours: i64) -> AttendanceRecord {
        AttendanceRecord {
            id: Uuid::new_v4(),
            project_id: Uuid::nil(),
            employee_id,
            attendance_date: "2024-01-01".parse().unwrap(),
            status,
            hours_worked: Decimal::from(hours),
            comment: None,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn day_table_has_one_row_per_active_employee() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let employees = vec![employee(a, "Alice", 15000), employee(b, "Bob", 20000)];
        // Só Alice tem registro salvo.
        let records = vec![record(a, AttendanceStatus::Present, 8)];

        let rows = merge_day_table(employees, records);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].full_name, "Alice");
        assert_eq!(rows[0].status, AttendanceStatus::Present);
        assert_eq!(rows[0].hours_worked, Decimal::from(8));
        assert!(rows[0].attendance_id.is_some());
    }

    #[test]
    fn missing_records_default_to_absent_with_zero_hours() {
        let id = Uuid::new_v4();
        let rows = merge_day_table(vec![employee(id, "Carlos", 12000)], vec![]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, AttendanceStatus::Absent);
        assert_eq!(rows[0].hours_worked, Decimal::ZERO);
        assert!(rows[0].attendance_id.is_none());
        assert!(rows[0].comment.is_none());
    }

    #[test]
    fn ordering_is_case_insensitive_with_id_tiebreak() {
        let mut ids = [Uuid::new_v4(), Uuid::new_v4()];
        ids.sort();

        let employees = vec![
            employee(Uuid::new_v4(), "bruno", 1000),
            employee(ids[1], "Ana", 1000),
            employee(ids[0], "ana", 1000),
            employee(Uuid::new_v4(), "Zeca", 1000),
        ];

        let rows = merge_day_table(employees, vec![]);
        let names: Vec<&str> = rows.iter().map(|r| r.full_name.as_str()).collect();

        assert_eq!(names, vec!["ana", "Ana", "bruno", "Zeca"]);
        // Empate "ana"/"Ana" resolvido pelo id ascendente.
        assert_eq!(rows[0].employee_id, ids[0]);
        assert_eq!(rows[1].employee_id, ids[1]);
    }

    #[test]
    fn foreign_employee_is_detected_before_any_write() {
        let ours = Uuid::new_v4();
        let theirs = Uuid::new_v4();

        let records = vec![
            BulkAttendanceRecord {
                employee_id: ours,
                status: AttendanceStatus::Present,
                hours_worked: Decimal::from(8),
                comment: None,
            },
            BulkAttendanceRecord {
                employee_id: theirs,
                status: AttendanceStatus::Absent,
                hours_worked: Decimal::ZERO,
                comment: None,
            },
        ];

        assert_eq!(first_foreign_employee(&records, &[ours]), Some(theirs));
        assert_eq!(first_foreign_employee(&records, &[ours, theirs]), None);
        assert_eq!(first_foreign_employee(&[], &[]), None);
    }
}
