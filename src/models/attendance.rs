// src/models/attendance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// kebab-case por causa do valor 'half-day' (formato herdado do banco).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "attendance_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
    HalfDay,
}

impl Default for AttendanceStatus {
    fn default() -> Self {
        AttendanceStatus::Absent
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub project_id: Uuid,
    pub employee_id: Uuid,
    pub attendance_date: NaiveDate,
    pub status: AttendanceStatus,
    pub hours_worked: Decimal,
    pub comment: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// O "registro efetivo" de um funcionário em uma data: o registro salvo,
// ou o padrão sintetizado (ausente, 0 horas) quando nada foi salvo.
// A tabela do dia sempre mostra o elenco completo da obra.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DayTableRow {
    pub employee_id: Uuid,
    pub full_name: String,
    pub position: String,
    pub rate_per_day: Decimal,
    pub attendance_id: Option<Uuid>,
    pub status: AttendanceStatus,
    pub hours_worked: Decimal,
    pub comment: Option<String>,
}

fn validate_hours_worked(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() || *val > Decimal::from(24) {
        let mut err = ValidationError::new("range");
        err.message = Some("hours_worked must be between 0 and 24.".into());
        return Err(err);
    }
    Ok(())
}

// Um item do lote de salvamento da tabela do dia.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BulkAttendanceRecord {
    pub employee_id: Uuid,

    #[serde(default)]
    pub status: AttendanceStatus,

    #[validate(custom(function = "validate_hours_worked"))]
    #[serde(default)]
    pub hours_worked: Decimal,

    pub comment: Option<String>,
}

// Linha do histórico, já com os dados do funcionário.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AttendanceHistoryRow {
    pub id: Uuid,
    pub attendance_date: NaiveDate,
    pub status: AttendanceStatus,
    pub hours_worked: Decimal,
    pub comment: Option<String>,
    pub full_name: String,
    pub position: String,
    pub rate_per_day: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_kebab_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::HalfDay).unwrap(),
            "\"half-day\""
        );
        assert_eq!(
            serde_json::from_str::<AttendanceStatus>("\"half-day\"").unwrap(),
            AttendanceStatus::HalfDay
        );
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Present).unwrap(),
            "\"present\""
        );
    }

    #[test]
    fn default_status_is_absent() {
        assert_eq!(AttendanceStatus::default(), AttendanceStatus::Absent);
    }

    #[test]
    fn bulk_record_rejects_out_of_range_hours() {
        let record = BulkAttendanceRecord {
            employee_id: Uuid::new_v4(),
            status: AttendanceStatus::Present,
            hours_worked: Decimal::from(25),
            comment: None,
        };
        assert!(record.validate().is_err());

        let record = BulkAttendanceRecord {
            hours_worked: Decimal::from(-1),
            ..record
        };
        assert!(record.validate().is_err());

        let record = BulkAttendanceRecord {
            hours_worked: Decimal::from(8),
            ..record
        };
        assert!(record.validate().is_ok());
    }
}
