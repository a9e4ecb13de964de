// src/services/payroll_service.rs
//
// O agregador de folha. A diária é capturada por valor no momento da
// geração: reajustes posteriores não alteram fotografias existentes.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PayrollRepository,
    models::payroll::{
        PayrollSnapshot, PayrollStatus, PayrollWithEmployee, PeriodSummary,
    },
    services::notification_service::NotificationService,
};

// Período precisa ser [início <= fim] e não pode terminar no futuro.
pub(crate) fn validate_period(
    period_start: NaiveDate,
    period_end: NaiveDate,
    today: NaiveDate,
) -> Result<(), AppError> {
    if period_start > period_end {
        return Err(AppError::BadRequest(
            "period_start cannot be after period_end".to_string(),
        ));
    }
    if period_end > today {
        return Err(AppError::BadRequest(
            "period_end cannot be in the future".to_string(),
        ));
    }
    Ok(())
}

// gross = diária x dias presentes; sem rateio de meio período
// (meia diária só conta se as horas já refletirem isso).
pub(crate) fn compute_amounts(
    rate_per_day: Decimal,
    days_present: i64,
    deductions: Decimal,
) -> (Decimal, Decimal) {
    let gross = rate_per_day * Decimal::from(days_present);
    let net = gross - deductions;
    (gross, net)
}

// Transições de status: pagar é permissivo (re-marcar um 'paid' é
// aceito, como na origem); só 'cancelled' não vira pago. Cancelar
// nunca vale para 'paid' — não existe "despagar".
pub(crate) fn can_mark_paid(status: PayrollStatus) -> bool {
    status != PayrollStatus::Cancelled
}

pub(crate) fn can_cancel(status: PayrollStatus) -> bool {
    status != PayrollStatus::Paid
}

pub(crate) fn summarize(rows: &[PayrollWithEmployee]) -> PeriodSummary {
    PeriodSummary {
        total_employees: rows.len(),
        total_gross: rows.iter().map(|r| r.payroll.gross_amount).sum(),
        total_deductions: rows.iter().map(|r| r.payroll.deductions).sum(),
        total_net: rows.iter().map(|r| r.payroll.net_amount).sum(),
        paid_count: rows
            .iter()
            .filter(|r| r.payroll.status == PayrollStatus::Paid)
            .count(),
        pending_count: rows
            .iter()
            .filter(|r| r.payroll.status == PayrollStatus::Pending)
            .count(),
    }
}

#[derive(Clone)]
pub struct PayrollService {
    payroll_repo: PayrollRepository,
    notification_service: NotificationService,
    pool: PgPool,
}

impl PayrollService {
    pub fn new(
        payroll_repo: PayrollRepository,
        notification_service: NotificationService,
        pool: PgPool,
    ) -> Self {
        Self {
            payroll_repo,
            notification_service,
            pool,
        }
    }

    // Gera uma fotografia por funcionário ativo, tudo em uma transação:
    // falha no meio não deixa folha parcial. Geração repetida para o
    // mesmo período exato é rejeitada com conflito.
    pub async fn generate(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
        actor: Uuid,
    ) -> Result<Vec<PayrollSnapshot>, AppError> {
        validate_period(period_start, period_end, Utc::now().date_naive())?;

        if self.payroll_repo.period_exists(period_start, period_end).await? {
            return Err(AppError::Conflict(
                "Payroll has already been generated for this period".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let aggregates = self
            .payroll_repo
            .aggregate_for_period(&mut *tx, period_start, period_end)
            .await?;

        let mut snapshots = Vec::with_capacity(aggregates.len());
        for aggregate in aggregates {
            let (gross, net) =
                compute_amounts(aggregate.rate_per_day, aggregate.days_present, Decimal::ZERO);

            let snapshot = self
                .payroll_repo
                .insert_snapshot(
                    &mut *tx,
                    aggregate.employee_id,
                    period_start,
                    period_end,
                    aggregate.days_present as i32,
                    aggregate.total_hours,
                    aggregate.rate_per_day,
                    gross,
                    Decimal::ZERO,
                    net,
                    actor,
                )
                .await?;
            snapshots.push(snapshot);
        }

        tx.commit().await?;

        // Aviso ao gerente: melhor esforço, nunca derruba a geração.
        self.notification_service
            .notify(
                actor,
                "Payroll Generated",
                &format!(
                    "Payroll for period {period_start} to {period_end} has been generated for {} employees",
                    snapshots.len()
                ),
                "payroll",
            )
            .await;

        Ok(snapshots)
    }

    // Transição permissiva como na origem: re-marcar um 'paid' é aceito.
    // Só 'cancelled' não pode virar pago.
    pub async fn mark_paid(
        &self,
        id: Uuid,
        paid_date: NaiveDate,
    ) -> Result<PayrollSnapshot, AppError> {
        let current = self
            .payroll_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Payroll"))?;

        if !can_mark_paid(current.status) {
            return Err(AppError::Conflict(
                "A cancelled payroll cannot be marked as paid".to_string(),
            ));
        }

        self.payroll_repo
            .mark_paid(id, paid_date)
            .await?
            .ok_or(AppError::NotFound("Payroll"))
    }

    // Transição explícita para o status 'cancelled': vale para
    // pending/processed, nunca para 'paid' (não existe "despagar").
    pub async fn cancel(&self, id: Uuid) -> Result<PayrollSnapshot, AppError> {
        let current = self
            .payroll_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Payroll"))?;

        if !can_cancel(current.status) {
            return Err(AppError::Conflict(
                "A paid payroll cannot be cancelled".to_string(),
            ));
        }
        if current.status == PayrollStatus::Cancelled {
            return Ok(current);
        }

        self.payroll_repo
            .set_status(id, PayrollStatus::Cancelled)
            .await?
            .ok_or(AppError::NotFound("Payroll"))
    }

    pub async fn list(
        &self,
        status: Option<PayrollStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PayrollWithEmployee>, i64), AppError> {
        let rows = self.payroll_repo.list(status, limit, offset).await?;
        let total = self.payroll_repo.count(status).await?;
        Ok((rows, total))
    }

    pub async fn by_period(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<(Vec<PayrollWithEmployee>, PeriodSummary), AppError> {
        let rows = self.payroll_repo.by_period(period_start, period_end).await?;
        if rows.is_empty() {
            return Err(AppError::NotFound("Payroll for this period"));
        }
        let summary = summarize(&rows);
        Ok((rows, summary))
    }

    pub async fn employee_history(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<PayrollSnapshot>, AppError> {
        self.payroll_repo.employee_history(employee_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn gross_is_rate_times_days_present() {
        let (gross, net) = compute_amounts(Decimal::from(20000), 5, Decimal::ZERO);
        assert_eq!(gross, Decimal::from(100_000));
        assert_eq!(net, Decimal::from(100_000));
    }

    // Cenário da obra P1: A (diária 15000) presente 3 dias,
    // B (diária 20000) presente só 1.
    #[rstest]
    #[case(15000, 3, 45000)]
    #[case(20000, 1, 20000)]
    fn scenario_two_employees(#[case] rate: i64, #[case] days: i64, #[case] expected: i64) {
        let (gross, _) = compute_amounts(Decimal::from(rate), days, Decimal::ZERO);
        assert_eq!(gross, Decimal::from(expected));
    }

    #[test]
    fn zero_attendance_still_yields_a_zero_snapshot() {
        let (gross, net) = compute_amounts(Decimal::from(18000), 0, Decimal::ZERO);
        assert_eq!(gross, Decimal::ZERO);
        assert_eq!(net, Decimal::ZERO);
    }

    #[test]
    fn deductions_reduce_the_net_amount() {
        let (gross, net) = compute_amounts(Decimal::from(10000), 2, Decimal::from(3500));
        assert_eq!(gross, Decimal::from(20000));
        assert_eq!(net, Decimal::from(16500));
    }

    #[test]
    fn period_must_be_ordered() {
        let result = validate_period(date("2024-02-01"), date("2024-01-01"), date("2024-06-01"));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn period_cannot_end_in_the_future() {
        let result = validate_period(date("2024-01-01"), date("2024-01-31"), date("2024-01-15"));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    // Comportamento permissivo da origem: re-marcar 'paid' é aceito.
    #[rstest]
    #[case(PayrollStatus::Pending, true)]
    #[case(PayrollStatus::Processed, true)]
    #[case(PayrollStatus::Paid, true)]
    #[case(PayrollStatus::Cancelled, false)]
    fn mark_paid_transitions(#[case] status: PayrollStatus, #[case] allowed: bool) {
        assert_eq!(can_mark_paid(status), allowed);
    }

    #[rstest]
    #[case(PayrollStatus::Pending, true)]
    #[case(PayrollStatus::Processed, true)]
    #[case(PayrollStatus::Cancelled, true)]
    #[case(PayrollStatus::Paid, false)]
    fn cancel_never_applies_to_a_paid_snapshot(
        #[case] status: PayrollStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(can_cancel(status), allowed);
    }

    #[test]
    fn valid_period_passes() {
        assert!(
            validate_period(date("2024-01-01"), date("2024-01-31"), date("2024-02-01")).is_ok()
        );
        // Período de um dia, terminando hoje.
        assert!(
            validate_period(date("2024-02-01"), date("2024-02-01"), date("2024-02-01")).is_ok()
        );
    }
}
