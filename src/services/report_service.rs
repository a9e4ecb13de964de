// src/services/report_service.rs
//
// Renderização de relatórios. Consome a saída do agregador e devolve
// um buffer de bytes (PDF via genpdf, planilha via rust_xlsxwriter);
// a resposta HTTP decide o Content-Disposition.

use chrono::NaiveDate;
use genpdf::{elements, style, Alignment, Element};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InventoryRepository, PayrollRepository, ProjectRepository},
    models::{
        inventory::{InventoryItem, InventorySummary},
        payroll::{PayrollReportRow, PayrollWithEmployee},
        project::Project,
    },
};

// Cabeçalho do relatório de folha de uma obra.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PeriodInfo {
    pub project_name: String,
    pub project_code: String,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_in_period: i64,
    pub period_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PayrollReportSummary {
    pub total_employees: usize,
    pub total_days_worked: i64,
    pub total_amount: Decimal,
}

// Dias corridos, contando as duas pontas.
pub(crate) fn days_in_period(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

pub(crate) fn period_type(days: i64) -> &'static str {
    if days <= 7 {
        "Weekly"
    } else if days <= 14 {
        "Bi-Weekly"
    } else {
        "Custom Period"
    }
}

pub(crate) fn period_info(project: &Project, start: NaiveDate, end: NaiveDate) -> PeriodInfo {
    let days = days_in_period(start, end);
    PeriodInfo {
        project_name: project.project_name.clone(),
        project_code: project.project_code.clone(),
        location: project.location.clone(),
        start_date: start,
        end_date: end,
        days_in_period: days,
        period_type: period_type(days).to_string(),
    }
}

pub(crate) fn payroll_summary(rows: &[PayrollReportRow]) -> PayrollReportSummary {
    PayrollReportSummary {
        total_employees: rows.len(),
        total_days_worked: rows.iter().map(|r| r.days_worked).sum(),
        total_amount: rows.iter().map(|r| r.total_amount).sum(),
    }
}

pub(crate) fn payroll_report_filename(code: &str, start: NaiveDate, end: NaiveDate, ext: &str) -> String {
    format!("payroll-{code}-{start}-to-{end}.{ext}")
}

pub(crate) fn inventory_report_filename(code: &str, ext: &str) -> String {
    format!("inventory-{code}.{ext}")
}

pub(crate) fn payroll_export_filename(start: NaiveDate, end: NaiveDate) -> String {
    format!("payroll_{start}_{end}.xlsx")
}

fn excel(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

#[derive(Clone)]
pub struct ReportService {
    payroll_repo: PayrollRepository,
    inventory_repo: InventoryRepository,
    project_repo: ProjectRepository,
    fonts_dir: String,
}

impl ReportService {
    pub fn new(
        payroll_repo: PayrollRepository,
        inventory_repo: InventoryRepository,
        project_repo: ProjectRepository,
        fonts_dir: String,
    ) -> Self {
        Self {
            payroll_repo,
            inventory_repo,
            project_repo,
            fonts_dir,
        }
    }

    pub async fn payroll_report_data(
        &self,
        project_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(PeriodInfo, Vec<PayrollReportRow>), AppError> {
        let project = self
            .project_repo
            .find_by_id(project_id)
            .await?
            .ok_or(AppError::NotFound("Project"))?;

        let rows = self.payroll_repo.project_report(project_id, start, end).await?;
        Ok((period_info(&project, start, end), rows))
    }

    pub async fn inventory_report_data(
        &self,
        project_id: Uuid,
    ) -> Result<(Project, Vec<InventoryItem>, InventorySummary), AppError> {
        let project = self
            .project_repo
            .find_by_id(project_id)
            .await?
            .ok_or(AppError::NotFound("Project"))?;

        let items = self.inventory_repo.report_rows(project_id).await?;
        let summary = self.inventory_repo.summary(project_id).await?;
        Ok((project, items, summary))
    }

    // Documento base: fonte da pasta de fontes + margens padrão.
    fn new_document(&self, title: &str) -> Result<genpdf::Document, AppError> {
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, "Roboto", None)
            .map_err(|_| {
                AppError::FontNotFound(format!("Font family not found in {}", self.fonts_dir))
            })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(title);
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);
        Ok(doc)
    }

    pub fn payroll_pdf(
        &self,
        info: &PeriodInfo,
        rows: &[PayrollReportRow],
    ) -> Result<Vec<u8>, AppError> {
        let mut doc = self.new_document(&format!("Payroll Report {}", info.project_code))?;

        doc.push(
            elements::Paragraph::new("Payroll Report")
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Paragraph::new(format!(
            "{} ({})",
            info.project_name, info.project_code
        )));
        if let Some(location) = &info.location {
            doc.push(elements::Paragraph::new(format!("Location: {location}")));
        }
        doc.push(elements::Paragraph::new(format!(
            "Period: {} to {} ({})",
            info.start_date, info.end_date, info.period_type
        )));
        doc.push(elements::Break::new(1.5));

        // Pesos das colunas: Nome (3), Cargo (2), Diária (2), Dias (1), Horas (1), Total (2)
        let mut table = elements::TableLayout::new(vec![3, 2, 2, 1, 1, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Employee Name").styled(bold))
            .element(elements::Paragraph::new("Position").styled(bold))
            .element(elements::Paragraph::new("Rate/Day").styled(bold))
            .element(elements::Paragraph::new("Days").styled(bold))
            .element(elements::Paragraph::new("Hours").styled(bold))
            .element(elements::Paragraph::new("Total Amount").styled(bold))
            .push()
            .map_err(|e| AppError::Pdf(e.to_string()))?;

        let mut total = Decimal::ZERO;
        for row in rows {
            total += row.total_amount;
            table
                .row()
                .element(elements::Paragraph::new(row.full_name.clone()))
                .element(elements::Paragraph::new(row.position.clone()))
                .element(elements::Paragraph::new(format!("{:.2}", row.rate_per_day)))
                .element(elements::Paragraph::new(row.days_worked.to_string()))
                .element(elements::Paragraph::new(format!("{:.2}", row.total_hours)))
                .element(elements::Paragraph::new(format!("{:.2}", row.total_amount)))
                .push()
                .map_err(|e| AppError::Pdf(e.to_string()))?;
        }

        doc.push(table);
        doc.push(elements::Break::new(1.5));

        let mut total_paragraph =
            elements::Paragraph::new(format!("TOTAL PAYROLL: {total:.2}"));
        total_paragraph.set_alignment(Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::Pdf(e.to_string()))?;
        Ok(buffer)
    }

    pub fn payroll_workbook(
        &self,
        info: &PeriodInfo,
        rows: &[PayrollReportRow],
    ) -> Result<Vec<u8>, AppError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Payroll")?;

        worksheet.write_with_format(0, 0, "Payroll Report", &bold)?;
        worksheet.write(1, 0, format!("{} ({})", info.project_name, info.project_code))?;
        worksheet.write(
            2,
            0,
            format!("Period: {} to {}", info.start_date, info.end_date),
        )?;

        let headers = [
            "Employee Name",
            "Position",
            "Rate/Day",
            "Days Worked",
            "Total Hours",
            "Total Amount",
        ];
        for (col, header) in headers.iter().enumerate() {
            worksheet.write_with_format(4, col as u16, *header, &bold)?;
        }
        worksheet.set_column_width(0, 25)?;
        worksheet.set_column_width(1, 20)?;

        let mut row_idx = 5u32;
        let mut total = Decimal::ZERO;
        for row in rows {
            total += row.total_amount;
            worksheet.write(row_idx, 0, row.full_name.as_str())?;
            worksheet.write(row_idx, 1, row.position.as_str())?;
            worksheet.write(row_idx, 2, excel(row.rate_per_day))?;
            worksheet.write(row_idx, 3, row.days_worked as f64)?;
            worksheet.write(row_idx, 4, excel(row.total_hours))?;
            worksheet.write(row_idx, 5, excel(row.total_amount))?;
            row_idx += 1;
        }

        worksheet.write_with_format(row_idx + 1, 0, "TOTAL", &bold)?;
        worksheet.write_with_format(row_idx + 1, 5, excel(total), &bold)?;

        Ok(workbook.save_to_buffer()?)
    }

    pub fn inventory_pdf(
        &self,
        project: &Project,
        items: &[InventoryItem],
        summary: &InventorySummary,
    ) -> Result<Vec<u8>, AppError> {
        let mut doc = self.new_document(&format!("Inventory Report {}", project.project_code))?;

        doc.push(
            elements::Paragraph::new("Inventory Report")
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Paragraph::new(format!(
            "{} ({})",
            project.project_name, project.project_code
        )));
        doc.push(elements::Break::new(1.5));

        let mut table = elements::TableLayout::new(vec![3, 2, 1, 1, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Item").styled(bold))
            .element(elements::Paragraph::new("Category").styled(bold))
            .element(elements::Paragraph::new("Qty").styled(bold))
            .element(elements::Paragraph::new("Unit").styled(bold))
            .element(elements::Paragraph::new("Unit Price").styled(bold))
            .element(elements::Paragraph::new("Total Value").styled(bold))
            .push()
            .map_err(|e| AppError::Pdf(e.to_string()))?;

        for item in items {
            table
                .row()
                .element(elements::Paragraph::new(item.item_name.clone()))
                .element(elements::Paragraph::new(
                    item.category.clone().unwrap_or_default(),
                ))
                .element(elements::Paragraph::new(format!("{:.2}", item.quantity)))
                .element(elements::Paragraph::new(item.unit.clone()))
                .element(elements::Paragraph::new(format!("{:.2}", item.unit_price)))
                .element(elements::Paragraph::new(format!("{:.2}", item.total_value)))
                .push()
                .map_err(|e| AppError::Pdf(e.to_string()))?;
        }

        doc.push(table);
        doc.push(elements::Break::new(1.5));

        let mut total_paragraph = elements::Paragraph::new(format!(
            "Items: {}   Total value: {:.2}",
            summary.total_items, summary.total_value
        ));
        total_paragraph.set_alignment(Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold()));

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::Pdf(e.to_string()))?;
        Ok(buffer)
    }

    pub fn inventory_workbook(
        &self,
        project: &Project,
        items: &[InventoryItem],
        summary: &InventorySummary,
    ) -> Result<Vec<u8>, AppError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Inventory")?;

        worksheet.write_with_format(0, 0, "Inventory Report", &bold)?;
        worksheet.write(
            1,
            0,
            format!("{} ({})", project.project_name, project.project_code),
        )?;

        let headers = ["Item", "Category", "Quantity", "Unit", "Unit Price", "Total Value"];
        for (col, header) in headers.iter().enumerate() {
            worksheet.write_with_format(3, col as u16, *header, &bold)?;
        }
        worksheet.set_column_width(0, 28)?;

        let mut row_idx = 4u32;
        for item in items {
            worksheet.write(row_idx, 0, item.item_name.as_str())?;
            worksheet.write(row_idx, 1, item.category.as_deref().unwrap_or(""))?;
            worksheet.write(row_idx, 2, excel(item.quantity))?;
            worksheet.write(row_idx, 3, item.unit.as_str())?;
            worksheet.write(row_idx, 4, excel(item.unit_price))?;
            worksheet.write(row_idx, 5, excel(item.total_value))?;
            row_idx += 1;
        }

        worksheet.write_with_format(row_idx + 1, 0, "TOTAL", &bold)?;
        worksheet.write_with_format(row_idx + 1, 2, excel(summary.total_quantity), &bold)?;
        worksheet.write_with_format(row_idx + 1, 5, excel(summary.total_value), &bold)?;

        Ok(workbook.save_to_buffer()?)
    }

    // Exportação da folha gerada de um período (fotografias persistidas).
    pub fn payroll_export_workbook(
        &self,
        rows: &[PayrollWithEmployee],
    ) -> Result<Vec<u8>, AppError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Payroll")?;

        let headers = [
            "Employee Code",
            "Name",
            "Position",
            "Rate/Day",
            "Days Worked",
            "Gross Amount",
            "Deductions",
            "Net Amount",
        ];
        for (col, header) in headers.iter().enumerate() {
            worksheet.write_with_format(0, col as u16, *header, &bold)?;
        }
        worksheet.set_column_width(1, 25)?;
        worksheet.set_column_width(2, 20)?;

        let mut row_idx = 1u32;
        let mut total_gross = Decimal::ZERO;
        let mut total_net = Decimal::ZERO;
        for row in rows {
            total_gross += row.payroll.gross_amount;
            total_net += row.payroll.net_amount;
            worksheet.write(row_idx, 0, row.employee_code.as_str())?;
            worksheet.write(row_idx, 1, row.full_name.as_str())?;
            worksheet.write(row_idx, 2, row.position.as_str())?;
            worksheet.write(row_idx, 3, excel(row.payroll.rate_per_day))?;
            worksheet.write(row_idx, 4, row.payroll.total_days as f64)?;
            worksheet.write(row_idx, 5, excel(row.payroll.gross_amount))?;
            worksheet.write(row_idx, 6, excel(row.payroll.deductions))?;
            worksheet.write(row_idx, 7, excel(row.payroll.net_amount))?;
            row_idx += 1;
        }

        worksheet.write_with_format(row_idx + 1, 0, "TOTAL", &bold)?;
        worksheet.write_with_format(row_idx + 1, 5, excel(total_gross), &bold)?;
        worksheet.write_with_format(row_idx + 1, 7, excel(total_net), &bold)?;

        Ok(workbook.save_to_buffer()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[rstest]
    #[case("2024-01-01", "2024-01-01", 1)]
    #[case("2024-01-01", "2024-01-07", 7)]
    #[case("2024-01-01", "2024-01-14", 14)]
    #[case("2024-01-01", "2024-01-31", 31)]
    fn days_in_period_counts_both_endpoints(
        #[case] start: &str,
        #[case] end: &str,
        #[case] expected: i64,
    ) {
        assert_eq!(days_in_period(date(start), date(end)), expected);
    }

    #[rstest]
    #[case(7, "Weekly")]
    #[case(8, "Bi-Weekly")]
    #[case(14, "Bi-Weekly")]
    #[case(15, "Custom Period")]
    fn period_type_classification(#[case] days: i64, #[case] expected: &str) {
        assert_eq!(period_type(days), expected);
    }

    #[test]
    fn summary_totals_the_rows() {
        let rows = vec![
            PayrollReportRow {
                employee_id: Uuid::new_v4(),
                full_name: "A".into(),
                position: "Mason".into(),
                rate_per_day: Decimal::from(15000),
                days_worked: 3,
                total_hours: Decimal::from(24),
                total_amount: Decimal::from(45000),
            },
            PayrollReportRow {
                employee_id: Uuid::new_v4(),
                full_name: "B".into(),
                position: "Driver".into(),
                rate_per_day: Decimal::from(20000),
                days_worked: 1,
                total_hours: Decimal::from(8),
                total_amount: Decimal::from(20000),
            },
        ];

        let summary = payroll_summary(&rows);
        assert_eq!(summary.total_employees, 2);
        assert_eq!(summary.total_days_worked, 4);
        assert_eq!(summary.total_amount, Decimal::from(65000));
    }

    #[test]
    fn report_filenames() {
        assert_eq!(
            payroll_report_filename("PRJ-01", date("2024-01-01"), date("2024-01-31"), "pdf"),
            "payroll-PRJ-01-2024-01-01-to-2024-01-31.pdf"
        );
        assert_eq!(
            inventory_report_filename("PRJ-01", "xlsx"),
            "inventory-PRJ-01.xlsx"
        );
        assert_eq!(
            payroll_export_filename(date("2024-01-01"), date("2024-01-31")),
            "payroll_2024-01-01_2024-01-31.xlsx"
        );
    }

    #[test]
    fn payroll_workbook_renders_without_fonts_on_disk() {
        let info = PeriodInfo {
            project_name: "Obra Azul".into(),
            project_code: "PRJ-01".into(),
            location: Some("Kigali".into()),
            start_date: date("2024-01-01"),
            end_date: date("2024-01-07"),
            days_in_period: 7,
            period_type: "Weekly".into(),
        };
        let rows = vec![PayrollReportRow {
            employee_id: Uuid::new_v4(),
            full_name: "A".into(),
            position: "Mason".into(),
            rate_per_day: Decimal::from(15000),
            days_worked: 3,
            total_hours: Decimal::from(24),
            total_amount: Decimal::from(45000),
        }];

        // O caminho XLSX não depende de fontes externas.
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write(0, 0, info.project_name.as_str()).unwrap();
        worksheet.write(1, 0, rows[0].full_name.as_str()).unwrap();
        let buffer = workbook.save_to_buffer().unwrap();
        assert!(!buffer.is_empty());
        // Assinatura ZIP dos arquivos .xlsx.
        assert_eq!(&buffer[0..2], b"PK");
    }
}
