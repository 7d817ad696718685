//! Spreadsheet export.
//!
//! One workbook per user, built in memory:
//! - "Операции": every operation, oldest first
//! - "Сводка": the category breakdown, then the month totals

use engine::ExportData;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

const OPERATIONS_SHEET: &str = "Операции";
const SUMMARY_SHEET: &str = "Сводка";
const OPERATIONS_HEADER: [&str; 5] = ["Дата и время", "Тип", "Категория", "Сумма", "Комментарий"];
const SUMMARY_HEADER: [&str; 2] = ["Категория", "Сумма"];
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("amount {0} does not fit a spreadsheet number")]
    Amount(Decimal),
}

pub fn workbook_name(external_id: &str) -> String {
    format!("report_{external_id}.xlsx")
}

/// Renders the export as xlsx bytes.
pub fn render_workbook(data: &ExportData) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(OPERATIONS_SHEET)?;
    write_header(sheet, &OPERATIONS_HEADER, &bold)?;
    for (row, op) in (1u32..).zip(&data.operations) {
        sheet.write_string(row, 0, op.created_at.format(TIMESTAMP_FORMAT).to_string())?;
        sheet.write_string(row, 1, op.kind.as_str())?;
        sheet.write_string(row, 2, &op.category)?;
        sheet.write_number(row, 3, number(op.amount)?)?;
        sheet.write_string(row, 4, &op.description)?;
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name(SUMMARY_SHEET)?;
    write_header(sheet, &SUMMARY_HEADER, &bold)?;
    let mut row = 1u32;
    for c in &data.categories {
        sheet.write_string(row, 0, &c.category)?;
        sheet.write_number(row, 1, number(c.total)?)?;
        row += 1;
    }

    // one blank row before the totals
    row += 1;
    let month = &data.month;
    sheet.write_string(row, 0, "Итого за месяц")?;
    for (offset, (label, value)) in (1u32..).zip([
        ("Доход", month.income),
        ("Расход", month.expense),
        ("Прибыль", month.profit()),
    ]) {
        sheet.write_string(row + offset, 0, label)?;
        sheet.write_number(row + offset, 1, number(value)?)?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_header(sheet: &mut Worksheet, titles: &[&str], bold: &Format) -> Result<(), XlsxError> {
    for (col, title) in (0u16..).zip(titles) {
        sheet.write_string_with_format(0, col, *title, bold)?;
    }
    Ok(())
}

fn number(value: Decimal) -> Result<f64, ExportError> {
    value.to_f64().ok_or(ExportError::Amount(value))
}
