use super::{ExportError, ExportResult, SHEET_NAME, TABLE_NAME};
use crate::model::table::{Cell, Table, COLUMNS};
use calamine::{Data, Reader, Xlsx};
use log::info;
use rust_xlsxwriter::{Format, Workbook};
use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

/// Encodes `table` as an in-memory `.xlsx` workbook.
pub fn write_table(table: &Table) -> ExportResult<Vec<u8>> {
    let started_at = Instant::now();
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    // Styled blanks keep all-empty rows inside the sheet's used range.
    let blank_format = Format::new().set_num_format("@");
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, label) in (0u16..).zip(table.headers()) {
        worksheet.write_string_with_format(0, col, label, &header_format)?;
    }
    for (row, cells) in (1u32..).zip(table.rows()) {
        for (col, cell) in (0u16..).zip(cells) {
            match cell {
                Cell::Text(text) if !text.is_empty() => {
                    worksheet.write_string(row, col, text.as_str())?;
                }
                Cell::Bool(flag) => {
                    worksheet.write_boolean(row, col, *flag)?;
                }
                Cell::Number(number) => {
                    worksheet.write_number(row, col, *number)?;
                }
                Cell::Empty | Cell::Text(_) => {
                    worksheet.write_blank(row, col, &blank_format)?;
                }
            }
        }
    }

    workbook.define_name(TABLE_NAME, &table_reference(table.len()))?;

    let bytes = workbook.save_to_buffer()?;
    info!(
        "event=export_xlsx module=export status=ok rows={} bytes={} duration_ms={}",
        table.len(),
        bytes.len(),
        started_at.elapsed().as_millis()
    );
    Ok(bytes)
}

/// Encodes `table` and writes it to `path`, replacing any existing file.
pub fn save_table(table: &Table, path: impl AsRef<Path>) -> ExportResult<()> {
    let bytes = write_table(table)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Decodes a workbook produced by `write_table`.
pub fn read_table(bytes: &[u8]) -> ExportResult<Table> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let declared_rows = declared_row_count(workbook.defined_names());
    let range = workbook.worksheet_range(SHEET_NAME)?;
    let mut rows = range.rows();

    let header = rows.next().ok_or(ExportError::MissingHeader)?;
    for (column, expected) in COLUMNS.iter().enumerate() {
        match header.get(column) {
            Some(Data::String(label)) if label == expected.label => {}
            other => {
                return Err(ExportError::HeaderMismatch {
                    column,
                    found: other.map(ToString::to_string).unwrap_or_default(),
                });
            }
        }
    }

    let mut cells = rows
        .map(|row| {
            (0..COLUMNS.len())
                .map(|column| row.get(column).map_or(Cell::Empty, cell_from_data))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    // Trailing all-blank rows may fall outside the used range.
    if let Some(declared) = declared_rows {
        cells.resize_with(declared.max(cells.len()), || vec![Cell::Empty; COLUMNS.len()]);
    }

    Table::from_rows(cells).map_err(|row| ExportError::RowShape { row })
}

/// Absolute reference covering the header and `rows` data rows.
fn table_reference(rows: usize) -> String {
    let last_column = char::from(b'A' + (COLUMNS.len() - 1) as u8);
    format!("='{SHEET_NAME}'!$A$1:${last_column}${}", rows + 1)
}

/// Data row count recorded by `write_table`, if the name is present.
fn declared_row_count(names: &[(String, String)]) -> Option<usize> {
    let (_, reference) = names.iter().find(|(name, _)| name == TABLE_NAME)?;
    let last_row = reference.rsplit('$').next()?.trim().parse::<usize>().ok()?;
    last_row.checked_sub(1)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(text) => Cell::text(text.as_str()),
        Data::Bool(flag) => Cell::Bool(*flag),
        Data::Float(number) => Cell::Number(*number),
        Data::Int(number) => Cell::Number(*number as f64),
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{declared_row_count, read_table, table_reference, write_table};
    use crate::export::TABLE_NAME;
    use crate::export::ExportError;
    use crate::model::table::Table;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn empty_table_round_trips_to_header_only() {
        let bytes = write_table(&Table::empty()).unwrap();
        let decoded = read_table(&bytes).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn declared_row_count_reads_the_table_name() {
        let names = vec![(TABLE_NAME.to_string(), "Sheet1!$A$1:$H$4".to_string())];
        assert_eq!(declared_row_count(&names), Some(3));
        assert_eq!(declared_row_count(&[]), None);
        assert_eq!(table_reference(0), "='Sheet1'!$A$1:$H$1");
    }

    #[test]
    fn foreign_header_is_rejected() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Name").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let err = read_table(&bytes).unwrap_err();
        assert!(matches!(err, ExportError::HeaderMismatch { column: 0, .. }));
    }
}
