use std::io::Cursor;

use anyhow::{anyhow, bail, Context, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::infra::import::{fit_row, normalize_headers, TabularData};

pub fn cell_to_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(v) if v.is_empty() => None,
        Data::String(v) => Some(v.to_string()),
        Data::Float(v) => Some(v.to_string()),
        Data::Int(v) => Some(v.to_string()),
        Data::Bool(v) => Some(v.to_string()),
        Data::DateTime(v) => Some(
            v.as_datetime()
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| v.to_string()),
        ),
        Data::DateTimeIso(v) => Some(v.to_string()),
        Data::DurationIso(v) => Some(v.to_string()),
        Data::Error(v) => Some(format!("{v:?}")),
    }
}

/// Reads the first worksheet of an xls/xlsx/ods workbook; the first row is the header.
pub fn parse_workbook(bytes: &[u8]) -> Result<TabularData> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .context("failed to open workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("workbook contains no worksheets"))?
        .context("failed to read first worksheet")?;

    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        bail!("No columns to parse from file")
    };
    let raw_headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_to_text(cell).unwrap_or_default())
        .collect();
    if raw_headers.iter().all(|name| name.trim().is_empty()) {
        bail!("No columns to parse from file")
    }

    let columns = normalize_headers(&raw_headers);
    let width = columns.len();
    let rows = sheet_rows
        .map(|row| fit_row(row.iter().map(cell_to_text).collect(), width))
        .collect();

    Ok(TabularData { columns, rows })
}
