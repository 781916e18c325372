use anyhow::{bail, Context, Result};

use crate::infra::import::{fit_row, normalize_headers, TabularData};

pub fn parse_csv(bytes: &[u8]) -> Result<TabularData> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);
    let headers = reader
        .headers()
        .context("failed to read headers from csv")?
        .clone();

    if headers.is_empty() || headers.iter().all(|name| name.trim().is_empty()) {
        bail!("No columns to parse from file")
    }

    let columns = normalize_headers(headers.iter());
    let width = columns.len();

    let mut rows = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to parse csv record {}", row_idx + 1))?;
        let row = record
            .iter()
            .map(|value| {
                if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            })
            .collect();
        rows.push(fit_row(row, width));
    }

    Ok(TabularData { columns, rows })
}
