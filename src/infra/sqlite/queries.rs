use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use crate::domain::entities::data_type::DataType;
use crate::infra::import::TabularData;
use crate::infra::sqlite::schema::open_connection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSheet {
    pub file_name: String,
    pub number_of_records: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredColumn {
    pub id: i64,
    pub sheet_id: i64,
    pub col_idx: i64,
    pub name: String,
    pub data_type: String,
}

/// Stores a parsed sheet with one inferred type per column.
pub fn insert_sheet(
    db_path: &Path,
    file_name: &str,
    data: &TabularData,
    types: &[DataType],
) -> Result<i64> {
    if types.len() != data.columns.len() {
        anyhow::bail!(
            "column type count mismatch: {} types for {} columns",
            types.len(),
            data.columns.len()
        )
    }

    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start sheet insert transaction")?;

    tx.execute(
        "INSERT INTO sheet(file_name, number_of_records) VALUES (?1, ?2)",
        params![file_name, data.rows.len() as i64],
    )
    .context("failed to insert sheet")?;
    let sheet_id = tx.last_insert_rowid();

    let mut insert_column = tx
        .prepare(
            "INSERT INTO sheet_column(sheet_id, col_idx, name, data_type) VALUES (?1, ?2, ?3, ?4)",
        )
        .context("failed to prepare column insert")?;
    for (col_idx, (name, data_type)) in data.columns.iter().zip(types).enumerate() {
        insert_column
            .execute(params![sheet_id, col_idx as i64, name, data_type.tag()])
            .context("failed to insert column")?;
    }
    drop(insert_column);

    let mut insert_cell = tx
        .prepare("INSERT INTO cell(sheet_id, row_idx, col_idx, value) VALUES (?1, ?2, ?3, ?4)")
        .context("failed to prepare cell insert")?;
    for (row_idx, row) in data.rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            insert_cell
                .execute(params![sheet_id, row_idx as i64, col_idx as i64, value])
                .context("failed to insert cell")?;
        }
    }
    drop(insert_cell);

    tx.commit().context("failed to commit sheet insert")?;
    Ok(sheet_id)
}

pub fn load_sheet(db_path: &Path, sheet_id: i64) -> Result<Option<StoredSheet>> {
    let conn = open_connection(db_path)?;
    conn.query_row(
        "SELECT file_name, number_of_records FROM sheet WHERE id = ?1",
        [sheet_id],
        |row| {
            Ok(StoredSheet {
                file_name: row.get(0)?,
                number_of_records: row.get(1)?,
            })
        },
    )
    .optional()
    .with_context(|| format!("failed to load sheet #{sheet_id}"))
}

fn map_column(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredColumn> {
    Ok(StoredColumn {
        id: row.get(0)?,
        sheet_id: row.get(1)?,
        col_idx: row.get(2)?,
        name: row.get(3)?,
        data_type: row.get(4)?,
    })
}

pub fn load_columns(db_path: &Path, sheet_id: i64) -> Result<Vec<StoredColumn>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(
            "SELECT id, sheet_id, col_idx, name, data_type
             FROM sheet_column
             WHERE sheet_id = ?1
             ORDER BY col_idx ASC",
        )
        .context("failed to prepare columns query")?;
    let columns = stmt
        .query_map([sheet_id], map_column)
        .context("failed to query columns")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect columns")?;
    Ok(columns)
}

pub fn load_column(db_path: &Path, column_id: i64) -> Result<Option<StoredColumn>> {
    let conn = open_connection(db_path)?;
    conn.query_row(
        "SELECT id, sheet_id, col_idx, name, data_type FROM sheet_column WHERE id = ?1",
        [column_id],
        map_column,
    )
    .optional()
    .with_context(|| format!("failed to load column #{column_id}"))
}

/// Raw cell text for rows `[start, start + count)`, each row `width` wide.
pub fn load_rows(
    db_path: &Path,
    sheet_id: i64,
    width: usize,
    start: i64,
    count: i64,
) -> Result<Vec<Vec<Option<String>>>> {
    if count <= 0 || width == 0 {
        return Ok(Vec::new());
    }
    let end = start.saturating_add(count);

    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(
            "SELECT row_idx, col_idx, value
             FROM cell
             WHERE sheet_id = ?1 AND row_idx >= ?2 AND row_idx < ?3
             ORDER BY row_idx ASC, col_idx ASC",
        )
        .context("failed to prepare rows query")?;
    let cells = stmt
        .query_map(params![sheet_id, start, end], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })
        .context("failed to query rows")?;

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    let mut current_row_idx = None;
    for cell in cells {
        let (row_idx, col_idx, value) = cell.context("failed to read cell")?;
        if current_row_idx != Some(row_idx) {
            rows.push(vec![None; width]);
            current_row_idx = Some(row_idx);
        }
        if let (Some(row), Ok(col_idx)) = (rows.last_mut(), usize::try_from(col_idx)) {
            if col_idx < width {
                row[col_idx] = value;
            }
        }
    }
    Ok(rows)
}

pub fn load_column_values(db_path: &Path, sheet_id: i64, col_idx: i64) -> Result<Vec<Option<String>>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(
            "SELECT value FROM cell
             WHERE sheet_id = ?1 AND col_idx = ?2
             ORDER BY row_idx ASC",
        )
        .context("failed to prepare column values query")?;
    let values = stmt
        .query_map(params![sheet_id, col_idx], |row| row.get::<_, Option<String>>(0))
        .context("failed to query column values")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect column values")?;
    Ok(values)
}

pub fn set_column_type(db_path: &Path, column_id: i64, data_type: DataType) -> Result<()> {
    let conn = open_connection(db_path)?;
    conn.execute(
        "UPDATE sheet_column SET data_type = ?1 WHERE id = ?2",
        params![data_type.tag(), column_id],
    )
    .with_context(|| format!("failed to update type of column #{column_id}"))?;
    Ok(())
}
