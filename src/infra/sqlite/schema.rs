use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn open_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to open db: {}", db_path.display()))?;
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign key enforcement")?;
    Ok(conn)
}

pub fn init_db(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let conn = open_connection(db_path)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS sheet (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            file_name         TEXT NOT NULL,
            number_of_records INTEGER NOT NULL,
            uploaded_at       TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS sheet_column (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            sheet_id    INTEGER NOT NULL,
            col_idx     INTEGER NOT NULL,
            name        TEXT NOT NULL,
            data_type   TEXT NOT NULL,
            UNIQUE (sheet_id, col_idx),
            FOREIGN KEY (sheet_id) REFERENCES sheet(id)
        );

        CREATE TABLE IF NOT EXISTS cell (
            sheet_id    INTEGER NOT NULL,
            row_idx     INTEGER NOT NULL,
            col_idx     INTEGER NOT NULL,
            value       TEXT,
            PRIMARY KEY (sheet_id, row_idx, col_idx),
            FOREIGN KEY (sheet_id) REFERENCES sheet(id)
        );

        CREATE INDEX IF NOT EXISTS idx_cell_sheet_col
            ON cell(sheet_id, col_idx);
        ",
    )
    .context("failed to initialize schema")?;

    Ok(())
}
