use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dioxus::logger::tracing::{debug, info};

use crate::domain::entities::data_type::{supported_tags, DataType};
use crate::domain::entities::dataset::{
    CellValue, Column, ColumnId, DatasetDescriptor, DatasetId, PageRequest, Row, SheetPage,
    SupportedTypes,
};
use crate::domain::entities::upload::FileDescriptor;
use crate::infra::import::csv::parse_csv;
use crate::infra::import::xlsx::parse_workbook;
use crate::infra::import::TabularData;
use crate::infra::inference::{convert, convert_value, infer_type};
use crate::infra::sqlite::queries::{
    insert_sheet, load_column, load_column_values, load_columns, load_rows, load_sheet,
    set_column_type, StoredColumn,
};
use crate::infra::sqlite::schema::init_db;
use crate::platform::desktop::blocking::run_blocking;
use crate::usecase::ports::api::{ApiError, SheetApi};

/// In-process backend: same contract as the REST service, backed by SQLite.
#[derive(Debug, Clone)]
pub struct LocalSheetApi {
    pub db_path: PathBuf,
}

impl LocalSheetApi {
    pub fn open(db_path: PathBuf) -> anyhow::Result<Self> {
        init_db(&db_path)?;
        info!(db = %db_path.display(), "embedded backend ready");
        Ok(Self { db_path })
    }
}

fn storage(err: anyhow::Error) -> ApiError {
    ApiError::Backend(format!("{err:#}"))
}

fn bad_request(message: impl Into<String>) -> ApiError {
    ApiError::Server {
        status: 400,
        message: message.into(),
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::Server {
        status: 404,
        message: format!("No {what} matches the given query."),
    }
}

fn parse_key(raw: &str, what: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| not_found(what))
}

fn to_column(stored: StoredColumn) -> Column {
    Column {
        id: ColumnId::from(stored.id),
        name: stored.name,
        data_type: stored.data_type,
    }
}

fn parse_upload(file_name: &str, bytes: &[u8]) -> Result<TabularData, ApiError> {
    let parsed = if file_name.to_ascii_lowercase().ends_with(".csv") {
        parse_csv(bytes)
    } else {
        parse_workbook(bytes)
    };
    parsed.map_err(|err| bad_request(format!("{err:#}")))
}

pub fn create_sheet(db_path: &Path, file_name: &str, bytes: &[u8]) -> Result<DatasetDescriptor, ApiError> {
    let data = parse_upload(file_name, bytes)?;
    let types: Vec<DataType> = (0..data.columns.len())
        .map(|col_idx| infer_type(&data.column_values(col_idx)))
        .collect();

    let sheet_id = insert_sheet(db_path, file_name, &data, &types).map_err(storage)?;
    let columns = load_columns(db_path, sheet_id).map_err(storage)?;

    Ok(DatasetDescriptor {
        id: DatasetId::from(sheet_id),
        file_name: file_name.to_string(),
        number_of_records: data.rows.len() as u64,
        columns: columns.into_iter().map(to_column).collect(),
    })
}

pub fn read_page(db_path: &Path, dataset_id: &str, request: PageRequest) -> Result<SheetPage, ApiError> {
    let sheet_id = parse_key(dataset_id, "sheet")?;
    let sheet = load_sheet(db_path, sheet_id)
        .map_err(storage)?
        .ok_or_else(|| not_found("sheet"))?;
    let columns = load_columns(db_path, sheet_id).map_err(storage)?;

    let start = i64::try_from(request.start_index).unwrap_or(i64::MAX);
    let count = i64::try_from(request.num_records).unwrap_or(i64::MAX);
    let raw_rows = load_rows(db_path, sheet_id, columns.len(), start, count).map_err(storage)?;

    let types: Vec<DataType> = columns
        .iter()
        .map(|column| DataType::from_tag(&column.data_type).unwrap_or(DataType::Object))
        .collect();
    let rows = raw_rows
        .into_iter()
        .map(|raw| {
            let values = columns
                .iter()
                .zip(&types)
                .zip(raw)
                .map(|((column, data_type), value)| {
                    let cell = convert_value(value.as_deref(), *data_type).unwrap_or_else(|_| {
                        value.clone().map(CellValue::Text).unwrap_or(CellValue::Null)
                    });
                    (column.name.clone(), cell)
                })
                .collect::<HashMap<_, _>>();
            Row(values)
        })
        .collect();

    Ok(SheetPage {
        file_name: sheet.file_name,
        number_of_records: u64::try_from(sheet.number_of_records).unwrap_or_default(),
        columns: columns.into_iter().map(to_column).collect(),
        rows,
    })
}

/// Applies `tag` when every stored value converts; otherwise the column keeps
/// its type and the unchanged record comes back.
pub fn retype_column(db_path: &Path, column_id: &str, tag: &str) -> Result<Column, ApiError> {
    let Some(data_type) = DataType::from_tag(tag) else {
        return Err(bad_request(format!(
            "{tag} is not a supported data type. Please select from {:?}",
            supported_tags()
        )));
    };
    let column_id = parse_key(column_id, "column")?;
    let mut column = load_column(db_path, column_id)
        .map_err(storage)?
        .ok_or_else(|| not_found("column"))?;

    let values = load_column_values(db_path, column.sheet_id, column.col_idx).map_err(storage)?;
    match convert(&values, data_type) {
        Ok(_) => {
            set_column_type(db_path, column.id, data_type).map_err(storage)?;
            column.data_type = data_type.tag().to_string();
        }
        Err(err) => {
            debug!(column = column.id, error = %err, "type conversion refused");
        }
    }
    Ok(to_column(column))
}

#[async_trait(?Send)]
impl SheetApi for LocalSheetApi {
    async fn create_dataset(&self, file: &FileDescriptor) -> Result<DatasetDescriptor, ApiError> {
        let db_path = self.db_path.clone();
        let file_name = file.name.clone();
        let bytes = file.bytes.clone();
        run_blocking(move || create_sheet(&db_path, &file_name, &bytes))
            .await
            .map_err(storage)?
    }

    async fn fetch_page(
        &self,
        dataset_id: &DatasetId,
        request: PageRequest,
    ) -> Result<SheetPage, ApiError> {
        let db_path = self.db_path.clone();
        let dataset_id = dataset_id.0.clone();
        run_blocking(move || read_page(&db_path, &dataset_id, request))
            .await
            .map_err(storage)?
    }

    async fn fetch_supported_types(&self) -> Result<SupportedTypes, ApiError> {
        Ok(SupportedTypes {
            supported_types: supported_tags(),
        })
    }

    async fn update_column_type(
        &self,
        _dataset_id: &DatasetId,
        column_id: &ColumnId,
        data_type: &str,
    ) -> Result<Column, ApiError> {
        let db_path = self.db_path.clone();
        let column_id = column_id.0.clone();
        let data_type = data_type.to_string();
        run_blocking(move || retype_column(&db_path, &column_id, &data_type))
            .await
            .map_err(storage)?
    }
}
