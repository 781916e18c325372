use reqwest::Method;

use crate::domain::entities::dataset::{ColumnId, DatasetId, PageRequest};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Backend endpoints under the API base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    CreateSheet,
    Sheet {
        dataset_id: &'a DatasetId,
        request: PageRequest,
    },
    Column {
        column_id: &'a ColumnId,
    },
    SupportedTypes,
}

impl Route<'_> {
    pub fn method(&self) -> Method {
        match self {
            Route::CreateSheet => Method::POST,
            Route::Sheet { .. } | Route::SupportedTypes => Method::GET,
            Route::Column { .. } => Method::PUT,
        }
    }

    pub fn url(&self, base_url: &str) -> String {
        let base_url = base_url.trim_end_matches('/');
        match self {
            Route::CreateSheet => format!("{base_url}/sheets/"),
            Route::Sheet {
                dataset_id,
                request,
            } => format!(
                "{base_url}/sheets/{dataset_id}/?start_index={}&num_records={}",
                request.start_index, request.num_records
            ),
            Route::Column { column_id } => format!("{base_url}/columns/{column_id}"),
            Route::SupportedTypes => format!("{base_url}/supported-types/"),
        }
    }
}
