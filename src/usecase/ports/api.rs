use async_trait::async_trait;

use crate::domain::entities::dataset::{
    Column, ColumnId, DatasetDescriptor, DatasetId, PageRequest, SheetPage, SupportedTypes,
};
use crate::domain::entities::upload::FileDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("{0}")]
    Transport(String),
    /// Non-success status; the message is the server's `error` field.
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("{0}")]
    Backend(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The backend's REST contract. Implemented over HTTP and by the embedded
/// backend; futures are not `Send` so the browser build can share it.
#[async_trait(?Send)]
pub trait SheetApi {
    async fn create_dataset(&self, file: &FileDescriptor) -> Result<DatasetDescriptor, ApiError>;

    async fn fetch_page(
        &self,
        dataset_id: &DatasetId,
        request: PageRequest,
    ) -> Result<SheetPage, ApiError>;

    async fn fetch_supported_types(&self) -> Result<SupportedTypes, ApiError>;

    async fn update_column_type(
        &self,
        dataset_id: &DatasetId,
        column_id: &ColumnId,
        data_type: &str,
    ) -> Result<Column, ApiError>;
}
