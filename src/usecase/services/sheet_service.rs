use std::rc::Rc;

use dioxus::logger::tracing::{debug, info, warn};

use crate::domain::entities::dataset::{Column, ColumnId, DatasetDescriptor, DatasetId, SheetPage};
use crate::domain::entities::notice::Notice;
use crate::domain::entities::pagination::Pagination;
use crate::domain::entities::upload::FileDescriptor;
use crate::usecase::ports::api::{ApiError, SheetApi};

/// Outcome of a type override the transport accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeChange {
    Applied(Column),
    /// The server answered but kept (or picked) a different type.
    NotApplied { requested: String, column: Column },
}

impl TypeChange {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            TypeChange::Applied(_) => None,
            TypeChange::NotApplied { requested, .. } => Some(Notice::type_not_applied(requested)),
        }
    }
}

#[derive(Clone)]
pub struct SheetService {
    api: Rc<dyn SheetApi>,
}

impl PartialEq for SheetService {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.api, &other.api)
    }
}

impl SheetService {
    pub fn new(api: Rc<dyn SheetApi>) -> Self {
        Self { api }
    }

    /// Failures come back as a transport notice; callers treat them as "no dataset".
    pub async fn create_dataset(&self, file: &FileDescriptor) -> Result<DatasetDescriptor, Notice> {
        match self.api.create_dataset(file).await {
            Ok(descriptor) => {
                info!(
                    dataset = %descriptor.id,
                    file = %file.name,
                    records = descriptor.number_of_records,
                    "dataset created"
                );
                Ok(descriptor)
            }
            Err(err) => {
                warn!(file = %file.name, status = ?err.status(), error = %err, "dataset upload failed");
                Err(Notice::request_failed(&err))
            }
        }
    }

    pub async fn fetch_page(
        &self,
        dataset_id: &DatasetId,
        pagination: Pagination,
    ) -> Result<SheetPage, ApiError> {
        let request = pagination.request();
        debug!(
            dataset = %dataset_id,
            start_index = request.start_index,
            num_records = request.num_records,
            "fetching page"
        );
        self.api.fetch_page(dataset_id, request).await
    }

    pub async fn supported_types(&self) -> Result<Vec<String>, ApiError> {
        Ok(self.api.fetch_supported_types().await?.supported_types)
    }

    pub async fn change_column_type(
        &self,
        dataset_id: &DatasetId,
        column_id: &ColumnId,
        data_type: &str,
    ) -> Result<TypeChange, ApiError> {
        let column = self
            .api
            .update_column_type(dataset_id, column_id, data_type)
            .await?;

        if column.data_type == data_type {
            info!(column = %column_id, data_type, "column type updated");
            Ok(TypeChange::Applied(column))
        } else {
            warn!(
                column = %column_id,
                requested = data_type,
                actual = %column.data_type,
                "column type change not applied"
            );
            Ok(TypeChange::NotApplied {
                requested: data_type.to_string(),
                column,
            })
        }
    }
}
