use async_trait::async_trait;
use dioxus::logger::tracing::debug;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::entities::dataset::{
    Column, ColumnId, DatasetDescriptor, DatasetId, PageRequest, SheetPage, SupportedTypes,
};
use crate::domain::entities::upload::FileDescriptor;
use crate::infra::http::routes::Route;
use crate::usecase::ports::api::{ApiError, SheetApi};

/// REST client for the sheet backend.
#[derive(Debug, Clone)]
pub struct HttpSheetApi {
    client: Client,
    base_url: String,
}

impl HttpSheetApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn request(&self, route: &Route<'_>) -> RequestBuilder {
        let url = route.url(&self.base_url);
        debug!(method = %route.method(), %url, "api request");
        self.client.request(route.method(), url)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        read_body(status, &body)
    }
}

/// Parses the body as JSON whatever the status; a non-2xx status fails with
/// the body's `error` field.
pub fn read_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let parsed = serde_json::from_str::<Value>(body);
    let success = (200..300).contains(&status);

    if !success {
        let message = parsed
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("request failed with status {status}"));
        return Err(ApiError::Server { status, message });
    }

    let value = parsed.map_err(|err| ApiError::Decode(err.to_string()))?;
    serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
}

#[async_trait(?Send)]
impl SheetApi for HttpSheetApi {
    async fn create_dataset(&self, file: &FileDescriptor) -> Result<DatasetDescriptor, ApiError> {
        let mut part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        if let Some(media_type) = file.media_type.as_deref() {
            part = part
                .mime_str(media_type)
                .map_err(|err| ApiError::Transport(err.to_string()))?;
        }
        let form = Form::new().part("file", part);
        Self::send(self.request(&Route::CreateSheet).multipart(form)).await
    }

    async fn fetch_page(
        &self,
        dataset_id: &DatasetId,
        request: PageRequest,
    ) -> Result<SheetPage, ApiError> {
        Self::send(self.request(&Route::Sheet {
            dataset_id,
            request,
        }))
        .await
    }

    async fn fetch_supported_types(&self) -> Result<SupportedTypes, ApiError> {
        Self::send(self.request(&Route::SupportedTypes)).await
    }

    async fn update_column_type(
        &self,
        _dataset_id: &DatasetId,
        column_id: &ColumnId,
        data_type: &str,
    ) -> Result<Column, ApiError> {
        let form = Form::new().text("data_type", data_type.to_string());
        Self::send(self.request(&Route::Column { column_id }).multipart(form)).await
    }
}
