use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use dioxus::prelude::*;

use crate::app::{Shell, ShellProps};
use crate::domain::entities::dataset::{
    CellValue, Column, ColumnId, DatasetDescriptor, DatasetId, PageRequest, Row, SheetPage,
    SupportedTypes,
};
use crate::domain::entities::notice::{NoticeBoard, NoticeKind};
use crate::domain::entities::pagination::Pagination;
use crate::domain::entities::upload::FileDescriptor;
use crate::infra::http::routes::Route;
use crate::ui::components::notices::Notices;
use crate::ui::components::viewer::{apply_type_change, Viewer};
use crate::ui::state::app_state::{RootState, UploaderState};
use crate::ui::state::query_client::QueryClient;
use crate::usecase::ports::api::{ApiError, SheetApi};
use crate::usecase::services::sheet_service::{SheetService, TypeChange};

/// In-memory backend recording every request as `METHOD path [payload]`.
struct FakeApi {
    calls: RefCell<Vec<String>>,
    page: SheetPage,
    supported: Vec<String>,
    /// Type the server reports back after an update; `None` echoes the request.
    applied_type: Option<String>,
    create_error: Option<ApiError>,
    update_error: Option<ApiError>,
}

impl FakeApi {
    fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            page: sample_page(),
            supported: vec!["int64".to_string(), "object".to_string()],
            applied_type: None,
            create_error: None,
            update_error: None,
        }
    }

    fn record(&self, route: Route<'_>, payload: Option<&str>) {
        let mut call = format!("{} {}", route.method(), route.url(""));
        if let Some(payload) = payload {
            call.push(' ');
            call.push_str(payload);
        }
        self.calls.borrow_mut().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl SheetApi for FakeApi {
    async fn create_dataset(&self, file: &FileDescriptor) -> Result<DatasetDescriptor, ApiError> {
        self.record(Route::CreateSheet, Some(&file.name));
        if let Some(err) = &self.create_error {
            return Err(err.clone());
        }
        Ok(DatasetDescriptor {
            id: DatasetId::from("abc123"),
            file_name: file.name.clone(),
            number_of_records: self.page.number_of_records,
            columns: self.page.columns.clone(),
        })
    }

    async fn fetch_page(
        &self,
        dataset_id: &DatasetId,
        request: PageRequest,
    ) -> Result<SheetPage, ApiError> {
        self.record(
            Route::Sheet {
                dataset_id,
                request,
            },
            None,
        );
        Ok(self.page.clone())
    }

    async fn fetch_supported_types(&self) -> Result<SupportedTypes, ApiError> {
        self.record(Route::SupportedTypes, None);
        Ok(SupportedTypes {
            supported_types: self.supported.clone(),
        })
    }

    async fn update_column_type(
        &self,
        _dataset_id: &DatasetId,
        column_id: &ColumnId,
        data_type: &str,
    ) -> Result<Column, ApiError> {
        self.record(Route::Column { column_id }, Some(data_type));
        if let Some(err) = &self.update_error {
            return Err(err.clone());
        }
        Ok(Column {
            id: column_id.clone(),
            name: "Column1".to_string(),
            data_type: self
                .applied_type
                .clone()
                .unwrap_or_else(|| data_type.to_string()),
        })
    }
}

fn sample_page() -> SheetPage {
    let rows = (1..=3)
        .map(|n| {
            Row(HashMap::from([(
                "Column1".to_string(),
                CellValue::Text(format!("value {n}")),
            )]))
        })
        .collect();
    SheetPage {
        file_name: "sample.csv".to_string(),
        number_of_records: 3,
        columns: vec![Column {
            id: ColumnId::from("1"),
            name: "Column1".to_string(),
            data_type: "object".to_string(),
        }],
        rows,
    }
}

fn csv_file(name: &str) -> FileDescriptor {
    FileDescriptor::from_name(name, b"Column1\nvalue 1\n".to_vec())
}

#[tokio::test]
async fn type_change_sends_put_for_the_column_with_selected_tag() {
    let fake = Rc::new(FakeApi::new());
    let service = SheetService::new(fake.clone());

    let change = service
        .change_column_type(&DatasetId::from("abc123"), &ColumnId::from("1"), "int64")
        .await
        .expect("update should succeed");

    assert_eq!(fake.calls(), vec!["PUT /columns/1 int64".to_string()]);
    assert!(matches!(change, TypeChange::Applied(_)));
    assert_eq!(change.notice(), None);
}

#[tokio::test]
async fn type_mismatch_raises_warning_without_error() {
    let mut fake = FakeApi::new();
    fake.applied_type = Some("object".to_string());
    let service = SheetService::new(Rc::new(fake));

    let change = service
        .change_column_type(&DatasetId::from("abc123"), &ColumnId::from("1"), "int64")
        .await
        .expect("a mismatch is not an error");

    let notice = change.notice().expect("mismatch should raise a notice");
    assert_eq!(notice.kind, NoticeKind::Mismatch);
    assert_eq!(
        notice.message,
        "The column could not be converted to type: int64"
    );
    match change {
        TypeChange::NotApplied { requested, column } => {
            assert_eq!(requested, "int64");
            assert_eq!(column.data_type, "object");
        }
        TypeChange::Applied(_) => panic!("server kept the old type"),
    }
}

#[tokio::test]
async fn failed_upload_becomes_transport_notice() {
    let mut fake = FakeApi::new();
    fake.create_error = Some(ApiError::Server {
        status: 400,
        message: "No columns to parse from file".to_string(),
    });
    let service = SheetService::new(Rc::new(fake));

    let notice = service
        .create_dataset(&csv_file("empty.csv"))
        .await
        .expect_err("upload should fail");

    assert_eq!(notice.kind, NoticeKind::Transport);
    assert_eq!(
        notice.message,
        "An error occurred: No columns to parse from file"
    );
}

#[tokio::test]
async fn page_requests_follow_pagination() {
    let fake = Rc::new(FakeApi::new());
    let service = SheetService::new(fake.clone());
    let dataset_id = DatasetId::from("abc123");
    let first = Pagination::default();

    service
        .fetch_page(&dataset_id, first)
        .await
        .expect("first page");
    service
        .fetch_page(&dataset_id, first.next(25))
        .await
        .expect("second page");

    assert_eq!(
        fake.calls(),
        vec![
            "GET /sheets/abc123/?start_index=0&num_records=10".to_string(),
            "GET /sheets/abc123/?start_index=10&num_records=10".to_string(),
        ]
    );
}

#[tokio::test]
async fn rejected_file_never_reaches_the_api() {
    let fake = Rc::new(FakeApi::new());
    let service = SheetService::new(fake.clone());
    let mut uploader = UploaderState::default();

    let notice = uploader.select(Some(FileDescriptor::from_name("notes.txt", b"hi".to_vec())));
    assert_eq!(notice.map(|n| n.kind), Some(NoticeKind::Validation));

    if let Some(file) = uploader.submission() {
        let _ = service.create_dataset(&file).await;
    }
    assert!(fake.calls().is_empty());
}

fn shell_dom(fake: Rc<FakeApi>, initial: RootState) -> VirtualDom {
    let props = ShellProps::builder()
        .service(SheetService::new(fake))
        .page_size(10)
        .initial(initial)
        .build();
    let mut dom = VirtualDom::new_with_props(Shell, props);
    dom.rebuild_in_place();
    dom
}

/// Lets spawned resources finish and re-renders until the dom goes quiet.
async fn settle(dom: &mut VirtualDom) {
    for _ in 0..6 {
        if tokio::time::timeout(Duration::from_millis(50), dom.wait_for_work())
            .await
            .is_err()
        {
            break;
        }
        dom.render_immediate_to_vec();
    }
}

#[test]
fn initial_render_shows_instructions_and_uploader_only() {
    let fake = Rc::new(FakeApi::new());
    let dom = shell_dom(fake.clone(), RootState::Empty);
    let html = dioxus_ssr::render(&dom);

    assert!(html.contains("Instructions:"), "{html}");
    assert!(html.contains("Upload a file:"), "{html}");
    assert!(html.contains("flex: 1;"), "{html}");
    assert!(!html.contains("380px"), "{html}");
    assert!(!html.contains("Contains"), "{html}");
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn loaded_render_shows_viewer_next_to_side_panel() {
    let fake = Rc::new(FakeApi::new());
    let mut dom = shell_dom(fake.clone(), RootState::Loaded(DatasetId::from("abc123")));
    settle(&mut dom).await;
    let html = dioxus_ssr::render(&dom);

    assert!(html.contains("width: 380px;"), "{html}");
    assert!(html.contains("Upload a file:"), "{html}");
    assert!(html.contains("Contains 3 rows"), "{html}");
    assert!(html.contains("Column1"), "{html}");
    assert!(html.contains("Text"), "{html}");
    assert!(html.contains("Int64"), "{html}");
    assert!(html.contains("value 2"), "{html}");
    assert!(html.contains("Page 1 of 1"), "{html}");
    assert!(fake
        .calls()
        .contains(&"GET /sheets/abc123/?start_index=0&num_records=10".to_string()));
    assert!(fake
        .calls()
        .contains(&"GET /supported-types/".to_string()));
}

fn page_get(dataset_id: &str, start_index: u64) -> String {
    format!("GET /sheets/{dataset_id}/?start_index={start_index}&num_records=10")
}

/// Loads two pages of `abc123` and one of `def456` twice, invalidates
/// `abc123`, then loads all three again.
#[component]
fn InvalidationScenario(service: SheetService) -> Element {
    let queries = use_hook(QueryClient::new);
    use_hook(|| {
        let service = service.clone();
        spawn(async move {
            let sheet_a = DatasetId::from("abc123");
            let sheet_b = DatasetId::from("def456");
            let first = Pagination::with_page_size(10);
            let loads = [
                (&sheet_a, first),
                (&sheet_a, first.next(25)),
                (&sheet_b, first),
            ];
            for _ in 0..2 {
                for (dataset_id, pagination) in loads {
                    let _ = queries.fetch_page(&service, dataset_id, pagination).await;
                }
            }
            queries.invalidate_sheet(&sheet_a);
            for (dataset_id, pagination) in loads {
                let _ = queries.fetch_page(&service, dataset_id, pagination).await;
            }
        })
    });
    let epoch = queries.epoch();
    rsx! { p { "epoch {epoch}" } }
}

/// Loads a page, forgets the dataset, then loads the same page again.
#[component]
fn ForgetScenario(service: SheetService) -> Element {
    let queries = use_hook(QueryClient::new);
    use_hook(|| {
        let service = service.clone();
        spawn(async move {
            let dataset_id = DatasetId::from("abc123");
            let first = Pagination::with_page_size(10);
            let _ = queries.fetch_page(&service, &dataset_id, first).await;
            queries.forget_sheet(&dataset_id);
            let _ = queries.fetch_page(&service, &dataset_id, first).await;
        })
    });
    let epoch = queries.epoch();
    rsx! { p { "epoch {epoch}" } }
}

/// Mounts a viewer for `abc123` and asks for `requested` on column `1` once
/// the first page is cached.
#[component]
fn TypeChangeScenario(service: SheetService, requested: String) -> Element {
    use_context_provider(|| service.clone());
    let queries = use_context_provider(QueryClient::new);
    let notices = use_context_provider(|| Signal::new(NoticeBoard::default()));
    use_hook(|| {
        let service = service.clone();
        let requested = requested.clone();
        spawn(async move {
            let dataset_id = DatasetId::from("abc123");
            let _ = queries
                .fetch_page(&service, &dataset_id, Pagination::with_page_size(10))
                .await;
            apply_type_change(
                service,
                queries,
                notices,
                dataset_id,
                ColumnId::from("1"),
                requested,
            )
            .await;
        })
    });
    rsx! {
        Viewer { dataset_id: DatasetId::from("abc123"), page_size: 10 }
        Notices {}
    }
}

fn type_change_dom(fake: Rc<FakeApi>, requested: &str) -> VirtualDom {
    let props = TypeChangeScenarioProps::builder()
        .service(SheetService::new(fake))
        .requested(requested.to_string())
        .build();
    let mut dom = VirtualDom::new_with_props(TypeChangeScenario, props);
    dom.rebuild_in_place();
    dom
}

#[tokio::test]
async fn invalidation_refetches_only_the_changed_sheet() {
    let fake = Rc::new(FakeApi::new());
    let props = InvalidationScenarioProps::builder()
        .service(SheetService::new(fake.clone()))
        .build();
    let mut dom = VirtualDom::new_with_props(InvalidationScenario, props);
    dom.rebuild_in_place();
    settle(&mut dom).await;

    assert_eq!(
        fake.calls(),
        vec![
            page_get("abc123", 0),
            page_get("abc123", 10),
            page_get("def456", 0),
            page_get("abc123", 0),
            page_get("abc123", 10),
        ]
    );
    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("epoch 1"), "{html}");
}

#[tokio::test]
async fn forgotten_sheet_is_fetched_again_without_waking_queries() {
    let fake = Rc::new(FakeApi::new());
    let props = ForgetScenarioProps::builder()
        .service(SheetService::new(fake.clone()))
        .build();
    let mut dom = VirtualDom::new_with_props(ForgetScenario, props);
    dom.rebuild_in_place();
    settle(&mut dom).await;

    assert_eq!(fake.calls(), vec![page_get("abc123", 0), page_get("abc123", 0)]);
    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("epoch 0"), "{html}");
}

#[tokio::test]
async fn refused_type_rebuilds_selector_and_refetches_page() {
    let mut fake = FakeApi::new();
    fake.applied_type = Some("object".to_string());
    let fake = Rc::new(fake);
    let mut dom = type_change_dom(fake.clone(), "int64");
    settle(&mut dom).await;
    let html = dioxus_ssr::render(&dom);

    assert!(
        html.contains("The column could not be converted to type: int64"),
        "{html}"
    );
    assert!(html.contains("data-revision=\"1\""), "{html}");
    assert!(!html.contains("data-revision=\"0\""), "{html}");

    let calls = fake.calls();
    let put = calls
        .iter()
        .position(|call| call == "PUT /columns/1 int64")
        .expect("update should be sent");
    assert!(
        calls[put + 1..].contains(&page_get("abc123", 0)),
        "page should be refetched after the update: {calls:?}"
    );
}

#[tokio::test]
async fn failed_type_change_rebuilds_selector_from_cache() {
    let mut fake = FakeApi::new();
    fake.update_error = Some(ApiError::Server {
        status: 500,
        message: "conversion crashed".to_string(),
    });
    let fake = Rc::new(fake);
    let mut dom = type_change_dom(fake.clone(), "int64");
    settle(&mut dom).await;
    let html = dioxus_ssr::render(&dom);

    assert!(html.contains("An error occurred: conversion crashed"), "{html}");
    assert!(html.contains("data-revision=\"1\""), "{html}");
    assert!(!html.contains("data-revision=\"0\""), "{html}");

    let page_gets = fake
        .calls()
        .iter()
        .filter(|call| **call == page_get("abc123", 0))
        .count();
    assert_eq!(page_gets, 1);
}

#[cfg(feature = "local")]
mod embedded_backend {
    use std::fs;
    use std::path::PathBuf;
    use std::rc::Rc;
    use std::time::{SystemTime, UNIX_EPOCH};

    use rusqlite::Connection;

    use crate::domain::entities::dataset::{CellValue, ColumnId, DatasetId, PageRequest};
    use crate::domain::entities::upload::FileDescriptor;
    use crate::infra::sqlite::repo::{create_sheet, read_page, retype_column, LocalSheetApi};
    use crate::infra::sqlite::schema::init_db;
    use crate::usecase::ports::api::ApiError;
    use crate::usecase::services::sheet_service::{SheetService, TypeChange};

    fn unique_test_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("sheet-viewer-{prefix}-{nanos}"))
    }

    fn inventory_csv() -> Vec<u8> {
        let mut text = String::from("name,qty,price,active\n");
        for n in 1..=12 {
            let active = if n % 2 == 0 { "true" } else { "false" };
            text.push_str(&format!("item{n},{n},{n}.5,{active}\n"));
        }
        text.into_bytes()
    }

    fn page(start_index: u64, num_records: u64) -> PageRequest {
        PageRequest {
            start_index,
            num_records,
        }
    }

    #[test]
    fn init_db_creates_required_tables() {
        let temp_dir = unique_test_dir("init-db");
        let db_path = temp_dir.join("app.sqlite");

        let result = init_db(&db_path);

        assert!(result.is_ok(), "init_db should succeed: {result:?}");

        let conn = Connection::open(&db_path).expect("should open sqlite db");
        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('sheet','sheet_column','cell')",
                [],
                |row| row.get(0),
            )
            .expect("table count query should succeed");

        assert_eq!(table_count, 3, "required tables should exist");

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }

    #[test]
    fn upload_infers_column_types() {
        let temp_dir = unique_test_dir("upload");
        let db_path = temp_dir.join("app.sqlite");
        init_db(&db_path).expect("init_db should succeed");

        let created = create_sheet(&db_path, "inventory.csv", &inventory_csv())
            .expect("sheet should be created");

        assert_eq!(created.file_name, "inventory.csv");
        assert_eq!(created.number_of_records, 12);
        let types: Vec<&str> = created
            .columns
            .iter()
            .map(|column| column.data_type.as_str())
            .collect();
        assert_eq!(types, vec!["object", "int8", "float32", "bool"]);

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }

    #[test]
    fn page_window_returns_typed_values() {
        let temp_dir = unique_test_dir("page-window");
        let db_path = temp_dir.join("app.sqlite");
        init_db(&db_path).expect("init_db should succeed");
        let created = create_sheet(&db_path, "inventory.csv", &inventory_csv())
            .expect("sheet should be created");

        let second = read_page(&db_path, &created.id.0, page(10, 10)).expect("page should load");

        assert_eq!(second.number_of_records, 12);
        assert_eq!(second.rows.len(), 2);
        let row = &second.rows[0];
        assert_eq!(row.get("name"), Some(&CellValue::Text("item11".to_string())));
        assert_eq!(row.get("qty"), Some(&CellValue::Integer(11)));
        assert_eq!(row.get("price"), Some(&CellValue::Float(11.5)));
        assert_eq!(row.get("active"), Some(&CellValue::Bool(false)));

        let beyond = read_page(&db_path, &created.id.0, page(40, 10)).expect("page should load");
        assert!(beyond.rows.is_empty());

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }

    #[test]
    fn retype_applies_or_keeps_previous_type() {
        let temp_dir = unique_test_dir("retype");
        let db_path = temp_dir.join("app.sqlite");
        init_db(&db_path).expect("init_db should succeed");
        let created = create_sheet(&db_path, "inventory.csv", &inventory_csv())
            .expect("sheet should be created");
        let name_column = &created.columns[0].id.0;
        let qty_column = &created.columns[1].id.0;

        let refused = retype_column(&db_path, name_column, "int64").expect("request succeeds");
        assert_eq!(refused.data_type, "object");

        let applied = retype_column(&db_path, qty_column, "float64").expect("request succeeds");
        assert_eq!(applied.data_type, "float64");

        let first = read_page(&db_path, &created.id.0, page(0, 1)).expect("page should load");
        assert_eq!(first.rows[0].get("qty"), Some(&CellValue::Float(1.0)));
        assert_eq!(first.columns[1].data_type, "float64");

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }

    #[test]
    fn unknown_ids_and_tags_are_client_errors() {
        let temp_dir = unique_test_dir("errors");
        let db_path = temp_dir.join("app.sqlite");
        init_db(&db_path).expect("init_db should succeed");

        let missing_sheet = read_page(&db_path, "999", page(0, 10)).expect_err("no such sheet");
        assert_eq!(missing_sheet.status(), Some(404));
        assert_eq!(
            missing_sheet.to_string(),
            "No sheet matches the given query."
        );

        let missing_column = retype_column(&db_path, "999", "object").expect_err("no such column");
        assert_eq!(missing_column.status(), Some(404));

        let bad_tag = retype_column(&db_path, "1", "decimal").expect_err("unsupported tag");
        assert_eq!(bad_tag.status(), Some(400));
        assert!(bad_tag.to_string().contains("not a supported data type"));

        let empty = create_sheet(&db_path, "empty.csv", b"").expect_err("empty upload");
        assert!(matches!(empty, ApiError::Server { status: 400, .. }));

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }

    #[tokio::test]
    async fn service_reports_refused_conversion_as_mismatch() {
        let temp_dir = unique_test_dir("service");
        let api = LocalSheetApi::open(temp_dir.join("app.sqlite")).expect("backend should open");
        let service = SheetService::new(Rc::new(api));

        let file = FileDescriptor::from_name("inventory.csv", inventory_csv());
        let created = service
            .create_dataset(&file)
            .await
            .expect("upload should succeed");
        let dataset_id: DatasetId = created.id.clone();
        let name_column: ColumnId = created.columns[0].id.clone();

        let change = service
            .change_column_type(&dataset_id, &name_column, "datetime64[ns]")
            .await
            .expect("request should succeed");

        match change {
            TypeChange::NotApplied { column, .. } => assert_eq!(column.data_type, "object"),
            TypeChange::Applied(column) => panic!("unexpected conversion: {column:?}"),
        }

        let tags = service.supported_types().await.expect("supported types");
        assert_eq!(tags.len(), 12);
        assert_eq!(tags.first().map(String::as_str), Some("bool"));

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }
}
