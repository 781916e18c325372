use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

use crate::domain::entities::dataset::{ColumnId, DatasetId};
use crate::domain::entities::notice::{Notice, NoticeBoard};
use crate::domain::entities::pagination::Pagination;
use crate::ui::components::pagination::PaginationBar;
use crate::ui::state::query_client::QueryClient;
use crate::ui::view_model::{body_rows, header_cells, row_count_text, HeaderCell, TypeOption};
use crate::usecase::services::sheet_service::SheetService;

const CELL_STYLE: &str = "border: 1px solid #ddd; padding: 6px 8px; white-space: nowrap;";
const HEADER_STYLE: &str = "border: 1px solid #ddd; padding: 6px 8px; background: #f7f7f7; text-align: left; white-space: nowrap; position: sticky; top: 0;";

/// Sends a type override. An answered request refetches the dataset's pages;
/// a failed one bumps the epoch over the cached pages.
pub async fn apply_type_change(
    service: SheetService,
    queries: QueryClient,
    mut notices: Signal<NoticeBoard>,
    dataset_id: DatasetId,
    column_id: ColumnId,
    tag: String,
) {
    match service.change_column_type(&dataset_id, &column_id, &tag).await {
        Ok(change) => {
            if let Some(notice) = change.notice() {
                notices.write().push(notice);
            }
            queries.invalidate_sheet(&dataset_id);
        }
        Err(err) => {
            warn!(column = %column_id, error = %err, "type change request failed");
            notices.write().push(Notice::request_failed(&err));
            queries.refresh();
        }
    }
}

/// Mounted once per dataset (keyed by id), so pagination starts fresh.
#[component]
pub fn Viewer(dataset_id: DatasetId, page_size: u64) -> Element {
    let service = use_context::<SheetService>();
    let queries = use_context::<QueryClient>();
    let notices = use_context::<Signal<NoticeBoard>>();
    let pagination = use_signal(move || Pagination::with_page_size(page_size));

    use_drop({
        let dataset_id = dataset_id.clone();
        move || queries.forget_sheet(&dataset_id)
    });

    let supported_types = use_resource({
        let service = service.clone();
        move || {
            let service = service.clone();
            async move { service.supported_types().await }
        }
    });

    let page = use_resource({
        let service = service.clone();
        let dataset_id = dataset_id.clone();
        move || {
            let service = service.clone();
            let dataset_id = dataset_id.clone();
            let current = pagination();
            // Rerun after any invalidation.
            let _epoch = queries.epoch();
            async move { queries.fetch_page(&service, &dataset_id, current).await }
        }
    });

    let change_type = use_callback({
        let dataset_id = dataset_id.clone();
        move |(column_id, tag): (ColumnId, String)| {
            spawn(apply_type_change(
                service.clone(),
                queries,
                notices,
                dataset_id.clone(),
                column_id,
                tag,
            ));
        }
    });

    let supported = match &*supported_types.read() {
        Some(Ok(tags)) => tags.clone(),
        _ => Vec::new(),
    };
    let revision = queries.epoch();

    let body = match &*page.read() {
        None => rsx! {
            p { style: "font-size: 14px; color: #666;", "Loading…" }
        },
        Some(Err(err)) => rsx! {
            p { role: "alert", style: "font-size: 14px; color: #c53030;", "Could not load data: {err}" }
        },
        Some(Ok(sheet)) => {
            let headers = header_cells(&sheet.columns, &supported);
            let rows = body_rows(sheet);
            rsx! {
                TableInformation {
                    file_name: sheet.file_name.clone(),
                    number_of_records: sheet.number_of_records,
                }
                SheetTable { headers, rows, revision, on_type_change: change_type }
                PaginationBar { pagination, number_of_records: sheet.number_of_records }
            }
        }
    };

    rsx! {
        div { style: "display: flex; flex-direction: column;", {body} }
    }
}

#[component]
fn TableInformation(file_name: String, number_of_records: u64) -> Element {
    let count = row_count_text(number_of_records);
    rsx! {
        div {
            style: "padding-bottom: 16px;",
            h1 { style: "font-size: 18px; font-weight: 500; margin: 0;", "{file_name}" }
            p { style: "font-size: 14px; margin: 4px 0 0 0;", "{count}" }
        }
    }
}

#[component]
fn SheetTable(
    headers: Vec<HeaderCell>,
    rows: Vec<Vec<String>>,
    revision: u64,
    on_type_change: Callback<(ColumnId, String)>,
) -> Element {
    rsx! {
        div {
            style: "overflow: auto; border: 1px solid #ddd; border-radius: 8px;",
            table {
                style: "border-collapse: collapse; width: 100%; font-size: 14px;",
                thead {
                    tr {
                        {headers.into_iter().map(|header| {
                            // A new key per settled update rebuilds the selector,
                            // dropping any choice the server did not keep.
                            let selector_key = header.selector_key(revision);
                            let HeaderCell { column_id, name, options } = header;
                            let key = column_id.to_string();
                            rsx!(
                                th {
                                    key: "{key}",
                                    style: "{HEADER_STYLE}",
                                    div { "{name}" }
                                    {std::iter::once(selector_key).map(|selector_key| rsx!(
                                        TypeSelect {
                                            key: "{selector_key}",
                                            column_id: column_id.clone(),
                                            options: options.clone(),
                                            revision,
                                            on_type_change,
                                        }
                                    ))}
                                }
                            )
                        })}
                    }
                }
                tbody {
                    {rows.into_iter().enumerate().map(|(row_idx, row)| rsx!(
                        tr {
                            key: "{row_idx}",
                            {row.into_iter().map(|value| rsx!(
                                td { style: "{CELL_STYLE}", "{value}" }
                            ))}
                        }
                    ))}
                }
            }
        }
    }
}

#[component]
fn TypeSelect(
    column_id: ColumnId,
    options: Vec<TypeOption>,
    revision: u64,
    on_type_change: Callback<(ColumnId, String)>,
) -> Element {
    rsx! {
        select {
            style: "margin-top: 4px; border: 1px solid #bbb; border-radius: 6px; padding: 2px 4px; font-weight: normal;",
            "data-revision": "{revision}",
            onchange: move |event| {
                on_type_change.call((column_id.clone(), event.value()));
            },
            {options.into_iter().map(|choice| rsx!(
                option {
                    key: "{choice.tag}",
                    value: "{choice.tag}",
                    selected: choice.selected,
                    "{choice.label}"
                }
            ))}
        }
    }
}
