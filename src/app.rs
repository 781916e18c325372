use std::rc::Rc;

use anyhow::Result;
use dioxus::logger::tracing::info;
use dioxus::prelude::*;

use crate::config::{AppConfig, BackendMode};
use crate::domain::entities::dataset::DatasetDescriptor;
use crate::infra::http::client::HttpSheetApi;
use crate::ui::components::instructions::Instructions;
use crate::ui::components::notices::Notices;
use crate::ui::components::uploader::Uploader;
use crate::ui::components::viewer::Viewer;
use crate::ui::state::app_state::{AppState, RootState};
use crate::ui::state::query_client::QueryClient;
use crate::usecase::ports::api::SheetApi;
use crate::usecase::services::sheet_service::SheetService;

const PANEL_STYLE: &str = "padding: 16px; border: 1px solid #ddd; height: 100%; box-sizing: border-box; box-shadow: 0 10px 24px rgba(0,0,0,0.15); overflow-y: auto;";

pub fn build_api(config: &AppConfig) -> Result<Rc<dyn SheetApi>> {
    match config.backend {
        BackendMode::Remote => {
            info!(base_url = %config.api_base_url, "using remote data service");
            Ok(Rc::new(HttpSheetApi::new(config.api_base_url.clone())))
        }
        BackendMode::Local => local_api(config),
    }
}

#[cfg(feature = "local")]
fn local_api(config: &AppConfig) -> Result<Rc<dyn SheetApi>> {
    use crate::infra::sqlite::repo::LocalSheetApi;
    use crate::platform::desktop::paths::default_db_path;

    let db_path = match &config.db_path {
        Some(path) => path.clone(),
        None => default_db_path()?,
    };
    Ok(Rc::new(LocalSheetApi::open(db_path)?))
}

#[cfg(not(feature = "local"))]
fn local_api(_config: &AppConfig) -> Result<Rc<dyn SheetApi>> {
    anyhow::bail!("the embedded backend is not available in this build")
}

#[component]
pub fn App() -> Element {
    let setup = use_hook(|| {
        AppConfig::from_env()
            .and_then(|config| {
                let api = build_api(&config)?;
                Ok((SheetService::new(api), config.page_size))
            })
            .map_err(|err| format!("{err:#}"))
    });

    match setup {
        Ok((service, page_size)) => rsx! {
            Shell { service, page_size }
        },
        Err(err) => rsx! {
            div {
                style: "padding: 16px; font-family: sans-serif;",
                p { "Could not start: {err}" }
            }
        },
    }
}

/// Root coordinator: instructions and uploader fill the window until a
/// dataset exists, then shrink to a side panel next to the viewer.
#[component]
pub fn Shell(
    service: SheetService,
    page_size: u64,
    #[props(default)] initial: RootState,
) -> Element {
    use_context_provider(|| service.clone());
    use_context_provider(QueryClient::new);
    let AppState { mut root, notices } = AppState::new(initial);
    use_context_provider(|| notices);

    let on_uploaded = move |descriptor: DatasetDescriptor| {
        root.write().on_dataset_created(&descriptor);
    };

    let loaded = root.read().dataset_id().cloned();
    let panel_width = if loaded.is_some() {
        "width: 380px; flex: none;"
    } else {
        "flex: 1;"
    };

    rsx! {
        div {
            style: "font-family: sans-serif; height: 100vh;",
            div {
                style: "display: flex; height: 100%;",
                div {
                    style: "{PANEL_STYLE} {panel_width}",
                    Instructions {}
                    Uploader { on_uploaded }
                }
                {loaded.map(|dataset_id| rsx!(
                    div {
                        style: "flex: 1; padding: 16px; overflow-x: auto;",
                        Viewer { key: "{dataset_id}", dataset_id: dataset_id.clone(), page_size }
                    }
                ))}
            }
            Notices {}
        }
    }
}
