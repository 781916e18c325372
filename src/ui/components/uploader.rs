use dioxus::prelude::*;

use crate::domain::entities::dataset::DatasetDescriptor;
use crate::domain::entities::notice::NoticeBoard;
use crate::platform::file_picker::pick_spreadsheet;
use crate::ui::components::button::Button;
use crate::ui::state::app_state::UploaderState;
use crate::usecase::services::sheet_service::SheetService;

#[component]
pub fn Uploader(on_uploaded: EventHandler<DatasetDescriptor>) -> Element {
    let service = use_context::<SheetService>();
    let mut notices = use_context::<Signal<NoticeBoard>>();
    let mut state = use_signal(UploaderState::default);

    let choose_file = move |_: MouseEvent| {
        spawn(async move {
            let picked = pick_spreadsheet().await;
            if let Some(notice) = state.write().select(picked) {
                notices.write().push(notice);
            }
        });
    };

    let upload = move |_: MouseEvent| {
        let Some(file) = state.peek().submission() else {
            return;
        };
        state.write().busy = true;
        let service = service.clone();
        spawn(async move {
            let created = service.create_dataset(&file).await;
            state.write().busy = false;
            match created {
                Ok(descriptor) => on_uploaded.call(descriptor),
                Err(notice) => {
                    notices.write().push(notice);
                }
            }
        });
    };

    let selected_label = state
        .read()
        .selected_name()
        .map(str::to_string)
        .unwrap_or_else(|| "No file chosen".to_string());
    let can_submit = state.read().can_submit();
    let busy = state.read().busy;

    rsx! {
        div {
            label { style: "display: block; padding-bottom: 4px;", "Upload a file:" }
            div {
                style: "display: flex; align-items: center; gap: 8px; border: 1px solid #ccc; border-radius: 8px; padding: 8px; font-size: 14px;",
                Button { disabled: busy, onclick: choose_file, "Choose file" }
                span { style: "color: #444; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;", "{selected_label}" }
            }
            div {
                style: "padding-top: 8px;",
                Button { disabled: !can_submit, onclick: upload, "Upload" }
                if busy {
                    span { style: "font-size: 14px; color: #666; padding-left: 8px;", "Uploading…" }
                }
            }
        }
    }
}
