use dioxus::prelude::*;

use crate::domain::entities::notice::{NoticeBoard, NoticeKind};

fn accent(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Validation => "#b7791f",
        NoticeKind::Transport => "#c53030",
        NoticeKind::Mismatch => "#2b6cb0",
    }
}

/// Toast stack for the board in context; each entry stays until dismissed.
#[component]
pub fn Notices() -> Element {
    let mut board = use_context::<Signal<NoticeBoard>>();
    if board.read().is_empty() {
        return rsx! {};
    }
    let items = board.read().items().to_vec();

    rsx! {
        div {
            style: "position: fixed; right: 16px; bottom: 16px; display: flex; flex-direction: column; gap: 8px; z-index: 1200;",
            {items.into_iter().map(|notice| {
                let id = notice.id;
                let color = accent(notice.kind);
                rsx!(
                    div {
                        key: "{id}",
                        role: "alert",
                        style: "min-width: 260px; max-width: 420px; background: #fff; border: 1px solid #bbb; border-left: 4px solid {color}; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); padding: 10px 12px; display: flex; gap: 12px; align-items: flex-start;",
                        span { style: "flex: 1; font-size: 14px;", "{notice.message}" }
                        button {
                            style: "border: none; background: transparent; cursor: pointer; font-size: 16px;",
                            onclick: move |_| board.write().dismiss(id),
                            "×"
                        }
                    }
                )
            })}
        }
    }
}
