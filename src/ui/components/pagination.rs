use dioxus::prelude::*;

use crate::domain::entities::pagination::{Pagination, PAGE_SIZE_OPTIONS};
use crate::ui::components::button::Button;
use crate::ui::view_model::PaginationControls;

#[component]
pub fn PaginationBar(mut pagination: Signal<Pagination>, number_of_records: u64) -> Element {
    let current = pagination();
    let controls = PaginationControls::new(current, number_of_records);
    let mut sizes: Vec<u64> = PAGE_SIZE_OPTIONS.to_vec();
    if !sizes.contains(&current.page_size) {
        sizes.push(current.page_size);
        sizes.sort_unstable();
    }

    rsx! {
        div {
            style: "width: 100%; text-align: center; padding: 16px 0; display: flex; justify-content: center; align-items: center; gap: 4px;",
            Button {
                disabled: !controls.can_first,
                onclick: move |_| pagination.set(current.first()),
                "<<"
            }
            Button {
                disabled: !controls.can_previous,
                onclick: move |_| pagination.set(current.previous()),
                "<"
            }
            span { style: "font-size: 14px; padding: 0 8px;", "{controls.readout}" }
            Button {
                disabled: !controls.can_next,
                onclick: move |_| pagination.set(current.next(number_of_records)),
                ">"
            }
            Button {
                disabled: !controls.can_last,
                onclick: move |_| pagination.set(current.last(number_of_records)),
                ">>"
            }
            select {
                style: "margin-left: 12px; border: 1px solid #bbb; border-radius: 6px; padding: 4px 6px;",
                onchange: move |event| {
                    if let Ok(size) = event.value().parse::<u64>() {
                        pagination.set(current.resize(size));
                    }
                },
                {sizes.into_iter().map(|size| rsx!(
                    option {
                        key: "{size}",
                        value: "{size}",
                        selected: size == current.page_size,
                        "Show {size}"
                    }
                ))}
            }
        }
    }
}
