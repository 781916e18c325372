use dioxus::prelude::*;

const BUTTON_STYLE: &str = "border: 1px solid #bbb; background: #fff; padding: 4px 10px; margin: 0 4px; border-radius: 6px; cursor: pointer;";
const DISABLED_STYLE: &str = "border: 1px solid #ddd; background: #f4f4f4; color: #999; padding: 4px 10px; margin: 0 4px; border-radius: 6px; cursor: not-allowed;";

#[component]
pub fn Button(
    #[props(default)] disabled: bool,
    onclick: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    let style = if disabled { DISABLED_STYLE } else { BUTTON_STYLE };

    rsx! {
        button {
            style: "{style}",
            disabled: disabled,
            onclick: move |event| onclick.call(event),
            {children}
        }
    }
}
