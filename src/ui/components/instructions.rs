use dioxus::prelude::*;

#[component]
pub fn Instructions() -> Element {
    rsx! {
        div {
            h1 { style: "font-size: 20px; font-weight: bold; margin: 0;", "Sheet Viewer" }
            p {
                style: "padding: 16px 0; font-size: 14px;",
                "Sheet Viewer loads a spreadsheet into the data service, which infers a type for every column. "
                "You can browse the rows page by page and override any inferred type."
            }
            h2 { style: "font-size: 16px; font-weight: bold; margin: 0;", "Instructions:" }
            ul {
                style: "padding: 16px 0; font-size: 14px; list-style: none; margin: 0;",
                li { "- Upload a file (CSV/Excel format)." }
                li { "- View the data." }
                li { "- Modify the automatically detected types as needed" }
            }
        }
    }
}
