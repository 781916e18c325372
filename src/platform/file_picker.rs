use rfd::AsyncFileDialog;

use crate::domain::entities::upload::FileDescriptor;

/// Opens the native (or browser) file picker. `None` when the user dismisses it.
pub async fn pick_spreadsheet() -> Option<FileDescriptor> {
    let handle = AsyncFileDialog::new()
        .add_filter("Spreadsheets", &["csv", "xls", "xlsx"])
        .add_filter("All files", &["*"])
        .pick_file()
        .await?;
    let bytes = handle.read().await;
    Some(FileDescriptor::from_name(handle.file_name(), bytes))
}
