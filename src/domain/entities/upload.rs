pub const CSV_MEDIA_TYPE: &str = "text/csv";
pub const XLS_MEDIA_TYPE: &str = "application/vnd.ms-excel";
pub const XLSX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const ACCEPTED_MEDIA_TYPES: [&str; 3] = [CSV_MEDIA_TYPE, XLS_MEDIA_TYPE, XLSX_MEDIA_TYPE];

/// A file picked by the user, with the media type it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub name: String,
    pub media_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileDescriptor {
    /// Builds a descriptor whose media type is declared from the file extension.
    pub fn from_name(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let media_type = media_type_for_name(&name).map(str::to_string);
        Self {
            name,
            media_type,
            bytes,
        }
    }
}

pub fn media_type_for_name(name: &str) -> Option<&'static str> {
    let (_, extension) = name.rsplit_once('.')?;
    match extension.to_ascii_lowercase().as_str() {
        "csv" => Some(CSV_MEDIA_TYPE),
        "xls" => Some(XLS_MEDIA_TYPE),
        "xlsx" => Some(XLSX_MEDIA_TYPE),
        _ => None,
    }
}

/// Declared-media-type check only; a mislabeled file passes.
pub fn is_acceptable(file: &FileDescriptor) -> bool {
    file.media_type
        .as_deref()
        .is_some_and(|media_type| ACCEPTED_MEDIA_TYPES.contains(&media_type))
}
