use dioxus::logger::tracing::debug;

/// Column type vocabulary shared with the backend, in inference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Bool,
    Category,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Complex128,
    TimeDelta,
    DateTime,
    Object,
}

impl DataType {
    pub const ALL: [DataType; 12] = [
        DataType::Bool,
        DataType::Category,
        DataType::Int8,
        DataType::Int16,
        DataType::Int32,
        DataType::Int64,
        DataType::Float32,
        DataType::Float64,
        DataType::Complex128,
        DataType::TimeDelta,
        DataType::DateTime,
        DataType::Object,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            DataType::Bool => "bool",
            DataType::Category => "category",
            DataType::Int8 => "int8",
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
            DataType::Complex128 => "complex128",
            DataType::TimeDelta => "timedelta64[ns]",
            DataType::DateTime => "datetime64[ns]",
            DataType::Object => "object",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DataType::Bool => "Boolean",
            DataType::Category => "Category",
            DataType::Int8 => "Int8",
            DataType::Int16 => "Int16",
            DataType::Int32 => "Int32",
            DataType::Int64 => "Int64",
            DataType::Float32 => "Float32",
            DataType::Float64 => "Float64",
            DataType::Complex128 => "Complex",
            DataType::TimeDelta => "Time Interval",
            DataType::DateTime => "Date",
            DataType::Object => "Text",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        DataType::ALL.into_iter().find(|data_type| data_type.tag() == tag)
    }
}

/// Display label for a backend type tag. Unknown tags are shown raw: the
/// backend owns the vocabulary, so an unknown tag is a version mismatch.
pub fn label_for(tag: &str) -> String {
    match DataType::from_tag(tag) {
        Some(data_type) => data_type.label().to_string(),
        None => {
            debug!(tag, "no label registered for column type");
            tag.to_string()
        }
    }
}

pub fn supported_tags() -> Vec<String> {
    DataType::ALL
        .into_iter()
        .map(|data_type| data_type.tag().to_string())
        .collect()
}
