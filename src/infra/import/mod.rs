pub mod csv;
pub mod xlsx;

/// Parsed sheet: header names plus raw cell text, `None` for empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl TabularData {
    /// Column-major view of one column's raw values.
    pub fn column_values(&self, col_idx: usize) -> Vec<Option<String>> {
        self.rows
            .iter()
            .map(|row| row.get(col_idx).cloned().flatten())
            .collect()
    }
}

/// Blank headers become `Unnamed: {idx}`; repeats get `.1`, `.2`, ... suffixes.
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut headers: Vec<String> = Vec::new();
    for (idx, name) in raw.into_iter().enumerate() {
        let name = name.as_ref().trim();
        let base = if name.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            name.to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while headers.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        headers.push(candidate);
    }
    headers
}

/// Pads or truncates a record to the header width.
pub fn fit_row(mut row: Vec<Option<String>>, width: usize) -> Vec<Option<String>> {
    row.resize(width, None);
    row
}
