use crate::domain::entities::data_type::label_for;
use crate::domain::entities::dataset::{CellValue, Column, ColumnId, SheetPage};
use crate::domain::entities::pagination::Pagination;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeOption {
    pub tag: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub column_id: ColumnId,
    pub name: String,
    pub options: Vec<TypeOption>,
}

impl HeaderCell {
    pub fn selected_tag(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.selected)
            .map(|option| option.tag.as_str())
    }

    /// Identity of the type selector; changes with the server type and with
    /// every settled update, so the control never keeps a rejected choice.
    pub fn selector_key(&self, revision: u64) -> String {
        format!(
            "{}-{}-{revision}",
            self.column_id,
            self.selected_tag().unwrap_or_default()
        )
    }
}

/// One header per server column. A column whose current tag is missing from
/// the supported list still gets it as an option so the selector shows it.
pub fn header_cells(columns: &[Column], supported: &[String]) -> Vec<HeaderCell> {
    columns
        .iter()
        .map(|column| {
            let mut options: Vec<TypeOption> = supported
                .iter()
                .map(|tag| TypeOption {
                    tag: tag.clone(),
                    label: label_for(tag),
                    selected: *tag == column.data_type,
                })
                .collect();
            if !options.iter().any(|option| option.selected) {
                options.push(TypeOption {
                    tag: column.data_type.clone(),
                    label: label_for(&column.data_type),
                    selected: true,
                });
            }
            HeaderCell {
                column_id: column.id.clone(),
                name: column.name.clone(),
                options,
            }
        })
        .collect()
}

pub fn render_cell(value: Option<&CellValue>) -> String {
    value.map(CellValue::display).unwrap_or_default()
}

/// Row-major display text, ordered by the page's columns.
pub fn body_rows(page: &SheetPage) -> Vec<Vec<String>> {
    page.rows
        .iter()
        .map(|row| {
            page.columns
                .iter()
                .map(|column| render_cell(row.get(&column.name)))
                .collect()
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    pub can_first: bool,
    pub can_previous: bool,
    pub can_next: bool,
    pub can_last: bool,
    pub readout: String,
}

impl PaginationControls {
    pub fn new(pagination: Pagination, number_of_records: u64) -> Self {
        let can_previous = pagination.can_previous();
        let can_next = pagination.can_next(number_of_records);
        let page_count = pagination.page_count(number_of_records).max(1);
        Self {
            can_first: can_previous,
            can_previous,
            can_next,
            can_last: can_next,
            readout: format!("Page {} of {}", pagination.page_index + 1, page_count),
        }
    }
}

pub fn row_count_text(number_of_records: u64) -> String {
    format!("Contains {number_of_records} rows")
}
