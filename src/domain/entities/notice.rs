/// The three user-facing signal kinds. All are non-blocking toasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Validation,
    Transport,
    Mismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn invalid_file() -> Self {
        Self::new(
            NoticeKind::Validation,
            "Please select a valid CSV or Excel file.",
        )
    }

    pub fn request_failed(message: impl std::fmt::Display) -> Self {
        Self::new(NoticeKind::Transport, format!("An error occurred: {message}"))
    }

    pub fn type_not_applied(requested: &str) -> Self {
        Self::new(
            NoticeKind::Mismatch,
            format!("The column could not be converted to type: {requested}"),
        )
    }

    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            id: 0,
            kind,
            message: message.into(),
        }
    }
}

/// Ordered toast queue; ids are assigned on push so dismissal is unambiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeBoard {
    next_id: u64,
    items: Vec<Notice>,
}

impl NoticeBoard {
    pub fn push(&mut self, mut notice: Notice) -> u64 {
        self.next_id += 1;
        notice.id = self.next_id;
        self.items.push(notice);
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|notice| notice.id != id);
    }

    pub fn items(&self) -> &[Notice] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
