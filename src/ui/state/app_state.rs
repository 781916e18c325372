use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::dataset::{DatasetDescriptor, DatasetId};
use crate::domain::entities::notice::{Notice, NoticeBoard};
use crate::domain::entities::upload::{is_acceptable, FileDescriptor};

/// Which dataset, if any, the viewer shows. There is no way back to `Empty`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RootState {
    #[default]
    Empty,
    Loaded(DatasetId),
}

impl RootState {
    /// A later upload replaces the current dataset.
    pub fn on_dataset_created(&mut self, descriptor: &DatasetDescriptor) {
        *self = RootState::Loaded(descriptor.id.clone());
    }

    pub fn dataset_id(&self) -> Option<&DatasetId> {
        match self {
            RootState::Empty => None,
            RootState::Loaded(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploaderState {
    pub selected: Option<FileDescriptor>,
    pub busy: bool,
}

impl UploaderState {
    /// `None` means the picker was dismissed and nothing changes. A rejected
    /// file clears the selection and yields the notice to show.
    pub fn select(&mut self, picked: Option<FileDescriptor>) -> Option<Notice> {
        let file = picked?;
        if is_acceptable(&file) {
            self.selected = Some(file);
            None
        } else {
            self.selected = None;
            Some(Notice::invalid_file())
        }
    }

    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.busy
    }

    pub fn submission(&self) -> Option<FileDescriptor> {
        if self.can_submit() {
            self.selected.clone()
        } else {
            None
        }
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_ref().map(|file| file.name.as_str())
    }
}

pub struct AppState {
    pub root: Signal<RootState>,
    pub notices: Signal<NoticeBoard>,
}

impl AppState {
    pub fn new(initial: RootState) -> Self {
        Self {
            root: use_signal(move || initial),
            notices: use_signal(NoticeBoard::default),
        }
    }
}
