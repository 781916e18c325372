pub mod button;
pub mod instructions;
pub mod notices;
pub mod pagination;
pub mod uploader;
pub mod viewer;
