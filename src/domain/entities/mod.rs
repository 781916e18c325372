pub mod data_type;
pub mod dataset;
pub mod notice;
pub mod pagination;
pub mod upload;
