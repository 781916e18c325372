pub mod components;
pub mod state;
pub mod view_model;
