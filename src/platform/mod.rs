#[cfg(feature = "local")]
pub mod desktop;
pub mod file_picker;
