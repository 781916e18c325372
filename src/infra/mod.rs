pub mod http;
#[cfg(feature = "local")]
pub mod import;
#[cfg(feature = "local")]
pub mod inference;
#[cfg(feature = "local")]
pub mod sqlite;
