pub mod ports;
pub mod query_cache;
pub mod services;
