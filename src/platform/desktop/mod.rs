pub mod blocking;
pub mod paths;
