//! Server wiring for the course progress tracker: configuration and the
//! runtime choice of storage engine.

pub mod backend;
pub mod settings;

pub use backend::Backend;
pub use settings::{ServerConfig, StorageEngine};
