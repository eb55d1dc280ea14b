//! PostgreSQL engine for the progress tracker.
//!
//! Selected when a connection string is configured. Produces the same logical
//! results as `tracker-store-sqlite` for the same data: names sort in byte
//! order (`COLLATE "C"`) and timestamps are stamped in Rust at microsecond
//! precision rather than by the database clock.

mod rows;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::PgStore;

#[cfg(test)]
mod tests;
