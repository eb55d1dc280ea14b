//! Core types and trait definitions for the course progress tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage engines implement [`store::ProgressStore`]; the HTTP layer decodes
//! sessions with [`session::SessionIdentity`] and calls into [`ops`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod access_code;
pub mod curriculum;
pub mod error;
pub mod model;
pub mod ops;
pub mod progress;
pub mod session;
pub mod store;
pub mod validate;

pub use error::{Error, Result, ValidationError};
