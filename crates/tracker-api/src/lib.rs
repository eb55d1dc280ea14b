//! JSON REST API for the course progress tracker.
//!
//! Exposes an axum [`Router`] backed by any
//! [`tracker_core::store::ProgressStore`]. Reads are public; writes require a
//! session and pass through [`tracker_core::ops`]. TLS and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tracker_api::api_router(state))
//! ```

pub mod auth;
pub mod error;
pub mod exams;
pub mod login;
pub mod modules;
pub mod progress;
pub mod status;
pub mod students;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use tracker_core::store::ProgressStore;

pub use error::ApiError;

use auth::AuthConfig;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct AppState<S: ProgressStore> {
  pub store: Arc<S>,
  pub auth:  Arc<AuthConfig>,
}

impl<S: ProgressStore> AppState<S> {
  pub fn new(store: S, auth: AuthConfig) -> Self {
    Self { store: Arc::new(store), auth: Arc::new(auth) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: ProgressStore + Clone + 'static,
{
  Router::new()
    // Sessions
    .route("/auth/login", post(login::handler::<S>))
    .route("/auth/logout", post(login::logout))
    // Students
    .route("/students", get(students::list::<S>).post(students::create::<S>))
    // Modules
    .route("/modules", get(modules::list::<S>))
    // Progress
    .route("/progress", get(progress::list::<S>).post(progress::update::<S>))
    // Exams
    .route("/exams", get(exams::list::<S>).post(exams::create::<S>))
    // Diagnostics
    .route("/status", get(status::handler::<S>))
    .with_state(state)
}
