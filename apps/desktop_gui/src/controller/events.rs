//! Completion events posted by the bootstrap worker to the UI thread.

use std::fmt;
use std::sync::Arc;

use store_core::AppStore;

/// Fixed user-facing message for a failed liveness probe. The underlying
/// cause goes to the log, not the screen.
pub const SERVER_DOWN_MESSAGE: &str = "Server is down. Please try again later.";

/// Each bootstrap task posts exactly one of these per run; the gate ignores
/// anything arriving after a task has settled.
pub enum BootstrapEvent {
    LivenessPassed,
    LivenessFailed(String),
    StoreReady(Arc<AppStore>),
    StoreFailed(String),
}

/// User-facing rendering of a store-initialization failure, wrapping the
/// underlying failure's message.
pub fn format_store_failure(err: &dyn fmt::Display) -> String {
    format!("Error initializing the app: {err}")
}
