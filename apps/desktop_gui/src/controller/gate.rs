//! Render gating: merges the outcomes of the two bootstrap tasks into a
//! single decision about what the app may draw.
//!
//! The liveness probe and the store initialization run concurrently and
//! finish in either order. Each owns one [`TaskState`] slot; the slot settles
//! exactly once and never reopens, so `Degraded` and `Ready` are terminal
//! for the run. The decision itself is never stored: it is derived from the
//! two slots on every read, and the derivation only looks at the pair of
//! outcomes, never at their arrival order.

use std::sync::Arc;

use store_core::AppStore;

use crate::controller::events::BootstrapEvent;

/// Lifecycle of one bootstrap task: pending until its completion event is
/// applied, then failed with a user-facing message or complete with its
/// result.
#[derive(Debug)]
enum TaskState<T> {
    Pending,
    Failed(String),
    Complete(T),
}

impl<T> TaskState<T> {
    fn settle(&mut self, outcome: Result<T, String>) {
        // A slot settles once; late or duplicate events are no-ops.
        if !matches!(self, Self::Pending) {
            return;
        }
        *self = match outcome {
            Ok(value) => Self::Complete(value),
            Err(message) => Self::Failed(message),
        };
    }
}

/// What the app shell is allowed to render right now.
#[derive(Clone)]
pub enum RenderDecision {
    Loading,
    Error(String),
    Ready(Arc<AppStore>),
}

pub struct BootstrapGate {
    liveness: TaskState<()>,
    store_init: TaskState<Arc<AppStore>>,
}

impl BootstrapGate {
    pub fn new() -> Self {
        Self {
            liveness: TaskState::Pending,
            store_init: TaskState::Pending,
        }
    }

    pub fn apply(&mut self, event: BootstrapEvent) {
        match event {
            BootstrapEvent::LivenessPassed => self.liveness.settle(Ok(())),
            BootstrapEvent::LivenessFailed(message) => self.liveness.settle(Err(message)),
            BootstrapEvent::StoreReady(store) => self.store_init.settle(Ok(store)),
            BootstrapEvent::StoreFailed(message) => self.store_init.settle(Err(message)),
        }
    }

    /// A failure dominates a pending or successful peer: a fatal condition
    /// must not be masked by the other task still loading. Ready requires
    /// both tasks settled clean. When both failed, the liveness message wins
    /// so the outcome is independent of arrival order.
    pub fn decision(&self) -> RenderDecision {
        match (&self.liveness, &self.store_init) {
            (TaskState::Failed(message), _) => RenderDecision::Error(message.clone()),
            (_, TaskState::Failed(message)) => RenderDecision::Error(message.clone()),
            (TaskState::Complete(()), TaskState::Complete(store)) => {
                RenderDecision::Ready(Arc::clone(store))
            }
            _ => RenderDecision::Loading,
        }
    }
}
