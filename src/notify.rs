//! Change notification contracts.

use serde::Serialize;

use crate::core::selection::{SelectionSnapshot, UpdateOrigin};

/// Payload delivered to sinks whenever an applied update changes the
/// selection, including the one-time initial emission at construction.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEvent {
    pub origin: UpdateOrigin,
    pub selection: SelectionSnapshot,
    pub classes: Vec<String>,
}

/// Sink for picker change events.
pub trait ChangeSink: Send + Sync {
    fn dispatch(&self, event: &ChangeEvent);
}

impl<S: ChangeSink + ?Sized> ChangeSink for std::sync::Arc<S> {
    fn dispatch(&self, event: &ChangeEvent) {
        (**self).dispatch(event);
    }
}
