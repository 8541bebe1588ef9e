//! Progress handler trait and events

use std::time::Duration;

/// Events emitted while a component is assembled
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Generation started
    Started { strategy: String, candidates: usize },

    /// A class was accepted as a service
    ServiceStarted { class: String },

    /// The strategy declined to populate an accepted class
    ServiceSkipped { class: String },

    /// Service assembled
    ServiceComplete {
        service: String,
        operations: usize,
        config_params: usize,
    },

    /// Non-fatal metadata problem
    Warning { message: String },

    /// Generation completed successfully
    Completed {
        services: usize,
        warnings: usize,
        total_time: Duration,
    },

    /// Generation failed
    Failed { error: String },
}

/// Trait for handling progress events during generation
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}
