//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started {
                strategy,
                candidates,
            } => {
                info!(strategy = %strategy, candidates, "Starting component generation");
            }
            ProgressEvent::ServiceStarted { class } => {
                debug!(class = %class, "Assembling service");
            }
            ProgressEvent::ServiceSkipped { class } => {
                debug!(class = %class, "Service skipped by strategy");
            }
            ProgressEvent::ServiceComplete {
                service,
                operations,
                config_params,
            } => {
                info!(
                    service = %service,
                    operations,
                    config_params,
                    "Service complete"
                );
            }
            ProgressEvent::Warning { message } => {
                debug!(message = %message, "Metadata warning recorded");
            }
            ProgressEvent::Completed {
                services,
                warnings,
                total_time,
            } => {
                if *warnings > 0 {
                    info!(
                        services,
                        warnings,
                        total_time_ms = total_time.as_millis(),
                        "Generation complete with warnings"
                    );
                } else {
                    info!(
                        services,
                        total_time_ms = total_time.as_millis(),
                        "Generation complete"
                    );
                }
            }
            ProgressEvent::Failed { error } => {
                warn!(error = %error, "Generation failed");
            }
        }
    }
}
