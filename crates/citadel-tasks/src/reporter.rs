//! Dispatch progress reporting

use std::sync::Mutex;
use std::time::Duration;

/// Events emitted while dispatching test commands
#[derive(Debug, Clone)]
pub enum DispatchEvent {
    /// A command is about to be launched
    Started { key: String, command: String },
    /// A command exited
    Finished {
        key: String,
        exit_code: Option<i32>,
        duration: Duration,
    },
    /// A command could not be started
    SpawnFailed {
        key: String,
        command: String,
        error: String,
    },
}

/// Trait for reporting dispatch progress
pub trait DispatchReporter: Send + Sync {
    /// Handle a dispatch event
    fn report(&self, event: &DispatchEvent);
}

/// Simple reporter that logs to tracing
#[derive(Debug, Default)]
pub struct TracingReporter;

impl DispatchReporter for TracingReporter {
    fn report(&self, event: &DispatchEvent) {
        match event {
            DispatchEvent::Started { key, command } => {
                tracing::info!("Running {} tests: {}", key, command);
            }
            DispatchEvent::Finished {
                key,
                exit_code: Some(0),
                duration,
            } => {
                tracing::info!("{} tests exited in {:.1}s", key, duration.as_secs_f64());
            }
            DispatchEvent::Finished {
                key,
                exit_code,
                duration,
            } => {
                let code = exit_code.map_or_else(|| "signal".to_string(), |c| c.to_string());
                tracing::warn!(
                    "{} tests exited with {} after {:.1}s",
                    key,
                    code,
                    duration.as_secs_f64()
                );
            }
            DispatchEvent::SpawnFailed {
                key,
                command,
                error,
            } => {
                tracing::error!("Failed to start {} tests ({}): {}", key, command, error);
            }
        }
    }
}

/// Reporter that collects events for later inspection (useful for testing)
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: Mutex<Vec<DispatchEvent>>,
}

impl CollectingReporter {
    /// Get all collected events
    pub fn events(&self) -> Vec<DispatchEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl DispatchReporter for CollectingReporter {
    fn report(&self, event: &DispatchEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
