//! Validation event sink
//!
//! Handlers report what happened to each submission through an
//! [`EventSink`] held in the application state. The server wires in
//! [`TracingSink`]; tests use [`MemorySink`] to assert on the emitted events.

use std::sync::Mutex;

use validator_shared::FieldErrors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationEvent {
    /// Emitted for every decoded submission, before the ruleset runs
    Attempted {
        email: String,
        first_name: String,
        last_name: String,
    },
    Accepted {
        email: String,
    },
    Rejected {
        errors: FieldErrors,
    },
    /// The body never reached the ruleset
    MalformedBody {
        reason: String,
    },
    Failed {
        error: String,
    },
}

pub trait EventSink: Send + Sync {
    fn record(&self, event: ValidationEvent);
}

/// Writes events as structured `tracing` records
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: ValidationEvent) {
        match event {
            ValidationEvent::Attempted {
                email,
                first_name,
                last_name,
            } => {
                tracing::info!(
                    %email,
                    %first_name,
                    %last_name,
                    "POST /validate - Email: {}, First name: {}, Last name: {}",
                    email,
                    first_name,
                    last_name
                );
            }
            ValidationEvent::Accepted { email } => {
                tracing::info!(%email, "Validation succeeded for: {}", email);
            }
            ValidationEvent::Rejected { errors } => {
                tracing::warn!(
                    error_count = errors.len(),
                    "Validation error: {}",
                    errors
                );
            }
            ValidationEvent::MalformedBody { reason } => {
                tracing::warn!(%reason, "Malformed request body");
            }
            ValidationEvent::Failed { error } => {
                tracing::error!(%error, "Unexpected error in /validate: {}", error);
            }
        }
    }
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ValidationEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ValidationEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: ValidationEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemorySink::new();
        sink.record(ValidationEvent::Accepted {
            email: "a@example.com".into(),
        });
        sink.record(ValidationEvent::Failed {
            error: "boom".into(),
        });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ValidationEvent::Accepted { .. }));
        assert!(matches!(events[1], ValidationEvent::Failed { .. }));
    }

    #[test]
    fn test_tracing_sink_accepts_every_event() {
        let sink = TracingSink;
        let mut errors = FieldErrors::new();
        errors.insert("email", "Invalid email format");
        sink.record(ValidationEvent::Attempted {
            email: "x".into(),
            first_name: "y".into(),
            last_name: "z".into(),
        });
        sink.record(ValidationEvent::Rejected { errors });
        sink.record(ValidationEvent::MalformedBody {
            reason: "JSON syntax error".into(),
        });
    }
}
