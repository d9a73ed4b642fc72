//! # Tessera Core Event System Errors
//!
//! Defines error types specific to the Tessera event core.
//!
//! [`EventSystemError`] covers the failures that surface to the caller of the
//! factory or the dispatcher: unusable event registrations, inbound requests
//! that do not carry an event, handlers that fail while running and queue
//! operations without a page. [`WireError`] is the parameter scanner's error;
//! the factory consumes it while walking its fallback chain.
use thiserror::Error;

/// Boxed error returned by user-supplied handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum EventSystemError {
    #[error("Configuration error for event type '{event_type}': {reason}")]
    Configuration {
        event_type: String,
        reason: String,
    },

    #[error("Invalid event request: {reason}")]
    InvalidRequest {
        reason: String,
    },

    #[error("Handler '{handler}' failed while handling event '{event_type}': {source}")]
    HandlerInvocationFailure {
        handler: String,
        event_type: String,
        #[source]
        source: BoxError,
    },

    #[error("Event queue operation '{operation}' failed: {reason}")]
    QueueOperationFailed {
        operation: String, // e.g., "post", "enqueue"
        reason: String,
    },
}

impl EventSystemError {
    pub fn configuration(event_type: impl Into<String>, reason: impl Into<String>) -> Self {
        EventSystemError::Configuration {
            event_type: event_type.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_request(reason: impl Into<String>) -> Self {
        EventSystemError::InvalidRequest { reason: reason.into() }
    }
}

/// Failure to populate an event's declared fields from a request payload.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("Required field '{field}' is missing")]
    MissingField { field: String },

    #[error("Field '{field}' has an unexpected value: {source}")]
    InvalidField {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Event type '{event_type}' has no default constructor")]
    NoDefaultConstructor { event_type: String },

    #[error("Descriptor for '{expected}' cannot wire an instance of another type")]
    TypeMismatch { expected: String },
}
