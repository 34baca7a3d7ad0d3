//! Failure reporting for runtime callbacks.

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

use super::request::RuntimeEvent;

/// How a callback failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    /// The callback's future resolved to `Err`.
    Error,
    /// The callback panicked, either when called or while polled.
    Panic,
}

/// A callback failure absorbed by the bridge.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{event} callback failed ({kind}): {message}")]
pub struct CallbackFailure {
    pub event: RuntimeEvent,
    pub kind: FailureKind,
    pub agent_id: String,
    pub session_id: String,
    pub message: String,
}

/// Sink for callback failures. Must not panic.
pub trait BridgeLogger: Send + Sync {
    fn error(&self, failure: &CallbackFailure);
}

impl<F> BridgeLogger for F
where
    F: Fn(&CallbackFailure) + Send + Sync,
{
    fn error(&self, failure: &CallbackFailure) {
        self(failure)
    }
}

/// Default logger: one `tracing` error event per failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl BridgeLogger for TracingLogger {
    fn error(&self, failure: &CallbackFailure) {
        tracing::error!(
            event = %failure.event,
            kind = %failure.kind,
            agent_id = %failure.agent_id,
            session_id = %failure.session_id,
            error = %failure.message,
            "runtime callback failed"
        );
    }
}
