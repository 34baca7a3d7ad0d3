//! Fault-isolating bridge between the execution core and caller callbacks.
//!
//! Every dispatch method resolves to `()` whatever the callback does. Errors
//! and panics are caught, reported once to the [`BridgeLogger`], and dropped.
//! Dispatches share no mutable state, so concurrent calls interleave freely.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use super::logger::{BridgeLogger, CallbackFailure, FailureKind, TracingLogger};
use super::request::{
    AgentEventPayload, CallbackFuture, ExecutionRequest, ReasoningStreamPayload, RuntimeCallbacks,
    RuntimeEvent, ToolResultPayload,
};

/// Dispatch surface handed to the execution core for one request.
#[derive(Clone)]
pub struct RuntimeCallbackBridge {
    callbacks: RuntimeCallbacks,
    agent_id: String,
    session_id: String,
    logger: Arc<dyn BridgeLogger>,
}

/// Build a bridge over `request`'s callbacks, reporting failures to `logger`.
pub fn create_execution_runtime_callback_bridge(
    request: &ExecutionRequest,
    logger: Arc<dyn BridgeLogger>,
) -> RuntimeCallbackBridge {
    RuntimeCallbackBridge::new(request, logger)
}

impl RuntimeCallbackBridge {
    pub fn new(request: &ExecutionRequest, logger: Arc<dyn BridgeLogger>) -> Self {
        Self {
            callbacks: request.callbacks.clone(),
            agent_id: request.agent_id.clone(),
            session_id: request.session_id.clone(),
            logger,
        }
    }

    /// Bridge that reports failures through `tracing`.
    pub fn with_tracing(request: &ExecutionRequest) -> Self {
        Self::new(request, Arc::new(TracingLogger))
    }

    pub async fn on_assistant_message_start(&self) {
        let callback = self.callbacks.on_assistant_message_start.as_ref();
        self.dispatch(RuntimeEvent::AssistantMessageStart, callback.map(|cb| move || cb()))
            .await;
    }

    pub async fn on_block_reply_flush(&self) {
        let callback = self.callbacks.on_block_reply_flush.as_ref();
        self.dispatch(RuntimeEvent::BlockReplyFlush, callback.map(|cb| move || cb()))
            .await;
    }

    pub async fn on_reasoning_stream(&self, payload: ReasoningStreamPayload) {
        let callback = self.callbacks.on_reasoning_stream.as_ref();
        self.dispatch(RuntimeEvent::ReasoningStream, callback.map(|cb| move || cb(payload)))
            .await;
    }

    pub async fn on_tool_result(&self, payload: ToolResultPayload) {
        let callback = self.callbacks.on_tool_result.as_ref();
        self.dispatch(RuntimeEvent::ToolResult, callback.map(|cb| move || cb(payload)))
            .await;
    }

    pub async fn on_agent_event(&self, payload: AgentEventPayload) {
        let callback = self.callbacks.on_agent_event.as_ref();
        self.dispatch(RuntimeEvent::AgentEvent, callback.map(|cb| move || cb(payload)))
            .await;
    }

    async fn dispatch<F>(&self, event: RuntimeEvent, invoke: Option<F>)
    where
        F: FnOnce() -> CallbackFuture,
    {
        let Some(invoke) = invoke else {
            return;
        };
        tracing::trace!(
            event = %event,
            session_id = %self.session_id,
            "dispatching runtime callback"
        );

        let outcome = match std::panic::catch_unwind(AssertUnwindSafe(invoke)) {
            Ok(future) => AssertUnwindSafe(future).catch_unwind().await,
            Err(panic) => Err(panic),
        };
        let (kind, message) = match outcome {
            Ok(Ok(())) => return,
            Ok(Err(error)) => (FailureKind::Error, error.to_string()),
            Err(panic) => (FailureKind::Panic, panic_message(panic.as_ref())),
        };

        let failure = CallbackFailure {
            event,
            kind,
            agent_id: self.agent_id.clone(),
            session_id: self.session_id.clone(),
            message,
        };
        // A panicking logger must not escape either.
        let logger = &self.logger;
        if std::panic::catch_unwind(AssertUnwindSafe(|| logger.error(&failure))).is_err() {
            tracing::error!(
                event = %event,
                "bridge logger panicked while reporting a callback failure"
            );
        }
    }
}

impl std::fmt::Debug for RuntimeCallbackBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeCallbackBridge")
            .field("callbacks", &self.callbacks)
            .field("agent_id", &self.agent_id)
            .field("session_id", &self.session_id)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "callback panicked".to_string()
    }
}
