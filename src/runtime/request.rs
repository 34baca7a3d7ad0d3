//! Execution request and the optional observer callbacks it carries.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CallbackError;

/// Future returned by every runtime callback.
pub type CallbackFuture = BoxFuture<'static, Result<(), CallbackError>>;

/// Callback for events without a payload.
pub type NotifyFn = Arc<dyn Fn() -> CallbackFuture + Send + Sync>;

/// Callback receiving streamed reasoning text.
pub type ReasoningStreamFn = Arc<dyn Fn(ReasoningStreamPayload) -> CallbackFuture + Send + Sync>;

/// Callback receiving a tool result summary.
pub type ToolResultFn = Arc<dyn Fn(ToolResultPayload) -> CallbackFuture + Send + Sync>;

/// Callback receiving a generic agent event.
pub type AgentEventFn = Arc<dyn Fn(AgentEventPayload) -> CallbackFuture + Send + Sync>;

/// Events a caller can observe during an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RuntimeEvent {
    AssistantMessageStart,
    ReasoningStream,
    ToolResult,
    BlockReplyFlush,
    AgentEvent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReasoningStreamPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResultPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media_urls: Vec<String>,
}

/// Stream-tagged event, e.g. `{ stream: "lifecycle", data: { phase: "..." } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentEventPayload {
    pub stream: String,
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl AgentEventPayload {
    pub fn new(stream: impl Into<String>, data: serde_json::Value) -> Self {
        let data = match data {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        Self {
            stream: stream.into(),
            data,
        }
    }
}

/// Optional observers, at most one per event.
#[derive(Clone, Default)]
pub struct RuntimeCallbacks {
    pub on_assistant_message_start: Option<NotifyFn>,
    pub on_block_reply_flush: Option<NotifyFn>,
    pub on_reasoning_stream: Option<ReasoningStreamFn>,
    pub on_tool_result: Option<ToolResultFn>,
    pub on_agent_event: Option<AgentEventFn>,
}

impl RuntimeCallbacks {
    /// Whether a callback is installed for `event`.
    pub fn has(&self, event: RuntimeEvent) -> bool {
        match event {
            RuntimeEvent::AssistantMessageStart => self.on_assistant_message_start.is_some(),
            RuntimeEvent::ReasoningStream => self.on_reasoning_stream.is_some(),
            RuntimeEvent::ToolResult => self.on_tool_result.is_some(),
            RuntimeEvent::BlockReplyFlush => self.on_block_reply_flush.is_some(),
            RuntimeEvent::AgentEvent => self.on_agent_event.is_some(),
        }
    }
}

impl fmt::Debug for RuntimeCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |present: bool| if present { "Some(..)" } else { "None" };
        f.debug_struct("RuntimeCallbacks")
            .field("on_assistant_message_start", &mark(self.on_assistant_message_start.is_some()))
            .field("on_block_reply_flush", &mark(self.on_block_reply_flush.is_some()))
            .field("on_reasoning_stream", &mark(self.on_reasoning_stream.is_some()))
            .field("on_tool_result", &mark(self.on_tool_result.is_some()))
            .field("on_agent_event", &mark(self.on_agent_event.is_some()))
            .finish()
    }
}

/// One agent execution as seen by the callback bridge.
///
/// Only `callbacks` is read by the bridge; the context fields are carried for
/// log correlation.
#[derive(Debug, Clone, Default)]
pub struct ExecutionRequest {
    pub agent_id: String,
    pub session_id: String,
    pub workspace_dir: PathBuf,
    pub prompt: String,
    pub callbacks: RuntimeCallbacks,
}

impl ExecutionRequest {
    pub fn new(
        agent_id: impl Into<String>,
        session_id: impl Into<String>,
        workspace_dir: impl Into<PathBuf>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            session_id: session_id.into(),
            workspace_dir: workspace_dir.into(),
            prompt: prompt.into(),
            callbacks: RuntimeCallbacks::default(),
        }
    }

    pub fn with_on_assistant_message_start<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        self.callbacks.on_assistant_message_start = Some(notify_fn(f));
        self
    }

    pub fn with_on_block_reply_flush<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        self.callbacks.on_block_reply_flush = Some(notify_fn(f));
        self
    }

    pub fn with_on_reasoning_stream<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(ReasoningStreamPayload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        let callback: ReasoningStreamFn = Arc::new(move |payload: ReasoningStreamPayload| -> CallbackFuture {
            Box::pin(f(payload))
        });
        self.callbacks.on_reasoning_stream = Some(callback);
        self
    }

    pub fn with_on_tool_result<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(ToolResultPayload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        let callback: ToolResultFn = Arc::new(move |payload: ToolResultPayload| -> CallbackFuture {
            Box::pin(f(payload))
        });
        self.callbacks.on_tool_result = Some(callback);
        self
    }

    pub fn with_on_agent_event<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(AgentEventPayload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        let callback: AgentEventFn = Arc::new(move |payload: AgentEventPayload| -> CallbackFuture {
            Box::pin(f(payload))
        });
        self.callbacks.on_agent_event = Some(callback);
        self
    }
}

fn notify_fn<F, Fut>(f: F) -> NotifyFn
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
{
    Arc::new(move || -> CallbackFuture { Box::pin(f()) })
}
