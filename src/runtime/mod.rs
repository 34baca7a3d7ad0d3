//! Runtime callback bridge: isolates the execution core from observer code.

pub mod bridge;
pub mod logger;
pub mod request;

pub use bridge::{create_execution_runtime_callback_bridge, RuntimeCallbackBridge};
pub use logger::{BridgeLogger, CallbackFailure, FailureKind, TracingLogger};
pub use request::{
    AgentEventFn, AgentEventPayload, CallbackFuture, ExecutionRequest, NotifyFn,
    ReasoningStreamFn, ReasoningStreamPayload, RuntimeCallbacks, RuntimeEvent, ToolResultFn,
    ToolResultPayload,
};
