//! Convenience re-exports for common use.

pub use crate::config::GuardConfig;
pub use crate::error::{CallbackError, GuardError, Result};
pub use crate::runtime::{
    create_execution_runtime_callback_bridge, AgentEventPayload, BridgeLogger, CallbackFailure,
    ExecutionRequest, ReasoningStreamPayload, RuntimeCallbackBridge, RuntimeEvent,
    ToolResultPayload, TracingLogger,
};
pub use crate::tools::{
    validate_tool_call, Issue, IssueKind, ToolCallRequest, ToolCallValidator, ValidationResult,
};
pub use crate::util::distance::levenshtein;
