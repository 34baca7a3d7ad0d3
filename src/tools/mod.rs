//! Tool-call validation.

pub mod types;
pub mod validation;

pub use types::{Issue, IssueKind, ToolCallRequest, ValidationResult};
pub use validation::{validate_tool_call, ToolCallValidator};
