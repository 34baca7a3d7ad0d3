//! callguard — boundary safety for LLM tool execution.
//!
//! Two independent pieces sit on the hot path of an agent run:
//!
//! - [`tools::ToolCallValidator`] diagnoses a model-issued tool call before it
//!   is dispatched: unknown tool names (with a fuzzy-matched suggestion),
//!   malformed call ids, unusable arguments, and schema violations. The result
//!   says whether the call is valid and whether every problem has a
//!   mechanical fix.
//! - [`runtime::RuntimeCallbackBridge`] fans execution events out to optional
//!   caller callbacks. A failing callback is logged and never reaches the
//!   execution core.
//!
//! # Quick Start
//!
//! ```
//! use callguard::prelude::*;
//! use serde_json::json;
//!
//! let request = ToolCallRequest::builder()
//!     .tool_name("read_fil")
//!     .tool_call_id("call1")
//!     .arguments(json!({ "path": "/tmp" }))
//!     .schema(json!({ "properties": { "path": { "type": "string" } }, "required": ["path"] }))
//!     .available_tools(vec!["read_file".to_string()])
//!     .build();
//!
//! let result = validate_tool_call(&request);
//! assert!(!result.valid);
//! assert!(result.repairable);
//! assert_eq!(result.issues[0].suggestion.as_deref(), Some("read_file"));
//! ```

pub mod config;
pub mod error;
pub mod prelude;
pub mod runtime;
pub mod tools;
pub mod util;
