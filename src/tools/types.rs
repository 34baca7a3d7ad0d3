//! Tool-call validation types: requests, issues, results.

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A single model-proposed tool invocation awaiting validation.
///
/// `arguments` mirrors what a provider hands back: `None` when the field was
/// absent, `Some(Value::Null)` for an explicit null, `Some(Value::String(_))`
/// for JSON-encoded arguments, or an already-decoded value.
#[derive(Debug, Clone, Default, Builder, Serialize, Deserialize)]
pub struct ToolCallRequest {
    #[builder(into)]
    pub tool_name: String,
    #[builder(into)]
    pub tool_call_id: Option<String>,
    pub arguments: Option<serde_json::Value>,
    /// JSON Schema subset: `properties` (name → `type`) and `required`.
    #[builder(default)]
    #[serde(default)]
    pub schema: serde_json::Value,
    /// Tool names currently callable.
    #[builder(default)]
    #[serde(default)]
    pub available_tools: Vec<String>,
}

/// Closed set of problems a tool call can have.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IssueKind {
    UnknownTool,
    InvalidId,
    EmptyArgs,
    MalformedJson,
    MissingRequired,
    WrongType,
    ExtraParams,
}

/// One detected problem with a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Registered tool name the caller could substitute (`unknown_tool` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Whether a mechanical fix exists for this issue alone.
    pub repairable: bool,
    pub message: String,
}

impl Issue {
    /// Create an issue with only a kind, message and repairability.
    pub fn new(kind: IssueKind, message: impl Into<String>, repairable: bool) -> Self {
        Self {
            kind,
            field: None,
            expected: None,
            actual: None,
            suggestion: None,
            repairable,
            message: message.into(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn with_actual(mut self, actual: impl Into<String>) -> Self {
        self.actual = Some(actual.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: Option<String>) -> Self {
        self.suggestion = suggestion;
        self
    }
}

/// Outcome of validating a [`ToolCallRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `true` iff `issues` is empty.
    pub valid: bool,
    /// Problems in detection order.
    pub issues: Vec<Issue>,
    /// `true` iff every issue has a mechanical fix (vacuously true when valid).
    pub repairable: bool,
}

impl ValidationResult {
    /// Build a result, deriving `valid` and `repairable` from the issues.
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        Self {
            valid: issues.is_empty(),
            repairable: issues.iter().all(|issue| issue.repairable),
            issues,
        }
    }

    /// Whether any issue of `kind` was reported.
    pub fn has(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|issue| issue.kind == kind)
    }

    /// All issues of `kind`, in detection order.
    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }

    /// Render the issues as a message the model can act on when resending.
    ///
    /// Returns `None` for a valid call.
    pub fn feedback(&self) -> Option<String> {
        if self.valid {
            return None;
        }
        let mut out = String::from("Tool call validation failed:\n");
        for issue in &self.issues {
            out.push_str("- ");
            out.push_str(&issue.message);
            if let Some(suggestion) = &issue.suggestion {
                out.push_str(&format!(" Did you mean \"{suggestion}\"?"));
            }
            out.push('\n');
        }
        Some(out)
    }
}
