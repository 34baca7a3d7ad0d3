//! Validate model-issued tool calls before dispatch.
//!
//! Each pass runs independently so one call can surface several issues at
//! once. Absent or malformed schema parts are read as empty collections up
//! front, so hostile input never panics.

use serde_json::{Map, Value};

use crate::config::GuardConfig;
use crate::util::distance::closest_match;

use super::types::{Issue, IssueKind, ToolCallRequest, ValidationResult};

/// Validates tool calls against a tool registry and a parameter schema.
#[derive(Debug, Clone, Default)]
pub struct ToolCallValidator {
    config: GuardConfig,
}

/// Validate with default settings.
pub fn validate_tool_call(request: &ToolCallRequest) -> ValidationResult {
    ToolCallValidator::default().validate(request)
}

impl ToolCallValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GuardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Diagnose a single tool call. Never panics and never mutates its input.
    pub fn validate(&self, request: &ToolCallRequest) -> ValidationResult {
        let schema = SchemaView::new(&request.schema);
        let mut issues = Vec::new();

        if let Some(issue) = self.check_tool_name(&request.tool_name, &request.available_tools) {
            issues.push(issue);
        }
        if let Some(issue) = check_call_id(request.tool_call_id.as_deref()) {
            issues.push(issue);
        }

        match normalize_arguments(request.arguments.as_ref()) {
            Ok(args) => {
                check_required(&args, &schema, &mut issues);
                check_types(&args, &schema, &mut issues);
                check_extra_params(&args, &schema, &mut issues);
            }
            Err(issue) => issues.push(issue),
        }

        let result = ValidationResult::from_issues(issues);
        if !result.valid {
            tracing::debug!(
                tool = %request.tool_name,
                issues = result.issues.len(),
                repairable = result.repairable,
                "tool call failed validation"
            );
        }
        result
    }

    fn check_tool_name(&self, name: &str, available: &[String]) -> Option<Issue> {
        if available.iter().any(|tool| tool == name) {
            return None;
        }
        let suggestion = closest_match(name, available, self.config.max_tool_name_distance)
            .map(str::to_string);
        let known = available.join(", ");
        let message = if available.is_empty() {
            format!("Unknown tool \"{name}\". No tools are available.")
        } else {
            format!("Unknown tool \"{name}\". Available tools: {known}.")
        };
        Some(
            Issue::new(IssueKind::UnknownTool, message, suggestion.is_some())
                .with_field("toolName")
                .with_expected(known)
                .with_actual(name)
                .with_suggestion(suggestion),
        )
    }
}

/// Read-only view of the schema subset we check, defaulted to empty.
struct SchemaView<'a> {
    properties: Option<&'a Map<String, Value>>,
    required: Vec<&'a str>,
}

impl<'a> SchemaView<'a> {
    fn new(schema: &'a Value) -> Self {
        let properties = schema.get("properties").and_then(Value::as_object);
        let required = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        Self {
            properties,
            required,
        }
    }

    fn declared_types(&self, key: &str) -> Option<Vec<&'a str>> {
        let declared = self.properties?.get(key)?.get("type")?;
        match declared {
            Value::String(t) => Some(vec![t.as_str()]),
            Value::Array(ts) => Some(ts.iter().filter_map(Value::as_str).collect()),
            _ => None,
        }
    }
}

fn check_call_id(id: Option<&str>) -> Option<Issue> {
    let ok = id
        .and_then(|id| id.chars().next())
        .is_some_and(|c| c.is_ascii_alphanumeric());
    if ok {
        return None;
    }
    let shown = match id {
        Some(id) => format!("\"{id}\""),
        None => "null".to_string(),
    };
    Some(
        Issue::new(
            IssueKind::InvalidId,
            format!(
                "Invalid tool call id {shown}: must be a non-empty string \
                 starting with a letter or digit."
            ),
            true,
        )
        .with_field("toolCallId")
        .with_actual(shown),
    )
}

/// Resolve the arguments to a plain object, or the single issue that stops
/// further argument checks.
fn normalize_arguments(arguments: Option<&Value>) -> Result<Map<String, Value>, Issue> {
    let empty = || Issue::new(IssueKind::EmptyArgs, "Tool arguments are empty.", true);
    let value = match arguments {
        None | Some(Value::Null) => return Err(empty()),
        Some(Value::String(raw)) if raw.is_empty() => return Err(empty()),
        Some(Value::String(raw)) => serde_json::from_str::<Value>(raw).map_err(|e| {
            Issue::new(
                IssueKind::MalformedJson,
                format!("Tool arguments are not valid JSON: {e}."),
                true,
            )
            .with_expected("object")
            .with_actual("string")
        })?,
        Some(other) => other.clone(),
    };
    match value {
        Value::Object(map) => Ok(map),
        other => {
            let actual = json_type_name(&other);
            Err(Issue::new(
                IssueKind::MalformedJson,
                format!("Tool arguments must be a JSON object, got {actual}."),
                true,
            )
            .with_expected("object")
            .with_actual(actual))
        }
    }
}

fn check_required(args: &Map<String, Value>, schema: &SchemaView<'_>, issues: &mut Vec<Issue>) {
    for name in &schema.required {
        if !args.contains_key(*name) {
            issues.push(
                Issue::new(
                    IssueKind::MissingRequired,
                    format!("Missing required parameter \"{name}\"."),
                    true,
                )
                .with_field(*name),
            );
        }
    }
}

fn check_types(args: &Map<String, Value>, schema: &SchemaView<'_>, issues: &mut Vec<Issue>) {
    for (key, value) in args {
        let Some(declared) = schema.declared_types(key) else {
            continue;
        };
        if declared.is_empty() || declared.iter().any(|t| value_matches_type(value, t)) {
            continue;
        }
        let expected = declared.join(" | ");
        let actual = json_type_name(value);
        issues.push(
            Issue::new(
                IssueKind::WrongType,
                format!("Parameter \"{key}\" expected type {expected}, got {actual}."),
                true,
            )
            .with_field(key.as_str())
            .with_expected(expected)
            .with_actual(actual),
        );
    }
}

fn check_extra_params(args: &Map<String, Value>, schema: &SchemaView<'_>, issues: &mut Vec<Issue>) {
    let Some(properties) = schema.properties.filter(|p| !p.is_empty()) else {
        return;
    };
    for key in args.keys() {
        if !properties.contains_key(key) {
            issues.push(
                Issue::new(
                    IssueKind::ExtraParams,
                    format!("Unexpected parameter \"{key}\"."),
                    true,
                )
                .with_field(key.as_str()),
            );
        }
    }
}

/// Unrecognized declared types always match.
fn value_matches_type(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => is_integral(value),
        "boolean" => value.is_boolean(),
        _ => true,
    }
}

fn is_integral(value: &Value) -> bool {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => true,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0),
        _ => false,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tools() -> Vec<String> {
        ["read_file", "write_file", "list_directory", "bash_exec"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn request(arguments: Option<Value>, schema: Value) -> ToolCallRequest {
        ToolCallRequest {
            tool_name: "read_file".into(),
            tool_call_id: Some("call1".into()),
            arguments,
            schema,
            available_tools: tools(),
        }
    }

    #[test]
    fn schema_view_defaults_null_parts() {
        let schema = json!({ "properties": null, "required": null });
        let view = SchemaView::new(&schema);
        assert!(view.properties.is_none());
        assert!(view.required.is_empty());
    }

    #[test]
    fn schema_view_ignores_non_string_required_entries() {
        let schema = json!({ "required": ["path", 7, null, "mode"] });
        let view = SchemaView::new(&schema);
        assert_eq!(view.required, vec!["path", "mode"]);
    }

    #[test]
    fn non_object_schema_is_treated_as_empty() {
        let result = validate_tool_call(&request(Some(json!({ "a": 1 })), json!("nonsense")));
        assert!(result.valid);
    }

    #[test]
    fn integer_accepts_whole_floats() {
        assert!(is_integral(&json!(5)));
        assert!(is_integral(&json!(-5)));
        assert!(is_integral(&json!(5.0)));
        assert!(!is_integral(&json!(1.5)));
        assert!(!is_integral(&json!("5")));
    }

    #[test]
    fn unrecognized_declared_type_is_unchecked() {
        let schema = json!({ "properties": { "lines": { "type": "array" } } });
        let result = validate_tool_call(&request(Some(json!({ "lines": "not array" })), schema));
        assert!(!result.has(IssueKind::WrongType));
    }

    #[test]
    fn union_with_unchecked_member_passes() {
        let schema = json!({ "properties": { "v": { "type": ["boolean", "object"] } } });
        let result = validate_tool_call(&request(Some(json!({ "v": "x" })), schema));
        assert!(!result.has(IssueKind::WrongType));
    }

    #[test]
    fn union_expected_is_joined() {
        let schema = json!({ "properties": { "v": { "type": ["string", "number"] } } });
        let result = validate_tool_call(&request(Some(json!({ "v": true })), schema));
        let issue = result.issues_of(IssueKind::WrongType).next().unwrap();
        assert_eq!(issue.expected.as_deref(), Some("string | number"));
        assert_eq!(issue.actual.as_deref(), Some("boolean"));
    }

    #[test]
    fn empty_arguments_skip_field_checks() {
        let schema = json!({ "required": ["path"] });
        for args in [None, Some(Value::Null), Some(json!(""))] {
            let result = validate_tool_call(&request(args, schema.clone()));
            assert_eq!(result.issues.len(), 1);
            assert_eq!(result.issues[0].kind, IssueKind::EmptyArgs);
        }
    }

    #[test]
    fn boolean_arguments_are_malformed() {
        let result = validate_tool_call(&request(Some(json!(true)), json!({})));
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].kind, IssueKind::MalformedJson);
        assert_eq!(result.issues[0].actual.as_deref(), Some("boolean"));
    }

    #[test]
    fn call_id_must_start_alphanumeric() {
        assert!(check_call_id(Some("call_1")).is_none());
        assert!(check_call_id(Some("9abc")).is_none());
        assert!(check_call_id(Some("")).is_some());
        assert!(check_call_id(Some("_abc")).is_some());
        assert!(check_call_id(None).is_some());
    }

    #[test]
    fn configured_distance_narrows_suggestions() {
        let validator = ToolCallValidator::with_config(GuardConfig {
            max_tool_name_distance: 0,
        });
        let mut req = request(Some(json!({})), json!({}));
        req.tool_name = "read_fil".into();
        let result = validator.validate(&req);
        assert!(result.has(IssueKind::UnknownTool));
        assert!(!result.repairable);
    }
}
