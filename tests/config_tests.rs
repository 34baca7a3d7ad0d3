//! Tests for configuration system.

use std::sync::{Mutex, OnceLock};

use callguard::config::{GuardConfig, MAX_TOOL_DISTANCE_ENV};
use callguard::error::GuardError;
use callguard::tools::{validate_tool_call, IssueKind, ToolCallRequest, ToolCallValidator};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

struct EnvGuard {
    saved: Option<String>,
}

impl EnvGuard {
    fn capture() -> Self {
        Self {
            saved: std::env::var(MAX_TOOL_DISTANCE_ENV).ok(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.saved {
            Some(v) => std::env::set_var(MAX_TOOL_DISTANCE_ENV, v),
            None => std::env::remove_var(MAX_TOOL_DISTANCE_ENV),
        }
    }
}

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn near_miss_request() -> ToolCallRequest {
    ToolCallRequest::builder()
        .tool_name("rd_fl")
        .tool_call_id("call1")
        .arguments(serde_json::json!({}))
        .available_tools(vec!["read_file".to_string()])
        .build()
}

#[test]
fn env_overrides_max_distance() {
    let _lock = env_lock();
    let _guard = EnvGuard::capture();

    std::env::set_var(MAX_TOOL_DISTANCE_ENV, "5");
    let config = GuardConfig::from_env().unwrap();
    assert_eq!(config.max_tool_name_distance, 5);

    std::env::set_var(MAX_TOOL_DISTANCE_ENV, " 0 ");
    let config = GuardConfig::from_env().unwrap();
    assert_eq!(config.max_tool_name_distance, 0);
}

#[test]
fn env_rejects_non_numeric_distance() {
    let _lock = env_lock();
    let _guard = EnvGuard::capture();

    std::env::set_var(MAX_TOOL_DISTANCE_ENV, "lots");
    let err = GuardConfig::from_env().unwrap_err();

    assert!(matches!(
        &err,
        GuardError::InvalidValue { key, value } if key == MAX_TOOL_DISTANCE_ENV && value == "lots"
    ));
    assert_eq!(
        err.to_string(),
        "Invalid value for CALLGUARD_MAX_TOOL_DISTANCE: \"lots\""
    );
}

#[test]
fn file_config_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("callguard.toml");
    std::fs::write(&path, "max_tool_name_distance = 4\n").unwrap();

    let config = GuardConfig::from_file(&path).unwrap();

    assert_eq!(config.max_tool_name_distance, 4);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GuardConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, GuardError::Io(_)));
}

#[test]
fn distance_budget_controls_repairability() {
    // "rd_fl" is four edits from "read_file".
    let request = near_miss_request();

    assert!(!validate_tool_call(&request).repairable);

    let wide = ToolCallValidator::with_config(GuardConfig {
        max_tool_name_distance: 4,
    });
    let result = wide.validate(&request);
    assert!(result.has(IssueKind::UnknownTool));
    assert!(result.repairable);
    assert_eq!(result.issues[0].suggestion.as_deref(), Some("read_file"));
}
