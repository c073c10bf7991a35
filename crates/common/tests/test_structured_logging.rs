use common::{
    init_structured_logging, ExecutionContext, InsightError, OperationTimer, StructuredLogEntry,
};
use domain::config::LoggingConfig;
use serde_json::Value;
use std::collections::HashMap;

#[test]
fn test_structured_log_entry_round_trip_keeps_flattened_fields() {
    let mut fields = HashMap::new();
    fields.insert("path".to_string(), Value::String("demo/main.py".to_string()));

    let entry = StructuredLogEntry {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: "INFO".to_string(),
        target: "client::api".to_string(),
        message: "Fetched documentation".to_string(),
        fields,
        context: None,
    };

    let json = serde_json::to_value(&entry).expect("serializable");
    assert_eq!(json["path"], "demo/main.py");
    assert_eq!(json["message"], "Fetched documentation");
    assert!(json.get("context").is_none());
}

#[test]
fn test_execution_context_defaults() {
    let context = ExecutionContext::default();
    assert_eq!(context.pid, std::process::id());
    assert!(!context.app_version.is_empty());
}

#[test]
fn test_second_initialization_is_reported() {
    let config = LoggingConfig {
        level: "warn".to_string(),
        json: true,
    };
    init_structured_logging(&config).expect("first initialization");
    let second = init_structured_logging(&config);
    assert!(matches!(second, Err(InsightError::Configuration(_))));

    let timer = OperationTimer::new("test_operation");
    timer.finish_with_result::<(), String>(&Ok(()));
}
