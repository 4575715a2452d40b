//! Logger initialisation with a rolling file target.
//!
//! Installs the global subscriber, so this file holds a single test.

use sprintboard::domain::models::LoggingConfig;
use sprintboard::infrastructure::{LogConfig, LoggerImpl};

#[test]
fn test_logger_writes_rolling_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = LoggingConfig {
        level: "info".to_string(),
        format: "json".to_string(),
        log_dir: Some(dir.path().to_path_buf()),
        rotation: "never".to_string(),
    };
    let config = LogConfig::from_settings(&settings).unwrap().with_level("debug");

    let logger = temp_env::with_var_unset("RUST_LOG", || LoggerImpl::init(&config)).unwrap();
    tracing::info!(issue_id = "i1", "issue moved");
    drop(logger);

    let contents = std::fs::read_to_string(dir.path().join("sprintboard.log")).unwrap();
    let line = contents.lines().find(|l| l.contains("issue moved")).expect("log line written");
    let record: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(record["level"], "INFO");
    assert_eq!(record["fields"]["issue_id"], "i1");

    assert!(LoggerImpl::init(&LogConfig::default()).is_err(), "second init must fail");
}
