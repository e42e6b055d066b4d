//! Configuration file tests.

use tempfile::tempdir;

use countries_core::config::ServiceConfig;
use countries_core::ConfigError;

#[test]
fn test_full_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("countries.toml");
    std::fs::write(
        &path,
        r#"
host = "0.0.0.0"
port = 9000
realm = "atlas"
username = "geo"
password = "graphy"
request_timeout_ms = 1500
max_body_bytes = 2048
log_level = "debug"
"#,
    )
    .unwrap();

    let config = ServiceConfig::from_file(&path).unwrap();
    assert_eq!(
        config,
        ServiceConfig {
            host: "0.0.0.0".to_string(),
            port: 9000,
            realm: "atlas".to_string(),
            username: "geo".to_string(),
            password: "graphy".to_string(),
            request_timeout_ms: 1500,
            max_body_bytes: 2048,
            log_level: "debug".to_string(),
        }
    );
    assert_eq!(config.socket_addr().unwrap().port(), 9000);
}

#[test]
fn test_unknown_keys_are_ignored_and_bad_syntax_rejected() {
    let config = ServiceConfig::from_toml("port = 81\nextra = true\n").unwrap();
    assert_eq!(config.port, 81);

    let err = ServiceConfig::from_toml("port = ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
