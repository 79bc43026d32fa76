//! Tests for configuration system

use carelead::Config;
use temp_dir::TempDir;

#[test]
fn test_config_loads_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.child("carelead.toml");
    std::fs::write(
        &path,
        r#"
[server]
host = "0.0.0.0"
port = 8080

[storage]
data_dir = "/var/lib/carelead"

[upstream]
timeout_secs = 3

[observability]
log_format = "json"
"#,
    )
    .unwrap();

    let config = Config::load(Some(path.to_string_lossy().to_string()))
        .expect("Failed to load config");

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.storage.data_dir, "/var/lib/carelead");
    assert_eq!(config.upstream.timeout_secs, 3);
    assert_eq!(config.observability.log_format, "json");
    assert_eq!(config.observability.log_level, "info");
    assert_eq!(config.email.smtp_port, 587);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_defaults_without_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.child("missing.toml");

    let config = Config::load(Some(missing.to_string_lossy().to_string()))
        .expect("Failed to load config");

    assert!(!config.server.host.is_empty());
    assert!(config.server.port > 0);
    assert!(!config.storage.data_dir.is_empty());
    assert_eq!(config.upstream.timeout_secs, 10);
    assert!(config.validate().is_ok());
}
