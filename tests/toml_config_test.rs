use capstan::utils::validation::Validate;
use capstan::{CapError, ConfigProvider, TomlConfig};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
        [relay]
        name = "orders"
        input = "orders.json"

        [store]
        provider = "local"
        data_dir = "/tmp/orders"

        [channel]
        provider = "http"
        endpoint = "https://ingest.example.com/orders"
    "#
    )
    .unwrap();

    let config = TomlConfig::from_file(file.path()).unwrap();
    assert_eq!(config.relay.name, "orders");
    assert_eq!(config.relay.input.as_deref(), Some("orders.json"));
    assert_eq!(config.store_provider(), "local");
    assert_eq!(config.endpoint(), Some("https://ingest.example.com/orders"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = TomlConfig::from_file("/nonexistent/capstan.toml").unwrap_err();
    assert!(matches!(err, CapError::Io(_)));
}

#[test]
fn test_http_channel_without_endpoint_parses_but_resolution_fails() {
    // The endpoint is only required once the http channel is constructed,
    // not at parse time.
    let config = TomlConfig::from_str(
        r#"
        [relay]
        name = "orders"

        [store]
        provider = "memory"

        [channel]
        provider = "http"
    "#,
    )
    .unwrap();
    assert!(config.validate().is_ok());

    let registry = capstan::Registry::with_builtins();
    let err = registry.channel("http", &config).unwrap_err();
    assert!(matches!(err, CapError::MissingConfig { .. }));
}
