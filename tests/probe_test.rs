use capstan::domain::model::ProbeStatus;
use capstan::{Probe, Registry, TomlConfig};
use tempfile::TempDir;

fn capability<'a>(
    report: &'a capstan::ProbeReport,
    name: &str,
) -> &'a capstan::domain::model::CapabilityReport {
    report
        .capabilities
        .iter()
        .find(|c| c.capability == name)
        .unwrap()
}

#[tokio::test]
async fn test_probe_over_builtin_providers() {
    let config = TomlConfig::from_str(
        r#"
        [relay]
        name = "probe-run"

        [store]
        provider = "memory"

        [channel]
        provider = "log"
    "#,
    )
    .unwrap();

    let registry = Registry::with_builtins();
    let probe = Probe::from_registry(&registry, &config).unwrap();
    let report = probe.run().await;

    assert!(report.healthy());

    let store = capability(&report, "store");
    assert_eq!(store.provider, "memory");
    // The memory store enumerates keys, so nothing is unsupported.
    assert!(store.unsupported_ops.is_empty());

    let channel = capability(&report, "channel");
    assert_eq!(channel.provider, "log");
    assert_eq!(channel.unsupported_ops, vec!["receive"]);

    let validator = capability(&report, "validator");
    assert_eq!(validator.provider, "accept");
    assert_eq!(validator.status, ProbeStatus::Healthy);
}

#[tokio::test]
async fn test_probe_local_store_roundtrip_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let config = TomlConfig::from_str(&format!(
        r#"
        [relay]
        name = "probe-run"

        [store]
        provider = "local"
        data_dir = "{}"

        [channel]
        provider = "log"
    "#,
        temp_dir.path().to_str().unwrap()
    ))
    .unwrap();

    let registry = Registry::with_builtins();
    let probe = Probe::from_registry(&registry, &config).unwrap();
    let report = probe.run().await;

    assert!(report.healthy());
    // The probe cleans up after itself.
    assert!(!temp_dir.path().join("__capstan_probe__").exists());
}

#[tokio::test]
async fn test_probe_reports_unreachable_http_endpoint() {
    let config = TomlConfig::from_str(
        r#"
        [relay]
        name = "probe-run"

        [store]
        provider = "memory"

        [channel]
        provider = "http"
        endpoint = "not a url"
    "#,
    )
    .unwrap();

    let registry = Registry::with_builtins();
    let probe = Probe::from_registry(&registry, &config).unwrap();
    let report = probe.run().await;

    assert!(!report.healthy());
    let channel = capability(&report, "channel");
    assert!(matches!(channel.status, ProbeStatus::Failed(_)));
    // Store health is reported independently of the failing channel.
    assert_eq!(capability(&report, "store").status, ProbeStatus::Healthy);
}

#[tokio::test]
async fn test_probe_report_serializes() {
    let config = TomlConfig::from_str(
        r#"
        [relay]
        name = "probe-run"

        [store]
        provider = "memory"

        [channel]
        provider = "log"
    "#,
    )
    .unwrap();

    let registry = Registry::with_builtins();
    let probe = Probe::from_registry(&registry, &config).unwrap();
    let report = probe.run().await;

    let json = serde_json::to_string_pretty(&report).unwrap();
    assert!(json.contains("\"capability\": \"store\""));
    assert!(json.contains("Healthy"));
}
