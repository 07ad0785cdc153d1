use anyhow::Context;
use capstan::utils::{logger, validation::Validate};
use capstan::{CapError, CliConfig, ConfigProvider, Envelope, Probe, Registry, Relay, TomlConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting capstan");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // A TOML file, when given, replaces the flag-based configuration.
    let (config, input): (Box<dyn ConfigProvider>, Option<String>) = match &cli.config {
        Some(path) => {
            let toml = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file {}", path))?;
            if let Err(e) = toml.validate() {
                tracing::error!("Configuration validation failed: {}", e);
                eprintln!("invalid configuration: {}", e);
                std::process::exit(2);
            }
            let input = cli.input.clone().or_else(|| toml.relay.input.clone());
            (Box::new(toml), input)
        }
        None => {
            if let Err(e) = cli.validate() {
                tracing::error!("Configuration validation failed: {}", e);
                eprintln!("invalid configuration: {}", e);
                std::process::exit(2);
            }
            let input = cli.input.clone();
            (Box::new(cli.clone()), input)
        }
    };

    let registry = Registry::with_builtins();

    if cli.probe {
        let probe = Probe::from_registry(&registry, config.as_ref())?;
        let report = probe.run().await;
        println!("{}", serde_json::to_string_pretty(&report)?);
        if !report.healthy() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let input_path = input.context("no input file given (use --input or [relay] input)")?;
    let envelopes = read_envelopes(&input_path, config.key_field())
        .with_context(|| format!("failed to read input {}", input_path))?;

    let relay = Relay::from_registry(&registry, config.as_ref())?;
    match relay.run(envelopes).await {
        Ok(report) => {
            println!(
                "relayed {} of {} envelopes ({} rejected)",
                report.forwarded, report.received, report.rejected
            );
        }
        Err(e) => {
            eprintln!("relay failed: {}", e);
            let exit_code = match e {
                CapError::UnknownProvider { .. }
                | CapError::Unsupported { .. }
                | CapError::Config { .. }
                | CapError::InvalidConfigValue { .. }
                | CapError::MissingConfig { .. } => 2,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

/// Read a JSON file into envelopes. A top-level array maps one object per
/// envelope; a single object becomes a batch of one. Array entries that are
/// not objects are skipped with a warning.
fn read_envelopes(path: &str, key_field: &str) -> capstan::Result<Vec<Envelope>> {
    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;

    let mut envelopes = Vec::new();
    match value {
        serde_json::Value::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                match item {
                    serde_json::Value::Object(object) => {
                        envelopes.push(Envelope::from_object(index, key_field, object));
                    }
                    other => {
                        tracing::warn!(index, value = %other, "skipping non-object input entry");
                    }
                }
            }
        }
        serde_json::Value::Object(object) => {
            envelopes.push(Envelope::from_object(0, key_field, object));
        }
        other => {
            return Err(CapError::Config {
                message: format!("input must be a JSON object or array, got {}", other),
            });
        }
    }

    Ok(envelopes)
}
