use std::path::Path;

use anyhow::Context;
use metricvar_provider::StaticCatalog;
use serde::Deserialize;

/// Top-level CLI configuration, loaded from a TOML file.
///
/// ```toml
/// [provider]
/// name = "demo"
///
/// [catalog]
/// regions = ["us-east-1"]
/// namespaces = ["AWS/EC2"]
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct MetricvarConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Entries served by the static provider.
    #[serde(default)]
    pub catalog: StaticCatalog,
}

#[derive(Debug, Deserialize)]
pub struct ProviderConfig {
    /// Name reported in log fields.
    #[serde(default = "default_provider_name")]
    pub name: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
        }
    }
}

fn default_provider_name() -> String {
    "static".to_owned()
}

impl MetricvarConfig {
    /// Load the configuration at `path`, or defaults if the file does not
    /// exist. The flag reports whether the file was found.
    pub fn load(path: &str) -> anyhow::Result<(Self, bool)> {
        if Path::new(path).exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {path}"))?;
            let config = toml::from_str(&contents)
                .with_context(|| format!("failed to parse config file {path}"))?;
            Ok((config, true))
        } else {
            Ok((toml::from_str("")?, false))
        }
    }
}
