use crate::error::{CarbontallyError, Result};
use crate::ingest::{IngestOptions, PdfDelay, SynthesisPolicy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for carbontally
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub synthesis: ConfigValue<SynthesisPolicy>,
    pub pdf_delay: ConfigValue<PdfDelay>,
    pub max_file_size_mb: ConfigValue<u64>,
    pub seed: ConfigValue<Option<u64>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            synthesis: ConfigValue::new(SynthesisPolicy::Allow, ConfigSource::Default),
            pdf_delay: ConfigValue::new(PdfDelay::Simulated, ConfigSource::Default),
            max_file_size_mb: ConfigValue::new(50, ConfigSource::Default),
            seed: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| CarbontallyError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| CarbontallyError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        // Update values from file
        if let Some(synthesis) = file_config.synthesis {
            self.synthesis.update(synthesis, ConfigSource::File);
        }

        if let Some(pdf_delay) = file_config.pdf_delay {
            self.pdf_delay.update(pdf_delay, ConfigSource::File);
        }

        if let Some(max_file_size_mb) = file_config.max_file_size_mb {
            self.max_file_size_mb.update(max_file_size_mb, ConfigSource::File);
        }

        if let Some(seed) = file_config.seed {
            self.seed.update(Some(seed), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // CARBONTALLY_SYNTHESIS
        if let Ok(policy_str) = env::var("CARBONTALLY_SYNTHESIS") {
            match parse_synthesis_policy(&policy_str) {
                Ok(policy) => self.synthesis.update(policy, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CARBONTALLY_SYNTHESIS value '{}': expected allow or deny",
                    policy_str
                ),
            }
        }

        // CARBONTALLY_PDF_DELAY
        if let Ok(delay_str) = env::var("CARBONTALLY_PDF_DELAY") {
            match parse_pdf_delay(&delay_str) {
                Ok(delay) => self.pdf_delay.update(delay, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CARBONTALLY_PDF_DELAY value '{}': expected simulated or disabled",
                    delay_str
                ),
            }
        }

        // CARBONTALLY_MAX_FILE_SIZE_MB
        if let Ok(size_str) = env::var("CARBONTALLY_MAX_FILE_SIZE_MB") {
            match size_str.parse::<u64>() {
                Ok(size) => self.max_file_size_mb.update(size, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CARBONTALLY_MAX_FILE_SIZE_MB value '{}': expected integer megabytes",
                    size_str
                ),
            }
        }

        // CARBONTALLY_SEED
        if let Ok(seed_str) = env::var("CARBONTALLY_SEED") {
            match seed_str.parse::<u64>() {
                Ok(seed) => self.seed.update(Some(seed), ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CARBONTALLY_SEED value '{}': expected unsigned integer",
                    seed_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(synthesis) = overrides.synthesis {
            self.synthesis.update(synthesis, ConfigSource::Cli);
        }

        if let Some(pdf_delay) = overrides.pdf_delay {
            self.pdf_delay.update(pdf_delay, ConfigSource::Cli);
        }

        if let Some(max_file_size_mb) = overrides.max_file_size_mb {
            self.max_file_size_mb.update(max_file_size_mb, ConfigSource::Cli);
        }

        if let Some(seed) = overrides.seed {
            self.seed.update(Some(seed), ConfigSource::Cli);
        }
    }

    /// Pipeline options carried by this configuration
    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            synthesis: self.synthesis.value,
            pdf_delay: self.pdf_delay.value,
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "synthesis".to_string(),
            (format!("{:?}", self.synthesis.value), self.synthesis.source),
        );

        map.insert(
            "pdf_delay".to_string(),
            (format!("{:?}", self.pdf_delay.value), self.pdf_delay.source),
        );

        map.insert(
            "max_file_size_mb".to_string(),
            (
                format!("{} MB", self.max_file_size_mb.value),
                self.max_file_size_mb.source,
            ),
        );

        map.insert(
            "seed".to_string(),
            (
                match self.seed.value {
                    Some(seed) => seed.to_string(),
                    None => "entropy".to_string(),
                },
                self.seed.source,
            ),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    synthesis: Option<SynthesisPolicy>,
    pdf_delay: Option<PdfDelay>,
    max_file_size_mb: Option<u64>,
    seed: Option<u64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub synthesis: Option<SynthesisPolicy>,
    pub pdf_delay: Option<PdfDelay>,
    pub max_file_size_mb: Option<u64>,
    pub seed: Option<u64>,
}

/// Parse synthesis policy from string
pub fn parse_synthesis_policy(s: &str) -> Result<SynthesisPolicy> {
    match s.to_lowercase().as_str() {
        "allow" | "on" => Ok(SynthesisPolicy::Allow),
        "deny" | "off" => Ok(SynthesisPolicy::Deny),
        _ => Err(CarbontallyError::ConfigInvalid {
            key: "synthesis".to_string(),
            reason: format!("Invalid synthesis policy: {}. Use allow or deny", s),
        }),
    }
}

/// Parse PDF delay mode from string
pub fn parse_pdf_delay(s: &str) -> Result<PdfDelay> {
    match s.to_lowercase().as_str() {
        "simulated" | "on" => Ok(PdfDelay::Simulated),
        "disabled" | "off" => Ok(PdfDelay::Disabled),
        _ => Err(CarbontallyError::ConfigInvalid {
            key: "pdf_delay".to_string(),
            reason: format!("Invalid PDF delay mode: {}. Use simulated or disabled", s),
        }),
    }
}
