// src/core/config_manager.rs
//! Client configuration - config.yaml per environment, then env overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub service: ServiceConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub upload_endpoint: String,
    pub analyze_endpoint: String,
    /// No timeout unless configured
    pub timeout_seconds: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            upload_endpoint: "/upload".to_string(),
            analyze_endpoint: "/analyze".to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("out"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub service: ServiceConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: Option<EnvironmentConfig>,
    #[serde(default)]
    production: Option<EnvironmentConfig>,
}

impl ConfigManager {
    /// Load configuration from `config.yaml` in the working directory, if present
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let env_config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            Self::parse_yaml(&content, &environment)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?
        } else {
            info!("{} not found, using defaults", config_path.display());
            EnvironmentConfig::default()
        };

        let mut config = Self {
            environment,
            service: env_config.service,
            output: env_config.output,
        };
        config.apply_env_overrides()?;

        info!("Extraction service: {}", config.service.base_url);
        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("CVEXTRACT_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Pick the section for `environment`; anything but production reads `local`
    pub fn parse_yaml(content: &str, environment: &str) -> Result<EnvironmentConfig> {
        let file: ConfigFile = serde_yaml::from_str(content).context("Invalid YAML configuration")?;

        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };

        Ok(section.unwrap_or_default())
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("CVEXTRACT_SERVICE_URL") {
            self.service.base_url = url;
        }

        if let Ok(secs) = std::env::var("CVEXTRACT_TIMEOUT_SECS") {
            let secs = secs
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("CVEXTRACT_TIMEOUT_SECS must be a number of seconds"))?;
            self.service.timeout_seconds = Some(secs);
        }

        if let Ok(dir) = std::env::var("CVEXTRACT_OUTPUT_DIR") {
            self.output.output_dir = PathBuf::from(dir);
        }

        Ok(())
    }

    pub fn with_service_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.service.base_url = url;
        }
        self
    }
}
