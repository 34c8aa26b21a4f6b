// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Engine Configuration Types
//
// Defines the configuration schema for the recommendation engine:
// - Kubernetes-style manifest format (apiVersion/kind/metadata/spec)
// - Image synthesis provider settings (endpoint, model, credentials, timeout)
// - Asset storage location and placeholder asset
// - Recommendation defaults (location)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::request::DEFAULT_LOCATION;
use crate::domain::synthesis::PLACEHOLDER_ASSET;

pub const API_VERSION: &str = "wardrobe/v1";
pub const KIND: &str = "EngineConfig";

/// Top-level Kubernetes-style engine configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// API version (must be "wardrobe/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "EngineConfig")
    pub kind: String,

    pub metadata: ConfigMetadata,

    #[serde(default)]
    pub spec: EngineConfigSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfigSpec {
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    #[serde(default)]
    pub recommendation: RecommendationDefaults,
}

/// Image synthesis provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Base URL of an OpenAI-compatible images API (e.g. "https://api.siliconflow.cn/v1")
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// API key, or "env:VAR_NAME" to read it from the environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory rendered assets are written to
    #[serde(default = "default_asset_dir")]
    pub asset_dir: PathBuf,

    /// Asset reference used when rendering fails or times out
    #[serde(default = "default_placeholder")]
    pub placeholder_asset: String,

    #[serde(default = "default_image_size")]
    pub image_size: String,

    #[serde(default = "default_inference_steps")]
    pub inference_steps: u32,

    #[serde(default = "default_guidance_scale")]
    pub guidance_scale: f32,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            asset_dir: default_asset_dir(),
            placeholder_asset: default_placeholder(),
            image_size: default_image_size(),
            inference_steps: default_inference_steps(),
            guidance_scale: default_guidance_scale(),
        }
    }
}

impl SynthesisConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the API key, following "env:VAR_NAME" indirection.
    /// Returns `None` when unset or when the referenced variable is missing.
    pub fn resolved_api_key(&self) -> Option<String> {
        let raw = self.api_key.as_deref()?;
        match raw.strip_prefix("env:") {
            Some(var) => std::env::var(var).ok(),
            None => Some(raw.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationDefaults {
    /// Location used when a request omits one
    #[serde(default = "default_location")]
    pub default_location: String,
}

impl Default for RecommendationDefaults {
    fn default() -> Self {
        Self {
            default_location: default_location(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.siliconflow.cn/v1".to_string()
}

fn default_model() -> String {
    "Kwai-Kolors/Kolors".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_asset_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_placeholder() -> String {
    PLACEHOLDER_ASSET.to_string()
}

fn default_image_size() -> String {
    "1024x1024".to_string()
}

fn default_inference_steps() -> u32 {
    30
}

fn default_guidance_scale() -> f32 {
    5.0
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ConfigMetadata {
                name: "wardrobe-engine".to_string(),
                version: Some("1.0.0".to_string()),
                labels: None,
            },
            spec: EngineConfigSpec::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. WARDROBE_CONFIG_PATH environment variable
    /// 2. ./wardrobe-config.yaml (working directory)
    /// 3. ~/.wardrobe/config.yaml (user home)
    /// 4. /etc/wardrobe/config.yaml (system, Unix) or C:\ProgramData\Wardrobe\config.yaml (Windows)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("WARDROBE_CONFIG_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./wardrobe-config.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".wardrobe").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        #[cfg(unix)]
        let system_config = PathBuf::from("/etc/wardrobe/config.yaml");
        #[cfg(windows)]
        let system_config = PathBuf::from("C:\\ProgramData\\Wardrobe\\config.yaml");

        if system_config.exists() {
            return Some(system_config);
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit path fails loudly when missing or invalid
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", path, e)
            })?;
            config.apply_env_overrides();
            return Ok(config);
        }

        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(config_path)?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::warn!("No configuration file found in standard locations. Using defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("WARDROBE_SYNTHESIS_ENDPOINT") {
            tracing::info!("Environment override: WARDROBE_SYNTHESIS_ENDPOINT={}", val);
            self.spec.synthesis.endpoint = val;
        }

        if let Ok(val) = std::env::var("WARDROBE_SYNTHESIS_API_KEY") {
            tracing::info!("Environment override: WARDROBE_SYNTHESIS_API_KEY=<redacted>");
            self.spec.synthesis.api_key = Some(val);
        }

        if let Ok(val) = std::env::var("WARDROBE_SYNTHESIS_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) => {
                    tracing::info!("Environment override: WARDROBE_SYNTHESIS_TIMEOUT_SECS={}", secs);
                    self.spec.synthesis.timeout_secs = secs;
                }
                Err(_) => {
                    tracing::warn!(
                        "Invalid value for WARDROBE_SYNTHESIS_TIMEOUT_SECS: '{}'. Expected seconds. Ignoring.",
                        val
                    );
                }
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!(
                "Invalid apiVersion: '{}'. Must be '{}'",
                self.api_version,
                API_VERSION
            );
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.metadata.name.is_empty() {
            anyhow::bail!("metadata.name cannot be empty");
        }

        let synthesis = &self.spec.synthesis;
        if synthesis.endpoint.is_empty() {
            anyhow::bail!("spec.synthesis.endpoint cannot be empty");
        }
        if synthesis.model.is_empty() {
            anyhow::bail!("spec.synthesis.model cannot be empty");
        }
        if synthesis.timeout_secs == 0 {
            anyhow::bail!("spec.synthesis.timeout_secs must be greater than zero");
        }
        if synthesis.placeholder_asset.is_empty() {
            anyhow::bail!("spec.synthesis.placeholder_asset cannot be empty");
        }
        if !is_valid_image_size(&synthesis.image_size) {
            anyhow::bail!(
                "Invalid spec.synthesis.image_size: '{}'. Expected WIDTHxHEIGHT",
                synthesis.image_size
            );
        }
        if synthesis.inference_steps == 0 {
            anyhow::bail!("spec.synthesis.inference_steps must be greater than zero");
        }

        if self.spec.recommendation.default_location.trim().is_empty() {
            anyhow::bail!("spec.recommendation.default_location cannot be empty");
        }

        Ok(())
    }
}

fn is_valid_image_size(size: &str) -> bool {
    match size.split_once('x') {
        Some((w, h)) => w.parse::<u32>().is_ok_and(|w| w > 0) && h.parse::<u32>().is_ok_and(|h| h > 0),
        None => false,
    }
}
