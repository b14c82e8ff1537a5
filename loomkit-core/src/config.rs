//! Run configuration: input filters, output location, plugin wiring,
//! and the parser's transform flags.
//!
//! Deserialized via `serde`; an external CLI harness is responsible
//! for locating and loading the file this deserializes from.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub plugins: IndexMap<String, PluginConfig>,
    /// Topological plugin order. When absent, the orchestrator
    /// computes it from each plugin's `dependencies`.
    #[serde(default)]
    pub plugin_order: Option<Vec<String>>,
    #[serde(default)]
    pub parser: ParserConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputConfig {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub index_file: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Opaque per-plugin options, interpreted by the plugin itself.
    #[serde(default)]
    pub options: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserConfig {
    #[serde(default)]
    pub transforms: TransformsConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformsConfig {
    #[serde(default)]
    pub enums: EnumTransformConfig,
    #[serde(default)]
    pub read_write: ReadWriteTransformConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumTransformConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub mode: EnumTransformMode,
}

impl Default for EnumTransformConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: EnumTransformMode::Inline,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum EnumTransformMode {
    #[default]
    Inline,
    Lift,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadWriteTransformConfig {
    #[serde(default)]
    pub enabled: bool,
}

impl Config {
    /// Validates the configured output path and plugin dependency
    /// declarations, ahead of orchestration. Missing dependencies and
    /// empty output paths are `ConfigError`s, not silently-applied
    /// defaults.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.path.trim().is_empty() {
            return Err(ConfigError::InvalidOutputPath {
                path: self.output.path.clone(),
                reason: "output path must not be empty".into(),
            });
        }
        for (name, plugin) in &self.plugins {
            for dependency in &plugin.dependencies {
                if !self.plugins.contains_key(dependency) {
                    return Err(ConfigError::MissingDependency {
                        plugin: name.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
