use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct Config {
    #[validate]
    pub ai: AIConfig,
    pub analysis: AnalysisConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct AIConfig {
    pub provider: AIProvider,
    #[validate(length(min = 1, message = "model name cannot be empty"))]
    pub model: String,
    #[validate(range(min = 1, max = 200_000, message = "max_tokens out of range"))]
    pub max_tokens: u32,
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    #[serde(skip)]
    pub api_url: Option<String>,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            provider: AIProvider::Anthropic,
            model: "claude-3-opus-20240229".to_string(),
            max_tokens: 4000,
            anthropic_api_key: None,
            openai_api_key: None,
            api_url: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum AIProvider {
    Anthropic,
    OpenAI,
}

/// Knobs for the project walk. Directories named here are skipped wholesale;
/// they hold vendored or derived code that drowns out the project's own
/// structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalysisConfig {
    pub ignore_dirs: Vec<String>,
    pub max_archive_bytes: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: [
                ".git",
                "node_modules",
                "target",
                "__pycache__",
                "venv",
                "dist",
                "build",
                "coverage",
            ]
            .iter()
            .map(|dir| dir.to_string())
            .collect(),
            max_archive_bytes: 50 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DisplayConfig {
    pub color_output: bool,
    pub show_timings: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_output: true,
            show_timings: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai: AIConfig::default(),
            analysis: AnalysisConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    pub fn create_default(path: &Path) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("could not create {}", parent.display()))?;
        }
        fs::write(path, content).with_context(|| format!("could not write {}", path.display()))?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("could not read config at {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("malformed config at {}", path.display()))?;
        config.apply_env_overrides();
        config
            .validate()
            .with_context(|| format!("invalid config at {}", path.display()))?;
        Ok(config)
    }

    /// Loads the config, creating a default one on first run. Returns an
    /// error when no API key is configured, since nothing useful can be
    /// generated without one.
    pub fn ensure_config_exists() -> Result<Self> {
        let config_path = get_config_path()?;

        if !config_path.exists() {
            Self::create_default(&config_path)?;
            anyhow::bail!(
                "created default config at {}; add an API key and re-run",
                config_path.display()
            );
        }

        let config = Self::load(&config_path)?;

        if config.ai.anthropic_api_key.is_none() && config.ai.openai_api_key.is_none() {
            anyhow::bail!(
                "no API key found in {} (set anthropic_api_key or openai_api_key, \
                 or export ANTHROPIC_API_KEY / OPENAI_API_KEY)",
                config_path.display()
            );
        }

        Ok(config)
    }

    /// Loads the config when one exists, otherwise falls back to defaults.
    /// Used by paths that never call the generator and so need no API key.
    pub fn load_or_default() -> Result<Self> {
        let config_path = get_config_path()?;
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            let mut config = Config::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
            if !key.is_empty() {
                self.ai.anthropic_api_key = Some(key);
            }
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                self.ai.openai_api_key = Some(key);
            }
        }
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "codescribe", "codescribe")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.ai.model, config.ai.model);
        assert_eq!(parsed.analysis.ignore_dirs, config.analysis.ignore_dirs);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn zero_max_tokens_fails_validation() {
        let mut config = Config::default();
        config.ai.max_tokens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn ignore_dirs_cover_common_vendored_trees() {
        let config = AnalysisConfig::default();
        assert!(config.ignore_dirs.iter().any(|d| d == "node_modules"));
        assert!(config.ignore_dirs.iter().any(|d| d == ".git"));
    }
}
