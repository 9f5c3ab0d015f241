use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::FlashgenError;
use crate::model::topic::default_topics;

pub const DEFAULT_LANGUAGE: &str = "English (en-US)";
pub const DEFAULT_NUM_QUESTIONS: u32 = 20;
pub const DEFAULT_MODEL: &str = "o4-mini";
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
/// Reasoning models regularly need minutes for a full deck.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 600;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub language: String,
    pub num_questions: u32,
    pub model: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub output_dir: PathBuf,
    pub merged_file: PathBuf,
    pub topics: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.into(),
            num_questions: DEFAULT_NUM_QUESTIONS,
            model: DEFAULT_MODEL.into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            output_dir: PathBuf::from("out"),
            merged_file: PathBuf::from("merged.csv"),
            topics: default_topics(),
        }
    }
}

impl Config {
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the given TOML file, or falls back to the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("in '{}'", path.display()))
    }

    fn validate(&self) -> Result<(), FlashgenError> {
        if self.num_questions == 0 {
            return Err(FlashgenError::Config("num_questions must be at least 1".into()));
        }
        if self.model.trim().is_empty() {
            return Err(FlashgenError::Config("model must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.language, "English (en-US)");
        assert_eq!(config.num_questions, 20);
        assert_eq!(config.model, "o4-mini");
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.merged_file, PathBuf::from("merged.csv"));
        assert_eq!(config.topics.len(), 10);
        assert_eq!(config.request_timeout_secs, 600);
    }

    #[test]
    fn overrides_are_applied() {
        let toml = r#"
            language = "Español (es-ES)"
            num_questions = 5
            output_dir = "cards"
            request_timeout_secs = 120
            topics = ["Rust Ownership", "Lock-free Queues"]
        "#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.language, "Español (es-ES)");
        assert_eq!(config.num_questions, 5);
        assert_eq!(config.output_dir, PathBuf::from("cards"));
        assert_eq!(config.request_timeout_secs, 120);
        assert_eq!(config.topics, vec!["Rust Ownership", "Lock-free Queues"]);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn zero_questions_rejected() {
        let err = Config::from_toml("num_questions = 0").unwrap_err();
        assert!(format!("{err:#}").contains("num_questions"));
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(Config::from_toml("langauge = \"typo\"").is_err());
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(&missing)).is_err());

        let present = dir.path().join("flashcards.toml");
        fs::write(&present, "model = \"gpt-4o-mini\"\n").unwrap();
        let config = Config::load(Some(&present)).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
    }
}
