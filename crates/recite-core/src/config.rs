//! Quiz configuration.
//!
//! Every tunable constant of the blank-selection pipeline lives here so that
//! chapter and worksheet variants can pick their own values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings for quiz generation and grading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Maximum number of quiz items per session.
    #[serde(default = "default_item_cap")]
    pub item_cap: usize,
    /// Fraction of eligible chunks to blank out.
    #[serde(default = "default_density")]
    pub density: f64,
    /// Maximum number of tokens merged onto a starting token.
    #[serde(default = "default_merge_cap")]
    pub merge_cap: usize,
    /// Probability that a verse is asked as a whole-verse item.
    #[serde(default = "default_whole_verse_probability")]
    pub whole_verse_probability: f64,
    /// `{}` spans shorter than this many characters are preferred as blanks.
    #[serde(default = "default_short_span_chars")]
    pub short_span_chars: usize,
    /// Grade with all internal whitespace removed.
    #[serde(default)]
    pub ignore_spaces: bool,
    /// Stop words added to the built-in list.
    #[serde(default)]
    pub extra_stop_words: Vec<String>,
}

fn default_item_cap() -> usize {
    11
}
fn default_density() -> f64 {
    0.28
}
fn default_merge_cap() -> usize {
    3
}
fn default_whole_verse_probability() -> f64 {
    0.4
}
fn default_short_span_chars() -> usize {
    10
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            item_cap: default_item_cap(),
            density: default_density(),
            merge_cap: default_merge_cap(),
            whole_verse_probability: default_whole_verse_probability(),
            short_span_chars: default_short_span_chars(),
            ignore_spaces: false,
            extra_stop_words: Vec::new(),
        }
    }
}

impl QuizConfig {
    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.item_cap >= 1, "item_cap must be at least 1");
        anyhow::ensure!(
            self.density > 0.0 && self.density <= 1.0,
            "density must be in (0, 1], got {}",
            self.density
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.whole_verse_probability),
            "whole_verse_probability must be in [0, 1], got {}",
            self.whole_verse_probability
        );
        anyhow::ensure!(
            self.short_span_chars >= 1,
            "short_span_chars must be at least 1"
        );
        Ok(())
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `recite.toml` in the current directory
/// 2. `~/.config/recite/config.toml`
///
/// Environment variable overrides: `RECITE_IGNORE_SPACES`, `RECITE_ITEM_CAP`.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("recite.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    config.validate()?;

    Ok(config)
}

/// Parse a TOML string into a `QuizConfig`.
pub fn parse_config_str(content: &str) -> Result<QuizConfig> {
    Ok(toml::from_str::<QuizConfig>(content)?)
}

fn apply_env_overrides(config: &mut QuizConfig) -> Result<()> {
    if let Ok(value) = std::env::var("RECITE_IGNORE_SPACES") {
        config.ignore_spaces = parse_flag(&value)
            .with_context(|| format!("invalid RECITE_IGNORE_SPACES: {value:?}"))?;
    }
    if let Ok(value) = std::env::var("RECITE_ITEM_CAP") {
        config.item_cap = value
            .trim()
            .parse()
            .with_context(|| format!("invalid RECITE_ITEM_CAP: {value:?}"))?;
    }
    Ok(())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("expected a boolean, got {other:?}"),
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("recite"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = QuizConfig::default();
        assert_eq!(config.item_cap, 11);
        assert_eq!(config.merge_cap, 3);
        assert!((config.density - 0.28).abs() < f64::EPSILON);
        assert!(!config.ignore_spaces);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_config_keeps_defaults() {
        let config = parse_config_str(
            r#"
item_cap = 13
density = 0.25
ignore_spaces = true
extra_stop_words = ["일곱"]
"#,
        )
        .unwrap();
        assert_eq!(config.item_cap, 13);
        assert!((config.density - 0.25).abs() < f64::EPSILON);
        assert!(config.ignore_spaces);
        assert_eq!(config.merge_cap, 3);
        assert_eq!(config.extra_stop_words, vec!["일곱"]);
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let mut config = QuizConfig {
            density: 0.0,
            ..QuizConfig::default()
        };
        assert!(config.validate().is_err());
        config.density = 0.3;
        config.whole_verse_probability = 1.5;
        assert!(config.validate().is_err());
        config.whole_verse_probability = 0.7;
        config.item_cap = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recite.toml");
        std::fs::write(&path, "merge_cap = 4\nwhole_verse_probability = 0.7\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.merge_cap, 4);
        assert!((config.whole_verse_probability - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn load_missing_explicit_path_fails() {
        let result = load_config_from(Some(Path::new("no/such/recite.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn parse_flag_values() {
        assert!(parse_flag("TRUE").unwrap());
        assert!(!parse_flag("off").unwrap());
        assert!(parse_flag("maybe").is_err());
    }
}
