//! TOML unit parser.
//!
//! Loads units from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::QuizConfig;
use crate::extract::{Extractors, MarkedExtractor, PlainExtractor};
use crate::model::{Unit, UnitKind, Verse};
use crate::tokenizer::StopWords;
use crate::worksheet::build_worksheet;

/// Intermediate TOML structure for parsing unit files.
#[derive(Debug, Deserialize)]
struct TomlUnitFile {
    unit: TomlUnit,
}

#[derive(Debug, Deserialize)]
struct TomlUnit {
    id: String,
    name: String,
    #[serde(default = "default_kind_str")]
    kind: String,
    #[serde(default)]
    verses: Vec<String>,
    #[serde(default)]
    worksheet: String,
}

fn default_kind_str() -> String {
    "verses".to_string()
}

/// Parse a single TOML file into a `Unit`.
pub fn parse_unit(path: &Path) -> Result<Unit> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read unit file: {}", path.display()))?;

    parse_unit_str(&content, path)
}

/// Parse a TOML string into a `Unit` (useful for testing).
pub fn parse_unit_str(content: &str, source_path: &Path) -> Result<Unit> {
    let parsed: TomlUnitFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let kind: UnitKind = parsed
        .unit
        .kind
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}: {}", source_path.display(), e))?;

    Ok(Unit {
        id: parsed.unit.id,
        name: parsed.unit.name,
        kind,
        verses: parsed.unit.verses,
        worksheet: parsed.unit.worksheet,
    })
}

/// Recursively load all `.toml` unit files from a directory.
pub fn load_unit_directory(dir: &Path) -> Result<Vec<Unit>> {
    let mut units = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            units.extend(load_unit_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_unit(&path) {
                Ok(unit) => units.push(unit),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(units)
}

/// A warning from unit validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// 1-based verse line (if applicable).
    pub line: Option<usize>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn unit(message: impl Into<String>) -> Self {
        Self {
            line: None,
            message: message.into(),
        }
    }

    fn at(line: usize, message: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            message: message.into(),
        }
    }
}

/// Validate a unit with the default configuration.
pub fn validate_unit(unit: &Unit) -> Vec<ValidationWarning> {
    validate_unit_with(unit, &QuizConfig::default())
}

/// Validate a unit for common issues, using the configured stop words and
/// span threshold to decide whether a verse can be blanked.
pub fn validate_unit_with(unit: &Unit, config: &QuizConfig) -> Vec<ValidationWarning> {
    match unit.kind {
        UnitKind::Verses => validate_verses(unit, config),
        UnitKind::Worksheet => validate_worksheet(unit),
    }
}

fn validate_verses(unit: &Unit, config: &QuizConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if unit.verses.is_empty() {
        warnings.push(ValidationWarning::unit("unit has no verses"));
    }
    if !unit.worksheet.trim().is_empty() {
        warnings.push(ValidationWarning::unit(
            "worksheet text is ignored for a verses unit",
        ));
    }

    let extractors = Extractors::new(
        PlainExtractor::new(
            StopWords::with_extra(config.extra_stop_words.iter().cloned()),
            config.merge_cap,
        ),
        MarkedExtractor::new(config.short_span_chars),
    );
    let mut seen_refs = HashSet::new();

    for (i, raw) in unit.verses.iter().enumerate() {
        let line = i + 1;

        if !braces_balanced(raw) {
            warnings.push(ValidationWarning::at(line, "unbalanced {} markup"));
        }

        let verse = match Verse::parse(raw, line) {
            Ok(verse) => verse,
            Err(e) => {
                warnings.push(ValidationWarning::at(line, e.to_string()));
                continue;
            }
        };

        if verse.tagged && !seen_refs.insert(verse.reference.clone()) {
            warnings.push(ValidationWarning::at(
                line,
                format!("duplicate reference: {}", verse.reference),
            ));
        }

        let chunks = extractors.for_body(&verse.body).extract(&verse.body);
        if !chunks.iter().any(|c| c.eligible) {
            warnings.push(ValidationWarning::at(
                line,
                format!(
                    "verse {} has no blankable chunk and can only be asked whole",
                    verse.reference
                ),
            ));
        }
    }

    warnings
}

fn validate_worksheet(unit: &Unit) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if !unit.verses.is_empty() {
        warnings.push(ValidationWarning::unit(
            "verse lines are ignored for a worksheet unit",
        ));
    }
    if unit.worksheet.trim().is_empty() {
        warnings.push(ValidationWarning::unit("worksheet is empty"));
    } else if build_worksheet(&unit.worksheet).1.is_empty() {
        warnings.push(ValidationWarning::unit(
            "worksheet has no (answer) blanks",
        ));
    }

    warnings
}

/// Whether `{` and `}` pair up without nesting.
fn braces_balanced(line: &str) -> bool {
    let mut open = false;
    for ch in line.chars() {
        match ch {
            '{' if open => return false,
            '{' => open = true,
            '}' if !open => return false,
            '}' => open = false,
            _ => {}
        }
    }
    !open
}
