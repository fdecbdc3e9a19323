//! The `recite validate` command.

use std::path::PathBuf;

use anyhow::Result;

use recite_core::config::load_config_from;
use recite_core::parser;
use recite_core::worksheet::build_worksheet;
use recite_core::{Unit, UnitKind};

pub fn execute(unit_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let units = if unit_path.is_dir() {
        parser::load_unit_directory(&unit_path)?
    } else {
        vec![parser::parse_unit(&unit_path)?]
    };

    let mut total_warnings = 0;

    for unit in &units {
        println!("Unit: {} ({})", unit.name, describe(unit));

        let warnings = parser::validate_unit_with(unit, &config);
        for w in &warnings {
            let prefix = w
                .line
                .map(|line| format!("  [line {line}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All units valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn describe(unit: &Unit) -> String {
    match unit.kind {
        UnitKind::Verses => format!("{} verses", unit.verses.len()),
        UnitKind::Worksheet => format!("worksheet, {} blanks", build_worksheet(&unit.worksheet).1.len()),
    }
}
