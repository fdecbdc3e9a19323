//! The `recite init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("recite.toml").exists() {
        println!("recite.toml already exists, skipping.");
    } else {
        std::fs::write("recite.toml", SAMPLE_CONFIG)?;
        println!("Created recite.toml");
    }

    std::fs::create_dir_all("units")?;
    let example_path = std::path::Path::new("units/example.toml");
    if example_path.exists() {
        println!("units/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_UNIT)?;
        println!("Created units/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add your verses to units/example.toml");
    println!("  2. Run: recite validate --unit units/example.toml");
    println!("  3. Run: recite quiz --unit units/example.toml --output session.json");
    println!("  4. Run: recite grade --session session.json --answers answers.txt");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# recite configuration

# Maximum number of quiz items per session
item_cap = 11
# Fraction of blankable chunks turned into blanks
density = 0.28
# Eligible words merged onto a starting word
merge_cap = 3
# Chance that a verse is asked as a whole
whole_verse_probability = 0.4
# {marked} spans shorter than this are preferred as blanks
short_span_chars = 10
# Ignore all spaces when grading verse quizzes
ignore_spaces = false
# Words never blanked, in addition to the built-in list
extra_stop_words = []
"#;

const EXAMPLE_UNIT: &str = r#"[unit]
id = "example"
name = "요한계시록 1장"
kind = "verses"
verses = [
    "[1:1] 예수 그리스도의 계시라 이는 하나님이 그에게 주사 반드시 속히 될 일을 그 종들에게 보이시려고",
    "[1:3] 이 예언의 말씀을 읽는 자와 듣는 자들과 그 가운데 기록한 것을 지키는 자들이 복이 있나니 때가 가까움이라",
    "[1:8] 주 하나님이 가라사대 나는 {알파와 오메가}라 이제도 있고 전에도 있었고 장차 올 자요 {전능한 자}라 하시더라",
]
"#;
