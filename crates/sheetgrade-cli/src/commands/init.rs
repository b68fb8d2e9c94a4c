//! The `sheetgrade init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    let path = Path::new("sheetgrade.toml");
    if path.exists() {
        println!("sheetgrade.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG).context("failed to write sheetgrade.toml")?;
        println!("Created sheetgrade.toml");
    }

    println!("\nNext steps:");
    println!("  1. Pick a matching method in sheetgrade.toml");
    println!("  2. Run: sheetgrade validate --questions paper.txt --answers key.txt");
    println!("  3. Run: sheetgrade grade --key key.txt --submission answers.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# sheetgrade configuration

# How free-text answers are compared: "exact", "fuzzy" or "keyword".
# Answers whose key is a single option letter (A-D) are always compared
# as multiple choice.
method = "fuzzy"

# Similarity (fuzzy) or keyword-coverage (keyword) needed to accept an
# answer, between 0 and 1. Leave unset for the method's default.
# threshold = 0.75

# Score percentage needed to pass.
passing_percentage = 60.0

# Whether exact matching distinguishes upper and lower case.
case_sensitive = false
"#;
