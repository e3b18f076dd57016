//! The `burnwatch init` command.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{BurnwatchConfig, LOCAL_CONFIG};

pub fn execute(config: &BurnwatchConfig) -> Result<()> {
    if Path::new(LOCAL_CONFIG).exists() {
        println!("{LOCAL_CONFIG} already exists, skipping.");
    } else {
        std::fs::write(LOCAL_CONFIG, SAMPLE_CONFIG)
            .with_context(|| format!("failed to write {LOCAL_CONFIG}"))?;
        println!("Created {LOCAL_CONFIG}");
    }

    if config.data_dir.is_dir() {
        println!("{} already exists, skipping.", config.data_dir.display());
    } else {
        std::fs::create_dir_all(&config.data_dir)
            .with_context(|| format!("failed to create {}", config.data_dir.display()))?;
        println!("Created {}", config.data_dir.display());
    }

    println!("\nNext steps:");
    println!("  1. Run: burnwatch profile set --id <student id> --name <name> --age <age>");
    println!("  2. Run: burnwatch mood add --mood 7 --stress 4");
    println!("  3. Run: burnwatch report");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# burnwatch configuration

# Where the profile, mood log and task files live. ${VARS} are expanded.
data_dir = "./data"

# Look-ahead for upcoming task lists, in days.
upcoming_days = 7

# Entries shown by `burnwatch mood history`.
history_limit = 10

# Where `burnwatch report --export` writes weekly_report_<date>.txt.
report_dir = "."
"#;
