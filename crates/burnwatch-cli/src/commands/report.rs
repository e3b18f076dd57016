//! The `burnwatch report` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use burnwatch_report::{export_report, write_report, ReportFormat, ReportGenerator, WeeklySnapshot};

use super::open_journal;
use crate::config::BurnwatchConfig;

pub fn execute(
    config: &BurnwatchConfig,
    format: &str,
    output: Option<PathBuf>,
    export: bool,
) -> Result<()> {
    let format: ReportFormat = format.parse().map_err(anyhow::Error::msg)?;
    let journal = open_journal(config)?;
    let generator =
        ReportGenerator::for_journal(&journal).with_upcoming_days(config.upcoming_days);

    let content = match format {
        ReportFormat::Text => generator.generate(),
        ReportFormat::Json => WeeklySnapshot::capture(&generator)
            .to_json()
            .context("failed to serialize report")?,
    };

    if export {
        let today = journal.clock().today();
        let path = export_report(&config.report_dir, today, format, &content)?;
        println!("Report exported to {}", path.display());
    } else if let Some(path) = output {
        write_report(&path, &content)?;
        println!("Report written to {}", path.display());
    } else {
        print!("{content}");
        if !content.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}
