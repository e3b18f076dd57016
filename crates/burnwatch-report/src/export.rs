//! Writing reports to disk.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown format: {other} (expected text or json)")),
        }
    }
}

/// `weekly_report_<YYYY-MM-DD>.<ext>`
pub fn default_file_name(date: NaiveDate, format: ReportFormat) -> String {
    format!(
        "weekly_report_{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_report(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    tracing::info!("wrote report to {}", path.display());
    Ok(())
}

/// Write a report into `dir` under its dated default name.
pub fn export_report(
    dir: &Path,
    date: NaiveDate,
    format: ReportFormat,
    content: &str,
) -> Result<PathBuf> {
    let path = dir.join(default_file_name(date, format));
    write_report(&path, content)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    #[test]
    fn dated_file_name() {
        assert_eq!(
            default_file_name(date(), ReportFormat::Text),
            "weekly_report_2025-03-07.txt"
        );
        assert_eq!(
            default_file_name(date(), ReportFormat::Json),
            "weekly_report_2025-03-07.json"
        );
    }

    #[test]
    fn format_parsing() {
        assert_eq!("text".parse::<ReportFormat>(), Ok(ReportFormat::Text));
        assert_eq!("JSON".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        let err = "html".parse::<ReportFormat>().unwrap_err();
        assert!(err.contains("unknown format: html"));
    }

    #[test]
    fn export_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("reports").join("weekly");
        let path = export_report(&target, date(), ReportFormat::Text, "hello\n").unwrap();

        assert_eq!(path, target.join("weekly_report_2025-03-07.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello\n");
    }

    #[test]
    fn write_failure_has_context() {
        let dir = tempfile::tempdir().unwrap();
        // the target path is an existing directory
        let err = write_report(dir.path(), "x").unwrap_err();
        assert!(format!("{err:#}").contains("failed to write report"));
    }
}
