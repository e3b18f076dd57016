//! Subcommand implementations.

use std::sync::Arc;

use anyhow::{Context, Result};

use burnwatch_core::{Journal, SystemClock};

use crate::config::BurnwatchConfig;

pub mod analyze;
pub mod backup;
pub mod init;
pub mod mood;
pub mod profile;
pub mod report;
pub mod task;

/// Open the configured data directory against the system clock.
pub fn open_journal(config: &BurnwatchConfig) -> Result<Journal> {
    let (journal, summary) = Journal::open(&config.data_dir, Arc::new(SystemClock))
        .with_context(|| format!("failed to open data directory {}", config.data_dir.display()))?;
    if summary.skipped > 0 {
        eprintln!(
            "Warning: skipped {} unreadable line(s) in {}",
            summary.skipped,
            config.data_dir.display()
        );
    }
    for failure in &summary.failures {
        eprintln!("Warning: {failure}");
    }
    Ok(journal)
}
