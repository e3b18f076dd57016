//! The `burnwatch backup` command.

use anyhow::{Context, Result};

use burnwatch_core::DataStore;

use crate::config::BurnwatchConfig;

pub fn execute(config: &BurnwatchConfig, clear: bool) -> Result<()> {
    let store = DataStore::open(&config.data_dir)
        .with_context(|| format!("failed to open data directory {}", config.data_dir.display()))?;

    let written = store.backup().context("backup failed")?;
    if written.is_empty() {
        println!("Nothing to back up in {}", config.data_dir.display());
    } else {
        for path in &written {
            println!("Backed up {}", path.display());
        }
    }

    if clear {
        store.delete_all().context("failed to delete data files")?;
        println!("Deleted data files in {}", config.data_dir.display());
    }

    Ok(())
}
