//! The `burnwatch analyze` command.

use anyhow::Result;

use super::open_journal;
use crate::config::BurnwatchConfig;

pub fn execute(config: &BurnwatchConfig) -> Result<()> {
    let journal = open_journal(config)?;
    print!("{}", journal.analyzer().detailed_analysis());
    Ok(())
}
