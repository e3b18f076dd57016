//! The `burnwatch mood` command.

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use burnwatch_core::{Entry, MoodLog};

use super::open_journal;
use crate::config::BurnwatchConfig;
use crate::MoodAction;

pub fn execute(config: &BurnwatchConfig, action: MoodAction) -> Result<()> {
    let mut journal = open_journal(config)?;

    match action {
        MoodAction::Add {
            mood,
            stress,
            notes,
        } => {
            let log = journal
                .log_mood(mood, stress, &notes)
                .context("failed to log mood")?;
            println!(
                "Logged mood {}/10, stress {}/10 ({})",
                log.mood_level(),
                log.stress_level(),
                log.entry_id()
            );
        }
        MoodAction::History { limit } => {
            let limit = limit.unwrap_or(config.history_limit);
            let moods = journal.moods();
            if moods.is_empty() {
                println!("No mood entries yet.");
                return Ok(());
            }
            let mut recent = moods.recent(limit);
            recent.reverse();
            println!("{}", history_table(&recent));
            println!(
                "Overall average: mood {:.1}/10, stress {:.1}/10 over {} entries",
                moods.average_mood_all(),
                moods.average_stress_all(),
                moods.len()
            );
        }
    }

    Ok(())
}

fn history_table(logs: &[MoodLog]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Logged", "Mood", "Stress", "Notes"]);
    for log in logs {
        table.add_row(vec![
            Cell::new(log.entry_id()),
            Cell::new(log.timestamp().format("%Y-%m-%d %H:%M")),
            Cell::new(format!("{}/10", log.mood_level())),
            Cell::new(format!("{}/10", log.stress_level())),
            Cell::new(log.notes()),
        ]);
    }
    table
}
