//! The `burnwatch profile` command.

use anyhow::{Context, Result};

use burnwatch_core::User;

use super::open_journal;
use crate::config::BurnwatchConfig;
use crate::ProfileAction;

pub fn execute(config: &BurnwatchConfig, action: ProfileAction) -> Result<()> {
    let mut journal = open_journal(config)?;

    match action {
        ProfileAction::Set {
            id,
            name,
            email,
            age,
            course,
        } => {
            let user = User::new(id, name, email, age, course).context("invalid profile")?;
            journal.set_profile(user).context("failed to save profile")?;
            println!("Profile saved.");
        }
        ProfileAction::Edit { email, course } => {
            let Some(mut user) = journal.profile().cloned() else {
                anyhow::bail!("no profile yet; run `burnwatch profile set` first");
            };
            if let Some(email) = email {
                user.set_email(email);
            }
            if let Some(course) = course {
                user.set_course(course);
            }
            journal
                .set_profile(user.clone())
                .context("failed to save profile")?;
            println!("Profile updated: {user}");
        }
        ProfileAction::Show => match journal.profile() {
            Some(user) => {
                println!("Student ID: {}", user.student_id());
                println!("Name:       {}", user.full_name());
                println!("Email:      {}", user.email());
                println!("Age:        {}", user.age());
                println!("Course:     {}", user.course());
            }
            None => println!("No profile yet. Run `burnwatch profile set` to create one."),
        },
    }

    Ok(())
}
