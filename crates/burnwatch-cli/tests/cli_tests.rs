//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use chrono::{Duration, Local};
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the caller's config, home and data directory.
fn burnwatch(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("burnwatch").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("BURNWATCH_DATA_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn with_data(dir: &TempDir) -> Command {
    let mut cmd = burnwatch(dir);
    cmd.arg("--data-dir").arg(dir.path().join("data"));
    cmd
}

/// Pull the id out of "Added task <name> (<id>)".
fn added_task_id(stdout: &[u8]) -> String {
    let text = String::from_utf8_lossy(stdout);
    let start = text.rfind('(').unwrap() + 1;
    let end = text.rfind(')').unwrap();
    text[start..end].to_string()
}

fn add_task(dir: &TempDir, name: &str, extra: &[&str]) -> String {
    let output = with_data(dir)
        .args(["task", "add", "--name", name])
        .args(extra)
        .output()
        .unwrap();
    assert!(output.status.success());
    added_task_id(&output.stdout)
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    burnwatch(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("burnout"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    burnwatch(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("burnwatch"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    burnwatch(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created burnwatch.toml"));

    assert!(dir.path().join("burnwatch.toml").exists());
    assert!(dir.path().join("data").is_dir());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();
    burnwatch(&dir).arg("init").assert().success();
    burnwatch(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    burnwatch(&dir)
        .args(["--config", "nope.toml", "analyze"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn data_dir_from_environment() {
    let dir = TempDir::new().unwrap();
    burnwatch(&dir)
        .env("BURNWATCH_DATA_DIR", dir.path().join("env-data"))
        .args(["mood", "add", "--mood", "6", "--stress", "4"])
        .assert()
        .success();
    assert!(dir.path().join("env-data").join("mood_logs.txt").exists());
}

#[test]
fn profile_set_and_show() {
    let dir = TempDir::new().unwrap();

    with_data(&dir)
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No profile yet"));

    with_data(&dir)
        .args([
            "profile", "set", "--id", "S100", "--name", "Ada Lovelace", "--age", "21", "--course",
            "Maths | CS",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile saved."));

    with_data(&dir)
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada Lovelace"))
        .stdout(predicate::str::contains("Maths | CS"));

    let saved = std::fs::read_to_string(dir.path().join("data/user_profile.txt")).unwrap();
    assert_eq!(saved, "S100|Ada Lovelace||21|Maths &#124; CS\n");

    with_data(&dir)
        .args(["profile", "edit", "--email", "ada@uni.edu"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Profile updated: Ada Lovelace (S100), ada@uni.edu, age 21, Maths | CS",
        ));
    let saved = std::fs::read_to_string(dir.path().join("data/user_profile.txt")).unwrap();
    assert_eq!(saved, "S100|Ada Lovelace|ada@uni.edu|21|Maths &#124; CS\n");
}

#[test]
fn profile_edit_needs_existing_profile() {
    let dir = TempDir::new().unwrap();
    with_data(&dir)
        .args(["profile", "edit", "--course", "Physics"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no profile yet"));
}

#[test]
fn profile_rejects_bad_age() {
    let dir = TempDir::new().unwrap();
    with_data(&dir)
        .args(["profile", "set", "--id", "S1", "--name", "X", "--age", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("age must be positive"));
}

#[test]
fn mood_add_validates_range() {
    let dir = TempDir::new().unwrap();
    with_data(&dir)
        .args(["mood", "add", "--mood", "11", "--stress", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 10"));
    assert!(!dir.path().join("data/mood_logs.txt").exists());
}

#[test]
fn mood_history_lists_latest_first() {
    let dir = TempDir::new().unwrap();
    for (mood, notes) in [("3", "first"), ("5", "second"), ("8", "third")] {
        with_data(&dir)
            .args(["mood", "add", "--mood", mood, "--stress", "4", "--notes", notes])
            .assert()
            .success();
    }

    let output = with_data(&dir)
        .args(["mood", "history", "--limit", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("third"));
    assert!(stdout.contains("second"));
    assert!(!stdout.contains("first"));
    assert!(stdout.contains("over 3 entries"));
}

#[test]
fn task_lifecycle() {
    let dir = TempDir::new().unwrap();
    let due = (Local::now().date_naive() + Duration::days(2)).to_string();
    let id = add_task(&dir, "Lab report", &["--due", &due, "--priority", "high"]);
    add_task(&dir, "Reading", &["--priority", "low"]);

    with_data(&dir)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lab report"))
        .stdout(predicate::str::contains("2 total, 0 completed"));

    with_data(&dir)
        .args(["task", "list", "--upcoming"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lab report"))
        .stdout(predicate::str::contains("Reading").not());

    with_data(&dir)
        .args(["task", "update", &id, "--status", "in progress", "--priority", "none"])
        .assert()
        .success();
    with_data(&dir)
        .args(["task", "update", &id, "--notes", "room 4"])
        .assert()
        .success();
    let saved = std::fs::read_to_string(dir.path().join("data/tasks.txt")).unwrap();
    assert!(saved.contains("|In Progress|room 4\n"));
    with_data(&dir)
        .args(["task", "list", "--status", "In Progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lab report"));

    with_data(&dir).args(["task", "done", &id]).assert().success();
    with_data(&dir)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 total, 1 completed (50.0%)"));

    with_data(&dir).args(["task", "remove", &id]).assert().success();
    with_data(&dir)
        .args(["task", "remove", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no task with id"));
}

#[test]
fn task_add_rejects_bad_input() {
    let dir = TempDir::new().unwrap();
    with_data(&dir)
        .args(["task", "add", "--name", "X", "--due", "tomorrow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid due date"));
    with_data(&dir)
        .args(["task", "add", "--name", "X", "--priority", "urgent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown priority"));
    with_data(&dir)
        .args(["task", "add", "--name", "   "])
        .assert()
        .failure();
}

#[test]
fn report_on_empty_data() {
    let dir = TempDir::new().unwrap();
    with_data(&dir)
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("No mood entries recorded during this period."))
        .stdout(predicate::str::contains("No tasks recorded."))
        .stdout(predicate::str::contains("Overall Risk Level: LOW"))
        .stdout(predicate::str::contains("Burnout Score: 0/10"));
}

#[test]
fn report_json_and_export() {
    let dir = TempDir::new().unwrap();
    for stress in ["8", "9", "8"] {
        with_data(&dir)
            .args(["mood", "add", "--mood", "3", "--stress", stress])
            .assert()
            .success();
    }

    let output = with_data(&dir)
        .args(["report", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["mood"]["entries"], 3);
    assert_eq!(json["burnout"]["breakdown"]["consecutive_stress"], 2);
    assert_eq!(json["burnout"]["tier"], "HIGH");

    with_data(&dir)
        .args(["report", "--export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("weekly_report_"));
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let exported = dir.path().join(format!("weekly_report_{today}.txt"));
    let text = std::fs::read_to_string(exported).unwrap();
    assert!(text.contains("HIGH BURNOUT RISK DETECTED"));

    with_data(&dir)
        .args(["report", "--format", "json", "--export"])
        .assert()
        .success();
    let exported = dir.path().join(format!("weekly_report_{today}.json"));
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(exported).unwrap()).unwrap();
    assert_eq!(json["burnout"]["tier"], "HIGH");

    let out = dir.path().join("out/report.txt");
    with_data(&dir)
        .args(["report", "--output"])
        .arg(&out)
        .assert()
        .success();
    assert!(out.exists());

    with_data(&dir)
        .args(["report", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn analyze_prints_breakdown() {
    let dir = TempDir::new().unwrap();
    with_data(&dir)
        .arg("analyze")
        .assert()
        .success()
        .stdout(predicate::str::contains("BURNOUT RISK ANALYSIS"))
        .stdout(predicate::str::contains("Burnout score: 0/10"));
}

#[test]
fn corrupt_lines_warn_but_load() {
    let dir = TempDir::new().unwrap();
    with_data(&dir)
        .args(["mood", "add", "--mood", "5", "--stress", "5"])
        .assert()
        .success();
    let path = dir.path().join("data/mood_logs.txt");
    let mut content = std::fs::read_to_string(&path).unwrap();
    content.push_str("this is not a record\n");
    std::fs::write(&path, content).unwrap();

    with_data(&dir)
        .args(["mood", "history"])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipped 1 unreadable line"))
        .stdout(predicate::str::contains("over 1 entries"));
}

#[test]
fn backup_then_clear() {
    let dir = TempDir::new().unwrap();
    with_data(&dir)
        .args(["mood", "add", "--mood", "5", "--stress", "5"])
        .assert()
        .success();

    with_data(&dir)
        .args(["backup", "--clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backed up"))
        .stdout(predicate::str::contains("Deleted data files"));

    assert!(dir.path().join("data/mood_logs.txt.backup").exists());
    assert!(!dir.path().join("data/mood_logs.txt").exists());
}
