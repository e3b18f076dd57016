//! On-disk layout: one text file per record kind inside a data directory.
//!
//! Full saves write a temp file in the same directory and rename it over
//! the target, so a crash mid-save leaves the previous file intact. Appends
//! add a single line to the end of the existing file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::codec;
use crate::error::{CoreError, Result};
use crate::model::{MoodLog, Task, User};
use crate::workload::dedup_by_id;

pub const USER_FILE: &str = "user_profile.txt";
pub const MOOD_FILE: &str = "mood_logs.txt";
pub const TASK_FILE: &str = "tasks.txt";
const BACKUP_SUFFIX: &str = ".backup";

/// Records decoded from a file plus how many lines were skipped as malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
        }
    }
}

/// File-backed store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct DataStore {
    dir: PathBuf,
}

impl DataStore {
    /// Open a store, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| CoreError::storage(&dir, e))?;
            tracing::info!("created data directory {}", dir.display());
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }

    pub fn mood_path(&self) -> PathBuf {
        self.dir.join(MOOD_FILE)
    }

    pub fn task_path(&self) -> PathBuf {
        self.dir.join(TASK_FILE)
    }

    pub fn profile_exists(&self) -> bool {
        self.user_path().exists()
    }

    // -- user ---------------------------------------------------------------

    /// Load the profile. A missing or blank file is `Ok(None)`; a malformed
    /// line is an error and yields no profile.
    pub fn load_user(&self) -> Result<Option<User>> {
        let path = self.user_path();
        let Some(content) = read_optional(&path)? else {
            return Ok(None);
        };
        match content.split('\n').find(|l| !l.trim().is_empty()) {
            Some(line) => codec::decode_user(line).map(Some).map_err(|e| e.at_line(1)),
            None => Ok(None),
        }
    }

    /// Overwrite the profile.
    pub fn save_user(&self, user: &User) -> Result<()> {
        write_atomic(&self.user_path(), std::iter::once(codec::encode_user(user)))?;
        tracing::info!("saved user profile");
        Ok(())
    }

    // -- mood logs ----------------------------------------------------------

    pub fn load_moods(&self) -> Result<Loaded<MoodLog>> {
        let loaded = load_lines(&self.mood_path(), codec::decode_mood)?;
        tracing::info!("loaded {} mood log(s)", loaded.records.len());
        Ok(loaded)
    }

    pub fn save_moods(&self, logs: &[MoodLog]) -> Result<()> {
        write_atomic(&self.mood_path(), logs.iter().map(codec::encode_mood))?;
        tracing::info!("saved {} mood log(s)", logs.len());
        Ok(())
    }

    pub fn append_mood(&self, log: &MoodLog) -> Result<()> {
        append_line(&self.mood_path(), &codec::encode_mood(log))
    }

    // -- tasks --------------------------------------------------------------

    /// Load tasks. Only the first line for each entry id is kept; later
    /// duplicates are counted as skipped.
    pub fn load_tasks(&self) -> Result<Loaded<Task>> {
        let mut loaded = load_lines(&self.task_path(), codec::decode_task)?;
        let (records, dropped) = dedup_by_id(loaded.records);
        loaded.records = records;
        loaded.skipped += dropped;
        tracing::info!("loaded {} task(s)", loaded.records.len());
        Ok(loaded)
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        write_atomic(&self.task_path(), tasks.iter().map(codec::encode_task))?;
        tracing::info!("saved {} task(s)", tasks.len());
        Ok(())
    }

    pub fn append_task(&self, task: &Task) -> Result<()> {
        append_line(&self.task_path(), &codec::encode_task(task))
    }

    // -- maintenance --------------------------------------------------------

    /// Copy every existing data file to `<name>.backup`, replacing older
    /// backups. Returns the backup paths written.
    pub fn backup(&self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for path in [self.user_path(), self.mood_path(), self.task_path()] {
            if !path.exists() {
                continue;
            }
            let mut name = path.as_os_str().to_owned();
            name.push(BACKUP_SUFFIX);
            let target = PathBuf::from(name);
            fs::copy(&path, &target).map_err(|e| CoreError::storage(&target, e))?;
            written.push(target);
        }
        tracing::info!("backed up {} file(s)", written.len());
        Ok(written)
    }

    /// Delete the three data files. Backups are left alone.
    pub fn delete_all(&self) -> Result<()> {
        for path in [self.user_path(), self.mood_path(), self.task_path()] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(CoreError::storage(&path, e)),
            }
        }
        tracing::info!("deleted all data in {}", self.dir.display());
        Ok(())
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CoreError::storage(path, e)),
    }
}

/// Decode every non-blank line, skipping (and logging) the ones that fail.
/// Lines end at `\n` only, so a trailing `\r` stays part of the last field.
fn load_lines<T>(path: &Path, decode: impl Fn(&str) -> Result<T>) -> Result<Loaded<T>> {
    let Some(content) = read_optional(path)? else {
        return Ok(Loaded::default());
    };

    let mut loaded = Loaded::default();
    for (idx, line) in content.split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match decode(line) {
            Ok(record) => loaded.records.push(record),
            Err(e) => {
                tracing::warn!("skipping {}: {}", path.display(), e.at_line(idx + 1));
                loaded.skipped += 1;
            }
        }
    }
    Ok(loaded)
}

fn write_atomic(path: &Path, lines: impl Iterator<Item = String>) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| CoreError::storage(dir, e))?;
    for line in lines {
        writeln!(tmp, "{line}").map_err(|e| CoreError::storage(tmp.path(), e))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(|e| CoreError::storage(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| CoreError::storage(path, e.error))?;
    Ok(())
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CoreError::storage(path, e))?;
    writeln!(file, "{line}").map_err(|e| CoreError::storage(path, e))?;
    tracing::debug!("appended record to {}", path.display());
    Ok(())
}
