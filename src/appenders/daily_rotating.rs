//! Daily-rotating file sink

use crate::core::error::{LoggerError, Result};
use crate::core::sink::Sink;
use chrono::{DateTime, Local, NaiveDate};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// File sink that rotates on calendar-day boundaries in local time. The
/// first write after a day change renames the active file to
/// `base.YYYY-MM-DD` (the day it covers) and starts a fresh file.
///
/// When the sink opens an existing file, the covered day is taken from
/// the file's modification time, so a process restarted after midnight
/// still archives yesterday's records under yesterday's date.
pub struct DailyRotatingSink {
    base_path: PathBuf,
    state: Mutex<DayState>,
}

struct DayState {
    writer: Option<BufWriter<File>>,
    current_day: NaiveDate,
}

impl DailyRotatingSink {
    /// Open (or create) the sink at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent directory cannot be
    /// created.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if let Some(parent) = base_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    LoggerError::file_sink(
                        base_path.display().to_string(),
                        format!("failed to create directory '{}': {}", parent.display(), e),
                    )
                })?;
            }
        }

        let current_day = Self::covered_day(&base_path);
        let writer = Self::open_file(&base_path)?;

        Ok(Self {
            base_path,
            state: Mutex::new(DayState {
                writer: Some(writer),
                current_day,
            }),
        })
    }

    /// Day the existing file's content belongs to, from its mtime; today
    /// when the file is new or the metadata is unavailable.
    fn covered_day(path: &Path) -> NaiveDate {
        fs::metadata(path)
            .and_then(|m| m.modified())
            .map(|mtime| DateTime::<Local>::from(mtime).date_naive())
            .unwrap_or_else(|_| Local::now().date_naive())
    }

    fn open_file(path: &Path) -> Result<BufWriter<File>> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::file_sink(
                    path.display().to_string(),
                    format!("failed to open: {}", e),
                )
            })?;
        Ok(BufWriter::new(file))
    }

    fn archive_path(&self, day: NaiveDate) -> PathBuf {
        let mut path = self.base_path.clone();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.log");
        path.set_file_name(format!("{}.{}", filename, day.format("%Y-%m-%d")));
        path
    }

    fn rotate(&self, state: &mut DayState, today: NaiveDate) -> Result<()> {
        if let Some(mut writer) = state.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("failed to flush before rotation: {}", e),
                )
            })?;
        }

        if self.base_path.exists() {
            let archive = self.archive_path(state.current_day);
            fs::rename(&self.base_path, &archive).map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("failed to archive as '{}': {}", archive.display(), e),
                )
            })?;
        }

        state.writer = Some(Self::open_file(&self.base_path)?);
        state.current_day = today;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.base_path
    }

    #[cfg(test)]
    fn backdate(&self, day: NaiveDate) {
        self.state.lock().current_day = day;
    }
}

impl Sink for DailyRotatingSink {
    fn write(&self, bytes: &[u8]) -> Result<()> {
        let mut state = self.state.lock();

        let today = Local::now().date_naive();
        if today != state.current_day {
            if let Err(e) = self.rotate(&mut state, today) {
                eprintln!(
                    "[LOGISTRY WARN] daily rotation failed: {}; continuing with current file",
                    e
                );
                if state.writer.is_none() {
                    state.writer = Some(Self::open_file(&self.base_path)?);
                }
                state.current_day = today;
            }
        }

        let writer = state
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::other("daily-rotating writer not initialized"))?;
        writer.write_all(bytes).map_err(|e| {
            LoggerError::file_sink(
                self.base_path.display().to_string(),
                format!("failed to write: {}", e),
            )
        })?;
        writer.flush().map_err(|e| {
            LoggerError::file_sink(
                self.base_path.display().to_string(),
                format!("failed to flush: {}", e),
            )
        })?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Some(ref mut writer) = self.state.lock().writer {
            writer.flush().map_err(|e| {
                LoggerError::file_sink(
                    self.base_path.display().to_string(),
                    format!("failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "daily_rotating"
    }
}

impl Drop for DailyRotatingSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.state.lock().writer.take() {
            let _ = writer.flush();
        }
    }
}
