//! Size-rotating file sink

use crate::core::error::{LoggerError, Result};
use crate::core::sink::Sink;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Library-default rotation threshold (10 MiB), applied when a logger
/// configuration leaves `rotation_size` unset.
pub const DEFAULT_ROTATION_SIZE: u64 = 10 * 1024 * 1024;

/// Library-default retention, applied when `max_rotated` is unset.
pub const DEFAULT_MAX_ROTATED: usize = 5;

/// File sink that rotates once cumulative bytes written reach the size
/// threshold: `base` becomes `base.1`, prior backups shift up, and the
/// backup past the retention limit is deleted (oldest first).
///
/// Safe for concurrent writers; rotation and writes serialize on an
/// internal lock.
pub struct SizeRotatingSink {
    base_path: PathBuf,
    rotation_size: u64,
    max_rotated: usize,
    state: Mutex<RollState>,
}

struct RollState {
    writer: Option<BufWriter<File>>,
    current_size: u64,
}

impl SizeRotatingSink {
    /// Open (or create) the sink at `path`. `rotation_size` and
    /// `max_rotated` fall back to the library defaults when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent directory cannot be
    /// created.
    pub fn new<P: AsRef<Path>>(
        path: P,
        rotation_size: Option<u64>,
        max_rotated: Option<usize>,
    ) -> Result<Self> {
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

        let (writer, current_size) = Self::open_file(&base_path)?;

        Ok(Self {
            base_path,
            rotation_size: rotation_size.unwrap_or(DEFAULT_ROTATION_SIZE),
            max_rotated: max_rotated.unwrap_or(DEFAULT_MAX_ROTATED),
            state: Mutex::new(RollState {
                writer: Some(writer),
                current_size,
            }),
        })
    }

    fn open_file(path: &Path) -> Result<(BufWriter<File>, u64)> {
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
        let current_size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_sink(
                    path.display().to_string(),
                    format!("cannot access file metadata: {}", e),
                )
            })?
            .len();
        Ok((BufWriter::new(file), current_size))
    }

    /// Backup file path for given index: `app.log` -> `app.log.3`
    fn backup_path(&self, index: usize) -> PathBuf {
        let mut path = self.base_path.clone();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.log");
        path.set_file_name(format!("{}.{}", filename, index));
        path
    }

    fn rotate(&self, state: &mut RollState) -> Result<()> {
        // Flush and release the current file handle before renaming it.
        if let Some(mut writer) = state.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("failed to flush before rotation: {}", e),
                )
            })?;
        }

        // Delete the backup past the retention limit, oldest first.
        let oldest_backup = self.backup_path(self.max_rotated);
        if oldest_backup.exists() {
            if let Err(e) = fs::remove_file(&oldest_backup) {
                eprintln!(
                    "[LOGISTRY WARN] failed to remove oldest backup {}: {}",
                    oldest_backup.display(),
                    e
                );
            }
        }

        // Shift remaining backups up by one index.
        for i in (1..self.max_rotated).rev() {
            let old_path = self.backup_path(i);
            let new_path = self.backup_path(i + 1);
            if old_path.exists() {
                // rename replaces the destination atomically on most
                // platforms; fall back to remove-then-rename where it fails.
                if fs::rename(&old_path, &new_path).is_err() {
                    if new_path.exists() {
                        let _ = fs::remove_file(&new_path);
                    }
                    fs::rename(&old_path, &new_path).map_err(|e| {
                        LoggerError::file_rotation(
                            old_path.display().to_string(),
                            format!("failed to shift backup files: {}", e),
                        )
                    })?;
                }
            }
        }

        // Move the active file to .1 and start a fresh one.
        if self.base_path.exists() {
            fs::rename(&self.base_path, self.backup_path(1)).map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("failed to rotate current log file: {}", e),
                )
            })?;
        }

        let (writer, current_size) = Self::open_file(&self.base_path)?;
        state.writer = Some(writer);
        state.current_size = current_size;

        Ok(())
    }

    /// Current size of the active file in bytes.
    pub fn current_size(&self) -> u64 {
        self.state.lock().current_size
    }

    pub fn path(&self) -> &Path {
        &self.base_path
    }

    pub fn rotation_size(&self) -> u64 {
        self.rotation_size
    }

    pub fn max_rotated(&self) -> usize {
        self.max_rotated
    }
}

impl Sink for SizeRotatingSink {
    fn write(&self, bytes: &[u8]) -> Result<()> {
        let mut state = self.state.lock();

        if state.current_size >= self.rotation_size {
            if let Err(e) = self.rotate(&mut state) {
                // Keep logging on the current file rather than losing the
                // record over a rotation failure.
                eprintln!(
                    "[LOGISTRY WARN] rotation failed: {}; continuing with current file",
                    e
                );
                if state.writer.is_none() {
                    let (writer, current_size) = Self::open_file(&self.base_path)?;
                    state.writer = Some(writer);
                    state.current_size = current_size;
                }
                // Reset size tracking so a persistent failure does not
                // trigger a rotation attempt on every write.
                state.current_size = 0;
            }
        }

        let writer = state
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::other("size-rotating writer not initialized"))?;
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
        state.current_size += bytes.len() as u64;
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
        "size_rotating"
    }
}

impl Drop for SizeRotatingSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.state.lock().writer.take() {
            let _ = writer.flush();
        }
    }
}
