//! Append-only line writer with size-based rotation.
//!
//! Each exported span batch becomes one line. When the file grows past the
//! policy's size limit it is renamed to `<file>.<stamp>` and a fresh file is
//! started; only the newest `max_backups` renamed files are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// When to rotate and how many rotated files to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Rotate once the file is larger than this.
    pub max_bytes: u64,
    /// Rotated files kept on disk.
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

/// Thread-safe rotating writer. The file is opened lazily on first write.
pub struct FileWriter {
    file_path: PathBuf,
    policy: RotationPolicy,
    handle: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(file_path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            file_path,
            policy,
            handle: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is too big.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if rotating, opening, writing or
    /// flushing fails, or if the lock was poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::other(format!("trace writer lock poisoned: {e}")))?;

        if self.needs_rotation() {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            *handle = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            );
        }
        let Some(file) = handle.as_mut() else {
            return Err(io::Error::other("trace file not open"));
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|meta| meta.len() > self.policy.max_bytes)
    }

    /// Renames the live file to a fresh backup name and prunes old backups.
    fn rotate(&self) -> io::Result<()> {
        let mut stamp = chrono::Utc::now()
            .timestamp_nanos_opt()
            .map_or(0, i64::unsigned_abs);

        let backup = loop {
            let candidate = self.backup_path(stamp);
            if !candidate.exists() {
                break candidate;
            }
            stamp += 1;
        };

        fs::rename(&self.file_path, &backup)?;
        self.prune_backups()
    }

    /// Zero-padded so that name order is age order.
    fn backup_path(&self, stamp: u64) -> PathBuf {
        let mut name = self.file_name().to_os_string();
        name.push(format!(".{stamp:020}"));
        self.file_path.with_file_name(name)
    }

    fn file_name(&self) -> &std::ffi::OsStr {
        self.file_path.file_name().unwrap_or_default()
    }

    fn prune_backups(&self) -> io::Result<()> {
        let dir = self.file_path.parent().unwrap_or_else(|| Path::new("."));
        let prefix = format!("{}.", self.file_name().to_string_lossy());

        let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .and_then(|name| name.strip_prefix(&prefix))
                    .is_some_and(|stamp| !stamp.is_empty() && stamp.bytes().all(|b| b.is_ascii_digit()))
            })
            .collect();

        backups.sort_unstable_by(|a, b| b.cmp(a));

        for stale in backups.iter().skip(self.policy.max_backups) {
            // Best effort; a leftover backup is retried on the next rotation.
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backups_in(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("trace.json."))
            .count()
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::new(path.clone(), RotationPolicy::default());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
        assert_eq!(backups_in(dir.path()), 0);
    }

    #[test]
    fn rotates_and_keeps_newest_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let policy = RotationPolicy {
            max_bytes: 10,
            max_backups: 2,
        };
        let writer = FileWriter::new(path.clone(), policy);

        for i in 0..5 {
            writer.write_line(&format!("line number {i:08}")).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "line number 00000004\n");
        assert_eq!(backups_in(dir.path()), 2);
    }

    #[test]
    fn unrelated_files_survive_pruning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        fs::write(dir.path().join("trace.json.notes"), "keep me").unwrap();
        let writer = FileWriter::new(path, RotationPolicy { max_bytes: 1, max_backups: 0 });

        writer.write_line("first").unwrap();
        writer.write_line("second").unwrap();

        assert!(dir.path().join("trace.json.notes").exists());
    }
}
