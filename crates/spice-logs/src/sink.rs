//! Rotating file sink for CLI session diagnostics.
//!
//! This module provides:
//! - [`FileSinkConfig`] — per-creation sink parameters
//! - [`FileSink`] — size/age/backup-bounded rotating log file
//! - [`MakeWriter`] integration so the sink plugs into
//!   `tracing_subscriber::fmt()` as a structured event writer

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use parking_lot::Mutex;
use tracing_subscriber::fmt::MakeWriter;

use crate::error::{Result, SinkError};

/// Subdirectory under the root that holds session logs.
const LOG_DIR: &str = "log";

/// Timestamp layout embedded in log file names, UTC at second precision.
const FILE_TIMESTAMP: &str = "%Y%m%dT%H%M%SZ";

/// Default per-file size cap before rotation.
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Default number of rotated backups retained.
const DEFAULT_MAX_BACKUPS: usize = 3;

/// Default retention ceiling for rotated backups, in days.
const DEFAULT_MAX_AGE_DAYS: i64 = 60;

/// Serializes the check-then-create sequence for the log directory so
/// concurrent sink creations never race on directory existence. Held for
/// the whole of [`FileSink::create`] and around rotation's file-name
/// pick, which also makes the collision check safe.
static CREATE_LOG_DIR_LOCK: Mutex<()> = Mutex::new(());

/// Per-creation sink parameters.
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    /// Logical log name, the file-name prefix.
    pub name: String,
    /// Root directory; logs live in `{root}/log`.
    pub root: PathBuf,
    /// Maximum size of a single log file before rotation (bytes).
    pub max_file_size: u64,
    /// Maximum number of rotated backups retained.
    pub max_backups: usize,
    /// Maximum age of rotated backups, in days.
    pub max_age_days: i64,
}

impl FileSinkConfig {
    /// Creates a config with the default rotation bounds.
    #[must_use]
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_backups: DEFAULT_MAX_BACKUPS,
            max_age_days: DEFAULT_MAX_AGE_DAYS,
        }
    }

    /// Sets the per-file size cap.
    #[must_use]
    pub const fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Sets the number of retained backups.
    #[must_use]
    pub const fn with_max_backups(mut self, backups: usize) -> Self {
        self.max_backups = backups;
        self
    }

    /// Sets the retention ceiling in days.
    #[must_use]
    pub const fn with_max_age_days(mut self, days: i64) -> Self {
        self.max_age_days = days;
        self
    }
}

/// Internal file state, guarded by the sink mutex.
struct SinkState {
    file: File,
    path: PathBuf,
    size: u64,
    /// Rotated files from this session, oldest first.
    backups: Vec<PathBuf>,
}

struct SinkShared {
    config: FileSinkConfig,
    state: Mutex<SinkState>,
}

/// Rotating session log file.
///
/// Rotation and retention run synchronously inside the write path: when a
/// write would push the current file past the size cap, a fresh
/// timestamped file is opened, the old file joins the backup list, and
/// backups beyond the count or age bounds are deleted oldest-first.
///
/// Cloning is cheap; clones share the same underlying file state.
#[derive(Clone)]
pub struct FileSink {
    inner: Arc<SinkShared>,
}

impl std::fmt::Debug for FileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSink")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl FileSink {
    /// Creates the sink, resolving `{root}/log` and eagerly creating the
    /// session file `{name}-{UTC timestamp}.log` so permission problems
    /// surface before the first write.
    ///
    /// When `{root}/log` does not exist it is created with the permission
    /// bits of the nearest existing ancestor. When the session file name
    /// is already taken (same name within one second), a `-{seq}` suffix
    /// disambiguates.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::DirectoryCreate`] if the directory cannot be
    /// resolved, [`SinkError::FileCreate`] if the file cannot be created.
    pub fn create(config: FileSinkConfig) -> Result<Self> {
        let _guard = CREATE_LOG_DIR_LOCK.lock();

        let dir = resolve_log_dir(&config.root)?;
        let (path, file) = create_session_file(&dir, &config.name)?;
        tracing::debug!(path = %path.display(), "session log sink created");

        Ok(Self {
            inner: Arc::new(SinkShared {
                config,
                state: Mutex::new(SinkState {
                    file,
                    path,
                    size: 0,
                    backups: Vec::new(),
                }),
            }),
        })
    }

    /// Path of the current log file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.inner.state.lock().path.clone()
    }

    /// Rotated files from this session, oldest first.
    #[must_use]
    pub fn backups(&self) -> Vec<PathBuf> {
        self.inner.state.lock().backups.clone()
    }

    /// The sink configuration.
    #[must_use]
    pub fn config(&self) -> &FileSinkConfig {
        &self.inner.config
    }

    /// A write handle onto the sink.
    #[must_use]
    pub fn writer(&self) -> SinkWriter {
        SinkWriter { sink: self.clone() }
    }

    fn write_bytes(&self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.inner.state.lock();

        if state.size + buf.len() as u64 > self.inner.config.max_file_size {
            self.rotate_locked(&mut state)?;
        }

        let written = state.file.write(buf)?;
        state.size += written as u64;
        Ok(written)
    }

    fn rotate_locked(&self, state: &mut SinkState) -> io::Result<()> {
        let dir = state
            .path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| io::Error::other("log file has no parent directory"))?;

        let (path, file) = {
            let _guard = CREATE_LOG_DIR_LOCK.lock();
            create_session_file(&dir, &self.inner.config.name).map_err(io::Error::other)?
        };

        let previous = std::mem::replace(&mut state.path, path);
        state.file = file;
        state.size = 0;
        state.backups.push(previous);

        self.prune_backups(state);
        Ok(())
    }

    /// Deletes backups past the age ceiling, then oldest-first past the
    /// retained count. Deletion failures are ignored; the next rotation
    /// retries.
    fn prune_backups(&self, state: &mut SinkState) {
        let cutoff = Utc::now() - Duration::days(self.inner.config.max_age_days);
        state.backups.retain(|path| match file_timestamp(path) {
            Some(stamp) if stamp < cutoff => {
                let _ = fs::remove_file(path);
                false
            }
            _ => true,
        });

        while state.backups.len() > self.inner.config.max_backups {
            let oldest = state.backups.remove(0);
            let _ = fs::remove_file(&oldest);
        }
    }
}

/// Write handle produced by [`FileSink::writer`].
pub struct SinkWriter {
    sink: FileSink,
}

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.write_bytes(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.inner.state.lock().file.flush()
    }
}

impl<'a> MakeWriter<'a> for FileSink {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.writer()
    }
}

/// Resolves `{root}/log`, creating it with inherited permissions when
/// absent.
fn resolve_log_dir(root: &Path) -> Result<PathBuf> {
    let dir = root.join(LOG_DIR);
    if dir.is_dir() {
        return Ok(dir);
    }
    create_log_dir(root, &dir).map_err(|source| SinkError::DirectoryCreate {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Stats `root`, falling back to its parent when `root` itself does not
/// exist yet. Permission bits come from whichever exists, never invented.
fn ancestor_metadata(root: &Path) -> io::Result<fs::Metadata> {
    fs::metadata(root).or_else(|_| {
        let parent = root
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "root has no parent"))?;
        fs::metadata(parent)
    })
}

#[cfg(unix)]
fn create_log_dir(root: &Path, dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

    let mode = ancestor_metadata(root)?.permissions().mode() & 0o777;
    fs::DirBuilder::new().recursive(true).mode(mode).create(dir)
}

#[cfg(not(unix))]
fn create_log_dir(root: &Path, dir: &Path) -> io::Result<()> {
    // Mode bits do not map off unix; platform defaults apply.
    ancestor_metadata(root)?;
    fs::create_dir_all(dir)
}

/// Creates `{name}-{timestamp}.log` in `dir`, appending a `-{seq}` suffix
/// while the name is taken. Callers hold the creation lock.
fn create_session_file(dir: &Path, name: &str) -> Result<(PathBuf, File)> {
    let stamp = Utc::now().format(FILE_TIMESTAMP);
    let base = format!("{name}-{stamp}");

    let mut path = dir.join(format!("{base}.log"));
    let mut seq = 1u32;
    while path.exists() {
        path = dir.join(format!("{base}-{seq}.log"));
        seq += 1;
    }

    let file = OpenOptions::new()
        .create_new(true)
        .append(true)
        .open(&path)
        .map_err(|source| SinkError::FileCreate {
            path: path.clone(),
            source,
        })?;

    Ok((path, file))
}

/// Parses the creation timestamp back out of a log file name.
fn file_timestamp(path: &Path) -> Option<DateTime<Utc>> {
    let stem = path.file_stem()?.to_str()?;
    stem.split('-')
        .find_map(|part| NaiveDateTime::parse_from_str(part, FILE_TIMESTAMP).ok())
        .map(|naive| naive.and_utc())
}
