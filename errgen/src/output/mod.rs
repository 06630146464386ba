//! File-system capability used by the pipeline.
//!
//! The pipeline only reads one input and writes whole files, so the trait is
//! three calls wide. [`LocalFs`] talks to the disk; [`MemoryFs`] keeps
//! everything in memory and can be told to fail specific writes.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Read input, create directories, write outputs.
pub trait FileSystem {
    /// Read a whole file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create a directory and all missing parents.
    fn ensure_dir(&self, path: &Path) -> io::Result<()>;

    /// Replace `path` with `content`. On error the previous content (or
    /// absence) of `path` is left untouched.
    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()>;
}

// =============================================================================
// Local disk
// =============================================================================

/// The real file system. Writes go to a temp file in the target directory and
/// are renamed into place.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(content)?;
        tmp.as_file().sync_all()?;

        // temp files are created 0600
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file().set_permissions(fs::Permissions::from_mode(0o644))?;
        }

        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

// =============================================================================
// In memory
// =============================================================================

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    failing: BTreeSet<PathBuf>,
}

/// In-memory file system.
///
/// Writes into a directory that was never created fail with `NotFound`, like
/// the real thing.
#[derive(Debug, Default)]
pub struct MemoryFs {
    state: Mutex<MemoryState>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.files.insert(path.into(), content.into());
        }
        self
    }

    /// Make every write to `path` fail with `PermissionDenied`.
    pub fn fail_writes_to(self, path: impl Into<PathBuf>) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.failing.insert(path.into());
        }
        self
    }

    /// Content of a file as UTF-8, if present.
    pub fn read_string(&self, path: &Path) -> Option<String> {
        let state = self.state.lock().ok()?;
        state
            .files
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// All file paths, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.state
            .lock()
            .map(|state| state.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether a directory was created.
    pub fn has_dir(&self, path: &Path) -> bool {
        self.state
            .lock()
            .map(|state| state.dirs.contains(path))
            .unwrap_or(false)
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| io::Error::other("memory fs lock poisoned"))
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let state = self.lock()?;
        state.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
        })
    }

    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        let mut state = self.lock()?;
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                state.dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let mut state = self.lock()?;
        if state.failing.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !state.dirs.contains(parent) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("directory {} does not exist", parent.display()),
                ));
            }
        }
        state.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }
}
