//! Append-only file output.

use super::Output;
use crate::internal;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Appends every line to one file. The file (and its parent directories) are
/// created on the first write, so constructing a `FileOutput` never touches
/// the filesystem.
#[derive(Debug)]
pub struct FileOutput {
    path: PathBuf,
    label: String,
    file: Mutex<Option<File>>,
}

impl FileOutput {
    /// `~` at the start of `path` expands to the home directory.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy();
        let path = PathBuf::from(shellexpand::tilde(&raw).as_ref());
        let label = path.display().to_string();
        internal::trace("FILE", &format!("Resolved path: {label}"));
        Self {
            path,
            label,
            file: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> io::Result<File> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            match fs::create_dir_all(parent) {
                Ok(()) => {
                    internal::debug("FILE", &format!("Created directory: {}", parent.display()));
                }
                Err(e) => {
                    internal::error(
                        "FILE",
                        &format!("Failed to create directory {}: {}", parent.display(), e),
                    );
                    return Err(e);
                }
            }
        }
        OpenOptions::new().create(true).append(true).open(&self.path)
    }
}

impl Output for FileOutput {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self.file.lock();
        let file = match guard.as_mut() {
            Some(file) => file,
            None => guard.insert(self.open()?),
        };
        file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&self) -> io::Result<()> {
        match self.file.lock().as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        &self.label
    }
}
