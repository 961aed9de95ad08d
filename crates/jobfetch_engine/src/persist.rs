use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::{FailureKind, FetchError};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory {path:?} missing or not writable: {message}")]
    OutputDir { path: PathBuf, message: String },
    #[error("target {0:?} has no file name")]
    NoFileName(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl From<PersistError> for FetchError {
    fn from(err: PersistError) -> Self {
        FetchError::new(FailureKind::Filesystem, err.to_string())
    }
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    let dir_error = |message: String| PersistError::OutputDir {
        path: dir.to_path_buf(),
        message,
    };
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| dir_error(e.to_string()))?;
        if !meta.is_dir() {
            return Err(dir_error("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| dir_error(e.to_string()))?;
    }
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
///
/// Readers never observe a half-written document: either the old file or the
/// complete new one is in place.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Writer for the directory containing `target`.
    pub fn for_target(target: &Path) -> Result<(Self, String), PersistError> {
        let filename = target
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| PersistError::NoFileName(target.to_path_buf()))?
            .to_string();
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok((Self::new(dir), filename))
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // rename(2) replaces an existing target in place on Unix; Windows needs it gone first.
        if cfg!(windows) && target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// Write `content` to `target`, creating parent directories as needed.
pub fn write_file_atomic(target: &Path, content: &str) -> Result<PathBuf, PersistError> {
    let (writer, filename) = AtomicFileWriter::for_target(target)?;
    writer.write(&filename, content)
}
