use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str;

use crate::error::{Error, Result};

/// Anything past this is not a path, it is corruption.
pub const MAX_RECORD_LEN: usize = 4096;

/// Reads and rewrites the single persisted install-path record.
///
/// Record states and their meaning:
/// - absent: configuration has never run here;
/// - empty: configured, wherever we are (installers write an empty
///   record to accept the current location without committing to a text
///   encoding);
/// - one path: configured iff it equals the current install dir, by
///   exact string comparison, with no normalization and no case folding.
#[derive(Clone, Debug)]
pub struct RelocationTracker {
    record_path: PathBuf,
}

impl RelocationTracker {
    pub fn new(record_path: impl Into<PathBuf>) -> Self {
        Self {
            record_path: record_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.record_path
    }

    /// Whether the bundle is configured at `install_dir`. Read-only.
    pub fn is_configured(&self, install_dir: &str) -> Result<bool> {
        // Reject a corrupt record on its size alone, before pulling any
        // of it into memory.
        if let Ok(meta) = fs::metadata(&self.record_path) {
            if meta.len() > MAX_RECORD_LEN as u64 {
                return Err(Error::Oversized {
                    size: meta.len() as usize,
                    limit: MAX_RECORD_LEN,
                });
            }
        }
        let bytes = match fs::read(&self.record_path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(false),
            Err(err) => return Err(Error::Read(err)),
        };
        if bytes.len() > MAX_RECORD_LEN {
            return Err(Error::Oversized {
                size: bytes.len(),
                limit: MAX_RECORD_LEN,
            });
        }
        let stored = str::from_utf8(&bytes).map_err(|_| Error::Malformed)?;
        if stored.is_empty() {
            return Ok(true);
        }
        Ok(stored == install_dir)
    }

    /// Record that configuration ran at `install_dir`.
    ///
    /// The write is temp-then-rename so the record is never observable
    /// half-written; if anything fails, the record is removed before the
    /// error is returned, leaving "never configured" rather than a
    /// truncated path that might compare wrong later.
    pub fn mark_configured(&self, install_dir: &str) -> Result<()> {
        if let Err(err) = self.write_record(install_dir) {
            let _ = fs::remove_file(&self.record_path);
            return Err(err);
        }
        Ok(())
    }

    fn write_record(&self, install_dir: &str) -> Result<()> {
        let parent = self.record_path.parent().unwrap_or(Path::new(""));
        let file_name = self
            .record_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy();
        let tmp_path = parent.join(format!(".{file_name}.tmp"));

        fs::write(&tmp_path, install_dir).map_err(Error::Write)?;
        fs::rename(&tmp_path, &self.record_path).map_err(Error::Write)?;
        Ok(())
    }
}
