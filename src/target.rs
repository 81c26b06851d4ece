//! Output destination for downloaded assets
//!
//! File targets are staged in a temporary file next to the destination and
//! only moved into place by [`TargetFile::finish`]. A target dropped before
//! `finish` leaves any existing file untouched.

use crate::core::path::PathExpander;
use crate::core::RelfetchResult;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Name that selects standard output instead of a file
pub const STDOUT: &str = "-";

/// Default permission mode for downloaded files
pub const DEFAULT_MODE: u32 = 0o644;

enum Sink {
    Stdout(io::Stdout),
    Staged {
        temp: NamedTempFile,
        path: PathBuf,
        mode: u32,
        remove_existing: bool,
    },
}

/// An opened download destination: a file on disk or standard output
pub struct TargetFile {
    sink: Sink,
}

impl TargetFile {
    /// Open `name` for writing, expanding a leading `~/`
    pub fn open(name: &str, mode: u32, remove_existing: bool) -> RelfetchResult<Self> {
        Self::open_with(&PathExpander::new(), name, mode, remove_existing)
    }

    /// Like [`TargetFile::open`] with an explicit home directory source
    pub fn open_with(
        expander: &PathExpander,
        name: &str,
        mode: u32,
        remove_existing: bool,
    ) -> RelfetchResult<Self> {
        if name == STDOUT {
            return Ok(Self {
                sink: Sink::Stdout(io::stdout()),
            });
        }

        let path = expander.expand(name)?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let temp = NamedTempFile::new_in(&dir)?;
        debug!("Staging {} in {}", path.display(), temp.path().display());

        Ok(Self {
            sink: Sink::Staged {
                temp,
                path,
                mode,
                remove_existing,
            },
        })
    }

    /// Path of the file, or `None` for standard output
    pub fn filename(&self) -> Option<&Path> {
        match &self.sink {
            Sink::Stdout(_) => None,
            Sink::Staged { path, .. } => Some(path),
        }
    }

    pub fn is_stdout(&self) -> bool {
        matches!(self.sink, Sink::Stdout(_))
    }

    pub fn writer(&mut self) -> &mut (dyn Write + Send) {
        match &mut self.sink {
            Sink::Stdout(out) => out as &mut (dyn Write + Send),
            Sink::Staged { temp, .. } => temp as &mut (dyn Write + Send),
        }
    }

    /// Flush output and move a staged file over the destination
    pub fn finish(self) -> RelfetchResult<()> {
        match self.sink {
            Sink::Stdout(mut out) => out.flush()?,
            Sink::Staged {
                mut temp,
                path,
                mode,
                remove_existing,
            } => {
                temp.flush()?;
                set_mode(temp.path(), mode)?;

                if remove_existing && path.exists() {
                    debug!("Removing existing file {}", path.display());
                    fs::remove_file(&path)?;
                }
                temp.persist(&path).map_err(|e| e.error)?;
            }
        }
        Ok(())
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}
