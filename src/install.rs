//! Atomic file installer (component G): stage bytes to a sibling temporary
//! file, then rename it over the destination so a crash never leaves a
//! half-translated artifact in place.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::Result;

/// A staged, not-yet-visible installation. Dropping this without calling
/// [`StagedInstall::commit`] removes the staged temporary file.
pub struct StagedInstall {
    tmp_path: PathBuf,
    final_path: PathBuf,
    file: Option<File>,
    committed: bool,
}

impl StagedInstall {
    /// Begin staging an install to `final_path`. When `make_parents` is
    /// set, missing ancestor directories are created first.
    pub fn begin(final_path: impl Into<PathBuf>, make_parents: bool) -> Result<Self> {
        let final_path = final_path.into();
        let dir = final_path.parent().unwrap_or_else(|| Path::new("."));
        if make_parents {
            fs::create_dir_all(dir)?;
        }

        let file_name = final_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let suffix = Uuid::new_v4().simple().to_string();
        let tmp_path = dir.join(format!("{file_name}.{suffix}.tmp"));

        let file = File::create(&tmp_path)?;
        tracing::trace!(?tmp_path, "staged install opened");

        Ok(Self {
            tmp_path,
            final_path,
            file: Some(file),
            committed: false,
        })
    }

    /// Write handle for the staged temporary file.
    pub fn writer(&mut self) -> &mut File {
        self.file.as_mut().expect("StagedInstall writer used after commit")
    }

    /// Copy all of `src` into the staged file.
    pub fn write_all_from<R: Read>(&mut self, src: &mut R) -> Result<u64> {
        Ok(io::copy(src, self.writer())?)
    }

    /// Rename the staged file over `final_path`, making it visible.
    pub fn commit(mut self) -> Result<()> {
        drop(self.file.take());
        fs::rename(&self.tmp_path, &self.final_path)?;
        self.committed = true;
        Ok(())
    }

    /// Stat-like metadata for the staged artifact, without touching the
    /// destination path.
    pub fn info(&self) -> Result<fs::Metadata> {
        Ok(fs::metadata(&self.tmp_path)?)
    }
}

impl Drop for StagedInstall {
    fn drop(&mut self) {
        if !self.committed {
            drop(self.file.take());
            if let Err(e) = fs::remove_file(&self.tmp_path) {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::debug!(?e, tmp_path = ?self.tmp_path, "failed to remove staged install");
                }
            }
        }
    }
}

/// Cancel a staged installation, removing the staged artifact. Equivalent
/// to dropping `staged` directly; provided for callers that want the
/// cancellation to read as an explicit step.
pub fn install_delete(staged: StagedInstall) {
    drop(staged);
}

/// Stat-like metadata for a staged artifact.
pub fn install_get_info(staged: &StagedInstall) -> Result<fs::Metadata> {
    staged.info()
}

/// Copy `src` to `final_path` atomically via [`StagedInstall`].
pub fn install_file<R: Read>(src: &mut R, final_path: impl Into<PathBuf>, make_parents: bool) -> Result<()> {
    let mut staged = StagedInstall::begin(final_path, make_parents)?;
    staged.write_all_from(src)?;
    staged.commit()
}
