//! Special-file handler (component F): translates between a working-copy
//! "special file" descriptor (currently only symbolic links) and the real
//! filesystem object it describes.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::error::{Result, TranslateError};
use crate::install::StagedInstall;

const LINK_IDENTIFIER: &str = "link";

/// Detranslate `src_path` into the portable descriptor form at `dst_path`.
///
/// A regular file is copied unchanged. A symbolic link is rendered as the
/// single line `link <target>`, with no trailing newline, matching what
/// [`create_special`] expects to read back.
pub fn detranslate_special(src_path: &Path, dst_path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(src_path)?;

    let mut staged = StagedInstall::begin(dst_path, false)?;
    if meta.file_type().is_symlink() {
        let target = fs::read_link(src_path)?;
        let line = format!("{LINK_IDENTIFIER} {}", target.to_string_lossy());
        staged.writer().write_all(line.as_bytes())?;
    } else {
        let mut src = fs::File::open(src_path)?;
        staged.write_all_from(&mut src)?;
    }
    staged.commit()
}

/// Create the real filesystem object described by `src_path` at `dst_path`.
///
/// If `src_path` is itself a special file, it is first detranslated into a
/// temporary regular file so its descriptor can be read uniformly. The
/// descriptor's first space-separated token selects the kind of object to
/// create; `link` creates a symlink at `dst_path` pointing at the
/// remainder. If this platform cannot create symlinks, the raw descriptor
/// is installed as a regular file instead. Any other identifier is
/// rejected with an unsupported-feature error.
pub fn create_special(src_path: &Path, dst_path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(src_path)?;

    let descriptor = if meta.file_type().is_symlink() {
        let tmp = tempfile_sibling(dst_path)?;
        detranslate_special(src_path, &tmp)?;
        let contents = fs::read(&tmp)?;
        let _ = fs::remove_file(&tmp);
        contents
    } else {
        let mut contents = Vec::new();
        fs::File::open(src_path)?.read_to_end(&mut contents)?;
        contents
    };

    let text = String::from_utf8_lossy(&descriptor);
    let (identifier, remainder) = text.split_once(' ').unwrap_or((text.as_ref(), ""));

    if identifier != LINK_IDENTIFIER {
        return Err(TranslateError::unknown_special_identifier(identifier));
    }

    match try_symlink(remainder, dst_path) {
        Ok(()) => return Ok(()),
        Err(e) if e.kind() == io::ErrorKind::Unsupported => {
            tracing::debug!(?dst_path, "symlink creation unsupported, falling back to raw copy");
        }
        Err(e) => return Err(e.into()),
    }

    let mut staged = StagedInstall::begin(dst_path, false)?;
    staged.writer().write_all(&descriptor)?;
    staged.commit()
}

#[cfg(unix)]
fn try_symlink(target: &str, dst_path: &Path) -> io::Result<()> {
    let tmp = tempfile_sibling(dst_path).map_err(io::Error::other)?;
    std::os::unix::fs::symlink(target, &tmp)?;
    fs::rename(&tmp, dst_path)
}

#[cfg(not(unix))]
fn try_symlink(_target: &str, _dst_path: &Path) -> io::Result<()> {
    Err(io::Error::from(io::ErrorKind::Unsupported))
}

fn tempfile_sibling(dst_path: &Path) -> Result<std::path::PathBuf> {
    let dir = dst_path.parent().unwrap_or_else(|| Path::new("."));
    let name = dst_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    Ok(dir.join(format!("{name}.{suffix}.special-tmp")))
}
