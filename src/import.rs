//! Copy chosen files into the working directory before loading.

use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Copy `source` into `upload_dir` (created if missing), keeping its file name.
///
/// Returns the path of the copy. Importing a file that already lives in
/// `upload_dir` returns its path without copying.
pub fn import_file(source: &Path, upload_dir: &Path) -> Result<PathBuf> {
    let name = source
        .file_name()
        .ok_or_else(|| Error::InvalidPath(source.to_path_buf()))?;

    fs::create_dir_all(upload_dir)?;
    let target = upload_dir.join(name);

    if same_file(source, &target) {
        return Ok(target);
    }

    fs::copy(source, &target)?;
    tracing::info!(
        source = %source.display(),
        target = %target.display(),
        "imported file"
    );

    Ok(target)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copies_into_created_dir() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("loop.wav");
        fs::write(&source, b"RIFF").unwrap();

        let upload = dir.path().join("upload").join("nested");
        let copied = import_file(&source, &upload).unwrap();

        assert_eq!(copied, upload.join("loop.wav"));
        assert_eq!(fs::read(&copied).unwrap(), b"RIFF");
        assert!(source.exists());
    }

    #[test]
    fn test_reimport_from_upload_dir() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("loop.wav");
        fs::write(&source, b"RIFF").unwrap();

        let copied = import_file(&source, dir.path()).unwrap();
        assert_eq!(copied, source);
        assert_eq!(fs::read(&copied).unwrap(), b"RIFF");
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let result = import_file(&dir.path().join("nope.wav"), dir.path());
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
