//! Writing rendered documents to disk.
//!
//! The document is written to a temporary file next to the destination and
//! then renamed over it, so the destination either holds the previous
//! contents or the complete new document.
//!
//! A destination which is a symbolic link is written through: the link is
//! kept and its target is replaced. The permissions of an existing file are
//! carried over to the new one.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

/// Follow a symbolic link at `path` to the file it names.
fn resolve_destination(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(path)
            .or_else(|_| {
                // Dangling link: create the file it points at.
                fs::read_link(path).map(|target| match path.parent() {
                    Some(parent) if target.is_relative() => parent.join(target),
                    _ => target,
                })
            })
            .unwrap_or_else(|_| path.to_owned()),
        _ => path.to_owned(),
    }
}

fn stage(staging: &Path, destination: &Path, contents: &[u8]) -> std::io::Result<()> {
    fs::write(staging, contents)?;
    if let Ok(meta) = fs::metadata(destination) {
        fs::set_permissions(staging, meta.permissions())?;
    }
    fs::rename(staging, destination)
}

/// Write `contents` to `path`, creating or replacing it.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), Error> {
    let destination = resolve_destination(path);
    let staging = temporary_path(&destination);
    tracing::debug!(path = %path.display(), staging = %staging.display(), "writing key set");

    let written = stage(&staging, &destination, contents);
    if let Err(source) = written {
        // The staging file may not exist if the first write failed.
        let _ = fs::remove_file(&staging);
        return Err(Error::WriteOutput {
            path: path.to_owned(),
            source,
        });
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn creates_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jwks.json");

        write_atomic(&path, b"first").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"first");

        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");

        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1, "staging file left behind");
    }

    #[test]
    fn missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("jwks.json");

        let err = write_atomic(&path, b"{}").unwrap_err();
        assert!(matches!(err, Error::WriteOutput { path: p, .. } if p == path));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn writes_through_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("published.json");
        let link = dir.path().join("jwks.json");
        fs::write(&target, b"old").unwrap();
        std::os::unix::fs::symlink("published.json", &link).unwrap();

        write_atomic(&link, b"new").unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read(&target).unwrap(), b"new");
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_creates_target() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("jwks.json");
        std::os::unix::fs::symlink("published.json", &link).unwrap();

        write_atomic(&link, b"new").unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read(dir.path().join("published.json")).unwrap(), b"new");
    }

    #[cfg(unix)]
    #[test]
    fn keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jwks.json");
        fs::write(&path, b"old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        write_atomic(&path, b"new").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn staging_file_is_a_hidden_sibling() {
        let staging = temporary_path(Path::new("/tmp/out/jwks.json"));
        assert_eq!(staging.parent(), Some(Path::new("/tmp/out")));
        let name = staging.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(".jwks.json."));
        assert!(name.ends_with(".tmp"));
    }
}
