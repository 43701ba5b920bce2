//! Package output on disk.
//!
//! # Directory Layout
//!
//! ```text
//! <root>/
//!   <package uuid>/
//!     .librepcb-pkg    file format version, e.g. "0.1\n"
//!     package.lp       the package document
//! ```
//!
//! Existing package directories are reused, never wiped. Files are
//! written to a temporary file and renamed into place, so an aborted run
//! never leaves a half-written document behind.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use atomicwrites::{AtomicFile, OverwriteBehavior};
use uuid::Uuid;

use super::error::{LibraryError, LibraryResult};

/// Name of the version marker file inside each package directory.
pub const PACKAGE_MARKER_FILE: &str = ".librepcb-pkg";

/// Name of the package document inside each package directory.
pub const PACKAGE_FILE: &str = "package.lp";

/// File format version written to the marker file.
pub const FILE_FORMAT_VERSION: &str = "0.1";

/// Destination for rendered package documents.
pub trait DocumentStore {
    /// Stores one rendered package document under its package UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be persisted.
    fn store(&mut self, uuid: Uuid, document: &str) -> LibraryResult<()>;
}

/// Stores each package in its own directory below a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Opens `root` as output directory, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create(root: impl Into<PathBuf>) -> LibraryResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| LibraryError::create_dir(&root, e))?;
        Ok(Self { root })
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the directory a package is stored in.
    #[must_use]
    pub fn package_dir(&self, uuid: Uuid) -> PathBuf {
        self.root.join(uuid.to_string())
    }
}

impl DocumentStore for DirectoryStore {
    fn store(&mut self, uuid: Uuid, document: &str) -> LibraryResult<()> {
        let dir = self.package_dir(uuid);
        std::fs::create_dir_all(&dir).map_err(|e| LibraryError::create_dir(&dir, e))?;

        let marker = format!("{FILE_FORMAT_VERSION}\n");
        write_atomic(&dir.join(PACKAGE_MARKER_FILE), |file| {
            file.write_all(marker.as_bytes())
        })?;

        let package_path = dir.join(PACKAGE_FILE);
        write_atomic(&package_path, |file| file.write_all(document.as_bytes()))?;

        tracing::debug!(path = %package_path.display(), "Wrote package");

        Ok(())
    }
}

/// Writes `path` through a temporary file in the same directory and
/// renames it into place.
pub(crate) fn write_atomic<F>(path: &Path, write: F) -> LibraryResult<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let tmpdir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    AtomicFile::new_with_tmpdir(path, OverwriteBehavior::AllowOverwrite, tmpdir)
        .write(write)
        .map_err(|e| match e {
            atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => {
                LibraryError::file_write(path, e)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_marker_and_document() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = DirectoryStore::create(temp.path().join("pkg")).unwrap();
        let uuid = Uuid::new_v4();

        store.store(uuid, "(librepcb_package x)\n").unwrap();

        let dir = store.package_dir(uuid);
        assert_eq!(
            std::fs::read_to_string(dir.join(PACKAGE_MARKER_FILE)).unwrap(),
            "0.1\n"
        );
        assert_eq!(
            std::fs::read_to_string(dir.join(PACKAGE_FILE)).unwrap(),
            "(librepcb_package x)\n"
        );
    }

    #[test]
    fn existing_directory_is_reused() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = DirectoryStore::create(temp.path()).unwrap();
        let uuid = Uuid::new_v4();
        let dir = store.package_dir(uuid);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("keep.txt"), "keep").unwrap();

        store.store(uuid, "first\n").unwrap();
        store.store(uuid, "second\n").unwrap();

        assert!(dir.join("keep.txt").exists());
        assert_eq!(
            std::fs::read_to_string(dir.join(PACKAGE_FILE)).unwrap(),
            "second\n"
        );
    }

    #[test]
    fn create_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("out/chip/pkg");
        DirectoryStore::create(&root).unwrap();
        let store = DirectoryStore::create(&root).unwrap();
        assert_eq!(store.root(), root.as_path());
    }
}
