//! File system operations
//!
//! Table creation, atomic replacement and the sidecar lock file.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::StorageError;

/// Directory that holds `path`, `.` for bare file names.
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Create the directory that will hold `path` if it is missing.
pub fn create_parent_dir(path: &Path) -> Result<(), StorageError> {
    let dir = parent_dir(path);
    fs::create_dir_all(dir).map_err(|e| StorageError::unavailable(dir, e))
}

/// Create the table with `contents` unless a regular file already exists at `path`.
///
/// Returns true if the file was created.
pub fn ensure_table(path: &Path, contents: &[u8]) -> Result<bool, StorageError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(false),
        Ok(_) => Err(StorageError::unavailable(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            create_parent_dir(path)?;
            replace_file(path, contents)?;
            Ok(true)
        }
        Err(e) => Err(StorageError::unavailable(path, e)),
    }
}

/// Write `contents` to a temporary file beside `path`, then rename it over `path`.
///
/// Readers see either the old table or the new one, never a partial write.
/// A symlinked table is rewritten at its target and keeps the link. An existing
/// table keeps its permissions; a new one is created owner-only (0600 on Unix).
pub fn replace_file(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let unavailable = |e: io::Error| StorageError::unavailable(path, e);

    let target = match fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == io::ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(unavailable(e)),
    };

    let mut tmp = NamedTempFile::new_in(parent_dir(&target)).map_err(unavailable)?;
    if let Ok(meta) = fs::metadata(&target) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(unavailable)?;
    }
    tmp.write_all(contents).map_err(unavailable)?;
    tmp.as_file().sync_all().map_err(unavailable)?;
    tmp.persist(&target).map_err(|e| unavailable(e.error))?;
    Ok(())
}

/// Path of the lock file guarding `table_path`.
pub fn lock_path(table_path: &Path) -> PathBuf {
    let mut name = OsString::from(table_path.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}

/// Exclusive advisory lock held across one load-mutate-store cycle.
///
/// Released when dropped.
#[derive(Debug)]
pub struct TableLock {
    file: File,
}

impl TableLock {
    /// Block until the lock for `table_path` is held.
    pub fn acquire(table_path: &Path) -> Result<Self, StorageError> {
        let path = lock_path(table_path);
        create_parent_dir(&path)?;

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| StorageError::unavailable(&path, e))?;
        file.lock().map_err(|e| StorageError::unavailable(&path, e))?;

        Ok(Self { file })
    }
}

impl Drop for TableLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ensure_table_creates_once() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("users.csv");

        assert!(ensure_table(&path, b"first\n").unwrap());
        assert!(!ensure_table(&path, b"second\n").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\n");
    }

    #[test]
    fn ensure_table_rejects_a_directory() {
        let tmp = TempDir::new().unwrap();
        let err = ensure_table(tmp.path(), b"").unwrap_err();
        assert!(matches!(err, StorageError::Unavailable { .. }));
    }

    #[test]
    fn replace_file_overwrites_contents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("users.csv");

        replace_file(&path, b"old contents that are longer\n").unwrap();
        replace_file(&path, b"new\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[cfg(unix)]
    #[test]
    fn replace_file_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("users.csv");
        replace_file(&path, b"old\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        replace_file(&path, b"new\n").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn replace_file_writes_through_symlink() {
        let tmp = TempDir::new().unwrap();
        let real = tmp.path().join("real.csv");
        let link = tmp.path().join("users.csv");
        fs::write(&real, "old\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        replace_file(&link, b"new\n").unwrap();
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "new\n");
    }

    #[test]
    fn lock_path_is_a_sibling() {
        assert_eq!(
            lock_path(Path::new("data/users.csv")),
            PathBuf::from("data/users.csv.lock")
        );
        assert_eq!(parent_dir(Path::new("users.csv")), Path::new("."));
    }

    #[test]
    fn lock_can_be_taken_again_after_drop() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("users.csv");

        let first = TableLock::acquire(&path).unwrap();
        drop(first);
        let _second = TableLock::acquire(&path).unwrap();
        assert!(lock_path(&path).exists());
    }
}
