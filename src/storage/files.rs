//! Whole-file reads and writes for key files.
//!
//! File handles are scoped to each call and closed on every exit path.

use crate::error::{RsaIoError, Result};
use crate::storage::options::WriteMode;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use zeroize::Zeroizing;

/// Read a file to end of stream through a bounded buffer.
///
/// The buffer is refilled until the reader reports end of stream, so no
/// maximum file size is assumed. A missing file is reported as
/// [`RsaIoError::NotFoundError`].
pub(crate) fn read_file(path: &Path, buffer_size: usize) -> Result<Zeroizing<Vec<u8>>> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(RsaIoError::NotFoundError {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(RsaIoError::storage(path, e)),
    };

    // Capacity hint only; the loop below reads to end of stream regardless.
    let expected_len = file
        .metadata()
        .ok()
        .and_then(|metadata| usize::try_from(metadata.len()).ok())
        .unwrap_or(0);
    let mut contents = Zeroizing::new(Vec::with_capacity(expected_len));
    let mut buffer = Zeroizing::new(vec![0u8; buffer_size.max(1)]);

    loop {
        match file.read(&mut buffer[..]) {
            Ok(0) => break,
            Ok(n) => contents.extend_from_slice(&buffer[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(RsaIoError::storage(path, e)),
        }
    }

    Ok(contents)
}

/// Replace the contents of a file.
pub(crate) fn write_file(path: &Path, contents: &[u8], mode: WriteMode) -> Result<()> {
    match mode {
        WriteMode::Direct => write_direct(path, contents),
        WriteMode::Atomic => write_atomic(path, contents),
    }
}

fn write_direct(path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| RsaIoError::storage(path, e))?;
    file.write_all(contents)
        .and_then(|_| file.flush())
        .map_err(|e| RsaIoError::storage(path, e))
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged =
        NamedTempFile::new_in(directory).map_err(|e| RsaIoError::storage(directory, e))?;
    staged
        .write_all(contents)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| RsaIoError::storage(staged.path(), e))?;

    // A replaced file keeps its permissions. A new one keeps the owner-only
    // mode the temporary file was created with.
    if let Ok(existing) = fs::metadata(path) {
        staged
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| RsaIoError::storage(staged.path(), e))?;
    }

    staged
        .persist(path)
        .map_err(|e| RsaIoError::storage(path, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_file_larger_than_buffer() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("big.key");

        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&path, &data).unwrap();

        let read = read_file(&path, 7).unwrap();
        assert_eq!(read.as_slice(), data.as_slice());
    }

    #[test]
    fn test_read_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.key");
        fs::write(&path, b"").unwrap();

        let read = read_file(&path, 16).unwrap();
        assert!(read.is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.key");

        match read_file(&path, 16) {
            Err(RsaIoError::NotFoundError { path: reported }) => assert_eq!(reported, path),
            _ => panic!("Expected NotFoundError"),
        }
    }

    #[test]
    fn test_read_directory_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();

        let result = read_file(temp_dir.path(), 16);
        assert!(matches!(result, Err(RsaIoError::StorageError { .. })));
    }

    #[test]
    fn test_direct_write_truncates_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("public.key");
        fs::write(&path, b"a much longer previous content").unwrap();

        write_file(&path, b"short", WriteMode::Direct).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"short");
    }

    #[test]
    fn test_atomic_write_replaces_file_without_leftovers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("private.key");
        fs::write(&path, b"previous content").unwrap();

        write_file(&path, b"new", WriteMode::Atomic).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
        let entries = fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_write_into_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("public.key");

        for mode in [WriteMode::Direct, WriteMode::Atomic] {
            let result = write_file(&path, b"data", mode);
            assert!(matches!(result, Err(RsaIoError::StorageError { .. })));
        }
    }

    #[test]
    fn test_read_file_exact_buffer_multiple() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("public.key");
        let data = b"MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8A";
        fs::write(&path, data).unwrap();

        for buffer_size in [4, data.len(), data.len() + 1] {
            let read = read_file(&path, buffer_size).unwrap();
            assert_eq!(read.as_slice(), &data[..]);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_write_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("public.key");
        fs::write(&path, b"previous content").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_file(&path, b"new", WriteMode::Atomic).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
        assert_eq!(fs::read(&path).unwrap(), b"new");
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_write_new_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("private.key");

        write_file(&path, b"new", WriteMode::Atomic).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }
}
