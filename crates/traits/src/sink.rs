//! The writable destination handed to the write stage.

use log::debug;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

type SharedFile = Arc<Mutex<Option<File>>>;

fn lock(file: &SharedFile) -> MutexGuard<'_, Option<File>> {
    // A panic while holding the lock cannot leave the `Option<File>` half-updated.
    file.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "output resource already released")
}

/// A read-write handle to the output file.
///
/// The handle can be released from the outside through a [`ReleaseHandle`];
/// after that every read, write or seek fails with `BrokenPipe`.
#[derive(Debug)]
pub struct OutputResource {
    path: PathBuf,
    file: SharedFile,
}

impl OutputResource {
    /// Opens `path` for reading and writing, creating an empty file if it does
    /// not exist and truncating it if it does. Parent directories are never
    /// created.
    pub fn acquire(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        debug!("Acquired output resource '{}'.", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            file: Arc::new(Mutex::new(Some(file))),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A handle that can close this resource without owning it.
    pub fn release_handle(&self) -> ReleaseHandle {
        ReleaseHandle {
            path: self.path.clone(),
            file: Arc::clone(&self.file),
        }
    }

    pub fn is_released(&self) -> bool {
        lock(&self.file).is_none()
    }

    fn with_file<T>(&self, op: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        match lock(&self.file).as_mut() {
            Some(file) => op(file),
            None => Err(closed_error()),
        }
    }
}

impl Write for OutputResource {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|f| f.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|f| f.flush())
    }
}

impl Read for OutputResource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.with_file(|f| f.read(buf))
    }
}

impl Seek for OutputResource {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.with_file(|f| f.seek(pos))
    }
}

/// Closes an [`OutputResource`] held elsewhere.
#[derive(Debug)]
pub struct ReleaseHandle {
    path: PathBuf,
    file: SharedFile,
}

impl ReleaseHandle {
    /// Flushes and closes the file. Returns `false` if it was already closed.
    pub fn release(self) -> bool {
        match lock(&self.file).take() {
            Some(mut file) => {
                if let Err(e) = file.flush() {
                    debug!("Flushing '{}' on release failed: {}", self.path.display(), e);
                }
                debug!("Released output resource '{}'.", self.path.display());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn acquire_creates_an_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        assert!(!path.exists());

        let _sink = OutputResource::acquire(&path).unwrap();
        assert!(path.exists());
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn acquire_truncates_an_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        fs::write(&path, b"stale content from a previous run").unwrap();

        let mut sink = OutputResource::acquire(&path).unwrap();
        sink.write_all(b"%PDF").unwrap();
        sink.release_handle().release();
        assert_eq!(fs::read(&path).unwrap(), b"%PDF");
    }

    #[test]
    fn acquire_does_not_create_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.pdf");

        let err = OutputResource::acquire(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn released_resource_rejects_io() {
        let dir = tempdir().unwrap();
        let mut sink = OutputResource::acquire(dir.path().join("out.pdf")).unwrap();
        let handle = sink.release_handle();

        assert!(handle.release());
        assert!(sink.is_released());
        let err = sink.write(b"late").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(!sink.release_handle().release());
    }

    #[test]
    fn resource_supports_read_back_after_seek() {
        let dir = tempdir().unwrap();
        let mut sink = OutputResource::acquire(dir.path().join("out.pdf")).unwrap();
        sink.write_all(b"hello").unwrap();
        sink.seek(SeekFrom::Start(0)).unwrap();

        let mut buf = String::new();
        sink.read_to_string(&mut buf).unwrap();
        assert_eq!(buf, "hello");
    }
}
