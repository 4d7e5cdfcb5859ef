//! Locked access to `.param` files on disk.
//!
//! Writers serialize on a `<file>.lock` sidecar and replace the file by
//! renaming a fully written temp file over it. The target itself is never
//! opened for writing, so readers see either the old contents or the new
//! ones, and a save that fails leaves the target as it was.

use std::{
    ffi::OsString,
    fs::{File, OpenOptions},
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::{
    codec,
    error::{Error, Result},
};

const LOCK_SUFFIX: &str = ".lock";

/// A `.param` file path, checked for its extension up front.
#[derive(Debug, Clone)]
pub struct ParamFile {
    path: PathBuf,
}

impl ParamFile {
    /// Fails with [`Error::BadExtension`] before touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        codec::check_extension(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(LOCK_SUFFIX);
        PathBuf::from(name)
    }

    /// Reads the whole file while no save to it is in progress.
    pub fn read(&self) -> Result<String> {
        let lock_path = self.lock_path();
        // No sidecar means nothing has been saved through a lock yet.
        let _guard = match File::open(&lock_path) {
            Ok(lock) => {
                lock.lock_shared().map_err(|err| Error::io(&lock_path, err))?;
                Some(lock)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => return Err(Error::io(&lock_path, err)),
        };

        let mut contents = String::new();
        File::open(&self.path)
            .and_then(|mut file| file.read_to_string(&mut contents))
            .map_err(|err| Error::io(&self.path, err))?;
        Ok(contents)
    }

    /// Replaces the file with `contents`.
    pub fn write(&self, contents: &str) -> Result<()> {
        let lock_path = self.lock_path();
        let _lock = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .and_then(|lock| lock.lock_exclusive().map(|()| lock))
            .map_err(|err| Error::io(&lock_path, err))?;

        self.replace(contents).map_err(|err| Error::io(&self.path, err))
    }

    fn replace(&self, contents: &str) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}
