//! Anonymous identity persistence.
//!
//! The identity is a UUID v4 string minted on first use and kept in a single
//! file so later runs address the same notes. Saves go through a sibling temp
//! file and a rename, so readers never see a truncated identity.

use std::io::{self, ErrorKind, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use uuid::Uuid;

use crate::error::IdentityError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Storage port for the anonymous identity.
pub trait IdentityStore {
    /// Return the stored identity, if any.
    ///
    /// # Errors
    /// Returns [`IdentityError`] when the backing storage cannot be read.
    fn load(&self) -> Result<Option<String>, IdentityError>;

    /// Persist `identity`, replacing any previous value.
    ///
    /// # Errors
    /// Returns [`IdentityError`] when the backing storage cannot be written.
    fn save(&self, identity: &str) -> Result<(), IdentityError>;

    /// Forget the stored identity. Clearing an empty store succeeds.
    ///
    /// # Errors
    /// Returns [`IdentityError`] when the backing storage cannot be modified.
    fn clear(&self) -> Result<(), IdentityError>;
}

/// Mint a fresh anonymous identity.
#[must_use]
pub fn mint_identity() -> String {
    Uuid::new_v4().to_string()
}

/// Identity kept in a single file inside a capability-scoped directory.
#[derive(Debug)]
pub struct FileIdentityStore {
    dir: Dir,
    path: Utf8PathBuf,
    file_name: Utf8PathBuf,
}

impl FileIdentityStore {
    /// Open the store for `path`. The parent directory must exist; the file
    /// itself is created on first save.
    ///
    /// # Errors
    /// Returns [`IdentityError::InvalidPath`] when `path` has no file name and
    /// [`IdentityError::Io`] when the parent directory cannot be opened.
    pub fn open(path: &Utf8Path) -> Result<Self, IdentityError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| IdentityError::InvalidPath {
                path: path.to_path_buf(),
            })?;
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|source| {
            IdentityError::Io {
                path: parent.to_path_buf(),
                source,
            }
        })?;
        Ok(Self {
            dir,
            path: path.to_path_buf(),
            file_name: Utf8PathBuf::from(file_name),
        })
    }

    /// Path this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> IdentityError {
        IdentityError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn temp_name(&self) -> String {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        format!(
            ".{}.tmp.{}.{counter}",
            self.file_name,
            std::process::id()
        )
    }

    fn write_temp(&self, tmp_name: &str, identity: &str) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = self.dir.open_with(tmp_name, &options)?;
        file.write_all(identity.as_bytes())?;
        file.sync_all()
    }

    #[cfg(windows)]
    fn replace_target(&self, tmp_name: &str) -> io::Result<()> {
        // Windows refuses to rename over an existing file.
        match self.dir.remove_file(&self.file_name) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
        self.dir.rename(tmp_name, &self.dir, &self.file_name)
    }

    #[cfg(not(windows))]
    fn replace_target(&self, tmp_name: &str) -> io::Result<()> {
        self.dir.rename(tmp_name, &self.dir, &self.file_name)
    }
}

impl IdentityStore for FileIdentityStore {
    fn load(&self) -> Result<Option<String>, IdentityError> {
        match self.dir.read_to_string(&self.file_name) {
            Ok(raw) => {
                let identity = raw.trim();
                Ok((!identity.is_empty()).then(|| identity.to_owned()))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.io_error(err)),
        }
    }

    fn save(&self, identity: &str) -> Result<(), IdentityError> {
        let tmp_name = self.temp_name();
        self.write_temp(&tmp_name, identity)
            .and_then(|()| self.replace_target(&tmp_name))
            .map_err(|err| {
                if self.dir.remove_file(&tmp_name).is_err() {
                    // Nothing left to clean up.
                }
                self.io_error(err)
            })
    }

    fn clear(&self) -> Result<(), IdentityError> {
        match self.dir.remove_file(&self.file_name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }
}

/// Process-local identity store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    identity: Mutex<Option<String>>,
}

impl MemoryIdentityStore {
    /// Store pre-populated with `identity`.
    #[must_use]
    pub fn with_identity(identity: impl Into<String>) -> Self {
        Self {
            identity: Mutex::new(Some(identity.into())),
        }
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn load(&self) -> Result<Option<String>, IdentityError> {
        Ok(self
            .identity
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, identity: &str) -> Result<(), IdentityError> {
        *self.identity.lock().unwrap_or_else(PoisonError::into_inner) = Some(identity.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), IdentityError> {
        *self.identity.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
