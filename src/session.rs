//! Persistent API token.
//!
//! The token is one string stored in a file between invocations. It is read,
//! written and removed; there is no refresh or rotation.

use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing::debug;

const APP_DIR: &str = "siswa";
const TOKEN_FILE: &str = "token";

/// Default token location: `<config dir>/siswa/token`, or `./.siswa-token` when the
/// platform has no config directory.
#[must_use]
pub fn default_token_path() -> PathBuf {
    dirs::config_dir().map_or_else(
        || PathBuf::from(".siswa-token"),
        |dir| dir.join(APP_DIR).join(TOKEN_FILE),
    )
}

#[derive(Clone, Debug)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored token, if any. Blank files count as no token.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read.
    pub fn get(&self) -> Result<Option<SecretString>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(SecretString::from(token.to_string())))
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err)
                .with_context(|| format!("failed to read token file {}", self.path.display())),
        }
    }

    /// Persist `token`, creating the parent directory when needed.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    pub fn set(&self, token: &SecretString) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let mut file = open_token_file(&self.path)
            .with_context(|| format!("failed to open token file {}", self.path.display()))?;
        restrict_permissions(&file, &self.path)?;
        file.write_all(token.expose_secret().as_bytes())
            .with_context(|| format!("failed to write token file {}", self.path.display()))?;

        debug!(path = %self.path.display(), "token stored");
        Ok(())
    }

    /// Remove the stored token. Removing a missing token is not an error.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "token removed");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("failed to remove token file {}", self.path.display())),
        }
    }

    /// Whether a token is stored. Unreadable files count as unauthenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.get(), Ok(Some(_)))
    }
}

/// New files are created owner-only; the mode never widens between create and write.
#[cfg(unix)]
fn open_token_file(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_token_file(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

// `mode` only applies on create; a file left by an older run is tightened here.
#[cfg(unix)]
fn restrict_permissions(file: &File, path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(0o600))
        .with_context(|| format!("failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File, _path: &Path) -> Result<()> {
    Ok(())
}
