//! Layered access-token storage.
//!
//! Tokens land in the OS keychain when one is reachable. Headless machines
//! fall back to the `JOBSUITE_AUTH__ACCESS_TOKEN` environment variable or a
//! private file under `~/.jobsuite/`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;

const SERVICE_ENV: &str = "JOBSUITE_KEYRING_SERVICE";
const TOKEN_ENV: &str = "JOBSUITE_AUTH__ACCESS_TOKEN";

/// Which storage tier a token was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Keyring,
    Env,
    File,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
        })
    }
}

/// The keychain service defaults to `jobsuite`. Tests point
/// `JOBSUITE_KEYRING_SERVICE` at a throwaway service so they never touch
/// real credentials.
fn keyring_entry() -> Result<keyring::Entry, keyring::Error> {
    let service = std::env::var(SERVICE_ENV).unwrap_or_else(|_| "jobsuite".to_string());
    keyring::Entry::new(&service, "access-token")
}

/// Persist an access token, preferring the keychain over the fallback file.
///
/// # Errors
///
/// Returns [`AuthError::TokenStore`] when the keychain rejects the token and
/// the fallback file cannot be written either.
pub fn save(token: &str) -> Result<(), AuthError> {
    if let Err(error) = keyring_entry().and_then(|entry| entry.set_password(token)) {
        tracing::warn!(%error, "keychain write failed; storing token on disk");
        return write_credentials(&credentials_path()?, token);
    }
    Ok(())
}

/// Read the stored token, trying each tier in turn.
#[must_use]
pub fn load() -> Option<String> {
    locate().map(|(token, _)| token)
}

/// Report where [`load`] would find the current token.
#[must_use]
pub fn detect_source() -> Option<TokenSource> {
    locate().map(|(_, source)| source)
}

/// Remove the token from every tier that persists one.
///
/// # Errors
///
/// Returns [`AuthError::TokenStore`] when the credentials file exists but
/// cannot be deleted.
pub fn delete() -> Result<(), AuthError> {
    if let Ok(entry) = keyring_entry() {
        // Absent entries are not a failure.
        let _ = entry.delete_credential();
    }
    let path = credentials_path()?;
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(file_error("delete", &path, &error)),
    }
}

fn locate() -> Option<(String, TokenSource)> {
    let keychain = keyring_entry().and_then(|entry| entry.get_password()).ok();
    if let Some(token) = keychain.filter(|t| !t.is_empty()) {
        return Some((token, TokenSource::Keyring));
    }
    if let Some(token) = std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty()) {
        return Some((token, TokenSource::Env));
    }
    let path = credentials_path().ok()?;
    read_credentials(&path).map(|token| (token, TokenSource::File))
}

fn credentials_path() -> Result<PathBuf, AuthError> {
    let home = dirs::home_dir()
        .ok_or_else(|| AuthError::TokenStore("no home directory for credentials file".into()))?;
    Ok(home.join(".jobsuite").join("credentials"))
}

fn file_error(verb: &str, path: &Path, error: &std::io::Error) -> AuthError {
    AuthError::TokenStore(format!("{verb} {}: {error}", path.display()))
}

/// Writes the fallback file readable by the owner only.
fn write_credentials(path: &Path, token: &str) -> Result<(), AuthError> {
    if let Some(dir) = path.parent() {
        create_private_dir(dir)?;
    }
    // Recreate rather than overwrite so the mode below always applies.
    if path.exists() {
        fs::remove_file(path).map_err(|error| file_error("replace", path, &error))?;
    }

    #[cfg(unix)]
    {
        use std::io::Write as _;
        use std::os::unix::fs::OpenOptionsExt;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .mode(0o600)
            .open(path)
            .map_err(|error| file_error("create", path, &error))?;
        file.write_all(token.as_bytes())
            .map_err(|error| file_error("write", path, &error))?;
    }
    #[cfg(not(unix))]
    fs::write(path, token).map_err(|error| file_error("write", path, &error))?;

    Ok(())
}

fn create_private_dir(dir: &Path) -> Result<(), AuthError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        fs::DirBuilder::new()
            .recursive(true)
            .mode(0o700)
            .create(dir)
            .map_err(|error| file_error("mkdir", dir, &error))
    }
    #[cfg(not(unix))]
    fs::create_dir_all(dir).map_err(|error| file_error("mkdir", dir, &error))
}

fn read_credentials(path: &Path) -> Option<String> {
    let contents = fs::read_to_string(path).ok()?;
    let token = contents.trim();
    (!token.is_empty()).then(|| token.to_string())
}
