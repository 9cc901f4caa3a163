//! ADC-style credential resolution: Application Default Credentials first,
//! then an explicit key file. No network I/O.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    ApplicationDefault,
    KeyFile(PathBuf),
}

/// Mirrors the ADC chain: an explicit key file wins if given, then the
/// `CLOUD_B_APPLICATION_CREDENTIALS` environment variable, then a
/// well-known path under the user's config directory.
pub fn resolve(credentials_file: Option<&Path>) -> Option<Credentials> {
    if let Some(path) = credentials_file {
        return path.is_file().then(|| Credentials::KeyFile(path.to_path_buf()));
    }

    if let Ok(path) = std::env::var("CLOUD_B_APPLICATION_CREDENTIALS") {
        let path = PathBuf::from(path);
        if path.is_file() {
            return Some(Credentials::KeyFile(path));
        }
    }

    let well_known = dirs::config_dir()?.join("cloud-b").join("application_default_credentials.json");
    if well_known.is_file() {
        return Some(Credentials::ApplicationDefault);
    }

    None
}

#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn an_explicit_key_file_that_does_not_exist_resolves_to_none() {
        let _guard = ENV_LOCK.lock().unwrap();
        assert_eq!(resolve(Some(Path::new("/nonexistent/key.json"))), None);
    }

    #[test]
    fn an_explicit_key_file_that_exists_resolves() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        std::fs::write(&path, "{}").unwrap();
        assert_eq!(resolve(Some(&path)), Some(Credentials::KeyFile(path)));
    }
}
