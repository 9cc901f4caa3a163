//! Standard credential-chain resolution: environment, named profile, then
//! instance role. Each step is a local check; none performs network I/O.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Environment,
    Profile(String),
    InstanceRole,
}

/// Resolves credentials the way the cloud-a SDK's own chain does: explicit
/// environment variables first, then a named profile in the shared
/// credentials file, then (if nothing else is present) a best-effort
/// assumption that an instance role is attached -- the actual role is only
/// confirmed once a real call is attempted.
pub fn resolve(profile: Option<&str>) -> Option<Credentials> {
    if std::env::var_os("CLOUD_A_ACCESS_KEY_ID").is_some()
        && std::env::var_os("CLOUD_A_SECRET_ACCESS_KEY").is_some()
    {
        return Some(Credentials::Environment);
    }

    if let Some(profile) = profile {
        if profile_exists(profile) {
            return Some(Credentials::Profile(profile.to_string()));
        }
        return None;
    }

    if std::env::var_os("CLOUD_A_INSTANCE_ROLE").is_some() {
        return Some(Credentials::InstanceRole);
    }

    None
}

fn credentials_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".cloud-a").join("credentials"))
}

fn profile_exists(profile: &str) -> bool {
    let Some(path) = credentials_file() else {
        return false;
    };
    let Ok(contents) = std::fs::read_to_string(path) else {
        return false;
    };
    contents.lines().any(|line| line.trim() == format!("[{profile}]"))
}

/// Serializes tests across this crate that read or write the
/// `CLOUD_A_*` environment variables, since those are process-global.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_nothing_when_no_chain_link_is_present() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("CLOUD_A_ACCESS_KEY_ID");
        std::env::remove_var("CLOUD_A_SECRET_ACCESS_KEY");
        std::env::remove_var("CLOUD_A_INSTANCE_ROLE");
        assert_eq!(resolve(None), None);
    }
}
