//! Precondition check for the Session Manager plugin.
//!
//! The AWS CLI bridges the exec session's terminal through
//! `session-manager-plugin`; this module only verifies it can be found.

use crate::error::{Error, Result};
use log::info;
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

pub const SESSION_MANAGER_PLUGIN: &str = "session-manager-plugin";

/// Verifies that `session-manager-plugin` is on the executable search path.
///
/// # Errors
/// Returns [`Error::PluginMissing`] if the plugin cannot be found.
pub fn check_session_manager_plugin() -> Result<PathBuf> {
    let search_path = env::var_os("PATH").unwrap_or_default();
    check_session_manager_plugin_in(&search_path)
}

/// Same as [`check_session_manager_plugin`], searching `search_path` instead of `$PATH`.
pub fn check_session_manager_plugin_in(search_path: &OsStr) -> Result<PathBuf> {
    let path = find_executable(SESSION_MANAGER_PLUGIN, search_path).ok_or(Error::PluginMissing)?;
    info!("session-manager-plugin is installed.");
    Ok(path)
}

/// Returns the first entry of `search_path` that holds an executable named `name`.
pub fn find_executable(name: &str, search_path: &OsStr) -> Option<PathBuf> {
    env::split_paths(search_path)
        .flat_map(|dir| candidates(&dir, name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(windows)]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    vec![dir.join(name), dir.join(format!("{name}.exe"))]
}

#[cfg(not(windows))]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    vec![dir.join(name)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[cfg(unix)]
    fn install_plugin(dir: &Path, mode: u32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(SESSION_MANAGER_PLUGIN);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    fn test_plugin_missing_is_fatal() {
        let dir = tempdir().unwrap();
        let result = check_session_manager_plugin_in(dir.path().as_os_str());
        assert!(matches!(result, Err(Error::PluginMissing)));
        assert_eq!(result.unwrap_err().exit_code(), 1);
    }

    #[test]
    fn test_empty_search_path() {
        assert!(matches!(
            check_session_manager_plugin_in(OsStr::new("")),
            Err(Error::PluginMissing)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_plugin_present_passes() {
        let dir = tempdir().unwrap();
        let installed = install_plugin(dir.path(), 0o755);

        let found = check_session_manager_plugin_in(dir.path().as_os_str()).unwrap();
        assert_eq!(found, installed);
    }

    #[cfg(unix)]
    #[test]
    fn test_plugin_found_in_later_path_entry() {
        let empty = tempdir().unwrap();
        let bin = tempdir().unwrap();
        let installed = install_plugin(bin.path(), 0o755);

        let search_path = env::join_paths([empty.path(), bin.path()]).unwrap();
        assert_eq!(
            find_executable(SESSION_MANAGER_PLUGIN, &search_path),
            Some(installed)
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_file_is_ignored() {
        let dir = tempdir().unwrap();
        install_plugin(dir.path(), 0o644);

        assert!(find_executable(SESSION_MANAGER_PLUGIN, dir.path().as_os_str()).is_none());
    }

    #[test]
    fn test_directory_with_plugin_name_is_ignored() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(SESSION_MANAGER_PLUGIN)).unwrap();

        assert!(find_executable(SESSION_MANAGER_PLUGIN, dir.path().as_os_str()).is_none());
    }
}
