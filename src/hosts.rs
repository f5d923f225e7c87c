//! Resolving host names to hardware configuration documents.
use std::path::{Path, PathBuf};

use crate::error::LookupError;
use crate::settings::Settings;

/// Return the first candidate document for `host` that exists under `root`.
#[must_use]
pub fn find_hardware_config(root: &Path, host: &str, settings: &Settings) -> Option<PathBuf> {
    settings
        .candidate_paths(host)
        .into_iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.is_file())
}

/// List host names with a directory under the configured hosts directory.
///
/// Sorted ascending; empty when the hosts directory does not exist.
#[must_use]
pub fn available_hosts(root: &Path, settings: &Settings) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(root.join(&settings.hosts_dir)) else {
        return Vec::new();
    };
    let mut hosts: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    hosts.sort();
    hosts
}

/// Resolve `host` to its hardware configuration document.
///
/// # Errors
///
/// Returns [`LookupError::HostNotFound`] (carrying the available hosts) if
/// no candidate path exists.
pub fn resolve_host(root: &Path, host: &str, settings: &Settings) -> Result<PathBuf, LookupError> {
    if let Some(path) = find_hardware_config(root, host, settings) {
        tracing::debug!("host {host} -> {}", path.display());
        return Ok(path);
    }
    Err(LookupError::HostNotFound {
        host: host.to_string(),
        available: available_hosts(root, settings),
    })
}
