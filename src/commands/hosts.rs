//! Command: list hosts with a configuration directory.
use anyhow::{Context as _, Result};
use std::io::Write as _;

use crate::cli::{GlobalOpts, HostsOpts};
use crate::hosts;
use crate::settings::Settings;

/// Print one available host name per line.
///
/// # Errors
///
/// Returns an error if the settings file is invalid or stdout cannot be written.
pub fn run(global: &GlobalOpts, _opts: &HostsOpts) -> Result<()> {
    let root = super::resolve_root(global);
    let settings = Settings::load(&root).context("loading settings")?;

    let names = hosts::available_hosts(&root, &settings);
    if names.is_empty() {
        tracing::warn!("no hosts found under {}", root.join(&settings.hosts_dir).display());
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    for name in &names {
        writeln!(stdout, "{name}").context("writing host list")?;
    }
    Ok(())
}
