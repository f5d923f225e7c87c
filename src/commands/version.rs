//! Command: print version information.
use anyhow::{Context as _, Result};
use std::io::Write as _;

/// Version string: `HWCONFIG_VERSION` from the build, else the package version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("HWCONFIG_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the hwconfig version to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn run() -> Result<()> {
    writeln!(std::io::stdout().lock(), "hwconfig {}", version()).context("writing version")
}
