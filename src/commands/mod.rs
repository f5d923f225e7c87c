//! Top-level subcommand handlers.
//!
//! Handlers work with [`anyhow::Result`] and attach context to the typed
//! library errors they propagate.
pub mod hosts;
pub mod parse;
pub mod version;

use std::path::PathBuf;

use crate::cli::GlobalOpts;

/// Repository root for host lookups.
///
/// Without `--root` this is the empty path, so resolved documents keep the
/// relative `hosts/<name>/...` form in `source_file`.
#[must_use]
pub fn resolve_root(global: &GlobalOpts) -> PathBuf {
    global.root.clone().unwrap_or_default()
}
