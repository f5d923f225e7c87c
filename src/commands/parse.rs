//! Command: parse hardware configurations and print JSON.
use anyhow::{Context as _, Result};
use rayon::prelude::*;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::cli::{GlobalOpts, ParseOpts};
use crate::error::{LoadError, LookupError};
use crate::hosts;
use crate::logging::STAGE_TARGET;
use crate::parser::{self, ParseResult};
use crate::settings::Settings;

/// Run the parse command.
///
/// # Errors
///
/// Returns an error if the settings file is invalid, a host cannot be
/// resolved, or any document fails to load. Nothing is printed in that case.
pub fn run(global: &GlobalOpts, opts: &ParseOpts) -> Result<()> {
    let root = super::resolve_root(global);
    let settings = Settings::load(&root).context("loading settings")?;

    let targets = collect_targets(&root, opts, &settings)?;
    tracing::info!(
        target: STAGE_TARGET,
        "Parsing {} hardware configuration(s)",
        targets.len()
    );

    let results = parse_all(&targets)?;
    for result in &results {
        tracing::debug!(
            "{}: {} filesystems, scheme {}",
            result.source_file,
            result.filesystems.len(),
            result.partition_scheme.scheme_type
        );
    }

    let json = render(&results, opts.compact)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").context("writing result")?;
    Ok(())
}

/// Resolve host names to documents, then append explicit files.
///
/// # Errors
///
/// Returns the first [`LookupError`]; the available hosts are logged first
/// so the user can see what exists.
pub fn collect_targets(root: &Path, opts: &ParseOpts, settings: &Settings) -> Result<Vec<PathBuf>> {
    let mut targets = Vec::with_capacity(opts.hosts.len() + opts.files.len());
    for host in &opts.hosts {
        match hosts::resolve_host(root, host, settings) {
            Ok(path) => targets.push(path),
            Err(err) => {
                let LookupError::HostNotFound { available, .. } = &err;
                if available.is_empty() {
                    tracing::warn!("no hosts found under {}", root.join(&settings.hosts_dir).display());
                } else {
                    tracing::error!("available hosts: {}", available.join(", "));
                }
                return Err(err.into());
            }
        }
    }
    targets.extend(opts.files.iter().cloned());
    Ok(targets)
}

/// Parse every document in parallel, keeping input order.
///
/// # Errors
///
/// Returns a [`LoadError`] if any document cannot be loaded; no partial
/// results are returned.
pub fn parse_all(paths: &[PathBuf]) -> Result<Vec<ParseResult>, LoadError> {
    paths
        .par_iter()
        .map(|path| parser::parse_file(path))
        .collect()
}

/// Serialize results: a single object for one document, an array otherwise.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(results: &[ParseResult], compact: bool) -> Result<String> {
    let json = match (results, compact) {
        ([single], false) => serde_json::to_string_pretty(single),
        ([single], true) => serde_json::to_string(single),
        (all, false) => serde_json::to_string_pretty(all),
        (all, true) => serde_json::to_string(all),
    };
    json.context("serializing parse result")
}
