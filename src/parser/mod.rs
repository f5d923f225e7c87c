//! Extraction pipeline for NixOS hardware configuration documents.
//!
//! Every collector is a pure function of the document text; [`ParseResult`]
//! composes them after a single read of the file:
//!
//! ```text
//! document ─┬─ filesystems::collect ── partitions::PartitionScheme::infer
//!           ├─ boot::collect
//!           └─ hardware::collect
//! ```
pub mod block;
pub mod boot;
pub mod fields;
pub mod filesystems;
pub mod hardware;
pub mod partitions;

use serde::Serialize;
use std::path::Path;

use crate::error::LoadError;
use boot::BootConfig;
use filesystems::Filesystems;
use partitions::PartitionScheme;

/// Everything extracted from one hardware configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// Mount point to filesystem attributes.
    pub filesystems: Filesystems,
    /// Boot loader and module settings.
    pub boot: BootConfig,
    /// Imported nixos-hardware module names.
    pub hardware_modules: Vec<String>,
    /// Partition layout inferred from `filesystems`.
    pub partition_scheme: PartitionScheme,
    /// Path the document was read from, verbatim.
    pub source_file: String,
}

impl ParseResult {
    /// Run every collector over already-loaded document text.
    ///
    /// # Examples
    ///
    /// ```
    /// use nixos_hwconfig::parser::ParseResult;
    /// use nixos_hwconfig::parser::partitions::SchemeType;
    ///
    /// let text = r#"
    ///   fileSystems."/" = { device = "/dev/disk/by-label/nixos"; fsType = "ext4"; };
    ///   fileSystems."/boot" = { device = "/dev/disk/by-label/boot"; fsType = "vfat"; };
    /// "#;
    /// let result = ParseResult::from_text(text, "hardware-configuration.nix");
    /// assert_eq!(result.partition_scheme.scheme_type, SchemeType::Uefi);
    /// assert_eq!(result.source_file, "hardware-configuration.nix");
    /// ```
    #[must_use]
    pub fn from_text(text: &str, source_file: impl Into<String>) -> Self {
        let filesystems = filesystems::collect(text);
        let boot = boot::collect(text);
        let hardware_modules = hardware::collect(text);
        let partition_scheme = PartitionScheme::infer(&filesystems);

        Self {
            filesystems,
            boot,
            hardware_modules,
            partition_scheme,
            source_file: source_file.into(),
        }
    }
}

/// Read a document into memory.
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] if the path does not exist and
/// [`LoadError::Io`] if it cannot be read as UTF-8 text.
pub fn load_document(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| {
        let path = path.display().to_string();
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound { path }
        } else {
            LoadError::Io { path, source }
        }
    })
}

/// Load and parse a hardware configuration file.
///
/// Parsing never starts on a failed load, so an error here is always
/// distinguishable from a readable document with nothing recognisable in it.
///
/// # Errors
///
/// Returns a [`LoadError`] if the file cannot be loaded.
pub fn parse_file(path: &Path) -> Result<ParseResult, LoadError> {
    let text = load_document(path)?;
    tracing::debug!("parsing {} ({} bytes)", path.display(), text.len());
    Ok(ParseResult::from_text(&text, path.display().to_string()))
}
