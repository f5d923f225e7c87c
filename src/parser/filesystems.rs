//! `fileSystems."<mount>" = { ... }` collection.
use serde::Serialize;
use std::collections::BTreeMap;

use super::block::attribute_blocks;
use super::fields::{string_field, string_list_field};

/// Attribute name that introduces filesystem blocks.
pub const FILESYSTEMS_ATTRIBUTE: &str = "fileSystems";

/// Filesystem attributes declared for a single mount point.
///
/// # Examples
///
/// ```
/// use nixos_hwconfig::parser::filesystems::FilesystemEntry;
///
/// let entry = FilesystemEntry::from_block(r#" device = "/dev/sda1"; fsType = "vfat"; "#);
/// assert_eq!(entry.device.as_deref(), Some("/dev/sda1"));
/// assert_eq!(entry.fs_type.as_deref(), Some("vfat"));
/// assert!(entry.options.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilesystemEntry {
    /// Device reference (`/dev/disk/by-uuid/...`, a label path, ...), not validated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Filesystem type such as `ext4` or `vfat`.
    #[serde(rename = "fsType", skip_serializing_if = "Option::is_none")]
    pub fs_type: Option<String>,
    /// Mount options in declaration order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FilesystemEntry {
    /// Extract `device`, `fsType` and `options` from a block's inner text.
    ///
    /// Each field is looked up independently; none is required.
    #[must_use]
    pub fn from_block(block: &str) -> Self {
        Self {
            device: string_field(block, "device"),
            fs_type: string_field(block, "fsType"),
            options: string_list_field(block, "options"),
        }
    }
}

/// Mount point to filesystem attributes, ordered by mount point.
pub type Filesystems = BTreeMap<String, FilesystemEntry>;

/// Collect every filesystem block in the document.
///
/// Blocks are applied in document order, so when a mount point is declared
/// more than once the last declaration wins.
#[must_use]
pub fn collect(text: &str) -> Filesystems {
    let mut filesystems = Filesystems::new();
    for (mount_point, block) in attribute_blocks(text, FILESYSTEMS_ATTRIBUTE) {
        let entry = FilesystemEntry::from_block(block);
        tracing::debug!(
            "filesystem {mount_point}: type {}",
            entry.fs_type.as_deref().unwrap_or("-")
        );
        if filesystems.insert(mount_point.to_string(), entry).is_some() {
            tracing::debug!("filesystem {mount_point} declared again; keeping the later block");
        }
    }
    filesystems
}
