//! Partition layout inference from collected filesystems.
//!
//! Each mount point is classified into exactly one [`PartitionSpec`] by an
//! ordered rule set (first match wins):
//!
//! | Mount point      | Role        | Size        | Label            |
//! |------------------|-------------|-------------|------------------|
//! | `/`              | root        | remaining   | `nixos`          |
//! | `/boot`          | boot        | 512 MB      | `boot`           |
//! | `/mnt/<name>`    | auxiliary   | remaining   | last path segment|
//! | anything else    | primary     | 0 MB        | none             |
//!
//! The scheme is UEFI when root and boot both exist and boot is a `vfat`
//! (EFI System) partition, BIOS when both exist otherwise, and unknown when
//! either is missing.
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

use super::filesystems::{FilesystemEntry, Filesystems};

/// Filesystem type assumed when an entry does not declare one.
pub const DEFAULT_FS_TYPE: &str = "ext4";
/// Fixed size of the boot partition.
pub const BOOT_PARTITION_MB: u64 = 512;
/// Label given to the root partition.
pub const ROOT_LABEL: &str = "nixos";
/// Label given to the boot partition.
pub const BOOT_LABEL: &str = "boot";
/// Mount-point prefix of auxiliary data partitions.
pub const AUXILIARY_PREFIX: &str = "/mnt/";

const ROOT_MOUNT: &str = "/";
const BOOT_MOUNT: &str = "/boot";
const EFI_FS_TYPE: &str = "vfat";

/// How much disk space a partition gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizePolicy {
    /// A fixed size in megabytes.
    Fixed(u64),
    /// Whatever space is left on the disk.
    Remaining,
}

impl Serialize for SizePolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Fixed(mb) => serializer.serialize_u64(*mb),
            Self::Remaining => serializer.serialize_str("remaining"),
        }
    }
}

impl fmt::Display for SizePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(mb) => write!(f, "{mb} MB"),
            Self::Remaining => f.write_str("remaining"),
        }
    }
}

/// Functional role of a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionRole {
    /// The `/` filesystem.
    Root,
    /// The `/boot` filesystem.
    Boot,
    /// A data filesystem under `/mnt/`.
    Auxiliary,
    /// Any other mount point.
    Primary,
}

/// Partition table type, used only to decide the scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PartitionKind {
    /// EFI System Partition.
    #[serde(rename = "EFI System")]
    EfiSystem,
    /// Ordinary partition.
    #[serde(rename = "primary")]
    Primary,
}

/// Boot convention of the inferred layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeType {
    /// Root plus an EFI System boot partition.
    Uefi,
    /// Root plus a non-EFI boot partition.
    Bios,
    /// Root or boot is missing.
    Unknown,
}

impl fmt::Display for SchemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uefi => "uefi",
            Self::Bios => "bios",
            Self::Unknown => "unknown",
        })
    }
}

/// One partition the installer should create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionSpec {
    /// Mount point the partition is mounted at.
    pub mount: String,
    /// Filesystem type to format with.
    pub fstype: String,
    /// Requested size.
    pub size_mb: SizePolicy,
    /// Partition table type.
    #[serde(rename = "type")]
    pub kind: PartitionKind,
    /// Filesystem label; unset for unclassified mount points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Classification that produced this spec.
    #[serde(skip)]
    pub role: PartitionRole,
}

impl PartitionSpec {
    /// Classify a single mount point.
    ///
    /// # Examples
    ///
    /// ```
    /// use nixos_hwconfig::parser::filesystems::FilesystemEntry;
    /// use nixos_hwconfig::parser::partitions::{PartitionKind, PartitionRole, PartitionSpec, SizePolicy};
    ///
    /// let entry = FilesystemEntry { fs_type: Some("vfat".into()), ..Default::default() };
    /// let spec = PartitionSpec::classify("/boot", &entry);
    /// assert_eq!(spec.role, PartitionRole::Boot);
    /// assert_eq!(spec.kind, PartitionKind::EfiSystem);
    /// assert_eq!(spec.size_mb, SizePolicy::Fixed(512));
    /// ```
    #[must_use]
    pub fn classify(mount: &str, entry: &FilesystemEntry) -> Self {
        let fstype = entry
            .fs_type
            .clone()
            .unwrap_or_else(|| DEFAULT_FS_TYPE.to_string());

        let (role, size_mb, label, kind) = if mount == ROOT_MOUNT {
            (
                PartitionRole::Root,
                SizePolicy::Remaining,
                Some(ROOT_LABEL.to_string()),
                PartitionKind::Primary,
            )
        } else if mount == BOOT_MOUNT {
            let kind = if entry.fs_type.as_deref() == Some(EFI_FS_TYPE) {
                PartitionKind::EfiSystem
            } else {
                PartitionKind::Primary
            };
            (
                PartitionRole::Boot,
                SizePolicy::Fixed(BOOT_PARTITION_MB),
                Some(BOOT_LABEL.to_string()),
                kind,
            )
        } else if mount.starts_with(AUXILIARY_PREFIX) {
            let label = mount.rsplit('/').next().unwrap_or_default().to_string();
            (
                PartitionRole::Auxiliary,
                SizePolicy::Remaining,
                Some(label),
                PartitionKind::Primary,
            )
        } else {
            // TODO: size unclassified mounts from the device once disk probing exists;
            // a zero here cannot be told apart from an intentionally empty partition.
            tracing::warn!("no partition rule for {mount}; sizing it at 0 MB");
            (
                PartitionRole::Primary,
                SizePolicy::Fixed(0),
                None,
                PartitionKind::Primary,
            )
        };

        tracing::debug!("partition {mount}: {role:?}, {size_mb}, {fstype}");
        Self {
            mount: mount.to_string(),
            fstype,
            size_mb,
            kind,
            label,
            role,
        }
    }
}

/// Root sorts last; everything else by mount point.
fn partition_order(a: &PartitionSpec, b: &PartitionSpec) -> Ordering {
    (a.mount == ROOT_MOUNT)
        .cmp(&(b.mount == ROOT_MOUNT))
        .then_with(|| a.mount.cmp(&b.mount))
}

/// The inferred disk layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionScheme {
    /// UEFI, BIOS or unknown.
    #[serde(rename = "type")]
    pub scheme_type: SchemeType,
    /// Partitions in creation order; root, when present, is last.
    pub partitions: Vec<PartitionSpec>,
    /// Disk size is never estimated from the configuration and stays zero.
    pub disk_size_gb: u64,
}

impl PartitionScheme {
    /// Infer the layout for a set of filesystems.
    #[must_use]
    pub fn infer(filesystems: &Filesystems) -> Self {
        let mut partitions: Vec<PartitionSpec> = filesystems
            .iter()
            .map(|(mount, entry)| PartitionSpec::classify(mount, entry))
            .collect();

        let has_role = |role: PartitionRole| partitions.iter().any(|p| p.role == role);
        let scheme_type = if has_role(PartitionRole::Root) && has_role(PartitionRole::Boot) {
            if partitions.iter().any(|p| p.kind == PartitionKind::EfiSystem) {
                SchemeType::Uefi
            } else {
                SchemeType::Bios
            }
        } else {
            SchemeType::Unknown
        };

        partitions.sort_by(partition_order);
        tracing::debug!("partition scheme: {scheme_type}");

        Self {
            scheme_type,
            partitions,
            disk_size_gb: 0,
        }
    }

    /// Find the partition for a mount point.
    #[must_use]
    pub fn partition(&self, mount: &str) -> Option<&PartitionSpec> {
        self.partitions.iter().find(|p| p.mount == mount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn entry(fs_type: Option<&str>) -> FilesystemEntry {
        FilesystemEntry {
            device: None,
            fs_type: fs_type.map(ToString::to_string),
            options: None,
        }
    }

    fn filesystems(entries: &[(&str, Option<&str>)]) -> Filesystems {
        entries
            .iter()
            .map(|&(mount, fs_type)| (mount.to_string(), entry(fs_type)))
            .collect()
    }

    #[test]
    fn empty_filesystems_give_unknown_scheme() {
        let scheme = PartitionScheme::infer(&Filesystems::new());
        assert_eq!(scheme.scheme_type, SchemeType::Unknown);
        assert!(scheme.partitions.is_empty());
        assert_eq!(scheme.disk_size_gb, 0);
    }

    #[test]
    fn vfat_boot_gives_uefi() {
        let scheme =
            PartitionScheme::infer(&filesystems(&[("/", Some("ext4")), ("/boot", Some("vfat"))]));
        assert_eq!(scheme.scheme_type, SchemeType::Uefi);
        let mounts: Vec<&str> = scheme.partitions.iter().map(|p| p.mount.as_str()).collect();
        assert_eq!(mounts, ["/boot", "/"]);
        assert_eq!(scheme.partitions[0].label.as_deref(), Some("boot"));
        assert_eq!(scheme.partitions[0].size_mb, SizePolicy::Fixed(512));
        assert_eq!(scheme.partitions[1].label.as_deref(), Some("nixos"));
        assert_eq!(scheme.partitions[1].size_mb, SizePolicy::Remaining);
    }

    #[test]
    fn non_vfat_boot_gives_bios() {
        let scheme =
            PartitionScheme::infer(&filesystems(&[("/", Some("ext4")), ("/boot", Some("ext2"))]));
        assert_eq!(scheme.scheme_type, SchemeType::Bios);
        assert_eq!(
            scheme.partition("/boot").unwrap().kind,
            PartitionKind::Primary
        );
    }

    #[test]
    fn root_without_boot_is_unknown() {
        let scheme = PartitionScheme::infer(&filesystems(&[("/", Some("btrfs"))]));
        assert_eq!(scheme.scheme_type, SchemeType::Unknown);
        assert_eq!(scheme.partitions.len(), 1);
    }

    #[test]
    fn boot_without_root_is_unknown_even_if_efi() {
        let scheme = PartitionScheme::infer(&filesystems(&[("/boot", Some("vfat"))]));
        assert_eq!(scheme.scheme_type, SchemeType::Unknown);
    }

    #[test]
    fn missing_fs_type_defaults_to_ext4() {
        let spec = PartitionSpec::classify("/", &entry(None));
        assert_eq!(spec.fstype, "ext4");
    }

    #[test]
    fn boot_without_fs_type_is_not_efi() {
        let spec = PartitionSpec::classify("/boot", &entry(None));
        assert_eq!(spec.kind, PartitionKind::Primary);
        assert_eq!(spec.fstype, "ext4");
    }

    #[test]
    fn auxiliary_mount_uses_last_segment_as_label() {
        let spec = PartitionSpec::classify("/mnt/media/games", &entry(Some("xfs")));
        assert_eq!(spec.role, PartitionRole::Auxiliary);
        assert_eq!(spec.label.as_deref(), Some("games"));
        assert_eq!(spec.size_mb, SizePolicy::Remaining);
    }

    #[test]
    fn unclassified_mount_gets_zero_size_and_no_label() {
        let spec = PartitionSpec::classify("/home", &entry(Some("ext4")));
        assert_eq!(spec.role, PartitionRole::Primary);
        assert_eq!(spec.size_mb, SizePolicy::Fixed(0));
        assert_eq!(spec.label, None);
    }

    #[test]
    fn root_sorts_last_and_others_lexicographically() {
        let scheme = PartitionScheme::infer(&filesystems(&[
            ("/mnt/data", None),
            ("/", None),
            ("/boot", None),
            ("/home", None),
        ]));
        let mounts: Vec<&str> = scheme.partitions.iter().map(|p| p.mount.as_str()).collect();
        assert_eq!(mounts, ["/boot", "/home", "/mnt/data", "/"]);
    }

    #[test]
    fn partition_serializes_with_installer_keys() {
        let spec = PartitionSpec::classify("/boot", &entry(Some("vfat")));
        assert_eq!(
            serde_json::to_string(&spec).unwrap(),
            r#"{"mount":"/boot","fstype":"vfat","size_mb":512,"type":"EFI System","label":"boot"}"#
        );
        let root = PartitionSpec::classify("/", &entry(None));
        assert_eq!(
            serde_json::to_string(&root).unwrap(),
            r#"{"mount":"/","fstype":"ext4","size_mb":"remaining","type":"primary","label":"nixos"}"#
        );
    }

    #[test]
    fn scheme_serializes_type_key() {
        let scheme = PartitionScheme::infer(&Filesystems::new());
        assert_eq!(
            serde_json::to_string(&scheme).unwrap(),
            r#"{"type":"unknown","partitions":[],"disk_size_gb":0}"#
        );
    }
}
