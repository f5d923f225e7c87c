//! Boot loader and kernel module detection.
//!
//! Unlike filesystems, these settings are read from the whole document using
//! their fully-qualified option names.
use serde::Serialize;
use std::fmt;

use super::fields::string_list_field;

/// Presence of this option marks a UEFI-capable boot setup.
pub const UEFI_INDICATOR: &str = "boot.loader.efi.canTouchEfiVariables";
/// Modules available to the initrd.
pub const INITRD_MODULES_OPTION: &str = "boot.initrd.availableKernelModules";
/// Modules loaded in the second boot stage.
pub const KERNEL_MODULES_OPTION: &str = "boot.kernelModules";

/// Boot loader identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BootLoader {
    /// `boot.loader.systemd-boot`
    #[serde(rename = "systemd-boot")]
    SystemdBoot,
    /// `boot.loader.grub`
    #[serde(rename = "grub")]
    Grub,
}

impl BootLoader {
    /// Loaders in detection priority order.
    pub const PRIORITY: [Self; 2] = [Self::SystemdBoot, Self::Grub];

    /// Option prefix whose presence selects this loader.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::SystemdBoot => "boot.loader.systemd-boot",
            Self::Grub => "boot.loader.grub",
        }
    }

    /// Name used in the serialized result.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SystemdBoot => "systemd-boot",
            Self::Grub => "grub",
        }
    }
}

impl fmt::Display for BootLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boot-related facts. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BootConfig {
    /// Detected boot loader.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loader: Option<BootLoader>,
    /// `Some(true)` when the UEFI indicator is present, otherwise `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uefi: Option<bool>,
    /// `boot.initrd.availableKernelModules`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initrd_modules: Option<Vec<String>>,
    /// `boot.kernelModules`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kernel_modules: Option<Vec<String>>,
}

impl BootConfig {
    /// True when nothing boot-related was recognised.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.loader.is_none()
            && self.uefi.is_none()
            && self.initrd_modules.is_none()
            && self.kernel_modules.is_none()
    }
}

/// Detect the boot loader. systemd-boot is checked before GRUB.
#[must_use]
pub fn detect_loader(text: &str) -> Option<BootLoader> {
    BootLoader::PRIORITY
        .into_iter()
        .find(|loader| text.contains(loader.indicator()))
}

/// Collect boot facts from the whole document.
#[must_use]
pub fn collect(text: &str) -> BootConfig {
    let config = BootConfig {
        loader: detect_loader(text),
        uefi: text.contains(UEFI_INDICATOR).then_some(true),
        initrd_modules: string_list_field(text, INITRD_MODULES_OPTION),
        kernel_modules: string_list_field(text, KERNEL_MODULES_OPTION),
    };
    if let Some(loader) = config.loader {
        tracing::debug!("boot loader: {loader}");
    }
    config
}
