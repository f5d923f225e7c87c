//! nixos-hardware module imports.
use super::block::list_block;

/// Attribute path that prefixes every nixos-hardware module reference.
pub const MODULE_PREFIX: &str = "inputs.nixos-hardware.nixosModules.";

const fn is_module_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Collect nixos-hardware module names from the first `imports = [ ... ];`.
///
/// Names are returned in order of appearance; duplicates are kept. A
/// document without an imports list yields an empty vector.
///
/// # Examples
///
/// ```
/// use nixos_hwconfig::parser::hardware::collect;
///
/// let text = r#"
///   imports = [
///     (modulesPath + "/installer/scan/not-detected.nix")
///     inputs.nixos-hardware.nixosModules.common-cpu-amd
///     inputs.nixos-hardware.nixosModules.common-gpu-amd
///   ];
/// "#;
/// assert_eq!(collect(text), ["common-cpu-amd", "common-gpu-amd"]);
/// ```
#[must_use]
pub fn collect(text: &str) -> Vec<String> {
    let Some(imports) = list_block(text, "imports") else {
        return Vec::new();
    };

    let mut modules = Vec::new();
    let mut rest = imports;
    while let Some(start) = rest.find(MODULE_PREFIX) {
        let tail = rest
            .get(start + MODULE_PREFIX.len()..)
            .unwrap_or_default();
        let len = tail
            .char_indices()
            .find(|&(_, c)| !is_module_char(c))
            .map_or(tail.len(), |(idx, _)| idx);
        if let Some(name) = tail.get(..len).filter(|n| !n.is_empty()) {
            tracing::debug!("hardware module: {name}");
            modules.push(name.to_string());
        }
        rest = tail.get(len..).unwrap_or_default();
    }
    modules
}
