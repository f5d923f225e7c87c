//! Scalar and list field extraction from raw block text.
//!
//! Only the literal shapes `name = "value"` and `name = [ "a" "b" ]` are
//! understood. Anything else (expressions, interpolation, `lib.mkForce`)
//! simply yields no value.

use super::block::{assignment_target, find_name};

/// Extract the first non-empty `name = "value"` string from `text`.
///
/// # Examples
///
/// ```
/// use nixos_hwconfig::parser::fields::string_field;
///
/// let block = r#" device = "/dev/disk/by-label/nixos"; fsType = "ext4"; "#;
/// assert_eq!(string_field(block, "fsType").as_deref(), Some("ext4"));
/// assert_eq!(string_field(block, "options"), None);
/// ```
#[must_use]
pub fn string_field(text: &str, name: &str) -> Option<String> {
    let mut cursor = 0;
    while let Some(found) = find_name(text, name, cursor) {
        cursor = found + name.len();
        let Some(open) = assignment_target(text, cursor, '"') else {
            continue;
        };
        let value_start = open + 1;
        let Some(len) = text.get(value_start..).and_then(|rest| rest.find('"')) else {
            return None;
        };
        if len > 0 {
            return text
                .get(value_start..value_start + len)
                .map(ToString::to_string);
        }
    }
    None
}

/// Extract every quoted string from the first `name = [ ... ]` list in `text`.
///
/// Returns `None` when the field is not present and an empty vector when the
/// list is present but holds no quoted strings.
///
/// # Examples
///
/// ```
/// use nixos_hwconfig::parser::fields::string_list_field;
///
/// let block = r#" options = [ "noatime" "compress=zstd" ]; "#;
/// assert_eq!(
///     string_list_field(block, "options"),
///     Some(vec!["noatime".to_string(), "compress=zstd".to_string()])
/// );
/// assert_eq!(string_list_field(" options = [ ]; ", "options"), Some(vec![]));
/// assert_eq!(string_list_field(block, "device"), None);
/// ```
#[must_use]
pub fn string_list_field(text: &str, name: &str) -> Option<Vec<String>> {
    let mut cursor = 0;
    while let Some(found) = find_name(text, name, cursor) {
        cursor = found + name.len();
        let Some(open) = assignment_target(text, cursor, '[') else {
            continue;
        };
        let contents_start = open + 1;
        let contents = text.get(contents_start..)?;
        let Some(len) = list_end(contents) else {
            return None;
        };
        return contents.get(..len).map(quoted_strings);
    }
    None
}

/// Return every non-empty `"..."` token in `text`, in order of appearance.
///
/// Quotes are paired left to right, so an empty `""` is consumed as a pair
/// rather than shifting the pairing of the tokens that follow it.
#[must_use]
pub fn quoted_strings(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find('"') {
        let after_open = rest.get(start + 1..).unwrap_or_default();
        let Some(len) = after_open.find('"') else {
            break;
        };
        if let Some(token) = after_open.get(..len).filter(|t| !t.is_empty()) {
            tokens.push(token.to_string());
        }
        rest = after_open.get(len + 1..).unwrap_or_default();
    }
    tokens
}

/// Offset of the `]` closing a list whose contents start `contents`,
/// skipping brackets inside quoted strings.
fn list_end(contents: &str) -> Option<usize> {
    let mut in_string = false;
    for (idx, c) in contents.char_indices() {
        match c {
            '"' => in_string = !in_string,
            ']' if !in_string => return Some(idx),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn string_field_first_match_wins() {
        let text = r#"fsType = "ext4"; fsType = "btrfs";"#;
        assert_eq!(string_field(text, "fsType").as_deref(), Some("ext4"));
    }

    #[test]
    fn string_field_skips_empty_value() {
        let text = r#"device = ""; device = "/dev/sda1";"#;
        assert_eq!(string_field(text, "device").as_deref(), Some("/dev/sda1"));
    }

    #[test]
    fn string_field_respects_identifier_boundary() {
        let text = r#"blk-device = "/dev/sdb"; device = "/dev/sda";"#;
        assert_eq!(string_field(text, "device").as_deref(), Some("/dev/sda"));
    }

    #[test]
    fn string_field_ignores_non_literal_values() {
        let text = "device = config.disko.device;";
        assert_eq!(string_field(text, "device"), None);
    }

    #[test]
    fn string_field_tolerates_newlines_around_equals() {
        let text = "device\n    =\n    \"/dev/disk/by-uuid/1234\";";
        assert_eq!(
            string_field(text, "device").as_deref(),
            Some("/dev/disk/by-uuid/1234")
        );
    }

    #[test]
    fn string_list_field_preserves_order() {
        let text = r#"options = [ "subvol=@home" "noatime" "compress=zstd" ];"#;
        assert_eq!(
            string_list_field(text, "options").unwrap(),
            ["subvol=@home", "noatime", "compress=zstd"]
        );
    }

    #[test]
    fn string_list_field_absent_vs_empty() {
        assert_eq!(string_list_field(r#"fsType = "ext4";"#, "options"), None);
        assert_eq!(string_list_field("options = [];", "options"), Some(vec![]));
    }

    #[test]
    fn string_list_field_handles_bracket_in_string() {
        let text = r#"options = [ "x-mount.opt=[a]" "ro" ];"#;
        assert_eq!(
            string_list_field(text, "options").unwrap(),
            ["x-mount.opt=[a]", "ro"]
        );
    }

    #[test]
    fn quoted_strings_skips_empty_tokens() {
        assert_eq!(quoted_strings(r#""" "a" "" "b""#), ["a", "b"]);
    }

    #[test]
    fn quoted_strings_ignores_unterminated_tail() {
        assert_eq!(quoted_strings(r#""xhci_pci" "ahci"#), ["xhci_pci"]);
    }
}
