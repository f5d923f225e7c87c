//! Locating attribute blocks inside a hardware configuration document.
//!
//! Blocks are closed with a delimiter-depth counter, so a block containing a
//! nested attribute set (e.g. `encrypted = { ... };`) is returned whole
//! instead of being cut at the first inner `}`. Braces inside quoted strings
//! and `#` line comments do not count towards the depth.

/// Characters that may continue a Nix identifier or attribute path.
///
/// A name only matches when the character in front of it is *not* one of
/// these, so looking up `device` never hits `blkDevice` or `my-device`.
pub(crate) const fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '\'')
}

/// Find the next occurrence of `needle` at or after `from` that starts on an
/// identifier boundary.
pub(crate) fn find_name(text: &str, needle: &str, from: usize) -> Option<usize> {
    let mut cursor = from;
    loop {
        let found = cursor + text.get(cursor..)?.find(needle)?;
        let preceded_by_identifier = text
            .get(..found)
            .and_then(|before| before.chars().next_back())
            .is_some_and(is_identifier_char);
        if !preceded_by_identifier {
            return Some(found);
        }
        // Needles start with an ASCII character, so +1 stays on a char boundary.
        cursor = found + 1;
    }
}

/// Match `\s*=\s*<opener>` starting at `pos` and return the byte offset of
/// the opener.
pub(crate) fn assignment_target(text: &str, pos: usize, opener: char) -> Option<usize> {
    let after_eq = text.get(pos..)?.trim_start().strip_prefix('=')?;
    let value = after_eq.trim_start();
    value
        .starts_with(opener)
        .then(|| text.len() - value.len())
}

/// Return the offset of the delimiter that closes the one at `open`.
///
/// `open` must point at `opener`. Returns `None` when the document ends
/// before depth returns to zero.
pub(crate) fn closing_delimiter(text: &str, open: usize, opener: u8, closer: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut in_comment = false;
    let mut escaped = false;

    for (offset, &byte) in text.as_bytes().get(open..)?.iter().enumerate() {
        if in_comment {
            in_comment = byte != b'\n';
            continue;
        }
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'#' => in_comment = true,
            b if b == opener => depth += 1,
            b if b == closer => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Return the inner text of the first `<introducer> = { ... }` block.
///
/// Occurrences whose assignment is malformed or whose block never closes are
/// skipped. Returns `None` when no occurrence yields a block.
///
/// # Examples
///
/// ```
/// use nixos_hwconfig::parser::block::find_block;
///
/// let text = r#"swapDevices = [ ]; hardware.cpu = { intel = true; };"#;
/// assert_eq!(find_block(text, "hardware.cpu"), Some(" intel = true; "));
/// assert_eq!(find_block(text, "networking"), None);
/// ```
#[must_use]
pub fn find_block<'a>(text: &'a str, introducer: &str) -> Option<&'a str> {
    let mut cursor = 0;
    while let Some(found) = find_name(text, introducer, cursor) {
        cursor = found + introducer.len();
        let Some(open) = assignment_target(text, cursor, '{') else {
            continue;
        };
        if let Some(close) = closing_delimiter(text, open, b'{', b'}') {
            return text.get(open + 1..close);
        }
    }
    None
}

/// Scan the whole document for `<attribute>."<key>" = { ... }` blocks.
///
/// Every occurrence is matched independently and returned as
/// `(key, inner_text)` in document order. Callers that build a map from the
/// result rely on this order: a later block for the same key overwrites an
/// earlier one. Blocks with empty inner text (`{}`) are skipped.
///
/// # Examples
///
/// ```
/// use nixos_hwconfig::parser::block::attribute_blocks;
///
/// let text = r#"
///   fileSystems."/" = { fsType = "ext4"; };
///   fileSystems."/boot" = { fsType = "vfat"; };
/// "#;
/// let blocks = attribute_blocks(text, "fileSystems");
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0].0, "/");
/// assert_eq!(blocks[1].0, "/boot");
/// ```
#[must_use]
pub fn attribute_blocks<'a>(text: &'a str, attribute: &str) -> Vec<(&'a str, &'a str)> {
    let introducer = format!("{attribute}.\"");
    let mut blocks = Vec::new();
    let mut cursor = 0;

    while let Some(found) = find_name(text, &introducer, cursor) {
        let key_start = found + introducer.len();
        let Some(key_len) = text.get(key_start..).and_then(|rest| rest.find('"')) else {
            break;
        };
        let key_end = key_start + key_len;
        cursor = key_end + 1;

        let Some(key) = text.get(key_start..key_end).filter(|k| !k.is_empty()) else {
            continue;
        };
        let Some(open) = assignment_target(text, cursor, '{') else {
            continue;
        };
        let Some(close) = closing_delimiter(text, open, b'{', b'}') else {
            tracing::debug!("unterminated {attribute} block for {key}");
            continue;
        };
        cursor = close + 1;

        match text.get(open + 1..close) {
            Some(inner) if !inner.is_empty() => blocks.push((key, inner)),
            _ => {}
        }
    }

    blocks
}

/// Return the inner text of the first `<name> = [ ... ];` list.
///
/// The list ends at the first `];` after the opening bracket, which is
/// enough for import lists of paths and attribute references.
///
/// # Examples
///
/// ```
/// use nixos_hwconfig::parser::block::list_block;
///
/// let text = "imports = [ ./disko.nix ];";
/// assert_eq!(list_block(text, "imports"), Some(" ./disko.nix "));
/// assert_eq!(list_block("{ }", "imports"), None);
/// ```
#[must_use]
pub fn list_block<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    let mut cursor = 0;
    while let Some(found) = find_name(text, name, cursor) {
        cursor = found + name.len();
        let Some(open) = assignment_target(text, cursor, '[') else {
            continue;
        };
        let inner_start = open + 1;
        if let Some(len) = text.get(inner_start..).and_then(|rest| rest.find("];")) {
            return text.get(inner_start..inner_start + len);
        }
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn find_block_returns_inner_text() {
        let text = "boot.initrd.luks = { reusePassphrases = true; };";
        assert_eq!(
            find_block(text, "boot.initrd.luks"),
            Some(" reusePassphrases = true; ")
        );
    }

    #[test]
    fn find_block_missing_introducer_is_none() {
        assert_eq!(find_block("{ }", "fileSystems"), None);
    }

    #[test]
    fn find_block_requires_identifier_boundary() {
        let text = "xhardware = { a = 1; }; hardware = { b = 2; };";
        assert_eq!(find_block(text, "hardware"), Some(" b = 2; "));
    }

    #[test]
    fn nested_sets_are_kept_whole() {
        let text = r#"fileSystems."/" = {
            device = "/dev/mapper/root";
            encrypted = { enable = true; label = "crypt"; };
            fsType = "ext4";
        };"#;
        let blocks = attribute_blocks(text, "fileSystems");
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].1.contains("encrypted"));
        assert!(blocks[0].1.contains(r#"fsType = "ext4""#));
    }

    #[test]
    fn braces_in_strings_and_comments_are_ignored() {
        let text = "fileSystems.\"/srv\" = {\n  # closes early }\n  device = \"}\";\n  fsType = \"xfs\";\n};";
        let blocks = attribute_blocks(text, "fileSystems");
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].1.contains("xfs"));
    }

    #[test]
    fn attribute_blocks_preserves_document_order() {
        let text = r#"
            fileSystems."/data" = { fsType = "ext4"; };
            fileSystems."/" = { fsType = "btrfs"; };
            fileSystems."/data" = { fsType = "xfs"; };
        "#;
        let keys: Vec<&str> = attribute_blocks(text, "fileSystems")
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, ["/data", "/", "/data"]);
    }

    #[test]
    fn attribute_blocks_skips_empty_and_unterminated() {
        let text = r#"fileSystems."/empty" = {}; fileSystems."/" = { fsType = "ext4";"#;
        assert!(attribute_blocks(text, "fileSystems").is_empty());
    }

    #[test]
    fn attribute_blocks_allows_multiline_assignment() {
        let text = "fileSystems.\"/home\"\n  =\n  {\n    fsType = \"ext4\";\n  };";
        let blocks = attribute_blocks(text, "fileSystems");
        assert_eq!(blocks[0].0, "/home");
    }

    #[test]
    fn list_block_stops_at_first_terminator() {
        let text = "imports = [ a b ]; other = [ c ];";
        assert_eq!(list_block(text, "imports"), Some(" a b "));
    }

    #[test]
    fn list_block_empty_list() {
        assert_eq!(list_block("imports = [];", "imports"), Some(""));
    }

    #[test]
    fn list_block_unterminated_is_none() {
        assert_eq!(list_block("imports = [ a b ]", "imports"), None);
    }

    #[test]
    fn closing_delimiter_tracks_depth() {
        let text = "{ a = { b = { }; }; }";
        assert_eq!(closing_delimiter(text, 0, b'{', b'}'), Some(text.len() - 1));
        assert_eq!(closing_delimiter("{ {", 0, b'{', b'}'), None);
    }
}
