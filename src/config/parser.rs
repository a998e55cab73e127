//! Git configuration file parser.
//!
//! A deliberately narrow reading of the INI-like format: section headers of
//! the exact form `[<type> "<name>"]` and tab-indented `key = value` lines.
//! Comments, escapes, and bare `[section]` headers fall through the state
//! machine as ignored lines.

use super::ConfigEntry;

/// The separator between a key and its value.
const KEY_VALUE_SEPARATOR: &str = " = ";

/// Parses config file content into entries.
///
/// A section header flushes the in-progress entry and starts a new one; a
/// line beginning with a tab contributes a key/value pair to the current
/// entry (only `url`, `remote`, and `merge` are retained); any other line is
/// ignored. The final entry is flushed at end of input.
pub fn parse(content: &str) -> Vec<ConfigEntry> {
    let mut entries = Vec::new();
    let mut current: Option<ConfigEntry> = None;

    for line in content.lines() {
        if let Some((section, name)) = parse_section_header(line) {
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            current = Some(ConfigEntry {
                section,
                name,
                ..Default::default()
            });
            continue;
        }

        if let Some(rest) = line.strip_prefix('\t') {
            if let (Some(entry), Some((key, value))) = (current.as_mut(), parse_key_value(rest)) {
                match key {
                    "url" => entry.url = Some(value.to_string()),
                    "remote" => entry.remote = Some(value.to_string()),
                    "merge" => entry.merge = Some(value.to_string()),
                    _ => {}
                }
            }
        }
        // Anything else (comments, bare headers, untabbed keys) is ignored.
    }

    if let Some(entry) = current.take() {
        entries.push(entry);
    }

    entries
}

/// Parses a section header of the exact form `[<type> "<name>"]`.
fn parse_section_header(line: &str) -> Option<(String, String)> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    let (section, rest) = inner.split_once(' ')?;
    let name = rest.strip_prefix('"')?.strip_suffix('"')?;
    Some((section.to_string(), name.to_string()))
}

/// Splits `key = value` on the literal separator.
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    line.split_once(KEY_VALUE_SEPARATOR)
}
