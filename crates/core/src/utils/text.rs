//! Text normalization for declaration snippets and generated sources

use regex::Regex;
use std::sync::OnceLock;

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

fn blank_line_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("static regex"))
}

/// Collapse every whitespace run to a single space and trim the ends.
///
/// Used on constraint clauses and base entries so that reformatting a
/// declaration does not change its fingerprint.
pub fn collapse_whitespace(text: &str) -> String {
    whitespace_run().replace_all(text.trim(), " ").into_owned()
}

/// Drop generic arguments and the `global::` alias from a type reference:
/// `global::App.Box<int>` becomes `App.Box`.
pub fn strip_type_reference(reference: &str) -> String {
    let reference = reference.trim();
    let reference = reference.strip_prefix("global::").unwrap_or(reference);
    let without_generics = match reference.find('<') {
        Some(index) => &reference[..index],
        None => reference,
    };
    without_generics
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Normalize generated source text: LF line endings, no trailing whitespace,
/// at most one blank line in a row, exactly one trailing newline.
pub fn format_source(source: &str) -> String {
    let unified = source.replace("\r\n", "\n");
    let trimmed_lines: Vec<&str> = unified.lines().map(str::trim_end).collect();
    let joined = trimmed_lines.join("\n");
    let collapsed = blank_line_run().replace_all(&joined, "\n\n");
    format!("{}\n", collapsed.trim_matches('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(
            collapse_whitespace("  where T :\n        class,   new()  "),
            "where T : class, new()"
        );
    }

    #[test]
    fn test_strip_type_reference() {
        assert_eq!(strip_type_reference("global::App.Box<int>"), "App.Box");
        assert_eq!(strip_type_reference("IList<Dictionary<K, V>>"), "IList");
        assert_eq!(strip_type_reference(" Label "), "Label");
    }

    #[test]
    fn test_format_source() {
        let source = "\r\nline one   \r\n\r\n\r\n\r\nline two\t\n\n";
        assert_eq!(format_source(source), "line one\n\nline two\n");
    }
}
