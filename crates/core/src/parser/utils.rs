use crate::error::{Error, Result};
use tree_sitter::Node;

/// UTF-8 text of a node
pub fn node_text<'a>(node: &Node, source: &'a str) -> Result<&'a str> {
    node.utf8_text(source.as_bytes())
        .map_err(|e| Error::ParseError(format!("Invalid UTF-8 in {} node: {e}", node.kind())))
}

/// First direct child of the given kind
pub fn child_of_kind<'tree>(node: &Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).find(|child| child.kind() == kind)
}

/// A `using` directive that brings a namespace into scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsingDirective {
    pub namespace: String,
    /// `global using`: in scope for every file of the program
    pub global: bool,
}

/// Parse a `using` directive, or `None` for aliases and `using static`
/// imports, which never bring a namespace into scope.
pub fn using_directive(directive_text: &str) -> Option<UsingDirective> {
    let text = directive_text.trim().trim_end_matches(';').trim();
    let (global, text) = match text.strip_prefix("global") {
        Some(rest) if rest.starts_with(char::is_whitespace) => (true, rest.trim_start()),
        _ => (false, text),
    };
    let rest = text.strip_prefix("using")?.trim();

    if rest.is_empty() || rest.starts_with("static ") || rest.contains('=') {
        return None;
    }

    let namespace: String = rest.chars().filter(|c| !c.is_whitespace()).collect();
    let namespace = namespace
        .strip_prefix("global::")
        .map(str::to_string)
        .unwrap_or(namespace);

    Some(UsingDirective { namespace, global })
}
