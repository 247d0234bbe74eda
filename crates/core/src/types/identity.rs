use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a declared type: its containing namespace plus its simple name.
///
/// Generic arity is not part of the identity, so `Box` and `Box<T>` in the same
/// namespace name the same type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeIdentity {
    pub namespace: String,
    pub name: String,
}

impl TypeIdentity {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Split a metadata name such as `Microsoft.Maui.ITextStyle` at its last dot.
    pub fn from_metadata_name(metadata_name: &str) -> Self {
        let trimmed = metadata_name.trim().trim_start_matches("global::");
        match trimmed.rsplit_once('.') {
            Some((namespace, name)) => Self::new(namespace, name),
            None => Self::new("", trimmed),
        }
    }

    /// Fully qualified metadata name, without the `global::` prefix
    pub fn metadata_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.metadata_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_metadata_name() {
        let id = TypeIdentity::from_metadata_name("Microsoft.Maui.ITextStyle");
        assert_eq!(id.namespace, "Microsoft.Maui");
        assert_eq!(id.name, "ITextStyle");
        assert_eq!(id.to_string(), "Microsoft.Maui.ITextStyle");
    }

    #[test]
    fn test_global_namespace_identity() {
        let id = TypeIdentity::from_metadata_name("global::Widget");
        assert_eq!(id.namespace, "");
        assert_eq!(id.metadata_name(), "Widget");
    }
}
