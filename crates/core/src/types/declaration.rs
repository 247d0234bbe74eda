use serde::{Deserialize, Serialize};

use super::{accessibility::Accessibility, identity::TypeIdentity};
use crate::impl_case_insensitive_deserialize;

/// Kind of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
}

impl_case_insensitive_deserialize!(
    TypeKind,
    Class => "class",
    Interface => "interface",
    Struct => "struct"
);

/// A type declaration as written, before any name resolution.
///
/// Produced by the source parser for the program under analysis and read from
/// metadata for referenced modules. Base entries keep the spelling of the
/// declaration; the declaration graph resolves them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDeclaration {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    pub kind: TypeKind,
    /// `None` when the declaration carries no accessibility modifier
    #[serde(default)]
    pub accessibility: Option<Accessibility>,
    #[serde(default)]
    pub generic_parameters: Vec<String>,
    /// Constraint clauses, e.g. `where T : class, new()`
    #[serde(default)]
    pub generic_constraints: Vec<String>,
    #[serde(default)]
    pub bases: Vec<String>,
    /// Namespaces imported by `using` directives in the declaring file
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub usings: Vec<String>,
    #[serde(default)]
    pub is_partial: bool,
}

impl TypeDeclaration {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            kind,
            accessibility: None,
            generic_parameters: Vec::new(),
            generic_constraints: Vec::new(),
            bases: Vec::new(),
            usings: Vec::new(),
            is_partial: false,
        }
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = Some(accessibility);
        self
    }

    pub fn with_bases<I, S>(mut self, bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bases = bases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_generics<I, S>(mut self, parameters: I, constraints: Vec<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generic_parameters = parameters.into_iter().map(Into::into).collect();
        self.generic_constraints = constraints;
        self
    }

    pub fn identity(&self) -> TypeIdentity {
        TypeIdentity::new(self.namespace.clone(), self.name.clone())
    }

    /// Accessibility after applying the namespace-level default
    pub fn effective_accessibility(&self) -> Accessibility {
        self.accessibility.unwrap_or(Accessibility::Internal)
    }
}

/// A type declared by a referenced module
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleMetadata {
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
}

impl ModuleMetadata {
    pub fn new(name: impl Into<String>, types: Vec<TypeDeclaration>) -> Self {
        Self {
            name: name.into(),
            types,
        }
    }

    pub fn from_json(contents: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_metadata_from_json() {
        let json = r#"{
            "name": "Microsoft.Maui.Controls",
            "types": [
                {
                    "namespace": "Microsoft.Maui.Controls",
                    "name": "Label",
                    "kind": "Class",
                    "accessibility": "Public",
                    "bases": ["Microsoft.Maui.Controls.View", "Microsoft.Maui.ITextStyle"]
                }
            ]
        }"#;

        let module = ModuleMetadata::from_json(json).unwrap();
        assert_eq!(module.name, "Microsoft.Maui.Controls");
        assert_eq!(module.types.len(), 1);

        let label = &module.types[0];
        assert_eq!(label.kind, TypeKind::Class);
        assert_eq!(label.effective_accessibility(), Accessibility::Public);
        assert_eq!(label.bases.len(), 2);
        assert!(label.generic_parameters.is_empty());
    }

    #[test]
    fn test_missing_accessibility_defaults_to_internal() {
        let decl = TypeDeclaration::new("App", "Widget", TypeKind::Class);
        assert_eq!(decl.effective_accessibility(), Accessibility::Internal);
        assert_eq!(decl.identity(), TypeIdentity::new("App", "Widget"));
    }
}
