use serde::{Deserialize, Serialize};

use super::identity::TypeIdentity;

/// The metadata projection of a surviving candidate.
///
/// Equality is structural over every field; two runs that produce equal
/// descriptors for an identity need not re-render its unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    pub access_modifier: String,
    pub namespace: String,
    /// `<T, U>` for generic types, empty otherwise
    pub generic_arguments: String,
    /// Constraint clauses joined with newlines, empty when unconstrained
    pub generic_constraints: String,
}

impl TypeDescriptor {
    pub fn identity(&self) -> TypeIdentity {
        TypeIdentity::new(self.namespace.clone(), self.name.clone())
    }

    /// `global::`-qualified type as it appears in generated code
    pub fn qualified_type(&self) -> String {
        if self.namespace.is_empty() {
            format!("global::{}{}", self.name, self.generic_arguments)
        } else {
            format!(
                "global::{}.{}{}",
                self.namespace, self.name, self.generic_arguments
            )
        }
    }
}
