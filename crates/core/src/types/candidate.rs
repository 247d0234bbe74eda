use serde::{Deserialize, Serialize};

use super::{accessibility::Accessibility, identity::TypeIdentity};

/// Where a candidate was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrigin {
    /// Declared by the program under analysis
    Program,
    /// Exposed by the capability library module
    Library,
}

/// A type that satisfies the capability predicate.
///
/// Library candidates share this shape and are told apart by `origin`.
/// Never mutated after the scan that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateType {
    pub identity: TypeIdentity,
    /// Declaring module; the program's own module name for program types
    pub module: String,
    pub accessibility: Accessibility,
    pub generic_parameters: Vec<String>,
    pub generic_constraints: Vec<String>,
    /// Base types, immediate base first, root last
    pub ancestors: Vec<TypeIdentity>,
    pub origin: CandidateOrigin,
}

impl CandidateType {
    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn namespace(&self) -> &str {
        &self.identity.namespace
    }

    /// `true` when `other` is this type or one of its ancestors
    pub fn is_or_descends_from(&self, other: &TypeIdentity) -> bool {
        &self.identity == other || self.ancestors.contains(other)
    }
}
