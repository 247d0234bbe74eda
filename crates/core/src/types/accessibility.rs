use crate::impl_case_insensitive_deserialize;
use serde::Serialize;

/// Declared accessibility of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Public,
    Internal,
    Protected,
    ProtectedInternal,
    PrivateProtected,
    Private,
}

impl_case_insensitive_deserialize!(
    Accessibility,
    Public => "public",
    Internal => "internal",
    Protected => "protected",
    ProtectedInternal => "protected_internal" | "protected internal",
    PrivateProtected => "private_protected" | "private protected",
    Private => "private"
);

impl Accessibility {
    /// Derive accessibility from the modifier keywords of a declaration.
    ///
    /// Namespace-level types without an explicit modifier are internal.
    pub fn from_modifiers<'a>(modifiers: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let mut public = false;
        let mut internal = false;
        let mut protected = false;
        let mut private = false;

        for modifier in modifiers {
            match modifier {
                "public" => public = true,
                "internal" => internal = true,
                "protected" => protected = true,
                "private" => private = true,
                _ => {}
            }
        }

        match (public, internal, protected, private) {
            (true, ..) => Some(Accessibility::Public),
            (false, true, true, _) => Some(Accessibility::ProtectedInternal),
            (false, false, true, true) => Some(Accessibility::PrivateProtected),
            (false, true, false, _) => Some(Accessibility::Internal),
            (false, false, true, false) => Some(Accessibility::Protected),
            (false, false, false, true) => Some(Accessibility::Private),
            (false, false, false, false) => None,
        }
    }

    /// The C# keyword for accessibilities a generated top-level class can carry
    pub fn access_modifier(self) -> Option<&'static str> {
        match self {
            Accessibility::Public => Some("public"),
            Accessibility::Internal => Some("internal"),
            _ => None,
        }
    }
}
