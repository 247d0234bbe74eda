use crate::{types::TypeIdentity, utils::text::strip_type_reference};

/// Enclosing namespaces of `namespace`, innermost first, ending with the
/// global namespace: `A.B` yields `A.B`, `A`, ``.
pub fn enclosing_namespaces(namespace: &str) -> Vec<String> {
    let mut scopes = Vec::new();
    let mut current = namespace.trim().to_string();
    while !current.is_empty() {
        scopes.push(current.clone());
        current = match current.rsplit_once('.') {
            Some((parent, _)) => parent.to_string(),
            None => String::new(),
        };
    }
    scopes.push(String::new());
    scopes
}

/// Identities a base entry may denote, in lookup order.
///
/// The entry is tried relative to each enclosing namespace, which also covers
/// fully qualified spellings via the global namespace, then under each
/// `using` namespace when it is a simple name.
pub fn lookup_order(reference: &str, namespace: &str, usings: &[String]) -> Vec<TypeIdentity> {
    let stripped = strip_type_reference(reference);
    if stripped.is_empty() {
        return Vec::new();
    }

    let mut order: Vec<TypeIdentity> = enclosing_namespaces(namespace)
        .into_iter()
        .map(|scope| {
            if scope.is_empty() {
                TypeIdentity::from_metadata_name(&stripped)
            } else {
                TypeIdentity::from_metadata_name(&format!("{scope}.{stripped}"))
            }
        })
        .collect();

    if !stripped.contains('.') {
        order.extend(
            usings
                .iter()
                .map(|using| TypeIdentity::new(using.clone(), stripped.clone())),
        );
    }

    order
}
