//! Projects surviving candidates into descriptors

use crate::{
    error::{Error, Result},
    types::{CandidateType, TypeDescriptor},
};

/// Build the descriptor for one surviving candidate.
///
/// Types declared by the library module are always projected as `internal`.
/// Any other candidate must be `public` or `internal` itself.
pub fn project(candidate: &CandidateType, library_module: &str) -> Result<TypeDescriptor> {
    let access_modifier = if candidate.module == library_module {
        "internal"
    } else {
        candidate.accessibility.access_modifier().ok_or_else(|| {
            Error::InvariantViolation(format!(
                "{} reached projection with {:?} accessibility",
                candidate.identity, candidate.accessibility
            ))
        })?
    };

    let generic_arguments = if candidate.generic_parameters.is_empty() {
        String::new()
    } else {
        format!("<{}>", candidate.generic_parameters.join(", "))
    };

    Ok(TypeDescriptor {
        name: candidate.name().to_string(),
        access_modifier: access_modifier.to_string(),
        namespace: candidate.namespace().to_string(),
        generic_arguments,
        generic_constraints: candidate.generic_constraints.join("\n"),
    })
}
