//! Enumerates the capable types the capability library itself exposes

use super::capability::{CapabilityPredicate, candidate_from_node};
use crate::{
    config::Config,
    error::{ConfigurationError, Result},
    graph::DeclarationGraph,
    types::{Accessibility, CandidateOrigin, CandidateType, ModuleMetadata},
};

/// Resolve the single reference to the configured library module and list
/// its public types that reach both capability interfaces, in metadata order.
pub fn enumerate(
    graph: &DeclarationGraph,
    references: &[ModuleMetadata],
    config: &Config,
) -> Result<Vec<CandidateType>> {
    let predicate = CapabilityPredicate::resolve(graph, config)?;
    let library = config.library_module.as_str();

    let count = references
        .iter()
        .filter(|module| module.name == library)
        .count();
    match count {
        0 => {
            return Err(ConfigurationError::LibraryNotReferenced {
                module: library.to_string(),
            }
            .into());
        }
        1 => {}
        count => {
            return Err(ConfigurationError::AmbiguousLibraryReference {
                module: library.to_string(),
                count,
            }
            .into());
        }
    }

    let candidates: Vec<CandidateType> = graph
        .module_types(library)
        .filter(|node| node.declaration.effective_accessibility() == Accessibility::Public)
        .filter(|node| predicate.is_satisfied_by(graph, &node.identity()))
        .map(|node| candidate_from_node(graph, node, CandidateOrigin::Library))
        .collect();

    tracing::debug!(
        "Library module '{}' provides {} capable types",
        library,
        candidates.len()
    );

    Ok(candidates)
}
