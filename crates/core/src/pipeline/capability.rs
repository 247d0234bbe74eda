use crate::{
    config::Config,
    error::{ConfigurationError, Result},
    graph::{DeclarationGraph, TypeNode},
    types::{CandidateOrigin, CandidateType, TypeIdentity},
};

/// The two interfaces a type must reach to receive a generated operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityPredicate {
    interfaces: [TypeIdentity; 2],
}

impl CapabilityPredicate {
    /// Resolve both configured interfaces against the graph.
    ///
    /// Either one missing means the capability library is not referenced,
    /// which aborts the run.
    pub fn resolve(graph: &DeclarationGraph, config: &Config) -> Result<Self> {
        let [text_style, animatable] = config.capability_interfaces();
        Ok(Self {
            interfaces: [
                resolve_interface(graph, text_style)?,
                resolve_interface(graph, animatable)?,
            ],
        })
    }

    pub fn interfaces(&self) -> &[TypeIdentity; 2] {
        &self.interfaces
    }

    /// Whether the type reaches both interfaces through its declared
    /// interfaces, super-interfaces or base chain
    pub fn is_satisfied_by(&self, graph: &DeclarationGraph, identity: &TypeIdentity) -> bool {
        graph.implements_all(identity, &self.interfaces)
    }

    /// Whether the type reaches at least one of the interfaces
    pub fn is_partially_satisfied_by(
        &self,
        graph: &DeclarationGraph,
        identity: &TypeIdentity,
    ) -> bool {
        let reached = graph.all_interfaces(identity);
        self.interfaces.iter().any(|interface| reached.contains(interface))
    }
}

fn resolve_interface(graph: &DeclarationGraph, metadata_name: &str) -> Result<TypeIdentity> {
    match graph.lookup(metadata_name) {
        Some(node) => Ok(node.identity()),
        None => Err(ConfigurationError::CapabilityNotResolved {
            interface: metadata_name.to_string(),
        }
        .into()),
    }
}

/// Snapshot a graph node as a candidate
pub(crate) fn candidate_from_node(
    graph: &DeclarationGraph,
    node: &TypeNode,
    origin: CandidateOrigin,
) -> CandidateType {
    let identity = node.identity();
    CandidateType {
        ancestors: graph.ancestors(&identity),
        identity,
        module: node.module.clone(),
        accessibility: node.declaration.effective_accessibility(),
        generic_parameters: node.declaration.generic_parameters.clone(),
        generic_constraints: node.declaration.generic_constraints.clone(),
        origin,
    }
}
