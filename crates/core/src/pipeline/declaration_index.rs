//! Scans the program's own declarations for capable types

use super::capability::{CapabilityPredicate, candidate_from_node};
use crate::{
    config::Config,
    error::Result,
    graph::DeclarationGraph,
    types::{CandidateOrigin, CandidateType, Diagnostic, TypeKind},
};
use serde::{Deserialize, Serialize};

/// Result of scanning the program
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOutput {
    /// One entry per qualifying identity, in declaration order
    pub candidates: Vec<CandidateType>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Find every program class that declares at least one base entry and
/// reaches both capability interfaces.
///
/// A class whose bases do not fully resolve is skipped. When what did resolve
/// already reaches a capability interface the skip is reported as a
/// diagnostic, since the class was plausibly meant to qualify.
pub fn scan(graph: &DeclarationGraph, config: &Config) -> Result<ScanOutput> {
    let predicate = CapabilityPredicate::resolve(graph, config)?;
    let mut output = ScanOutput::default();

    for node in graph.program_types() {
        if node.kind() != TypeKind::Class || node.declaration.bases.is_empty() {
            continue;
        }

        let identity = node.identity();
        let unresolved = graph.unresolved_references(&identity);
        if !unresolved.is_empty() {
            if predicate.is_partially_satisfied_by(graph, &identity) {
                let message = format!(
                    "skipped, base types could not be resolved: {}",
                    unresolved.join(", ")
                );
                tracing::warn!("{}: {}", identity, message);
                output
                    .diagnostics
                    .push(Diagnostic::warning(identity.to_string(), message));
            } else {
                tracing::debug!("Skipping {} with unresolved bases", identity);
            }
            continue;
        }

        if !predicate.is_satisfied_by(graph, &identity) {
            continue;
        }

        tracing::debug!("Found candidate {}", identity);
        output
            .candidates
            .push(candidate_from_node(graph, node, CandidateOrigin::Program));
    }

    Ok(output)
}
