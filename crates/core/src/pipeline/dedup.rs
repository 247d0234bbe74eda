//! Drops program candidates already covered by a library candidate

use crate::types::CandidateType;

/// Merge program and library candidates.
///
/// A program candidate that is, or descends from, any library candidate is
/// discarded. Surviving program candidates come first in scan order, then
/// every library candidate in enumeration order.
pub fn deduplicate(candidates: &[CandidateType], library: &[CandidateType]) -> Vec<CandidateType> {
    let mut merged = Vec::with_capacity(candidates.len() + library.len());

    for candidate in candidates {
        match library
            .iter()
            .find(|provided| candidate.is_or_descends_from(&provided.identity))
        {
            Some(provided) => tracing::debug!(
                "Dropping {}: capability already provided by {}",
                candidate.identity,
                provided.identity
            ),
            None => merged.push(candidate.clone()),
        }
    }

    merged.extend(library.iter().cloned());
    merged
}
