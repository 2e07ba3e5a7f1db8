//! src/stage/close_mapping.rs
//!
//! Transitive closure: every key ends up one lookup away from its final target.

use crate::{
    context::InferenceContext,
    stage::{InferenceError, Proposals, Stage},
    tag::LanguageTag,
};
use std::collections::BTreeMap;

/// Rewrites `k → v` to `k → T[v]` whenever `v` is itself a key with a
/// different target.
///
/// A chain that comes back to a tag it already passed through is rejected
/// with [`InferenceError::CyclicMapping`] before anything is rewritten.
/// A key mapped to itself is a fixed point, not a cycle.
pub struct CloseMapping;

/// The cycle reached by following `start`, listed from where it closes.
fn cycle_from<'a>(
    table: &'a BTreeMap<LanguageTag, LanguageTag>,
    start: &'a LanguageTag,
) -> Option<Vec<LanguageTag>> {
    let mut chain = vec![start];
    let mut current = start;
    while let Some(next) = table.get(current) {
        if next == current {
            return None;
        }
        if let Some(at) = chain.iter().position(|seen| *seen == next) {
            return Some(chain[at..].iter().map(|t| (*t).clone()).collect());
        }
        chain.push(next);
        current = next;
    }
    None
}

impl Stage for CloseMapping {
    fn name(&self) -> &'static str {
        "close_mapping"
    }

    fn overwrites(&self) -> bool {
        true
    }

    fn pass(&self, ctx: &mut InferenceContext) -> Result<Proposals, InferenceError> {
        if let Some(cycle) = ctx.table.keys().find_map(|key| cycle_from(&ctx.table, key)) {
            return Err(InferenceError::CyclicMapping(cycle));
        }
        let mut proposals = Proposals::new(self.name());
        for (key, value) in &ctx.table {
            if let Some(next) = ctx.table.get(value)
                && next != value
            {
                proposals.offer(key.clone(), next.clone());
            }
        }
        Ok(proposals)
    }
}
