//! Closure stages over the partial → maximal mapping table.
//!
//! A stage computes one *pass* against a stable view of the table and hands
//! back [`Proposals`]. The [`InferenceContext`] applies them and calls the
//! stage again until a pass changes nothing, so each pass is a full barrier:
//! nothing a pass writes is visible to that same pass.
//!
//! Stages only add keys. [`CloseMapping`](close_mapping::CloseMapping) is the
//! one exception: it rewrites targets (never removes keys) to flatten chains.

pub mod add_countries;
pub mod add_deprecated;
pub mod add_language_country;
pub mod add_language_script;
pub mod add_script;
pub mod close_mapping;
pub mod close_und;

use crate::{
    context::{Diagnostic, InferenceContext},
    population::PopulationOracle,
    tag::{LanguageTag, TagError},
};
use std::collections::BTreeMap;
use thiserror::Error;

/// Fatal errors. Any of these aborts the pipeline before output is produced.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error(
        "inconsistent coverage: {} maximal value(s) with an empty subtag: {}",
        .0.len(),
        join(.0)
    )]
    InconsistentCoverage(Vec<LanguageTag>),

    #[error("deprecated alias substitution did not converge after {passes} passes (pending: {})", join(.pending))]
    UnresolvableAlias {
        passes: usize,
        pending: Vec<LanguageTag>,
    },

    #[error("cyclic mapping through {}", join(.0))]
    CyclicMapping(Vec<LanguageTag>),

    #[error("stage `{stage}` did not converge after {passes} passes")]
    NonConvergent { stage: &'static str, passes: usize },

    #[error("invalid tag: {0}")]
    Tag(#[from] TagError),
}

fn join(tags: &[LanguageTag]) -> String {
    tags.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Entries proposed by one pass, first offer wins.
#[derive(Debug)]
pub struct Proposals {
    stage: &'static str,
    entries: BTreeMap<LanguageTag, LanguageTag>,
    conflicts: Vec<Diagnostic>,
}

impl Proposals {
    pub fn new(stage: &'static str) -> Self {
        Self {
            stage,
            entries: BTreeMap::new(),
            conflicts: Vec::new(),
        }
    }

    /// Offer `key → value`. A later, different value for the same key is
    /// rejected and recorded as a conflict.
    pub fn offer(&mut self, key: LanguageTag, value: LanguageTag) {
        match self.entries.get(&key) {
            None => {
                self.entries.insert(key, value);
            }
            Some(kept) if *kept == value => {}
            Some(kept) => {
                let kept = kept.clone();
                self.conflict(key, kept, vec![value]);
            }
        }
    }

    /// Record a collision already resolved by the stage itself.
    pub fn conflict(&mut self, key: LanguageTag, kept: LanguageTag, rejected: Vec<LanguageTag>) {
        self.conflicts.push(Diagnostic::ConflictingDerivation {
            stage: self.stage,
            key,
            kept,
            rejected,
        });
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn into_parts(self) -> (BTreeMap<LanguageTag, LanguageTag>, Vec<Diagnostic>) {
        (self.entries, self.conflicts)
    }
}

/// A single closure operation.
pub trait Stage: Send + Sync {
    /// Human-readable name, used for logging and diagnostics.
    fn name(&self) -> &'static str;

    /// Compute one pass. Must only read the table; writes go through the
    /// returned proposals.
    fn pass(&self, ctx: &mut InferenceContext) -> Result<Proposals, InferenceError>;

    /// Whether proposals may replace the target of an existing key.
    #[inline]
    fn overwrites(&self) -> bool {
        false
    }

    /// Error reported when the stage is still changing the table after the
    /// pass bound.
    fn exhausted(&self, passes: usize, _pending: Vec<LanguageTag>) -> InferenceError {
        InferenceError::NonConvergent {
            stage: self.name(),
            passes,
        }
    }
}

/// Literate population of `tag`'s language in `tag`'s region, preferring a
/// script-qualified record (`zh_Hant` in `TW`) over the bare language.
pub(crate) fn literate_population(oracle: &dyn PopulationOracle, tag: &LanguageTag) -> u64 {
    let qualified = tag
        .has_script()
        .then(|| format!("{}_{}", tag.language(), tag.script()))
        .and_then(|locale| oracle.record(&locale, tag.region()));
    qualified
        .or_else(|| oracle.record(tag.language(), tag.region()))
        .map(|r| r.literate_population)
        .unwrap_or(0)
}

/// Pick among colliding candidates for one key: greatest literate population
/// wins, exact ties go to the first candidate in tag order.
pub(crate) fn pick_by_population(
    oracle: &dyn PopulationOracle,
    candidates: &[LanguageTag],
) -> Option<LanguageTag> {
    let mut best: Option<(&LanguageTag, u64)> = None;
    for candidate in candidates {
        let size = literate_population(oracle, candidate);
        match best {
            Some((_, best_size)) if size <= best_size => {}
            _ => best = Some((candidate, size)),
        }
    }
    best.map(|(tag, _)| tag.clone())
}
