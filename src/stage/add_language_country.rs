//! src/stage/add_language_country.rs
//!
//! Derives `language_REGION` keys from maximal targets.

use crate::{
    context::InferenceContext,
    stage::{InferenceError, Proposals, Stage, pick_by_population},
    tag::LanguageTag,
};
use std::collections::{BTreeMap, BTreeSet};

/// For each maximal target `L_S_R`, adds `L_R → L_S_R` when `L_R` is missing.
///
/// Collisions (`sr_RS` from both `sr_Cyrl_RS` and `sr_Latn_RS`) are settled by
/// the script resolver first, then by population.
pub struct AddLanguageCountry;

impl Stage for AddLanguageCountry {
    fn name(&self) -> &'static str {
        "add_language_country"
    }

    fn pass(&self, ctx: &mut InferenceContext) -> Result<Proposals, InferenceError> {
        let mut candidates: BTreeMap<LanguageTag, BTreeSet<LanguageTag>> = BTreeMap::new();
        for value in ctx.table.values().filter(|v| v.is_maximal()) {
            let key = value.without_script();
            if !ctx.table.contains_key(&key) {
                candidates.entry(key).or_default().insert(value.clone());
            }
        }

        let mut proposals = Proposals::new(self.name());
        for (key, found) in candidates {
            let found: Vec<LanguageTag> = found.into_iter().collect();
            if found.len() == 1 {
                proposals.offer(key, found[0].clone());
                continue;
            }

            let by_script = ctx
                .scripts
                .resolve(&key.to_string())
                .ok()
                .and_then(|script| found.iter().find(|t| t.script() == script).cloned());
            let Some(kept) =
                by_script.or_else(|| pick_by_population(ctx.population.as_ref(), &found))
            else {
                continue;
            };
            let rejected = found.iter().filter(|t| **t != kept).cloned().collect();
            proposals.conflict(key.clone(), kept.clone(), rejected);
            proposals.offer(key, kept);
        }
        Ok(proposals)
    }
}
