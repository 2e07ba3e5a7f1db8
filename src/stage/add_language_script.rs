//! src/stage/add_language_script.rs
//!
//! Derives `language_Script` keys from maximal targets.

use crate::{
    context::InferenceContext,
    stage::{InferenceError, Proposals, Stage, pick_by_population},
    tag::LanguageTag,
};
use std::collections::{BTreeMap, BTreeSet};

/// For each maximal target `L_S_R`, adds `L_S → L_S_R` when `L_S` is missing.
///
/// When several targets share one `L_S` the one whose language has the largest
/// literate population in its region wins (`de_Latn` goes to `de_Latn_DE`, not
/// `de_Latn_CH`). A conflict is recorded either way.
pub struct AddLanguageScript;

impl Stage for AddLanguageScript {
    fn name(&self) -> &'static str {
        "add_language_script"
    }

    fn pass(&self, ctx: &mut InferenceContext) -> Result<Proposals, InferenceError> {
        let mut candidates: BTreeMap<LanguageTag, BTreeSet<LanguageTag>> = BTreeMap::new();
        for value in ctx.table.values().filter(|v| v.is_maximal()) {
            let key = value.without_region();
            if !ctx.table.contains_key(&key) {
                candidates.entry(key).or_default().insert(value.clone());
            }
        }

        let mut proposals = Proposals::new(self.name());
        for (key, found) in candidates {
            let found: Vec<LanguageTag> = found.into_iter().collect();
            let Some(kept) = pick_by_population(ctx.population.as_ref(), &found) else {
                continue;
            };
            if found.len() > 1 {
                let rejected = found.iter().filter(|t| **t != kept).cloned().collect();
                proposals.conflict(key.clone(), kept.clone(), rejected);
            }
            proposals.offer(key, kept);
        }
        Ok(proposals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alias::AliasTable,
        context::Diagnostic,
        options::InferenceOptions,
        population::{OfficialStatus, PopulationRecord, PopulationTable},
        script::ScriptResolver,
    };

    fn tag(s: &str) -> LanguageTag {
        s.parse().unwrap()
    }

    #[test]
    fn strips_region_and_picks_largest_population() {
        let rec = |n| PopulationRecord::new(n, n, OfficialStatus::Official);
        let population = PopulationTable::new()
            .with("de", "DE", rec(80_000_000))
            .with("de", "CH", rec(4_000_000));
        let mut ctx = InferenceContext::new(
            ScriptResolver::default(),
            population,
            AliasTable::new(),
            InferenceOptions::default(),
        );
        ctx.insert(tag("und_CH"), tag("de_Latn_CH"));
        ctx.insert(tag("de"), tag("de_Latn_DE"));
        ctx.insert(tag("sr"), tag("sr_Cyrl_RS"));
        ctx.insert(tag("en"), tag("en_US"));

        let added = ctx.add_language_script().unwrap();
        assert_eq!(added.len(), 2);
        assert_eq!(ctx.get(&tag("de_Latn")), Some(&tag("de_Latn_DE")));
        assert_eq!(ctx.get(&tag("sr_Cyrl")), Some(&tag("sr_Cyrl_RS")));
        assert!(ctx.get(&tag("en")).is_some_and(|v| !v.is_maximal()));

        match ctx.diagnostics() {
            [Diagnostic::ConflictingDerivation { key, kept, rejected, .. }] => {
                assert_eq!(key, &tag("de_Latn"));
                assert_eq!(kept, &tag("de_Latn_DE"));
                assert_eq!(rejected, &[tag("de_Latn_CH")]);
            }
            other => panic!("unexpected diagnostics: {other:?}"),
        }
    }

    #[test]
    fn existing_keys_are_left_alone() {
        let mut ctx = InferenceContext::default();
        ctx.insert(tag("zh_Hant"), tag("zh_Hant_TW"));
        ctx.insert(tag("yue"), tag("yue_Hant_HK"));
        ctx.add_language_script().unwrap();
        assert_eq!(ctx.get(&tag("zh_Hant")), Some(&tag("zh_Hant_TW")));
        assert_eq!(ctx.get(&tag("yue_Hant")), Some(&tag("yue_Hant_HK")));
    }
}
