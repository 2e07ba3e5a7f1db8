//! Coverage check run once the closure stages have settled.

use crate::{
    context::{Changes, InferenceContext},
    stage::InferenceError,
    tag::LanguageTag,
};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Requires every target to be maximal, then makes sure every
/// [`coverage key`](LanguageTag::coverage_keys) of every target resolves,
/// adding `key → target` where one is missing.
///
/// Scripts and regions that only ever appear in keys (`zh_Hani`) get an
/// `und_S` / `und_R` entry pointing at that key's target, so a tag carrying
/// them cannot maximize to something that is not its own maximum.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    pub fn check(&self, ctx: &mut InferenceContext) -> Result<Changes, InferenceError> {
        let values: BTreeSet<LanguageTag> = ctx.table.values().cloned().collect();

        let incomplete: Vec<LanguageTag> =
            values.iter().filter(|v| !v.is_maximal()).cloned().collect();
        if !incomplete.is_empty() {
            return Err(InferenceError::InconsistentCoverage(incomplete));
        }

        let mut added = Changes::new();
        for value in &values {
            for key in value.coverage_keys() {
                if key == *value || ctx.table.contains_key(&key) {
                    continue;
                }
                debug!("Adding:\t{key}\t=>\t{value}\t\tconsistency");
                ctx.table.insert(key.clone(), value.clone());
                added.insert(key, value.clone());
            }
        }

        let key_only: Vec<(LanguageTag, LanguageTag)> = ctx
            .table
            .iter()
            .flat_map(|(key, value)| {
                let und = LanguageTag::und();
                [
                    key.has_script().then(|| und.with_script(key.script())),
                    key.has_region().then(|| und.with_region(key.region())),
                ]
                .into_iter()
                .flatten()
                .map(|k| (k, value.clone()))
            })
            .collect();
        for (key, value) in key_only {
            if ctx.table.contains_key(&key) {
                continue;
            }
            debug!("Adding:\t{key}\t=>\t{value}\t\tconsistency (key subtag)");
            ctx.table.insert(key.clone(), value.clone());
            added.insert(key, value);
        }
        info!("consistency check added {} entries", added.len());
        Ok(added)
    }
}
