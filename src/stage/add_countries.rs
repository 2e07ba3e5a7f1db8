//! src/stage/add_countries.rs
//!
//! Population-weighted defaults for `und_REGION` and `und_Script`.

use crate::{
    context::{Diagnostic, InferenceContext},
    population::PopulationRecord,
    stage::{InferenceError, Proposals, Stage},
    tag::LanguageTag,
};
use std::collections::BTreeMap;

/// Adds `und_T → L_T` for every territory `T` and `und_S → L_S` for every
/// script `S`.
///
/// * `L_T`: the official (or de facto official) language of `T` with the largest
///   literate population. With `unofficial_share` set, a territory without one
///   falls back to its largest language if that language reaches the share.
/// * `L_S`: the base language with the largest literate population written in
///   `S`, summed over all territories.
///
/// Ties go to the smaller language code.
pub struct AddCountries;

impl Stage for AddCountries {
    fn name(&self) -> &'static str {
        "add_countries"
    }

    fn pass(&self, ctx: &mut InferenceContext) -> Result<Proposals, InferenceError> {
        let mut proposals = Proposals::new(self.name());
        // (script, base language) → literate population
        let mut tally: BTreeMap<(String, String), u64> = BTreeMap::new();

        for territory in ctx.population.territories() {
            let languages = ctx.population.languages_in(&territory);

            let key = LanguageTag::new("", "", &territory);
            if !ctx.table.contains_key(&key)
                && let Some(language) = territory_default(ctx, &territory, &languages)
            {
                let value = LanguageTag::parse(&format!("{language}_{territory}"))?;
                proposals.offer(key, value);
            }

            for (language, record) in &languages {
                let tag = LanguageTag::parse(language)?;
                let script = if tag.has_script() {
                    tag.script().to_string()
                } else {
                    match ctx.scripts.resolve(language) {
                        Ok(script) => script,
                        Err(ambiguity) => {
                            ctx.record(Diagnostic::ScriptAmbiguous {
                                locale: ambiguity.locale,
                                scripts: ambiguity.scripts,
                            });
                            continue;
                        }
                    }
                };
                *tally
                    .entry((script, tag.language().to_string()))
                    .or_default() += record.literate_population;
            }
        }

        let mut by_script: BTreeMap<String, (String, u64)> = BTreeMap::new();
        // tally iterates by (script, language), so the first of equals is the smallest code
        for ((script, language), size) in tally {
            match by_script.get(&script) {
                Some((_, best)) if size <= *best => {}
                _ => {
                    by_script.insert(script, (language, size));
                }
            }
        }
        for (script, (language, _)) in by_script {
            let key = LanguageTag::new("", &script, "");
            if !ctx.table.contains_key(&key) {
                proposals.offer(key, LanguageTag::new(&language, &script, ""));
            }
        }
        Ok(proposals)
    }
}

fn territory_default<'a>(
    ctx: &InferenceContext,
    territory: &str,
    languages: &'a [(String, PopulationRecord)],
) -> Option<&'a str> {
    if let Some(official) = largest(languages.iter().filter(|(_, r)| r.official_status.is_official())) {
        return Some(official.0.as_str());
    }
    let share = ctx.options.unofficial_share?;
    let (language, record) = largest(languages.iter())?;
    let total = ctx.population.territory_literate_population(territory);
    (total > 0 && record.literate_population as f64 >= share * total as f64)
        .then_some(language.as_str())
}

/// Largest literate population; `languages` is in ascending code order, so
/// keeping only strictly greater sizes makes the smaller code win ties.
fn largest<'a>(
    languages: impl Iterator<Item = &'a (String, PopulationRecord)>,
) -> Option<&'a (String, PopulationRecord)> {
    let mut best: Option<&'a (String, PopulationRecord)> = None;
    for entry in languages {
        match best {
            Some(b) if entry.1.literate_population <= b.1.literate_population => {}
            _ => best = Some(entry),
        }
    }
    best
}
