//! src/stage/add_deprecated.rs
//!
//! Makes deprecated codes resolve to the same targets as their replacements.

use crate::{
    context::InferenceContext,
    stage::{InferenceError, Proposals, Stage},
    tag::LanguageTag,
};

/// For each entry with a maximal target, and each alias `fragment → replacement`,
/// substitutes `fragment` wherever it is a whole subtag of the source or of the
/// target and adds the result as a new key for the same target.
///
/// Alias chains (`a → b`, `b → c`) take one pass per link. A chain still
/// growing at the pass bound is reported as
/// [`InferenceError::UnresolvableAlias`].
pub struct AddDeprecated;

impl Stage for AddDeprecated {
    fn name(&self) -> &'static str {
        "add_deprecated"
    }

    fn pass(&self, ctx: &mut InferenceContext) -> Result<Proposals, InferenceError> {
        let mut proposals = Proposals::new(self.name());
        let substitutions = ctx.aliases.substitutions();
        if substitutions.is_empty() {
            return Ok(proposals);
        }

        for (key, value) in ctx.table.iter().filter(|(_, v)| v.is_maximal()) {
            let sources = [key.to_string(), value.to_string()];
            for (fragment, replacement) in &substitutions {
                for source in &sources {
                    let Some(rewritten) = replace_subtag(source, fragment, replacement) else {
                        continue;
                    };
                    // a replacement that does not form a valid tag is not an alias of it
                    let Ok(new_key) = LanguageTag::parse(&rewritten) else {
                        continue;
                    };
                    let new_key = new_key.without_variants();
                    if new_key != *value && !ctx.table.contains_key(&new_key) {
                        proposals.offer(new_key, value.clone());
                    }
                }
            }
        }
        Ok(proposals)
    }

    fn exhausted(&self, passes: usize, pending: Vec<LanguageTag>) -> InferenceError {
        InferenceError::UnresolvableAlias { passes, pending }
    }
}

/// Replace `fragment` in `tag` where it lines up with whole `_`-separated
/// subtags. `None` when it never does.
fn replace_subtag(tag: &str, fragment: &str, replacement: &str) -> Option<String> {
    let parts: Vec<&str> = tag.split('_').collect();
    let needle: Vec<&str> = fragment.split('_').collect();
    if needle.is_empty() || needle.len() > parts.len() {
        return None;
    }

    let mut out: Vec<&str> = Vec::with_capacity(parts.len());
    let mut found = false;
    let mut i = 0;
    while i < parts.len() {
        if parts[i..].starts_with(&needle) {
            out.push(replacement);
            i += needle.len();
            found = true;
        } else {
            out.push(parts[i]);
            i += 1;
        }
    }
    found.then(|| out.join("_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alias::{AliasKind, AliasTable},
        options::InferenceOptions,
        population::PopulationTable,
        script::ScriptResolver,
    };

    fn tag(s: &str) -> LanguageTag {
        s.parse().unwrap()
    }

    fn ctx(aliases: AliasTable, options: InferenceOptions) -> InferenceContext {
        InferenceContext::new(
            ScriptResolver::default(),
            PopulationTable::new(),
            aliases,
            options,
        )
    }

    #[test]
    fn whole_subtags_only() {
        assert_eq!(replace_subtag("tl_Latn_PH", "tl", "fil").as_deref(), Some("fil_Latn_PH"));
        assert_eq!(replace_subtag("und_BU", "BU", "MM").as_deref(), Some("und_MM"));
        assert_eq!(replace_subtag("tlh_Latn", "tl", "fil"), None);
        assert_eq!(replace_subtag("sr_Latn_RS", "sr_Latn", "sh").as_deref(), Some("sh_RS"));
    }

    #[test]
    fn deprecated_language_maps_to_same_target() {
        let aliases = AliasTable::new()
            .with(AliasKind::Language, "tl", "fil", "deprecated")
            .with(AliasKind::Variant, "heploc", "alalc97", "deprecated");
        let mut ctx = ctx(aliases, InferenceOptions::default());
        ctx.insert(tag("tl"), tag("tl_Latn_PH"));
        ctx.insert(tag("en"), tag("en_US"));

        ctx.add_deprecated().unwrap();
        assert_eq!(ctx.get(&tag("fil")), Some(&tag("tl_Latn_PH")));
        assert_eq!(ctx.get(&tag("fil_Latn_PH")), Some(&tag("tl_Latn_PH")));
        assert_eq!(ctx.table().len(), 4);
    }

    #[test]
    fn alias_chain_resolves_within_bound() {
        let aliases = || {
            AliasTable::new()
                .with(AliasKind::Language, "aa", "bb", "deprecated")
                .with(AliasKind::Language, "bb", "cc", "deprecated")
        };

        let mut ok = ctx(aliases(), InferenceOptions::new().with_max_passes(3));
        ok.insert(tag("aa"), tag("aa_Latn_AA"));
        ok.add_deprecated().unwrap();
        assert_eq!(ok.get(&tag("cc")), Some(&tag("aa_Latn_AA")));
        assert_eq!(ok.get(&tag("cc_Latn_AA")), Some(&tag("aa_Latn_AA")));

        let mut short = ctx(aliases(), InferenceOptions::new().with_max_passes(2));
        short.insert(tag("aa"), tag("aa_Latn_AA"));
        match short.add_deprecated() {
            Err(InferenceError::UnresolvableAlias { passes: 2, pending }) => {
                assert!(pending.contains(&tag("cc")));
            }
            other => panic!("expected UnresolvableAlias, got {other:?}"),
        }
    }
}
