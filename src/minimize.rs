//! Minimal forms and redundancy pruning over a frozen table.

use crate::{
    likely::{LikelySubtags, lookup},
    options::InferenceOptions,
    tag::LanguageTag,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Maximal tag → shortest tag that maximizes back to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MinimalSubtags {
    forms: BTreeMap<LanguageTag, LanguageTag>,
}

impl MinimalSubtags {
    #[inline]
    pub fn get(&self, maximal: &LanguageTag) -> Option<&LanguageTag> {
        self.forms.get(maximal)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LanguageTag, &LanguageTag)> {
        self.forms.iter()
    }
}

#[derive(Debug, Clone)]
pub struct Minimizer {
    favor_region: bool,
    keep_targets: BTreeSet<LanguageTag>,
}

impl Minimizer {
    pub fn new(options: &InferenceOptions) -> Self {
        Self {
            favor_region: options.favor_region,
            keep_targets: options.keep_targets.clone(),
        }
    }

    /// Minimal form of every distinct target.
    pub fn minimal_forms(&self, likely: &LikelySubtags) -> MinimalSubtags {
        let targets: BTreeSet<&LanguageTag> = likely.iter().map(|(_, v)| v).collect();
        let forms = targets
            .into_iter()
            .filter_map(|maximal| {
                likely
                    .minimize_with(maximal, self.favor_region)
                    .map(|minimal| (maximal.clone(), minimal))
            })
            .collect();
        MinimalSubtags { forms }
    }

    /// Drop every key whose target the remaining table still produces through
    /// its fallbacks.
    ///
    /// Keys go from least to most specific. A lookup only consults its own key
    /// and less specific ones, so each check runs against keys that are already
    /// final, and every key of the input maximizes to the same target after
    /// pruning.
    pub fn prune(&self, likely: &LikelySubtags) -> LikelySubtags {
        let mut table = likely.table().clone();
        let mut keys: Vec<LanguageTag> = table.keys().cloned().collect();
        keys.sort_by_key(LanguageTag::specificity);

        for key in keys {
            if self.keep_targets.contains(&key) {
                continue;
            }
            let Some(target) = table.remove(&key) else {
                continue;
            };
            if lookup(&table, &key).as_ref() == Some(&target) {
                debug!("Pruning:\t{key}\t=>\t{target}");
            } else {
                table.insert(key, target);
            }
        }
        LikelySubtags::from_table(table, likely.favor_region())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> LanguageTag {
        s.parse().unwrap()
    }

    fn likely(pairs: &[(&str, &str)]) -> LikelySubtags {
        let table = pairs.iter().map(|(k, v)| (tag(k), tag(v))).collect();
        LikelySubtags::from_table(table, true)
    }

    #[test]
    fn prune_drops_redundant_keys_only() {
        let full = likely(&[
            ("de", "de_Latn_DE"),
            ("de_Latn", "de_Latn_DE"),
            ("de_DE", "de_Latn_DE"),
            ("de_CH", "de_Latn_CH"),
            ("und_Arab_PK", "ur_Arab_PK"),
            ("und_PK", "ur_Arab_PK"),
            ("und_Arab", "ar_Arab_EG"),
        ]);
        let pruned = Minimizer::new(&InferenceOptions::default()).prune(&full);

        let keys: Vec<String> = pruned.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, ["de", "und_PK", "und_Arab", "und_Arab_PK"]);
        for (key, target) in full.iter() {
            assert_eq!(pruned.maximize(key).as_ref(), Some(target), "{key}");
        }
    }

    #[test]
    fn minimal_forms_follow_policy() {
        let full = likely(&[
            ("zh", "zh_Hans_CN"),
            ("zh_Hant", "zh_Hant_TW"),
            ("zh_TW", "zh_Hant_TW"),
        ]);
        let mut options = InferenceOptions::default();
        let forms = Minimizer::new(&options).minimal_forms(&full);
        assert_eq!(forms.len(), 2);
        assert_eq!(forms.get(&tag("zh_Hans_CN")), Some(&tag("zh")));
        assert_eq!(forms.get(&tag("zh_Hant_TW")), Some(&tag("zh_TW")));

        options.favor_region = false;
        let forms = Minimizer::new(&options).minimal_forms(&full);
        assert_eq!(forms.get(&tag("zh_Hant_TW")), Some(&tag("zh_Hant")));
    }
}
