//! Dominant-script inference for languages.
//!
//! [`ScriptOracle`] is the raw source (exemplar-character analysis in
//! [`ExemplarScripts`]). [`ScriptResolver`] layers the override and
//! suppress-script tables on top and memoizes every answer, ambiguous ones
//! included.

use crate::data::SPECIAL_SCRIPTS;
use std::collections::{BTreeMap, BTreeSet};
use unicode_script::{Script, UnicodeScript};

/// Source of candidate scripts for a locale.
pub trait ScriptOracle {
    /// Scripts used by the locale's exemplar characters, Common and Inherited
    /// excluded. `None` when the oracle knows nothing about the locale.
    fn exemplar_scripts(&self, locale: &str) -> Option<BTreeSet<String>>;
}

impl<T: ScriptOracle + ?Sized> ScriptOracle for Box<T> {
    fn exemplar_scripts(&self, locale: &str) -> Option<BTreeSet<String>> {
        (**self).exemplar_scripts(locale)
    }
}

/// Map every character to its Unicode script (short name), dropping
/// Common, Inherited and Unknown.
pub fn scripts_in(exemplars: &str) -> BTreeSet<String> {
    exemplars
        .chars()
        .map(|c| c.script())
        .filter(|s| !matches!(s, Script::Common | Script::Inherited | Script::Unknown))
        .map(|s| s.short_name().to_string())
        .collect()
}

/// [`ScriptOracle`] backed by per-locale exemplar character strings.
#[derive(Debug, Default, Clone)]
pub struct ExemplarScripts {
    exemplars: BTreeMap<String, String>,
}

impl ExemplarScripts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, locale: &str, exemplars: &str) -> Self {
        self.exemplars.insert(locale.to_string(), exemplars.to_string());
        self
    }
}

impl ScriptOracle for ExemplarScripts {
    fn exemplar_scripts(&self, locale: &str) -> Option<BTreeSet<String>> {
        self.exemplars.get(locale).map(|set| scripts_in(set))
    }
}

/// No single dominant script could be determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptAmbiguity {
    pub locale: String,
    /// Empty when nothing was found, two or more when the exemplars disagree.
    pub scripts: Vec<String>,
}

pub struct ScriptResolver {
    oracle: Box<dyn ScriptOracle>,
    overrides: BTreeMap<String, String>,
    suppress: BTreeMap<String, String>,
    cache: BTreeMap<String, Result<String, ScriptAmbiguity>>,
}

impl Default for ScriptResolver {
    fn default() -> Self {
        Self::new(ExemplarScripts::default())
    }
}

impl ScriptResolver {
    /// A resolver seeded with the built-in override table.
    pub fn new(oracle: impl ScriptOracle + 'static) -> Self {
        Self {
            oracle: Box::new(oracle),
            overrides: SPECIAL_SCRIPTS
                .entries()
                .map(|(l, s)| (l.to_string(), s.to_string()))
                .collect(),
            suppress: BTreeMap::new(),
            cache: BTreeMap::new(),
        }
    }

    /// Add or replace overrides. Overrides win over every other source.
    pub fn with_overrides<'a>(mut self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        self.overrides
            .extend(pairs.into_iter().map(|(l, s)| (l.to_string(), s.to_string())));
        self.cache.clear();
        self
    }

    /// Suppress-script entries: the script a language is written in when unmarked.
    pub fn with_suppress_scripts<'a>(
        mut self,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        self.suppress
            .extend(pairs.into_iter().map(|(l, s)| (l.to_string(), s.to_string())));
        self.cache.clear();
        self
    }

    /// Dominant script for `locale`.
    ///
    /// Order: override, suppress-script, exemplars of the full locale, then the
    /// same again for the bare language when the locale carries subtags.
    pub fn resolve(&mut self, locale: &str) -> Result<String, ScriptAmbiguity> {
        if let Some(hit) = self.cache.get(locale) {
            return hit.clone();
        }
        let mut result = self.lookup(locale);
        let unknown = matches!(&result, Err(a) if a.scripts.is_empty());
        if result.is_err()
            && let Some((language, _)) = locale.split_once('_')
        {
            // a locale with no exemplars of its own reports the language's answer
            let fallback = self.resolve(language);
            if fallback.is_ok() || unknown {
                result = fallback;
            }
        }
        self.cache.insert(locale.to_string(), result.clone());
        result
    }

    fn lookup(&self, locale: &str) -> Result<String, ScriptAmbiguity> {
        if let Some(script) = self.overrides.get(locale) {
            return Ok(script.clone());
        }
        if let Some(script) = self.suppress.get(locale) {
            return Ok(script.clone());
        }
        let scripts = self.oracle.exemplar_scripts(locale).unwrap_or_default();
        if scripts.len() == 1
            && let Some(script) = scripts.iter().next()
        {
            return Ok(script.clone());
        }
        Err(ScriptAmbiguity {
            locale: locale.to_string(),
            scripts: scripts.into_iter().collect(),
        })
    }
}
