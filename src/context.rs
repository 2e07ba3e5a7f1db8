// src/context.rs
// Owns every piece of mutable state a likely-subtags run needs. There are no
// process-wide tables or caches; callers thread the context through the stages.

use crate::{
    alias::AliasTable,
    consistency::ConsistencyChecker,
    likely::LikelySubtags,
    options::InferenceOptions,
    population::{PopulationOracle, PopulationTable},
    script::ScriptResolver,
    stage::{
        InferenceError, Stage, add_countries::AddCountries, add_deprecated::AddDeprecated,
        add_language_country::AddLanguageCountry, add_language_script::AddLanguageScript,
        add_script::AddScript, close_mapping::CloseMapping, close_und::CloseUnd,
    },
    tag::LanguageTag,
};
use std::{collections::BTreeMap, fmt};
use tracing::{debug, info, warn};

/// Entries written by an operation, keyed by source tag.
pub type Changes = BTreeMap<LanguageTag, LanguageTag>;

/// Non-fatal findings, reported next to the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Zero or several dominant scripts for a locale; the entry was skipped.
    ScriptAmbiguous { locale: String, scripts: Vec<String> },
    /// Several targets were derived for one new key; `kept` won.
    ConflictingDerivation {
        stage: &'static str,
        key: LanguageTag,
        kept: LanguageTag,
        rejected: Vec<LanguageTag>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScriptAmbiguous { locale, scripts } if scripts.is_empty() => {
                write!(f, "no script found for `{locale}`")
            }
            Self::ScriptAmbiguous { locale, scripts } => {
                write!(f, "too many scripts for `{locale}`: {}", scripts.join(", "))
            }
            Self::ConflictingDerivation {
                stage,
                key,
                kept,
                rejected,
            } => {
                let rejected: Vec<String> = rejected.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "{stage}: multiple targets for `{key}`: kept {kept}, rejected {}",
                    rejected.join(", ")
                )
            }
        }
    }
}

pub struct InferenceContext {
    pub(crate) table: BTreeMap<LanguageTag, LanguageTag>,
    pub(crate) scripts: ScriptResolver,
    pub(crate) population: Box<dyn PopulationOracle>,
    pub(crate) aliases: AliasTable,
    pub(crate) options: InferenceOptions,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl Default for InferenceContext {
    fn default() -> Self {
        Self::new(
            ScriptResolver::default(),
            PopulationTable::default(),
            AliasTable::default(),
            InferenceOptions::default(),
        )
    }
}

impl InferenceContext {
    pub fn new(
        scripts: ScriptResolver,
        population: impl PopulationOracle + 'static,
        aliases: AliasTable,
        options: InferenceOptions,
    ) -> Self {
        Self {
            table: BTreeMap::new(),
            scripts,
            population: Box::new(population),
            aliases,
            options,
            diagnostics: Vec::new(),
        }
    }

    #[inline]
    pub fn table(&self) -> &BTreeMap<LanguageTag, LanguageTag> {
        &self.table
    }

    #[inline]
    pub fn get(&self, key: &LanguageTag) -> Option<&LanguageTag> {
        self.table.get(key)
    }

    #[inline]
    pub fn options(&self) -> &InferenceOptions {
        &self.options
    }

    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Add `key → value` unless the key is present. Variants are dropped from
    /// both sides. Returns whether the table changed.
    pub fn insert(&mut self, key: LanguageTag, value: LanguageTag) -> bool {
        self.write("insert", key, value, false)
    }

    /// Seed the table: special cases first, then one `parent → locale` entry
    /// per default-content locale. Existing keys are never replaced.
    pub fn seed<'a>(
        &mut self,
        special_cases: impl IntoIterator<Item = (&'a str, &'a str)>,
        default_content: impl IntoIterator<Item = &'a str>,
    ) -> Result<Changes, InferenceError> {
        let mut added = Changes::new();
        let mut seeds = Vec::new();
        for (key, value) in special_cases {
            seeds.push((LanguageTag::parse(key)?, LanguageTag::parse(value)?));
        }
        for locale in default_content {
            let Some((parent, _)) = locale.rsplit_once(['_', '-']) else {
                continue;
            };
            seeds.push((LanguageTag::parse(parent)?, LanguageTag::parse(locale)?));
        }

        for (key, value) in seeds {
            match self.table.get(&key) {
                Some(existing) if *existing != value => {
                    let kept = existing.clone();
                    self.record(Diagnostic::ConflictingDerivation {
                        stage: "seed",
                        key,
                        kept,
                        rejected: vec![value],
                    });
                }
                Some(_) => {}
                None => {
                    if self.write("seed", key.clone(), value.clone(), false) {
                        added.insert(key, value);
                    }
                }
            }
        }
        info!("seeded {} entries", added.len());
        Ok(added)
    }

    /// Record a non-fatal diagnostic once.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        if self.diagnostics.contains(&diagnostic) {
            return;
        }
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// Run `stage` until a pass changes nothing, at most `max_passes` passes.
    pub fn apply(&mut self, stage: &dyn Stage) -> Result<Changes, InferenceError> {
        let mut added = Changes::new();
        let mut pending = Vec::new();
        for pass in 1..=self.options.max_passes {
            let (entries, conflicts) = stage.pass(self)?.into_parts();
            for conflict in conflicts {
                self.record(conflict);
            }
            pending.clear();
            for (key, value) in entries {
                if self.write(stage.name(), key.clone(), value.clone(), stage.overwrites()) {
                    pending.push(key.clone());
                    added.insert(key, value);
                }
            }
            if pending.is_empty() {
                if !added.is_empty() {
                    info!(
                        stage = stage.name(),
                        passes = pass,
                        "{} entries written",
                        added.len()
                    );
                }
                return Ok(added);
            }
        }
        Err(stage.exhausted(self.options.max_passes, pending))
    }

    fn write(&mut self, stage: &str, key: LanguageTag, value: LanguageTag, overwrite: bool) -> bool {
        let key = key.without_variants();
        let value = value.without_variants();
        match self.table.get_mut(&key) {
            None => {
                debug!("Adding:\t{key}\t=>\t{value}\t\t{stage}");
                self.table.insert(key, value);
                true
            }
            Some(existing) if overwrite && *existing != value => {
                debug!("Replacing:\t{key}\t=>\t{value}\t, was\t{existing}\t\t{stage}");
                *existing = value;
                true
            }
            Some(_) => false,
        }
    }

    // ──────────────────────────────────────────────────────────────
    //  Closure operations. Each returns the entries it wrote.
    // ──────────────────────────────────────────────────────────────

    pub fn close_mapping(&mut self) -> Result<Changes, InferenceError> {
        self.apply(&CloseMapping)
    }

    pub fn add_script(&mut self) -> Result<Changes, InferenceError> {
        self.apply(&AddScript)
    }

    pub fn add_language_script(&mut self) -> Result<Changes, InferenceError> {
        self.apply(&AddLanguageScript)
    }

    pub fn add_language_country(&mut self) -> Result<Changes, InferenceError> {
        self.apply(&AddLanguageCountry)
    }

    pub fn add_countries(&mut self) -> Result<Changes, InferenceError> {
        self.apply(&AddCountries)
    }

    pub fn close_und(&mut self) -> Result<Changes, InferenceError> {
        self.apply(&CloseUnd)
    }

    pub fn add_deprecated(&mut self) -> Result<Changes, InferenceError> {
        self.apply(&AddDeprecated)
    }

    /// Synthesize missing coverage keys; fails if any target is not maximal.
    pub fn check_consistency(&mut self) -> Result<Changes, InferenceError> {
        ConsistencyChecker.check(self)
    }

    /// Freeze the table for queries.
    pub fn freeze(self) -> (LikelySubtags, Vec<Diagnostic>) {
        let likely = LikelySubtags::from_table(self.table, self.options.favor_region);
        (likely, self.diagnostics)
    }
}
