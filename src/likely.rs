use crate::{
    alias::AliasTable,
    context::{Diagnostic, InferenceContext},
    data::{SPECIAL_CASES, sorted_pairs},
    minimize::{MinimalSubtags, Minimizer},
    options::InferenceOptions,
    pipeline::{Pipeline, preset},
    population::{PopulationOracle, PopulationTable},
    script::{ExemplarScripts, ScriptOracle, ScriptResolver},
    stage::InferenceError,
    tag::{LanguageTag, TagError},
};
use std::collections::BTreeMap;
use tracing::info;

/// Frozen likely-subtags table answering `maximize` / `minimize` queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikelySubtags {
    table: BTreeMap<LanguageTag, LanguageTag>,
    favor_region: bool,
}

impl LikelySubtags {
    pub fn builder() -> LikelySubtagsBuilder {
        LikelySubtagsBuilder::default()
    }

    pub(crate) fn from_table(table: BTreeMap<LanguageTag, LanguageTag>, favor_region: bool) -> Self {
        Self {
            table,
            favor_region,
        }
    }

    /// The maximal form of `tag`, or `None` when nothing in the table covers it.
    /// Variants of the input are carried over to the result.
    pub fn maximize(&self, tag: &LanguageTag) -> Option<LanguageTag> {
        lookup(&self.table, tag)
    }

    /// Parse and maximize in one step.
    pub fn maximize_str(&self, tag: &str) -> Result<Option<LanguageTag>, TagError> {
        Ok(self.maximize(&LanguageTag::parse(tag)?))
    }

    /// The shortest tag that maximizes to the same result as `tag`, under the
    /// table's `favor_region` policy.
    pub fn minimize(&self, tag: &LanguageTag) -> Option<LanguageTag> {
        self.minimize_with(tag, self.favor_region)
    }

    /// Candidates are `L`, then `L_R` and `L_S` (in that order when
    /// `favor_region` is set, reversed otherwise). Falls back to the maximal tag.
    pub(crate) fn minimize_with(&self, tag: &LanguageTag, favor_region: bool) -> Option<LanguageTag> {
        let maximal = self.maximize(tag)?.without_variants();
        let language = maximal.without_script().without_region();
        let with_region = language.with_region(maximal.region());
        let with_script = language.with_script(maximal.script());
        let candidates = if favor_region {
            [language, with_region, with_script]
        } else {
            [language, with_script, with_region]
        };

        let minimal = candidates
            .into_iter()
            .find(|c| self.maximize(c).as_ref() == Some(&maximal))
            .unwrap_or(maximal);
        Some(minimal.with_variants_of(tag))
    }

    #[inline]
    pub fn favor_region(&self) -> bool {
        self.favor_region
    }

    #[inline]
    pub fn get(&self, key: &LanguageTag) -> Option<&LanguageTag> {
        self.table.get(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Entries in source-tag order (`und` last).
    pub fn iter(&self) -> impl Iterator<Item = (&LanguageTag, &LanguageTag)> {
        self.table.iter()
    }

    /// `(source, target)` pairs in source-tag order.
    pub fn pairs(&self) -> Vec<(LanguageTag, LanguageTag)> {
        self.table
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub(crate) fn table(&self) -> &BTreeMap<LanguageTag, LanguageTag> {
        &self.table
    }
}

/// Exact match, then the region, script and both dropped in turn, putting the
/// dropped subtags back into the result. A tag with language, script and
/// region is its own answer.
pub(crate) fn lookup(
    table: &BTreeMap<LanguageTag, LanguageTag>,
    tag: &LanguageTag,
) -> Option<LanguageTag> {
    let core = tag.without_variants();
    let found = if let Some(hit) = table.get(&core) {
        Some(hit.clone())
    } else if let Some(hit) = core
        .has_region()
        .then(|| table.get(&core.without_region()))
        .flatten()
    {
        Some(hit.with_region(core.region()))
    } else if let Some(hit) = core
        .has_script()
        .then(|| table.get(&core.without_script()))
        .flatten()
    {
        Some(hit.with_script(core.script()))
    } else if let Some(hit) = (core.has_script() && core.has_region())
        .then(|| table.get(&core.without_script().without_region()))
        .flatten()
    {
        Some(hit.with_script(core.script()).with_region(core.region()))
    } else if core.is_maximal() {
        Some(core)
    } else {
        None
    };
    found.map(|t| t.with_variants_of(tag))
}

/// Everything a run produces: the full table, the minimal forms, the pruned
/// table and the non-fatal diagnostics.
#[derive(Debug, Clone)]
pub struct Report {
    pub likely: LikelySubtags,
    pub minimal: MinimalSubtags,
    pub pruned: LikelySubtags,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct LikelySubtagsBuilder {
    default_content: Vec<String>,
    special_cases: Vec<(String, String)>,
    population: Box<dyn PopulationOracle>,
    script_oracle: Box<dyn ScriptOracle>,
    script_overrides: Vec<(String, String)>,
    suppress_scripts: Vec<(String, String)>,
    aliases: AliasTable,
    options: InferenceOptions,
    pipeline: Pipeline,
}

impl Default for LikelySubtagsBuilder {
    fn default() -> Self {
        Self {
            default_content: Vec::new(),
            special_cases: owned(sorted_pairs(&SPECIAL_CASES)),
            population: Box::new(PopulationTable::new()),
            script_oracle: Box::new(ExemplarScripts::new()),
            script_overrides: Vec::new(),
            suppress_scripts: Vec::new(),
            aliases: AliasTable::new(),
            options: InferenceOptions::default(),
            pipeline: preset::standard(),
        }
    }
}

fn owned<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<(String, String)> {
    pairs
        .into_iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

fn borrowed(pairs: &[(String, String)]) -> impl Iterator<Item = (&str, &str)> {
    pairs.iter().map(|(a, b)| (a.as_str(), b.as_str()))
}

impl LikelySubtagsBuilder {
    pub fn default_content<'a>(mut self, locales: impl IntoIterator<Item = &'a str>) -> Self {
        self.default_content = locales.into_iter().map(str::to_string).collect();
        self
    }

    /// Replace the built-in special cases.
    pub fn special_cases<'a>(mut self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        self.special_cases = owned(pairs);
        self
    }

    pub fn population(mut self, oracle: impl PopulationOracle + 'static) -> Self {
        self.population = Box::new(oracle);
        self
    }

    pub fn script_oracle(mut self, oracle: impl ScriptOracle + 'static) -> Self {
        self.script_oracle = Box::new(oracle);
        self
    }

    /// Extra script overrides on top of the built-in table.
    pub fn script_overrides<'a>(
        mut self,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        self.script_overrides.extend(owned(pairs));
        self
    }

    pub fn suppress_scripts<'a>(
        mut self,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        self.suppress_scripts.extend(owned(pairs));
        self
    }

    pub fn aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn options(mut self, options: InferenceOptions) -> Self {
        self.options = options;
        self
    }

    pub fn favor_region(mut self, favor_region: bool) -> Self {
        self.options.favor_region = favor_region;
        self
    }

    pub fn pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Seed, run the pipeline, check coverage, then minimize and prune.
    ///
    /// Any fatal error aborts before a table is produced.
    pub fn build(self) -> Result<Report, InferenceError> {
        let scripts = ScriptResolver::new(self.script_oracle)
            .with_overrides(borrowed(&self.script_overrides))
            .with_suppress_scripts(borrowed(&self.suppress_scripts));
        let minimizer = Minimizer::new(&self.options);
        let mut ctx = InferenceContext::new(scripts, self.population, self.aliases, self.options);

        ctx.seed(
            borrowed(&self.special_cases),
            self.default_content.iter().map(String::as_str),
        )?;
        self.pipeline.run(&mut ctx)?;
        ctx.check_consistency()?;

        let (likely, diagnostics) = ctx.freeze();
        let minimal = minimizer.minimal_forms(&likely);
        let pruned = minimizer.prune(&likely);
        info!(
            entries = likely.len(),
            pruned = pruned.len(),
            diagnostics = diagnostics.len(),
            "likely subtags built"
        );
        Ok(Report {
            likely,
            minimal,
            pruned,
            diagnostics,
        })
    }
}
