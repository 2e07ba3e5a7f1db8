use crate::{data::KEEP_TARGETS, tag::LanguageTag};
use std::collections::BTreeSet;

/// Pipeline-wide policy.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceOptions {
    /// Minimization tries `language_REGION` before `language_Script` when set.
    pub favor_region: bool,
    /// Upper bound on passes of a single stage, and on rounds of a whole pipeline.
    pub max_passes: usize,
    /// Keys the redundancy pruner never removes.
    pub keep_targets: BTreeSet<LanguageTag>,
    /// When a territory has no official language, accept the largest unofficial
    /// one if it reaches this share of the territory's literate population.
    pub unofficial_share: Option<f64>,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            favor_region: true,
            max_passes: 64,
            keep_targets: KEEP_TARGETS
                .iter()
                .filter_map(|t| LanguageTag::parse(t).ok())
                .collect(),
            unofficial_share: None,
        }
    }
}

impl InferenceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_favor_region(mut self, favor_region: bool) -> Self {
        self.favor_region = favor_region;
        self
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    pub fn with_keep_targets(mut self, keep: impl IntoIterator<Item = LanguageTag>) -> Self {
        self.keep_targets = keep.into_iter().collect();
        self
    }

    pub fn with_unofficial_share(mut self, share: f64) -> Self {
        self.unofficial_share = Some(share);
        self
    }

    /// Preset: script-first minimization and a tight pass bound, for checking
    /// hand-curated tables that should converge quickly.
    pub fn strict() -> Self {
        Self::new().with_favor_region(false).with_max_passes(8)
    }
}
