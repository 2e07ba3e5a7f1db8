//! Deprecated-code aliases: `element type → deprecated fragment → (replacements, reason)`.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AliasKind {
    Language,
    Script,
    Territory,
    Variant,
    Zone,
}

impl AliasKind {
    /// Kinds that take part in likely-subtags derivation.
    #[inline]
    pub fn applies_to_tags(self) -> bool {
        matches!(self, Self::Language | Self::Script | Self::Territory)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub replacements: Vec<String>,
    pub reason: String,
}

impl Alias {
    /// First listed replacement, with `-` separators turned into `_`.
    pub fn primary(&self) -> Option<String> {
        self.replacements
            .first()
            .filter(|r| !r.is_empty())
            .map(|r| r.replace('-', "_"))
    }
}

#[derive(Debug, Default, Clone)]
pub struct AliasTable {
    kinds: BTreeMap<AliasKind, BTreeMap<String, Alias>>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `deprecated → replacements`. A territory replacement may be a
    /// space-separated list; it is split here.
    pub fn with(mut self, kind: AliasKind, deprecated: &str, replacements: &str, reason: &str) -> Self {
        let alias = Alias {
            replacements: replacements.split_whitespace().map(str::to_string).collect(),
            reason: reason.to_string(),
        };
        self.kinds
            .entry(kind)
            .or_default()
            .insert(deprecated.replace('-', "_"), alias);
        self
    }

    /// Every `(fragment, replacement)` pair usable for tag derivation, in
    /// kind then fragment order. Variant and zone aliases, and aliases without
    /// a replacement, are left out.
    pub fn substitutions(&self) -> Vec<(&str, String)> {
        self.kinds
            .iter()
            .filter(|(kind, _)| kind.applies_to_tags())
            .flat_map(|(_, aliases)| aliases.iter())
            .filter_map(|(fragment, alias)| alias.primary().map(|r| (fragment.as_str(), r)))
            .collect()
    }

    pub fn get(&self, kind: AliasKind, deprecated: &str) -> Option<&Alias> {
        self.kinds.get(&kind)?.get(deprecated)
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.values().all(BTreeMap::is_empty)
    }
}
