//! Language tags as used by the likely-subtags tables.
//!
//! A tag is a `(language, script, region)` triple plus any variant and
//! extension subtags. The canonical string form is
//! `language[_Script][_REGION][_variant…][_x_ext…]`.
//! Construction always normalizes the core subtags:
//!
//! * an empty language becomes `und`
//! * the unknown script `Zzzz` and the unknown region `ZZ` become absent
//! * casing is fixed (`zh`, `Hant`, `TW`)
//!
//! Variants and extensions (everything from the first singleton such as `u`
//! or `x` on) are kept as written. They are carried through lookups but never
//! take part in inference.

use smallvec::SmallVec;
use std::{cmp::Ordering, fmt, str::FromStr};
use thiserror::Error;

pub const UNDETERMINED: &str = "und";
pub const UNKNOWN_SCRIPT: &str = "Zzzz";
pub const UNKNOWN_REGION: &str = "ZZ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("empty subtag in `{0}`")]
    EmptySubtag(String),

    #[error("malformed subtag `{subtag}` in `{tag}`")]
    Malformed { tag: String, subtag: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag {
    language: String,
    script: String,
    region: String,
    variants: SmallVec<[String; 2]>,
    extensions: SmallVec<[String; 4]>,
}

impl Default for LanguageTag {
    fn default() -> Self {
        Self::und()
    }
}

impl LanguageTag {
    /// Build a tag from its three core subtags, normalizing each.
    pub fn new(language: &str, script: &str, region: &str) -> Self {
        Self {
            language: normalize_language(language),
            script: normalize_script(script),
            region: normalize_region(region),
            variants: SmallVec::new(),
            extensions: SmallVec::new(),
        }
    }

    #[inline]
    pub fn und() -> Self {
        Self::new(UNDETERMINED, "", "")
    }

    /// Split a tag on `_` or `-`.
    pub fn parse(input: &str) -> Result<Self, TagError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Self::und());
        }

        let mut parts = input.split(['_', '-']);
        // A leading separator means an empty language, which normalizes to `und`.
        let language = parts.next().unwrap_or_default();
        if !language.is_empty() && !is_language(language) {
            return Err(TagError::Malformed {
                tag: input.to_string(),
                subtag: language.to_string(),
            });
        }

        let mut tag = Self::new(language, "", "");
        // 0 = expecting script, 1 = expecting region, 2 = variants only,
        // 3 = inside extensions
        let mut state = 0u8;
        for part in parts {
            if part.is_empty() {
                return Err(TagError::EmptySubtag(input.to_string()));
            }
            if state == 3 || is_singleton(part) {
                if !is_extension(part) {
                    return Err(TagError::Malformed {
                        tag: input.to_string(),
                        subtag: part.to_string(),
                    });
                }
                tag.extensions.push(part.to_string());
                state = 3;
            } else if state == 0 && is_script(part) {
                tag.script = normalize_script(part);
                state = 1;
            } else if state <= 1 && is_region(part) {
                tag.region = normalize_region(part);
                state = 2;
            } else if is_variant(part) {
                tag.variants.push(part.to_string());
                state = 2;
            } else {
                return Err(TagError::Malformed {
                    tag: input.to_string(),
                    subtag: part.to_string(),
                });
            }
        }
        // a trailing singleton introduces nothing
        if let Some(last) = tag.extensions.last()
            && is_singleton(last)
        {
            return Err(TagError::Malformed {
                tag: input.to_string(),
                subtag: last.clone(),
            });
        }
        Ok(tag)
    }

    #[inline]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[inline]
    pub fn script(&self) -> &str {
        &self.script
    }

    #[inline]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[inline]
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// Extension and private-use subtags, singletons included.
    #[inline]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    #[inline]
    pub fn is_und(&self) -> bool {
        self.language == UNDETERMINED
    }

    #[inline]
    pub fn has_script(&self) -> bool {
        !self.script.is_empty()
    }

    #[inline]
    pub fn has_region(&self) -> bool {
        !self.region.is_empty()
    }

    /// Language, script and region are all known. `und` counts as an empty language.
    #[inline]
    pub fn is_maximal(&self) -> bool {
        !self.is_und() && self.has_script() && self.has_region()
    }

    /// Number of optional core subtags present (script, region).
    #[inline]
    pub fn specificity(&self) -> usize {
        usize::from(self.has_script()) + usize::from(self.has_region())
    }

    pub fn with_language(&self, language: &str) -> Self {
        Self {
            language: normalize_language(language),
            ..self.clone()
        }
    }

    pub fn with_script(&self, script: &str) -> Self {
        Self {
            script: normalize_script(script),
            ..self.clone()
        }
    }

    pub fn with_region(&self, region: &str) -> Self {
        Self {
            region: normalize_region(region),
            ..self.clone()
        }
    }

    #[inline]
    pub fn without_script(&self) -> Self {
        self.with_script("")
    }

    #[inline]
    pub fn without_region(&self) -> Self {
        self.with_region("")
    }

    /// The core triple, with variants and extensions dropped.
    pub fn without_variants(&self) -> Self {
        Self {
            variants: SmallVec::new(),
            extensions: SmallVec::new(),
            ..self.clone()
        }
    }

    /// Replace this tag's variants and extensions with those of `other`.
    pub fn with_variants_of(&self, other: &LanguageTag) -> Self {
        Self {
            variants: other.variants.clone(),
            extensions: other.extensions.clone(),
            ..self.clone()
        }
    }

    /// The tag with the language replaced by `und`.
    #[inline]
    pub fn to_und(&self) -> Self {
        self.with_language(UNDETERMINED)
    }

    /// Keys that must resolve for this maximal tag to be covered:
    /// `L`, `L_S`, `L_R`, `und_S`, `und_S_R`, `und_R`.
    pub fn coverage_keys(&self) -> [LanguageTag; 6] {
        let core = self.without_variants();
        let language = core.without_script().without_region();
        [
            language.clone(),
            language.with_script(&self.script),
            language.with_region(&self.region),
            language.to_und().with_script(&self.script),
            core.to_und(),
            language.to_und().with_region(&self.region),
        ]
    }
}

impl FromStr for LanguageTag {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if self.has_script() {
            write!(f, "_{}", self.script)?;
        }
        if self.has_region() {
            write!(f, "_{}", self.region)?;
        }
        for subtag in self.variants.iter().chain(&self.extensions) {
            write!(f, "_{subtag}")?;
        }
        Ok(())
    }
}

/// Locale order: language ascending with `und` last, then script, region,
/// variants and extensions.
impl Ord for LanguageTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.is_und()
            .cmp(&other.is_und())
            .then_with(|| self.language.cmp(&other.language))
            .then_with(|| self.script.cmp(&other.script))
            .then_with(|| self.region.cmp(&other.region))
            .then_with(|| self.variants.cmp(&other.variants))
            .then_with(|| self.extensions.cmp(&other.extensions))
    }
}

impl PartialOrd for LanguageTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn normalize_language(language: &str) -> String {
    if language.is_empty() {
        UNDETERMINED.to_string()
    } else {
        language.to_ascii_lowercase()
    }
}

fn normalize_script(script: &str) -> String {
    let mut out = String::with_capacity(script.len());
    for (i, c) in script.chars().enumerate() {
        if i == 0 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    if out == UNKNOWN_SCRIPT { String::new() } else { out }
}

fn normalize_region(region: &str) -> String {
    let out = region.to_ascii_uppercase();
    if out == UNKNOWN_REGION { String::new() } else { out }
}

#[inline]
fn is_language(s: &str) -> bool {
    matches!(s.len(), 2..=3 | 5..=8) && s.bytes().all(|b| b.is_ascii_alphabetic())
}

#[inline]
fn is_script(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_alphabetic())
}

#[inline]
fn is_region(s: &str) -> bool {
    (s.len() == 2 && s.bytes().all(|b| b.is_ascii_alphabetic()))
        || (s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit()))
}

#[inline]
fn is_variant(s: &str) -> bool {
    let alnum = s.bytes().all(|b| b.is_ascii_alphanumeric());
    alnum
        && ((5..=8).contains(&s.len())
            || (s.len() == 4 && s.as_bytes()[0].is_ascii_digit()))
}

#[inline]
fn is_singleton(s: &str) -> bool {
    s.len() == 1 && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[inline]
fn is_extension(s: &str) -> bool {
    (1..=8).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphanumeric())
}
