//! A small, self-consistent data set covering every stage of the pipeline.
//!
//! Figures are rounded and only need to be right relative to each other.

use crate::{
    alias::{AliasKind, AliasTable},
    likely::LikelySubtagsBuilder,
    population::{OfficialStatus, PopulationRecord, PopulationTable},
    script::ExemplarScripts,
};

pub const DEFAULT_CONTENT: &[&str] = &[
    "ar_EG",
    "de_DE",
    "en_US",
    "fr_FR",
    "it_IT",
    "ja_JP",
    "ko_KR",
    "pt_BR",
    "rm_CH",
    "ru_RU",
    "sr_Cyrl",
    "sr_Cyrl_RS",
    "sr_Latn_RS",
    "tl_PH",
    "zh_Hans",
    "zh_Hans_CN",
    "zh_Hant_TW",
];

pub const SUPPRESS_SCRIPTS: &[(&str, &str)] = &[
    ("ar", "Arab"),
    ("de", "Latn"),
    ("en", "Latn"),
    ("es", "Latn"),
    ("fr", "Latn"),
    ("it", "Latn"),
    ("pt", "Latn"),
    ("ru", "Cyrl"),
    ("si", "Sinh"),
    ("tl", "Latn"),
];

const M: u64 = 1_000_000;

// (language, territory, literate population, status)
const POPULATION: &[(&str, &str, u64, &str)] = &[
    ("en", "US", 300 * M, "official"),
    ("es", "US", 40 * M, "other"),
    ("en", "CA", 30 * M, "official"),
    ("fr", "CA", 7 * M, "official"),
    ("iu", "CA", 30_000, "other"),
    ("de", "DE", 80 * M, "official"),
    ("tr", "DE", 2 * M, "other"),
    ("de", "CH", 4 * M, "official"),
    ("fr", "CH", 1_500_000, "official"),
    ("it", "CH", 500_000, "official"),
    ("rm", "CH", 60_000, "official"),
    ("fr", "FR", 60 * M, "official"),
    ("it", "IT", 55 * M, "official"),
    ("es", "ES", 45 * M, "official"),
    ("pt", "BR", 200 * M, "official"),
    ("ru", "RU", 140 * M, "official"),
    ("sr", "RS", 7 * M, "official"),
    ("sr_Latn", "RS", 3 * M, "other"),
    ("zh", "CN", 1_000 * M, "official"),
    ("ii", "CN", 2 * M, "official_regional"),
    ("zh_Hant", "TW", 20 * M, "official"),
    ("ja", "JP", 120 * M, "official"),
    ("ko", "KR", 50 * M, "official"),
    ("ar", "EG", 80 * M, "de_facto_official"),
    ("si", "LK", 15 * M, "official"),
    ("tl", "PH", 60 * M, "official"),
    ("en", "PH", 50 * M, "official"),
];

pub fn population() -> PopulationTable {
    let mut table = PopulationTable::new();
    for &(language, territory, literate, status) in POPULATION {
        // every status above is one the parser knows
        let status = status.parse().unwrap_or(OfficialStatus::Unknown);
        table.insert(
            language,
            territory,
            PopulationRecord::new(literate, literate, status),
        );
    }
    table
}

pub fn exemplars() -> ExemplarScripts {
    ExemplarScripts::new()
        .with("sr", "абвгдђежзијклљмнњопрстћуфхцчџш")
        .with("rm", "abcdefghijklmnopqrstuvwxyzàèéìòù")
        .with("tr", "abcçdefgğhıijklmnoöprsştuüvyz")
        .with("ii", "ꀀꀁꀂꀃꀄ")
        .with("iu", "ᐃᐄᐅᐆᐊᐋ")
        .with("ja", "あいうアイウ日本")
}

pub fn aliases() -> AliasTable {
    AliasTable::new()
        .with(AliasKind::Language, "iw", "he", "deprecated")
        .with(AliasKind::Language, "tl", "fil", "legacy")
        .with(AliasKind::Language, "sh", "sr_Latn", "legacy")
        .with(AliasKind::Territory, "BU", "MM", "deprecated")
        .with(AliasKind::Territory, "YU", "RS ME", "deprecated")
        .with(AliasKind::Script, "Qaai", "Zinh", "deprecated")
}

/// A builder loaded with the whole sample.
pub fn builder() -> LikelySubtagsBuilder {
    LikelySubtagsBuilder::default()
        .default_content(DEFAULT_CONTENT.iter().copied())
        .population(population())
        .script_oracle(exemplars())
        .suppress_scripts(SUPPRESS_SCRIPTS.iter().copied())
        .aliases(aliases())
}
