//! Built-in tables.
//!
//! These are the fixed inputs every run starts from; everything else arrives
//! through [`LikelySubtagsBuilder`](crate::LikelySubtagsBuilder).

pub mod sample;

use phf::{Map, Set, phf_map, phf_set};

/// Partial → full seeds that the population data alone gets wrong.
pub static SPECIAL_CASES: Map<&'static str, &'static str> = phf_map! {
    "zh_Hani" => "zh_Hans_CN",
    "si_Sinh" => "si_Sinh_LK",
    "ii" => "ii_CN",   // Sichuan Yi
    "iu" => "iu_CA",   // Inuktitut
    "und" => "en",     // English default
};

// ─────────────────────────────────────────────────────────────────────────────
// Script overrides. These win over suppress-script and exemplar analysis.
// ─────────────────────────────────────────────────────────────────────────────
pub static SPECIAL_SCRIPTS: Map<&'static str, &'static str> = phf_map! {
    "zh" => "Hans",     // Hans, not Hani
    "yue" => "Hant",
    "chk" => "Latn",    // Chuukese
    "fil" => "Latn",
    "ko" => "Kore",
    "ko_KR" => "Kore",
    "pap" => "Latn",    // Papiamento
    "pau" => "Latn",    // Palauan
    "su" => "Latn",     // Sundanese
    "tet" => "Latn",    // Tetum
    "tk" => "Latn",     // Turkmen
    "ty" => "Latn",     // Tahitian
    "ja" => "Jpan",
    "und" => "Latn",    // ultimate fallback
};

/// Keys the redundancy pruner keeps even when the fallback would reproduce them.
pub static KEEP_TARGETS: Set<&'static str> = phf_set! {
    "und_Arab_PK",
    "und_Latn_ET",
};

/// Deterministic order for a phf map (its own iteration order is hash order).
pub fn sorted_pairs(map: &Map<&'static str, &'static str>) -> Vec<(&'static str, &'static str)> {
    let mut pairs: Vec<_> = map.entries().map(|(k, v)| (*k, *v)).collect();
    pairs.sort_unstable();
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LanguageTag;

    #[test]
    fn built_in_tags_parse() {
        for (k, v) in sorted_pairs(&SPECIAL_CASES) {
            assert!(LanguageTag::parse(k).is_ok(), "{k}");
            assert!(LanguageTag::parse(v).is_ok(), "{v}");
        }
        for k in KEEP_TARGETS.iter() {
            assert!(LanguageTag::parse(k).is_ok(), "{k}");
        }
    }

    #[test]
    fn sorted_pairs_are_sorted() {
        let pairs = sorted_pairs(&SPECIAL_SCRIPTS);
        assert!(pairs.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(pairs.len(), SPECIAL_SCRIPTS.len());
    }
}
