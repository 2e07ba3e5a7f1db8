mod prop_tests {
    use crate::{
        InferenceContext, InferenceError, LanguageTag, LikelySubtags, OfficialStatus,
        PopulationRecord, PopulationTable, data::sample,
    };
    use proptest::prelude::*;
    use std::sync::LazyLock;

    static SAMPLE: LazyLock<LikelySubtags> =
        LazyLock::new(|| sample::builder().build().unwrap().likely);

    const LANGUAGES: &[&str] = &[
        "und", "en", "de", "fr", "zh", "sr", "ja", "ko", "tl", "fil", "rm", "iu", "xx",
    ];
    const SCRIPTS: &[&str] = &["", "Latn", "Cyrl", "Hant", "Hani", "Kore", "Zzzz"];
    const REGIONS: &[&str] = &["", "US", "CH", "TW", "RS", "CN", "AQ", "ZZ", "419"];

    fn sample_tag() -> impl Strategy<Value = LanguageTag> {
        (
            prop::sample::select(LANGUAGES),
            prop::sample::select(SCRIPTS),
            prop::sample::select(REGIONS),
        )
            .prop_map(|(l, s, r)| LanguageTag::new(l, s, r))
    }

    fn table_tag() -> impl Strategy<Value = LanguageTag> {
        (
            prop::sample::select(&["aa", "bb", "cc", "dd"][..]),
            prop::sample::select(&["", "Latn"][..]),
            prop::sample::select(&["", "AA", "BB"][..]),
        )
            .prop_map(|(l, s, r)| LanguageTag::new(l, s, r))
    }

    fn keys_and_values() -> Vec<LanguageTag> {
        SAMPLE
            .iter()
            .flat_map(|(k, v)| [k.clone(), v.clone()])
            .collect()
    }

    proptest! {
        #[test]
        fn tag_display_parse_stable(s in "[a-z]{2,3}(_[A-Z][a-z]{3})?(_[A-Z]{2}|_[0-9]{3})?") {
            let tag = LanguageTag::parse(&s).unwrap();
            let again = LanguageTag::parse(&tag.to_string()).unwrap();
            prop_assert_eq!(&tag, &again);
            prop_assert_eq!(tag.to_string(), again.to_string());
        }

        #[test]
        fn close_mapping_is_idempotent_and_flat(
            pairs in prop::collection::vec((table_tag(), table_tag()), 0..24)
        ) {
            let mut ctx = InferenceContext::default();
            for (k, v) in pairs {
                ctx.insert(k, v);
            }
            let seeded = ctx.table().clone();
            match ctx.close_mapping() {
                Ok(_) => {}
                Err(InferenceError::CyclicMapping(cycle)) => {
                    prop_assert!(cycle.len() >= 2);
                    prop_assert_eq!(ctx.table(), &seeded);
                    return Ok(());
                }
                Err(other) => return Err(TestCaseError::fail(other.to_string())),
            }
            let closed = ctx.table().clone();
            for (key, value) in &closed {
                if let Some(next) = closed.get(value) {
                    prop_assert_eq!(next, value);
                }
                // only keys seeded as self-maps may point at themselves
                if key == value {
                    prop_assert_eq!(seeded.get(key), Some(key));
                }
            }
            prop_assert!(ctx.close_mapping().unwrap().is_empty());
            prop_assert_eq!(ctx.table(), &closed);
        }

        #[test]
        fn round_trip_over_table(t in prop::sample::select(keys_and_values())) {
            let maximal = SAMPLE.maximize(&t);
            prop_assert!(maximal.is_some());
            for favor_region in [true, false] {
                let minimal = SAMPLE.minimize_with(&t, favor_region).unwrap();
                prop_assert_eq!(SAMPLE.maximize(&minimal), maximal.clone());
            }
        }

        #[test]
        fn round_trip_over_arbitrary_tags(t in sample_tag()) {
            if let Some(maximal) = SAMPLE.maximize(&t) {
                prop_assert!(maximal.is_maximal());
                let again = SAMPLE.maximize(&maximal);
                prop_assert_eq!(again.as_ref(), Some(&maximal));
                let minimal = SAMPLE.minimize(&t).unwrap();
                prop_assert_eq!(SAMPLE.maximize(&minimal), Some(maximal));
            }
        }

        #[test]
        fn territory_default_is_largest_official(
            records in prop::collection::btree_map(
                prop::sample::select(&["aa", "bb", "cc", "dd", "ee"][..]),
                (0u64..5, any::<bool>()),
                1..5,
            )
        ) {
            let mut population = PopulationTable::new();
            for (language, (size, official)) in &records {
                let status = if *official { OfficialStatus::Official } else { OfficialStatus::Other };
                population.insert(language, "AA", PopulationRecord::new(*size, *size, status));
            }
            let mut ctx = InferenceContext::new(
                Default::default(),
                population,
                Default::default(),
                Default::default(),
            );
            ctx.add_countries().unwrap();

            // ascending code order, first strict maximum
            let expected = records
                .iter()
                .filter(|(_, (_, official))| *official)
                .fold(None::<(&str, u64)>, |best, (l, (size, _))| match best {
                    Some((_, b)) if *size <= b => best,
                    _ => Some((*l, *size)),
                })
                .map(|(l, _)| LanguageTag::new(l, "", "AA"));
            prop_assert_eq!(ctx.get(&LanguageTag::new("", "", "AA")).cloned(), expected);
        }
    }
}
