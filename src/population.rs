//! Population, literacy and official-status data keyed by (language, territory).
//!
//! Languages may carry a script qualifier (`az_Cyrl`, `zh_Hant`); the territory
//! is always a bare region code.

use std::{collections::BTreeMap, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OfficialStatus {
    Official,
    DeFactoOfficial,
    Other,
    Unknown,
}

impl OfficialStatus {
    /// `official` or `de_facto_official`.
    #[inline]
    pub fn is_official(self) -> bool {
        matches!(self, Self::Official | Self::DeFactoOfficial)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown official status `{0}`")]
pub struct UnknownStatus(pub String);

impl FromStr for OfficialStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "official" => Ok(Self::Official),
            "de_facto_official" => Ok(Self::DeFactoOfficial),
            // regional statuses do not make a language the territory default
            "official_regional" | "official_minority" | "other" => Ok(Self::Other),
            "unknown" | "" => Ok(Self::Unknown),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationRecord {
    pub population: u64,
    pub literate_population: u64,
    pub official_status: OfficialStatus,
}

impl PopulationRecord {
    pub fn new(population: u64, literate_population: u64, official_status: OfficialStatus) -> Self {
        Self {
            population,
            literate_population,
            official_status,
        }
    }
}

/// Read-only population source consumed by the inference stages.
pub trait PopulationOracle {
    /// Territories that have population data, in ascending order.
    fn territories(&self) -> Vec<String>;

    /// Every `(language, record)` pair for a territory, in ascending language order.
    fn languages_in(&self, territory: &str) -> Vec<(String, PopulationRecord)>;

    /// Literate population of the whole territory.
    ///
    /// The default sums the literate population of the languages listed for it.
    fn territory_literate_population(&self, territory: &str) -> u64 {
        self.languages_in(territory)
            .iter()
            .map(|(_, r)| r.literate_population)
            .sum()
    }

    fn record(&self, language: &str, territory: &str) -> Option<PopulationRecord> {
        self.languages_in(territory)
            .into_iter()
            .find(|(l, _)| l == language)
            .map(|(_, r)| r)
    }
}

impl<T: PopulationOracle + ?Sized> PopulationOracle for Box<T> {
    fn territories(&self) -> Vec<String> {
        (**self).territories()
    }

    fn languages_in(&self, territory: &str) -> Vec<(String, PopulationRecord)> {
        (**self).languages_in(territory)
    }

    fn territory_literate_population(&self, territory: &str) -> u64 {
        (**self).territory_literate_population(territory)
    }

    fn record(&self, language: &str, territory: &str) -> Option<PopulationRecord> {
        (**self).record(language, territory)
    }
}

#[derive(Debug, Default, Clone)]
struct Territory {
    literate_total: Option<u64>,
    languages: BTreeMap<String, PopulationRecord>,
}

/// In-memory [`PopulationOracle`].
#[derive(Debug, Default, Clone)]
pub struct PopulationTable {
    territories: BTreeMap<String, Territory>,
}

impl PopulationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, language: &str, territory: &str, record: PopulationRecord) {
        self.territories
            .entry(territory.to_ascii_uppercase())
            .or_default()
            .languages
            .insert(language.to_string(), record);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, language: &str, territory: &str, record: PopulationRecord) -> Self {
        self.insert(language, territory, record);
        self
    }

    /// Override the territory total instead of summing its languages.
    pub fn with_territory_literate_population(mut self, territory: &str, literate: u64) -> Self {
        self.territories
            .entry(territory.to_ascii_uppercase())
            .or_default()
            .literate_total = Some(literate);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }
}

impl PopulationOracle for PopulationTable {
    fn territories(&self) -> Vec<String> {
        self.territories
            .iter()
            .filter(|(_, t)| !t.languages.is_empty())
            .map(|(code, _)| code.clone())
            .collect()
    }

    fn languages_in(&self, territory: &str) -> Vec<(String, PopulationRecord)> {
        self.territories
            .get(territory)
            .map(|t| {
                t.languages
                    .iter()
                    .map(|(l, r)| (l.clone(), *r))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn territory_literate_population(&self, territory: &str) -> u64 {
        match self.territories.get(territory) {
            Some(Territory {
                literate_total: Some(total),
                ..
            }) => *total,
            Some(t) => t.languages.values().map(|r| r.literate_population).sum(),
            None => 0,
        }
    }

    fn record(&self, language: &str, territory: &str) -> Option<PopulationRecord> {
        self.territories.get(territory)?.languages.get(language).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(literate: u64, status: OfficialStatus) -> PopulationRecord {
        PopulationRecord::new(literate, literate, status)
    }

    #[test]
    fn status_parsing() {
        assert_eq!("official".parse(), Ok(OfficialStatus::Official));
        assert_eq!(
            "de_facto_official".parse(),
            Ok(OfficialStatus::DeFactoOfficial)
        );
        assert_eq!("official_regional".parse(), Ok(OfficialStatus::Other));
        assert!("bogus".parse::<OfficialStatus>().is_err());
        assert!(OfficialStatus::DeFactoOfficial.is_official());
        assert!(!OfficialStatus::Unknown.is_official());
    }

    #[test]
    fn totals_sum_languages_unless_overridden() {
        let table = PopulationTable::new()
            .with("de", "CH", rec(4_000_000, OfficialStatus::Official))
            .with("fr", "CH", rec(1_500_000, OfficialStatus::Official));
        assert_eq!(table.territory_literate_population("CH"), 5_500_000);

        let table = table.with_territory_literate_population("CH", 7_000_000);
        assert_eq!(table.territory_literate_population("CH"), 7_000_000);
        assert_eq!(table.territory_literate_population("AQ"), 0);
    }

    #[test]
    fn territories_are_sorted_and_records_found() {
        let table = PopulationTable::new()
            .with("fr", "FR", rec(60, OfficialStatus::Official))
            .with("de", "CH", rec(4, OfficialStatus::Official));
        assert_eq!(table.territories(), ["CH", "FR"]);
        assert_eq!(
            table.record("de", "CH").map(|r| r.literate_population),
            Some(4)
        );
        assert!(table.record("de", "FR").is_none());
    }
}
