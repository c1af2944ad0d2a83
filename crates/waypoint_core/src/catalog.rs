//! Per-country statistics catalogs
//!
//! Each catalog maps domain name to goal name to one or more statistic records.
//! Catalog data is embedded JSON, parsed once into a process-wide
//! [`CatalogRegistry`] and never mutated afterwards. Lookups on a catalog never
//! fail: a missing domain or goal is `None` or an empty list.

mod assets;
mod normalize;

use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use serde::Deserialize;

pub use normalize::{GoalNormalizer, GoalRule};

use crate::{
    CoreError, CountryCode, Result,
    stat::{GoalEntry, StatisticRecord},
};

/// Goal name to its records, always at least one per goal
pub type GoalMap = IndexMap<String, Vec<StatisticRecord>>;

/// Number of goal-breakdown statistics every catalog shares
pub const UNIVERSAL_COUNT: usize = 3;

static REGISTRY: OnceLock<CatalogRegistry> = OnceLock::new();

/// Process-wide registry built from the embedded assets
///
/// Initialized on first use. An asset that fails to load is logged and
/// replaced with an empty catalog so lookups degrade to absence.
pub fn catalogs() -> &'static CatalogRegistry {
    REGISTRY.get_or_init(CatalogRegistry::from_embedded)
}

#[derive(Debug, Deserialize)]
struct CatalogAsset {
    country: String,
    domains: IndexMap<String, IndexMap<String, GoalEntry>>,
}

/// Statistics for one country or region
#[derive(Debug, Clone)]
pub struct CountryCatalog {
    country: CountryCode,
    domains: IndexMap<String, GoalMap>,
    normalizer: GoalNormalizer,
    universal: Arc<[StatisticRecord]>,
}

impl CountryCatalog {
    /// Empty catalog using the country's registered normalization rules
    pub fn new(country: CountryCode, universal: Arc<[StatisticRecord]>) -> Self {
        Self {
            country,
            domains: IndexMap::new(),
            normalizer: GoalNormalizer::for_country(country),
            universal,
        }
    }

    /// Parse and validate a catalog asset
    pub fn from_json(
        country: CountryCode,
        json: &str,
        universal: Arc<[StatisticRecord]>,
    ) -> Result<Self> {
        let asset_name = format!("{}.json", country);
        let asset: CatalogAsset =
            serde_json::from_str(json).map_err(|e| CoreError::CatalogParseFailed {
                asset: asset_name.clone(),
                cause: e,
            })?;

        if CountryCode::lookup(&asset.country) != Some(country) {
            return Err(CoreError::catalog_invalid(
                asset_name,
                format!("declares country '{}'", asset.country),
            ));
        }

        let mut catalog = Self::new(country, universal);
        for (domain, goals) in asset.domains {
            for (goal, entry) in goals {
                let records = entry.into_records();
                validate_goal_slot(&asset_name, &domain, &goal, &records)?;
                catalog.insert_goal(domain.clone(), goal, records);
            }
        }

        Ok(catalog)
    }

    /// Replace the goal-name normalization rules
    pub fn with_normalizer(mut self, normalizer: GoalNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Add or replace a goal slot. Empty record lists are ignored.
    pub fn insert_goal(
        &mut self,
        domain: impl Into<String>,
        goal: impl Into<String>,
        records: Vec<StatisticRecord>,
    ) {
        if records.is_empty() {
            return;
        }
        self.domains
            .entry(domain.into())
            .or_default()
            .insert(goal.into(), records);
    }

    pub fn country(&self) -> CountryCode {
        self.country
    }

    pub fn normalizer(&self) -> &GoalNormalizer {
        &self.normalizer
    }

    /// The goal-breakdown statistics shared by every catalog
    pub fn universal(&self) -> &[StatisticRecord] {
        &self.universal
    }

    /// Domain names in authoring order
    pub fn domain_names(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    pub fn goals(&self, domain_name: &str) -> Option<&GoalMap> {
        self.domains.get(domain_name)
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Total number of records across all domains and goals
    pub fn stat_count(&self) -> usize {
        self.domains
            .values()
            .flat_map(|goals| goals.values())
            .map(Vec::len)
            .sum()
    }

    /// The featured statistic for a goal, if the catalog has one
    ///
    /// Tries the normalized goal name first, then the raw name verbatim.
    pub fn goal_stat(&self, domain_name: &str, goal_name: &str) -> Option<&StatisticRecord> {
        let Some(goals) = self.domains.get(domain_name) else {
            tracing::debug!(
                "Domain '{}' not in {} catalog",
                domain_name,
                self.country
            );
            return None;
        };

        let normalized = self.normalizer.normalize(goal_name);
        let found = goals
            .get(normalized)
            .or_else(|| goals.get(goal_name))
            .and_then(|records| records.first());

        if found.is_none() {
            tracing::debug!(
                "No statistic for goal '{}' in {}/{}",
                goal_name,
                self.country,
                domain_name
            );
        }
        found
    }

    /// Every record in a domain, flattened in authoring order
    pub fn domain_stats(&self, domain_name: &str) -> Vec<&StatisticRecord> {
        self.domains
            .get(domain_name)
            .map(|goals| goals.values().flatten().collect())
            .unwrap_or_default()
    }

    /// Single best representative for a domain and goal
    ///
    /// Falls back from the goal statistic, to the first statistic of the
    /// domain, to the first statistic anywhere in the catalog.
    pub fn featured_stat(&self, domain_name: &str, goal_name: &str) -> Option<&StatisticRecord> {
        self.goal_stat(domain_name, goal_name)
            .or_else(|| self.domain_stats(domain_name).into_iter().next())
            .or_else(|| {
                self.domains
                    .values()
                    .flat_map(|goals| goals.values())
                    .flatten()
                    .next()
            })
    }
}

fn validate_goal_slot(
    asset: &str,
    domain: &str,
    goal: &str,
    records: &[StatisticRecord],
) -> Result<()> {
    if records.is_empty() {
        return Err(CoreError::catalog_invalid(
            asset,
            format!("goal '{}' in '{}' has no statistics", goal, domain),
        ));
    }

    let mut titles = std::collections::HashSet::new();
    for record in records {
        if record.title.trim().is_empty() {
            return Err(CoreError::catalog_invalid(
                asset,
                format!("goal '{}' in '{}' has a statistic without a title", goal, domain),
            ));
        }
        if !titles.insert(record.title.as_str()) {
            tracing::warn!(
                "Duplicate statistic '{}' under goal '{}' in {}",
                record.title,
                goal,
                asset
            );
        }
    }

    Ok(())
}

/// Every country catalog plus the country-agnostic statistics
#[derive(Debug, Clone)]
pub struct CatalogRegistry {
    /// Indexed by `CountryCode` discriminant, one entry per country
    catalogs: Vec<CountryCatalog>,
    universal: Arc<[StatisticRecord]>,
    general: IndexMap<String, Vec<StatisticRecord>>,
}

impl CatalogRegistry {
    /// Build from the embedded assets, failing on the first bad asset
    pub fn from_embedded_strict() -> Result<Self> {
        let universal = parse_universal(assets::UNIVERSAL)?;
        let general = parse_general(assets::GENERAL)?;

        let catalogs = CountryCode::ALL
            .iter()
            .map(|&country| {
                CountryCatalog::from_json(country, assets::country_asset(country), universal.clone())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            catalogs,
            universal,
            general,
        })
    }

    /// Build from the embedded assets, substituting empty data for bad assets
    pub fn from_embedded() -> Self {
        Self::from_assets(assets::UNIVERSAL, assets::GENERAL, &assets::country_asset)
    }

    pub(crate) fn from_assets(
        universal_json: &str,
        general_json: &str,
        country_asset: &dyn Fn(CountryCode) -> &'static str,
    ) -> Self {
        let universal = parse_universal(universal_json).unwrap_or_else(|e| {
            tracing::error!("Failed to load universal statistics: {:?}", e);
            Arc::from(Vec::new())
        });
        let general = parse_general(general_json).unwrap_or_else(|e| {
            tracing::error!("Failed to load general statistics: {:?}", e);
            IndexMap::new()
        });

        let catalogs: Vec<_> = CountryCode::ALL
            .iter()
            .map(|&country| {
                CountryCatalog::from_json(country, country_asset(country), universal.clone())
                    .unwrap_or_else(|e| {
                        tracing::error!("Failed to load {} catalog: {:?}", country, e);
                        CountryCatalog::new(country, universal.clone())
                    })
            })
            .collect();

        tracing::info!(
            "Loaded {} country catalogs with {} statistics",
            catalogs.len(),
            catalogs.iter().map(CountryCatalog::stat_count).sum::<usize>()
        );

        Self {
            catalogs,
            universal,
            general,
        }
    }

    pub fn get(&self, country: CountryCode) -> &CountryCatalog {
        &self.catalogs[country as usize]
    }

    /// Catalog for a loose country code, unknown codes routing to `other`
    pub fn for_code(&self, code: &str) -> &CountryCatalog {
        self.get(CountryCode::resolve(code))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountryCatalog> {
        self.catalogs.iter()
    }

    pub fn universal(&self) -> &[StatisticRecord] {
        &self.universal
    }

    /// Country-agnostic statistics for a domain
    pub fn general_stats(&self, domain_name: &str) -> &[StatisticRecord] {
        self.general
            .get(domain_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn parse_universal(json: &str) -> Result<Arc<[StatisticRecord]>> {
    let records: Vec<StatisticRecord> =
        serde_json::from_str(json).map_err(|e| CoreError::CatalogParseFailed {
            asset: "universal.json".to_string(),
            cause: e,
        })?;

    if records.len() != UNIVERSAL_COUNT {
        return Err(CoreError::catalog_invalid(
            "universal.json",
            format!(
                "expected {} statistics, found {}",
                UNIVERSAL_COUNT,
                records.len()
            ),
        ));
    }

    Ok(Arc::from(records))
}

fn parse_general(json: &str) -> Result<IndexMap<String, Vec<StatisticRecord>>> {
    serde_json::from_str(json).map_err(|e| CoreError::CatalogParseFailed {
        asset: "general.json".to_string(),
        cause: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat::DetailRecord;
    use pretty_assertions::assert_eq;

    fn record(title: &str) -> StatisticRecord {
        StatisticRecord {
            title: title.to_string(),
            figure: "1%".to_string(),
            description: String::new(),
            source: String::new(),
            link: None,
            details: DetailRecord::default(),
        }
    }

    fn sample_catalog() -> CountryCatalog {
        let mut catalog = CountryCatalog::new(CountryCode::Other, Arc::from(Vec::new()));
        catalog.insert_goal("Career & Work", "Get a Promotion", vec![record("Promo")]);
        catalog.insert_goal(
            "Career & Work",
            "Switch to Tech Career",
            vec![record("Tech A"), record("Tech B")],
        );
        catalog.insert_goal("Health & Wellness", "Sleep Better", vec![record("Sleep")]);
        catalog
    }

    fn titles(records: &[&StatisticRecord]) -> Vec<String> {
        records.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn test_goal_stat_returns_first_variant() {
        let catalog = sample_catalog();
        let stat = catalog
            .goal_stat("Career & Work", "Switch to Tech Career")
            .unwrap();
        assert_eq!(stat.title, "Tech A");
    }

    #[test]
    fn test_goal_stat_absent_domain_or_goal() {
        let catalog = sample_catalog();
        assert!(catalog.goal_stat("Unknown Domain", "Get a Promotion").is_none());
        assert!(catalog.goal_stat("Career & Work", "Retire Early").is_none());
    }

    #[test]
    fn test_domain_stats_flatten_in_order() {
        let catalog = sample_catalog();
        assert_eq!(
            titles(&catalog.domain_stats("Career & Work")),
            vec!["Promo", "Tech A", "Tech B"]
        );
        assert!(catalog.domain_stats("Unknown Domain").is_empty());
    }

    #[test]
    fn test_featured_stat_fallback_chain() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog
                .featured_stat("Health & Wellness", "Sleep Better")
                .unwrap()
                .title,
            "Sleep"
        );
        assert_eq!(
            catalog
                .featured_stat("Health & Wellness", "Run a Marathon")
                .unwrap()
                .title,
            "Sleep"
        );
        assert_eq!(
            catalog
                .featured_stat("Unknown Domain", "Anything")
                .unwrap()
                .title,
            "Promo"
        );

        let empty = CountryCatalog::new(CountryCode::Other, Arc::from(Vec::new()));
        assert!(empty.featured_stat("Career & Work", "Anything").is_none());
    }

    #[test]
    fn test_normalized_lookup_before_raw() {
        let mut catalog = CountryCatalog::new(CountryCode::NewZealand, Arc::from(Vec::new()));
        catalog.insert_goal(
            "Financial Security",
            "Build Emergency Fund (NZ$25-40K)",
            vec![record("Canonical")],
        );
        let stat = catalog
            .goal_stat("Financial Security", "Save toward an emergency fund")
            .unwrap();
        assert_eq!(stat.title, "Canonical");
    }

    #[test]
    fn test_raw_name_used_when_normalized_key_missing() {
        let mut catalog = CountryCatalog::new(CountryCode::NewZealand, Arc::from(Vec::new()));
        catalog.insert_goal(
            "Financial Security",
            "Emergency savings",
            vec![record("Raw")],
        );
        let stat = catalog
            .goal_stat("Financial Security", "Emergency savings")
            .unwrap();
        assert_eq!(stat.title, "Raw");
    }

    #[test]
    fn test_from_json_rejects_empty_goal_slot() {
        let json = r#"{"country": "other", "domains": {"Career & Work": {"Promotion": []}}}"#;
        let err = CountryCatalog::from_json(CountryCode::Other, json, Arc::from(Vec::new()))
            .unwrap_err();
        assert!(matches!(err, CoreError::CatalogInvalid { .. }));
    }

    #[test]
    fn test_from_json_rejects_blank_title() {
        let json = r#"{"country": "other", "domains": {"Career & Work": {"Promotion": {"title": " ", "figure": "1"}}}}"#;
        let err = CountryCatalog::from_json(CountryCode::Other, json, Arc::from(Vec::new()))
            .unwrap_err();
        assert!(matches!(err, CoreError::CatalogInvalid { .. }));
    }

    #[test]
    fn test_from_json_rejects_mismatched_country() {
        let json = r#"{"country": "uk", "domains": {}}"#;
        let err = CountryCatalog::from_json(CountryCode::Usa, json, Arc::from(Vec::new()))
            .unwrap_err();
        assert!(matches!(err, CoreError::CatalogInvalid { .. }));
    }

    #[test]
    fn test_from_json_preserves_authoring_order() {
        let json = r#"{
            "country": "other",
            "domains": {
                "Zeta": {"Last": {"title": "Z", "figure": "1"}},
                "Alpha": {"First": {"title": "A", "figure": "1"}}
            }
        }"#;
        let catalog =
            CountryCatalog::from_json(CountryCode::Other, json, Arc::from(Vec::new())).unwrap();
        let names: Vec<_> = catalog.domain_names().collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_embedded_assets_load_strictly() {
        let registry = CatalogRegistry::from_embedded_strict().unwrap();
        assert_eq!(registry.universal().len(), UNIVERSAL_COUNT);
        for catalog in registry.iter() {
            assert!(
                !catalog.is_empty(),
                "{} catalog should have statistics",
                catalog.country()
            );
        }
    }

    #[test]
    fn test_lenient_load_replaces_bad_asset_with_empty_catalog() {
        let truncated = r#"{"country": "nigeria", "domains": "#;
        let empty_slot =
            r#"{"country": "ireland", "domains": {"Career & Work": {"Get a Promotion": []}}}"#;
        let source = |country: CountryCode| match country {
            CountryCode::Nigeria => truncated,
            CountryCode::Ireland => empty_slot,
            other => assets::country_asset(other),
        };

        let registry = CatalogRegistry::from_assets(assets::UNIVERSAL, assets::GENERAL, &source);

        for country in [CountryCode::Nigeria, CountryCode::Ireland] {
            let catalog = registry.get(country);
            assert_eq!(catalog.country(), country);
            assert!(catalog.is_empty());
            assert!(catalog.featured_stat("Career & Work", "Get a Promotion").is_none());
            assert_eq!(catalog.universal().len(), UNIVERSAL_COUNT);
        }

        assert!(!registry.get(CountryCode::Australia).is_empty());
        assert_eq!(registry.universal().len(), UNIVERSAL_COUNT);
    }

    #[test]
    fn test_lenient_load_survives_bad_universal_asset() {
        let registry = CatalogRegistry::from_assets("[]", "not json", &assets::country_asset);

        assert!(registry.universal().is_empty());
        assert!(registry.general_stats("Health & Wellness").is_empty());
        assert!(!registry.get(CountryCode::Uk).is_empty());
    }

    #[test]
    fn test_registry_indexes_by_country() {
        let registry = catalogs();
        for country in CountryCode::ALL {
            assert_eq!(registry.get(country).country(), country);
        }
        assert_eq!(registry.for_code("atlantis").country(), CountryCode::Other);
    }

    #[test]
    fn test_general_stats_unknown_domain_is_empty() {
        assert!(catalogs().general_stats("Unknown Domain").is_empty());
        assert!(!catalogs().general_stats("Health & Wellness").is_empty());
    }
}
