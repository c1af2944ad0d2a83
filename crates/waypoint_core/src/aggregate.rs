//! Multi-country statistics pool for the profile research widget
//!
//! The widget's settings are persisted outside this crate. They are read here
//! leniently: unknown countries, domains and scopes contribute nothing rather
//! than failing.

use std::path::Path;

use rand::RngCore;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::{
    CoreError, CountryCode, Result,
    catalog::CatalogRegistry,
    error::ConfigError,
    rotation::{RotationState, StatRotation},
    stat::{StatisticRecord, dedup_by_title},
};

/// Which catalogs the pool draws from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResearchScope {
    /// Only the countries listed in the settings
    #[default]
    Selected,
    /// Every catalog
    Global,
}

impl From<String> for ResearchScope {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "global" | "all" => ResearchScope::Global,
            "selected" | "" => ResearchScope::Selected,
            other => {
                tracing::warn!("Unknown research scope '{}', using selected countries", other);
                ResearchScope::Selected
            }
        }
    }
}

impl From<ResearchScope> for String {
    fn from(scope: ResearchScope) -> Self {
        match scope {
            ResearchScope::Selected => "selected".to_string(),
            ResearchScope::Global => "global".to_string(),
        }
    }
}

/// Profile settings controlling the research pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchSettings {
    #[serde(default, alias = "selected_countries")]
    pub selected_countries: Vec<String>,

    #[serde(default, alias = "selected_domains")]
    pub selected_domains: Vec<String>,

    #[serde(default, alias = "research_scope")]
    pub research_scope: ResearchScope,

    #[serde(default = "default_include_general", alias = "include_general_stats")]
    pub include_general_stats: bool,
}

fn default_include_general() -> bool {
    true
}

impl Default for ResearchSettings {
    fn default() -> Self {
        Self {
            selected_countries: Vec::new(),
            selected_domains: Vec::new(),
            research_scope: ResearchScope::default(),
            include_general_stats: default_include_general(),
        }
    }
}

impl ResearchSettings {
    /// Parse a persisted settings blob
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::ConfigurationError {
            config_path: "<settings>".to_string(),
            field: "content".to_string(),
            expected: "valid research settings JSON".to_string(),
            cause: ConfigError::JsonParse(e.to_string()),
        })
    }

    /// Read a persisted settings blob from disk
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            CoreError::ConfigurationError {
                config_path: path.display().to_string(),
                field: "file".to_string(),
                expected: "readable settings file".to_string(),
                cause: ConfigError::Io(e.to_string()),
            }
        })?;

        serde_json::from_str(&content).map_err(|e| CoreError::ConfigurationError {
            config_path: path.display().to_string(),
            field: "content".to_string(),
            expected: "valid research settings JSON".to_string(),
            cause: ConfigError::JsonParse(e.to_string()),
        })
    }

    /// Countries the pool draws from, deduplicated, unknown codes dropped
    pub fn countries(&self) -> Vec<CountryCode> {
        let mut countries = match self.research_scope {
            ResearchScope::Global => CountryCode::ALL.to_vec(),
            ResearchScope::Selected => self
                .selected_countries
                .iter()
                .filter_map(|code| {
                    let country = CountryCode::lookup(code);
                    if country.is_none() {
                        tracing::warn!("Ignoring unknown country '{}' in research settings", code);
                    }
                    country
                })
                .collect(),
        };

        if countries.is_empty() && self.research_scope == ResearchScope::Selected {
            countries.push(CountryCode::Other);
        }

        let mut seen = std::collections::HashSet::new();
        countries.retain(|country| seen.insert(*country));
        countries
    }
}

/// Deduplicated, shuffled statistics across countries and domains
#[derive(Debug, Clone, Default)]
pub struct StatsPool {
    rotation: StatRotation,
}

impl StatsPool {
    pub fn build(settings: &ResearchSettings, registry: &CatalogRegistry) -> Self {
        Self::build_with_rng(settings, registry, &mut rand::rng())
    }

    pub fn build_with_rng(
        settings: &ResearchSettings,
        registry: &CatalogRegistry,
        rng: &mut dyn RngCore,
    ) -> Self {
        let mut stats = Self::candidates(settings, registry);
        stats.shuffle(rng);

        tracing::info!(
            "Built research pool with {} statistics from {} countries",
            stats.len(),
            settings.countries().len()
        );

        Self {
            rotation: StatRotation::new(stats),
        }
    }

    /// The pool's contents before shuffling, deduplicated by title
    pub fn candidates(settings: &ResearchSettings, registry: &CatalogRegistry) -> Vec<StatisticRecord> {
        let countries = settings.countries();
        let mut pool: Vec<StatisticRecord> = Vec::new();

        for country in &countries {
            let catalog = registry.get(*country);
            for domain in &settings.selected_domains {
                pool.extend(catalog.domain_stats(domain).into_iter().cloned());
            }
        }

        if settings.include_general_stats {
            for domain in &settings.selected_domains {
                pool.extend(registry.general_stats(domain).iter().cloned());
            }
        }

        dedup_by_title(pool)
    }

    pub fn state(&self) -> RotationState<'_> {
        self.rotation.state()
    }

    pub fn current(&self) -> Option<&StatisticRecord> {
        self.rotation.current()
    }

    pub fn next(&mut self) -> Option<&StatisticRecord> {
        self.rotation.advance()
    }

    pub fn previous(&mut self) -> Option<&StatisticRecord> {
        self.rotation.retreat()
    }

    pub fn stats(&self) -> &[StatisticRecord] {
        self.rotation.stats()
    }

    pub fn is_empty(&self) -> bool {
        self.rotation.is_empty()
    }

    pub fn rotation(&self) -> &StatRotation {
        &self.rotation
    }
}
