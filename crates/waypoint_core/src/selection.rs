//! Relevant-statistics selection
//!
//! Given a domain and goal, a [`StatsSelector`] gathers three buckets from its
//! catalog (the featured goal statistic, the rest of the domain, and one
//! representative of every other domain) and hands them to an
//! [`OrderingPolicy`] that builds the final slate shown to the user.
//!
//! The featured statistic is deterministic. What follows it depends on the
//! policy; the default [`ShuffledOrdering`] varies between calls.

mod ordering;

use std::sync::Arc;

use rand::RngCore;
use serde::Serialize;

pub use ordering::{
    CROSS_DOMAIN_LIMIT, FixedOrdering, OrderingPolicy, OrderingRegistry, SAME_DOMAIN_LIMIT,
    ShuffledOrdering,
};

use crate::{
    catalog::CountryCatalog,
    rotation::StatRotation,
    stat::{DetailRecord, StatisticRecord},
};

/// Upper bound on the number of statistics in a slate
pub const MAX_SELECTION: usize = 10;

/// Candidate buckets handed to an ordering policy
#[derive(Debug, Clone, Copy)]
pub struct SelectionParts<'a> {
    pub goal_stat: Option<&'a StatisticRecord>,
    /// Same-domain statistics, excluding the goal statistic
    pub domain_stats: &'a [&'a StatisticRecord],
    /// First statistic of every other domain, in catalog order
    pub other_domain_stats: &'a [&'a StatisticRecord],
    pub universal: &'a [StatisticRecord],
}

/// Result of a relevant-statistics selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionResult {
    /// Zero or one featured statistic
    pub goal_specific: Vec<StatisticRecord>,
    /// The rest of the requested domain
    pub domain_specific: Vec<StatisticRecord>,
    /// Universal statistics followed by one representative per other domain
    pub other_relevant: Vec<StatisticRecord>,
    /// The slate to display, at most [`MAX_SELECTION`] long
    pub all: Vec<StatisticRecord>,
}

impl SelectionResult {
    pub fn goal_stat(&self) -> Option<&StatisticRecord> {
        self.goal_specific.first()
    }

    /// The slate, or the fallback statistic alone when the slate is empty
    pub fn display_list(&self) -> Vec<StatisticRecord> {
        if self.all.is_empty() {
            vec![fallback_statistic()]
        } else {
            self.all.clone()
        }
    }

    /// Navigable rotation over [`Self::display_list`]
    pub fn rotation(&self) -> StatRotation {
        StatRotation::new(self.display_list())
    }
}

/// Shown when a selection produced nothing at all
pub fn fallback_statistic() -> StatisticRecord {
    StatisticRecord {
        title: "Written Goals Are More Likely to Be Achieved".to_string(),
        figure: "42%".to_string(),
        description: "People who write down their goals are significantly more likely to achieve them than those who only think about them.".to_string(),
        source: "Dominican University of California".to_string(),
        link: Some("https://www.dominican.edu".to_string()),
        details: DetailRecord {
            title: Some("Goals Research Summary".to_string()),
            publication: Some("Dominican University of California".to_string()),
            authors: Some("Gail Matthews".to_string()),
            date: Some("2015".to_string()),
            description: None,
            link: Some("https://www.dominican.edu".to_string()),
        },
    }
}

/// Selects statistics from one catalog using an ordering policy
#[derive(Debug, Clone)]
pub struct StatsSelector<'a> {
    catalog: &'a CountryCatalog,
    policy: Arc<dyn OrderingPolicy>,
}

impl<'a> StatsSelector<'a> {
    /// Selector using the shuffled ordering
    pub fn new(catalog: &'a CountryCatalog) -> Self {
        Self::with_policy(catalog, Arc::new(ShuffledOrdering))
    }

    pub fn with_policy(catalog: &'a CountryCatalog, policy: Arc<dyn OrderingPolicy>) -> Self {
        Self { catalog, policy }
    }

    pub fn policy(&self) -> &dyn OrderingPolicy {
        self.policy.as_ref()
    }

    pub fn relevant_stats(&self, domain_name: &str, goal_name: &str) -> SelectionResult {
        self.relevant_stats_with_rng(domain_name, goal_name, &mut rand::rng())
    }

    /// Same as [`Self::relevant_stats`] with a caller-supplied RNG
    pub fn relevant_stats_with_rng(
        &self,
        domain_name: &str,
        goal_name: &str,
        rng: &mut dyn RngCore,
    ) -> SelectionResult {
        let catalog = self.catalog;
        let goal_stat = catalog.goal_stat(domain_name, goal_name);

        let domain_stats: Vec<&StatisticRecord> = catalog
            .domain_stats(domain_name)
            .into_iter()
            .filter(|stat| goal_stat.is_none_or(|goal| !goal.same_title(stat)))
            .collect();

        let other_domain_stats: Vec<&StatisticRecord> = catalog
            .domain_names()
            .filter(|name| *name != domain_name)
            .filter_map(|name| catalog.domain_stats(name).into_iter().next())
            .collect();

        let all = self.policy.arrange(
            SelectionParts {
                goal_stat,
                domain_stats: &domain_stats,
                other_domain_stats: &other_domain_stats,
                universal: catalog.universal(),
            },
            rng,
        );

        tracing::debug!(
            "Selected {} statistics for {}/{}/{} using {} ordering",
            all.len(),
            catalog.country(),
            domain_name,
            goal_name,
            self.policy.name()
        );

        SelectionResult {
            goal_specific: goal_stat.cloned().into_iter().collect(),
            domain_specific: domain_stats.into_iter().cloned().collect(),
            other_relevant: catalog
                .universal()
                .iter()
                .chain(other_domain_stats)
                .cloned()
                .collect(),
            all,
        }
    }
}

impl CountryCatalog {
    /// Relevant statistics using the shuffled ordering
    pub fn relevant_stats(&self, domain_name: &str, goal_name: &str) -> SelectionResult {
        StatsSelector::new(self).relevant_stats(domain_name, goal_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CountryCode;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

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
        let universal: Arc<[StatisticRecord]> =
            Arc::from(vec![record("U1"), record("U2"), record("U3")]);
        let mut catalog = CountryCatalog::new(CountryCode::Other, universal);
        catalog.insert_goal("Career", "Promotion", vec![record("C1"), record("C2")]);
        catalog.insert_goal("Career", "Side Business", vec![record("C3")]);
        catalog.insert_goal("Career", "Tech", vec![record("C4")]);
        catalog.insert_goal("Health", "Run", vec![record("H1")]);
        catalog.insert_goal("Money", "Save", vec![record("M1")]);
        catalog
    }

    #[test]
    fn test_buckets_exclude_goal_stat() {
        let catalog = sample_catalog();
        let result = StatsSelector::with_policy(&catalog, Arc::new(FixedOrdering))
            .relevant_stats("Career", "Promotion");

        assert_eq!(result.goal_stat().unwrap().title, "C1");
        let domain: Vec<_> = result.domain_specific.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(domain, vec!["C2", "C3", "C4"]);
        let other: Vec<_> = result.other_relevant.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(other, vec!["U1", "U2", "U3", "H1", "M1"]);

        let all: Vec<_> = result.all.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(all, vec!["C1", "C2", "C3", "U1", "U2", "U3", "H1", "M1"]);
    }

    #[test]
    fn test_unknown_domain_still_samples_other_domains() {
        let catalog = sample_catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let result = StatsSelector::new(&catalog).relevant_stats_with_rng(
            "Unknown Domain",
            "Anything",
            &mut rng,
        );

        assert!(result.goal_specific.is_empty());
        assert!(result.domain_specific.is_empty());
        let mut all: Vec<_> = result.all.iter().map(|r| r.title.as_str()).collect();
        all.sort();
        assert_eq!(all, vec!["C1", "H1", "M1", "U1", "U2", "U3"]);
    }

    #[test]
    fn test_display_list_falls_back_when_empty() {
        let empty = SelectionResult::default();
        let list = empty.display_list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0], fallback_statistic());
    }

    #[test]
    fn test_catalog_shortcut_uses_shuffled_policy() {
        let catalog = sample_catalog();
        let result = catalog.relevant_stats("Health", "Run");
        assert_eq!(result.all[0].title, "H1");
        assert!(result.all.len() <= MAX_SELECTION);
    }
}
