//! Ordering policies for the relevant-statistics slate

use std::collections::HashMap;
use std::sync::Arc;

use rand::RngCore;
use rand::seq::SliceRandom;

use super::{MAX_SELECTION, SelectionParts};
use crate::{CoreError, Result, stat::StatisticRecord};

/// At most this many same-domain alternates follow the featured statistic
pub const SAME_DOMAIN_LIMIT: usize = 2;

/// At most this many cross-domain representatives are considered
pub const CROSS_DOMAIN_LIMIT: usize = 4;

/// Arranges the candidate buckets of a selection into the final slate
pub trait OrderingPolicy: Send + Sync + std::fmt::Debug {
    /// Produce at most [`MAX_SELECTION`] records with unique titles, the goal
    /// statistic first when present
    fn arrange(&self, parts: SelectionParts<'_>, rng: &mut dyn RngCore) -> Vec<StatisticRecord>;

    fn name(&self) -> &str;

    fn description(&self) -> &str;
}

/// Goal statistic first, everything else uniformly shuffled
#[derive(Debug, Clone, Default)]
pub struct ShuffledOrdering;

impl OrderingPolicy for ShuffledOrdering {
    fn arrange(&self, parts: SelectionParts<'_>, rng: &mut dyn RngCore) -> Vec<StatisticRecord> {
        let mut combined: Vec<&StatisticRecord> = parts
            .domain_stats
            .iter()
            .take(SAME_DOMAIN_LIMIT)
            .chain(parts.other_domain_stats.iter().take(CROSS_DOMAIN_LIMIT))
            .copied()
            .chain(parts.universal.iter())
            .collect();
        combined.shuffle(rng);

        finalize(parts.goal_stat.into_iter().chain(combined))
    }

    fn name(&self) -> &str {
        "shuffled"
    }

    fn description(&self) -> &str {
        "Featured statistic first, then same-domain, cross-domain and universal statistics in random order"
    }
}

/// Goal statistic, same-domain alternates, universal, then cross-domain; no randomness
#[derive(Debug, Clone, Default)]
pub struct FixedOrdering;

impl OrderingPolicy for FixedOrdering {
    fn arrange(&self, parts: SelectionParts<'_>, _rng: &mut dyn RngCore) -> Vec<StatisticRecord> {
        let ordered = parts
            .goal_stat
            .into_iter()
            .chain(parts.domain_stats.iter().take(SAME_DOMAIN_LIMIT).copied())
            .chain(parts.universal.iter())
            .chain(
                parts
                    .other_domain_stats
                    .iter()
                    .take(CROSS_DOMAIN_LIMIT)
                    .copied(),
            );

        finalize(ordered)
    }

    fn name(&self) -> &str {
        "fixed"
    }

    fn description(&self) -> &str {
        "Featured, same-domain, universal, then cross-domain statistics in catalog order"
    }
}

/// Dedup by title keeping the first occurrence, then cap the slate
fn finalize<'a>(ordered: impl Iterator<Item = &'a StatisticRecord>) -> Vec<StatisticRecord> {
    let mut seen = std::collections::HashSet::new();
    ordered
        .filter(|&record| seen.insert(record.title.as_str()))
        .take(MAX_SELECTION)
        .cloned()
        .collect()
}

/// Named ordering policies
#[derive(Debug, Clone)]
pub struct OrderingRegistry {
    policies: HashMap<String, Arc<dyn OrderingPolicy>>,
}

impl OrderingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            policies: HashMap::new(),
        };

        // Register default policies
        registry.register(Arc::new(ShuffledOrdering));
        registry.register(Arc::new(FixedOrdering));

        registry
    }

    pub fn register(&mut self, policy: Arc<dyn OrderingPolicy>) {
        self.policies.insert(policy.name().to_string(), policy);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn OrderingPolicy>> {
        self.policies.get(name).cloned()
    }

    /// Look up a policy, reporting the available names when it is missing
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn OrderingPolicy>> {
        self.get(name)
            .ok_or_else(|| CoreError::unknown_ordering_policy(name, self.list()))
    }

    /// Registered policy names, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<_> = self.policies.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for OrderingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat::DetailRecord;
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

    struct Fixture {
        goal: StatisticRecord,
        domain: Vec<StatisticRecord>,
        other: Vec<StatisticRecord>,
        universal: Vec<StatisticRecord>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                goal: record("Goal"),
                domain: ["D1", "D2", "D3"].into_iter().map(record).collect(),
                other: ["O1", "O2", "O3", "O4", "O5"].into_iter().map(record).collect(),
                universal: ["U1", "U2", "U3"].into_iter().map(record).collect(),
            }
        }
    }

    fn titles(records: &[StatisticRecord]) -> Vec<&str> {
        records.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_fixed_ordering_layout() {
        let fixture = Fixture::new();
        let domain: Vec<_> = fixture.domain.iter().collect();
        let other: Vec<_> = fixture.other.iter().collect();
        let parts = SelectionParts {
            goal_stat: Some(&fixture.goal),
            domain_stats: &domain,
            other_domain_stats: &other,
            universal: &fixture.universal,
        };

        let slate = FixedOrdering.arrange(parts, &mut rand::rng());
        assert_eq!(
            titles(&slate),
            vec!["Goal", "D1", "D2", "U1", "U2", "U3", "O1", "O2", "O3", "O4"]
        );
    }

    #[test]
    fn test_shuffled_ordering_keeps_goal_first_and_same_set() {
        let fixture = Fixture::new();
        let domain: Vec<_> = fixture.domain.iter().collect();
        let other: Vec<_> = fixture.other.iter().collect();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let parts = SelectionParts {
                goal_stat: Some(&fixture.goal),
                domain_stats: &domain,
                other_domain_stats: &other,
                universal: &fixture.universal,
            };
            let slate = ShuffledOrdering.arrange(parts, &mut rng);
            assert_eq!(slate.len(), MAX_SELECTION);
            assert_eq!(slate[0].title, "Goal");

            let mut rest: Vec<_> = titles(&slate[1..]);
            rest.sort();
            assert_eq!(
                rest,
                vec!["D1", "D2", "O1", "O2", "O3", "O4", "U1", "U2", "U3"]
            );
        }
    }

    #[test]
    fn test_shuffle_varies_order() {
        let fixture = Fixture::new();
        let domain: Vec<_> = fixture.domain.iter().collect();
        let other: Vec<_> = fixture.other.iter().collect();
        let mut rng = StdRng::seed_from_u64(42);

        let mut orders = std::collections::HashSet::new();
        for _ in 0..20 {
            let parts = SelectionParts {
                goal_stat: None,
                domain_stats: &domain,
                other_domain_stats: &other,
                universal: &fixture.universal,
            };
            let slate = ShuffledOrdering.arrange(parts, &mut rng);
            orders.insert(
                slate
                    .iter()
                    .map(|r| r.title.clone())
                    .collect::<Vec<_>>(),
            );
        }
        assert!(orders.len() > 1, "shuffled ordering should not be fixed");
    }

    #[test]
    fn test_duplicate_titles_removed() {
        let goal = record("Shared");
        let domain = vec![record("Shared"), record("D1")];
        let domain_refs: Vec<_> = domain.iter().collect();
        let other = vec![record("U1")];
        let other_refs: Vec<_> = other.iter().collect();
        let universal = vec![record("U1"), record("U2"), record("U3")];

        for policy in [
            Arc::new(ShuffledOrdering) as Arc<dyn OrderingPolicy>,
            Arc::new(FixedOrdering) as Arc<dyn OrderingPolicy>,
        ] {
            let parts = SelectionParts {
                goal_stat: Some(&goal),
                domain_stats: &domain_refs,
                other_domain_stats: &other_refs,
                universal: &universal,
            };
            let slate = policy.arrange(parts, &mut rand::rng());
            let mut slate_titles = titles(&slate);
            assert_eq!(slate_titles[0], "Shared");
            slate_titles.sort();
            assert_eq!(slate_titles, vec!["D1", "Shared", "U1", "U2", "U3"]);
        }
    }

    #[test]
    fn test_registry_resolves_defaults() {
        let registry = OrderingRegistry::new();
        assert_eq!(registry.list(), vec!["fixed", "shuffled"]);
        assert_eq!(registry.resolve("fixed").unwrap().name(), "fixed");

        let err = registry.resolve("alphabetical").unwrap_err();
        match err {
            CoreError::UnknownOrderingPolicy { available, .. } => {
                assert_eq!(available, vec!["fixed", "shuffled"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
