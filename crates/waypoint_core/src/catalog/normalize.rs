//! Goal-name normalization rule tables
//!
//! Some catalogs key goals by short canonical names while the onboarding flow
//! passes free-form labels. A [`GoalNormalizer`] maps a label to a canonical key
//! by testing ordered substring rules; the first matching rule wins.

use crate::CountryCode;

/// Maps any goal label containing one of `needles` to `canonical`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalRule {
    /// Lowercase substrings, any of which triggers the rule
    pub needles: &'static [&'static str],
    pub canonical: &'static str,
}

impl GoalRule {
    pub const fn new(needles: &'static [&'static str], canonical: &'static str) -> Self {
        Self { needles, canonical }
    }

    fn matches(&self, lowered_goal: &str) -> bool {
        self.needles.iter().any(|needle| lowered_goal.contains(needle))
    }
}

/// Ordered rule table for one catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalNormalizer {
    rules: &'static [GoalRule],
}

impl GoalNormalizer {
    pub const fn new(rules: &'static [GoalRule]) -> Self {
        Self { rules }
    }

    /// Normalizer that never rewrites a goal name
    pub const fn identity() -> Self {
        Self { rules: &[] }
    }

    /// Rules registered for a country
    pub fn for_country(country: CountryCode) -> Self {
        match country {
            CountryCode::NewZealand => Self::new(NEW_ZEALAND_RULES),
            CountryCode::Singapore => Self::new(SINGAPORE_RULES),
            _ => Self::identity(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &'static [GoalRule] {
        self.rules
    }

    /// Canonical key for `goal`, or `goal` unchanged when no rule applies
    pub fn normalize<'a>(&self, goal: &'a str) -> &'a str {
        if self.rules.is_empty() {
            return goal;
        }

        let lowered = goal.to_lowercase();
        match self.rules.iter().find(|rule| rule.matches(&lowered)) {
            Some(rule) => {
                tracing::debug!("Normalized goal '{}' to '{}'", goal, rule.canonical);
                rule.canonical
            }
            None => goal,
        }
    }
}

// Evaluated top to bottom. "first home" must precede the KiwiSaver rule since
// first-home labels often mention KiwiSaver withdrawals. Rules keyed on a
// single common word sit below the narrower ones.
const NEW_ZEALAND_RULES: &[GoalRule] = &[
    GoalRule::new(&["emergency", "rainy day"], "Build Emergency Fund (NZ$25-40K)"),
    GoalRule::new(
        &["first home", "house deposit", "buy a home", "buy a house"],
        "Buy First Home",
    ),
    GoalRule::new(&["kiwisaver", "retirement"], "Boost KiwiSaver Balance"),
    GoalRule::new(&["waste", "recycl", "compost"], "Reduce Household Waste"),
    GoalRule::new(&["te reo", "māori", "maori"], "Learn Te Reo Māori"),
    GoalRule::new(&["volunteer"], "Volunteer Regularly"),
    GoalRule::new(&["tech", "coding", "software", "developer"], "Switch to Tech Career"),
    GoalRule::new(
        &["lead a team", "team lead", "leadership", "manage a team", "manager", "promotion"],
        "Lead a Team",
    ),
    GoalRule::new(&["marathon", "running", "run a half", "go for a run"], "Run a Half Marathon"),
    GoalRule::new(&["sleep"], "Improve Sleep Quality"),
    GoalRule::new(&["friend", "lonely", "social"], "Make New Friends"),
    GoalRule::new(&["outdoor", "tramp", "hike", "nature"], "Spend More Time Outdoors"),
];

const SINGAPORE_RULES: &[GoalRule] = &[
    GoalRule::new(&["emergency", "rainy day"], "Build Emergency Fund (S$20K)"),
    GoalRule::new(&["waste", "recycl"], "Reduce Household Waste"),
    GoalRule::new(
        &["hdb", "bto flat", "buy a flat", "buy a home", "buy a house", "first home"],
        "Buy HDB Flat",
    ),
    GoalRule::new(&["cpf", "retirement"], "Grow CPF Savings"),
    GoalRule::new(
        &["skillsfuture", "upskill", "course", "certification"],
        "Upskill with SkillsFuture",
    ),
    GoalRule::new(&["volunteer"], "Volunteer Regularly"),
    GoalRule::new(&["tech", "coding", "software", "developer"], "Switch to Tech Career"),
    GoalRule::new(&["steps", "walk"], "Walk 10,000 Steps Daily"),
    GoalRule::new(&["family", "parent", "children"], "Strengthen Family Bonds"),
    GoalRule::new(&["language", "mandarin", "malay", "tamil"], "Learn a New Language"),
    GoalRule::new(&["outdoor", "park", "cycling", "nature"], "Spend More Time Outdoors"),
];
