//! Waypoint Core - Research Statistics Catalogs and Selection
//!
//! This crate provides the per-country research statistics catalogs and
//! the selection engine that picks a prioritized, deduplicated slate of
//! statistics to motivate a user toward their chosen goal.

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod country;
pub mod error;
pub mod rotation;
pub mod selection;
pub mod stat;

pub use aggregate::{ResearchScope, ResearchSettings, StatsPool};
pub use catalog::{CatalogRegistry, CountryCatalog, GoalNormalizer, GoalRule, catalogs};
pub use config::WaypointConfig;
pub use country::CountryCode;
pub use error::{CoreError, Result};
pub use rotation::{RotationState, StatRotation};
pub use selection::{
    FixedOrdering, MAX_SELECTION, OrderingPolicy, OrderingRegistry, SelectionResult,
    ShuffledOrdering, StatsSelector, fallback_statistic,
};
pub use stat::{DetailRecord, NOT_SPECIFIED, StatisticRecord};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        CatalogRegistry, CoreError, CountryCatalog, CountryCode, DetailRecord, OrderingPolicy,
        OrderingRegistry, ResearchSettings, Result, SelectionResult, StatRotation,
        StatisticRecord, StatsPool, StatsSelector, WaypointConfig, catalogs,
    };
}
