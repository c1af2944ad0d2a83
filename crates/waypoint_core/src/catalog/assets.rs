//! Catalog data compiled into the binary

use crate::CountryCode;

pub(crate) const UNIVERSAL: &str = include_str!("../../data/universal.json");
pub(crate) const GENERAL: &str = include_str!("../../data/general.json");

/// Raw JSON for a country catalog
pub(crate) fn country_asset(country: CountryCode) -> &'static str {
    match country {
        CountryCode::Australia => include_str!("../../data/australia.json"),
        CountryCode::Uk => include_str!("../../data/uk.json"),
        CountryCode::Usa => include_str!("../../data/usa.json"),
        CountryCode::Canada => include_str!("../../data/canada.json"),
        CountryCode::India => include_str!("../../data/india.json"),
        CountryCode::Ireland => include_str!("../../data/ireland.json"),
        CountryCode::Malaysia => include_str!("../../data/malaysia.json"),
        CountryCode::NewZealand => include_str!("../../data/newzealand.json"),
        CountryCode::Nigeria => include_str!("../../data/nigeria.json"),
        CountryCode::Philippines => include_str!("../../data/philippines.json"),
        CountryCode::Singapore => include_str!("../../data/singapore.json"),
        CountryCode::SouthAfrica => include_str!("../../data/southafrica.json"),
        CountryCode::Other => include_str!("../../data/other.json"),
    }
}
