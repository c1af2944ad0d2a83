//! Supported countries and regions
//!
//! Country codes arrive from persisted settings as loose strings. [`CountryCode::resolve`]
//! routes anything unrecognized to [`CountryCode::Other`]; the strict [`FromStr`]
//! impl is for validating user-authored configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountryCode {
    Australia,
    Uk,
    Usa,
    Canada,
    India,
    Ireland,
    Malaysia,
    NewZealand,
    Nigeria,
    Philippines,
    Singapore,
    SouthAfrica,
    Other,
}

impl CountryCode {
    pub const ALL: [CountryCode; 13] = [
        CountryCode::Australia,
        CountryCode::Uk,
        CountryCode::Usa,
        CountryCode::Canada,
        CountryCode::India,
        CountryCode::Ireland,
        CountryCode::Malaysia,
        CountryCode::NewZealand,
        CountryCode::Nigeria,
        CountryCode::Philippines,
        CountryCode::Singapore,
        CountryCode::SouthAfrica,
        CountryCode::Other,
    ];

    /// Canonical lowercase code, matching the settings blob and asset file names
    pub fn as_str(&self) -> &'static str {
        match self {
            CountryCode::Australia => "australia",
            CountryCode::Uk => "uk",
            CountryCode::Usa => "usa",
            CountryCode::Canada => "canada",
            CountryCode::India => "india",
            CountryCode::Ireland => "ireland",
            CountryCode::Malaysia => "malaysia",
            CountryCode::NewZealand => "newzealand",
            CountryCode::Nigeria => "nigeria",
            CountryCode::Philippines => "philippines",
            CountryCode::Singapore => "singapore",
            CountryCode::SouthAfrica => "southafrica",
            CountryCode::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CountryCode::Australia => "Australia",
            CountryCode::Uk => "United Kingdom",
            CountryCode::Usa => "United States",
            CountryCode::Canada => "Canada",
            CountryCode::India => "India",
            CountryCode::Ireland => "Ireland",
            CountryCode::Malaysia => "Malaysia",
            CountryCode::NewZealand => "New Zealand",
            CountryCode::Nigeria => "Nigeria",
            CountryCode::Philippines => "Philippines",
            CountryCode::Singapore => "Singapore",
            CountryCode::SouthAfrica => "South Africa",
            CountryCode::Other => "Other",
        }
    }

    /// Look up a code or alias, case-insensitively
    pub fn lookup(code: &str) -> Option<CountryCode> {
        let normalized = code.trim().to_lowercase();
        let country = match normalized.as_str() {
            "australia" | "au" => CountryCode::Australia,
            "uk" | "gb" | "united kingdom" | "unitedkingdom" => CountryCode::Uk,
            "usa" | "us" | "united states" | "unitedstates" => CountryCode::Usa,
            "canada" | "ca" => CountryCode::Canada,
            "india" | "in" => CountryCode::India,
            "ireland" | "ie" => CountryCode::Ireland,
            "malaysia" | "my" => CountryCode::Malaysia,
            "newzealand" | "new zealand" | "nz" => CountryCode::NewZealand,
            "nigeria" | "ng" => CountryCode::Nigeria,
            "philippines" | "ph" => CountryCode::Philippines,
            "singapore" | "sg" => CountryCode::Singapore,
            "southafrica" | "south africa" | "za" => CountryCode::SouthAfrica,
            "other" => CountryCode::Other,
            _ => return None,
        };
        Some(country)
    }

    /// Resolve a code, routing anything unrecognized to the fallback catalog
    pub fn resolve(code: &str) -> CountryCode {
        Self::lookup(code).unwrap_or_else(|| {
            tracing::debug!("Unrecognized country code '{}', using fallback catalog", code);
            CountryCode::Other
        })
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CountryCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| {
            CoreError::unknown_country(
                s,
                CountryCode::ALL
                    .iter()
                    .map(|c| c.as_str().to_string())
                    .collect(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve() {
        assert_eq!(CountryCode::resolve("NZ"), CountryCode::NewZealand);
        assert_eq!(CountryCode::resolve(" South Africa "), CountryCode::SouthAfrica);
        assert_eq!(CountryCode::resolve("gb"), CountryCode::Uk);
    }

    #[test]
    fn test_unknown_routes_to_other() {
        assert_eq!(CountryCode::resolve("atlantis"), CountryCode::Other);
        assert_eq!(CountryCode::resolve(""), CountryCode::Other);
    }

    #[test]
    fn test_strict_parse_rejects_unknown() {
        assert!("atlantis".parse::<CountryCode>().is_err());
        assert_eq!("usa".parse::<CountryCode>().unwrap(), CountryCode::Usa);
    }

    #[test]
    fn test_canonical_codes_round_trip() {
        for country in CountryCode::ALL {
            assert_eq!(CountryCode::lookup(country.as_str()), Some(country));
        }
    }
}
