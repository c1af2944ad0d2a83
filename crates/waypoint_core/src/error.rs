use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CoreError {
    #[error("Catalog asset could not be parsed")]
    #[diagnostic(
        code(waypoint_core::catalog_parse_failed),
        help("The embedded asset '{asset}' is not valid catalog JSON")
    )]
    CatalogParseFailed {
        asset: String,
        #[source]
        cause: serde_json::Error,
    },

    #[error("Catalog asset failed validation")]
    #[diagnostic(
        code(waypoint_core::catalog_invalid),
        help("Fix the entry in '{asset}': {reason}")
    )]
    CatalogInvalid { asset: String, reason: String },

    #[error("Unknown ordering policy")]
    #[diagnostic(
        code(waypoint_core::unknown_ordering_policy),
        help("Available policies: {}", available.join(", "))
    )]
    UnknownOrderingPolicy {
        name: String,
        available: Vec<String>,
        #[source_code]
        src: String,
        #[label("unknown policy")]
        span: (usize, usize),
    },

    #[error("Unknown country code")]
    #[diagnostic(
        code(waypoint_core::unknown_country),
        help("Supported countries: {}", supported.join(", "))
    )]
    UnknownCountry {
        code: String,
        supported: Vec<String>,
        #[source_code]
        src: String,
        #[label("unknown country")]
        span: (usize, usize),
    },

    #[error("Configuration error in {config_path}")]
    #[diagnostic(
        code(waypoint_core::configuration_error),
        help("Field '{field}' should be {expected}")
    )]
    ConfigurationError {
        config_path: String,
        field: String,
        expected: String,
        #[source]
        cause: ConfigError,
    },
}

/// Underlying cause of a configuration or settings failure
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(String),

    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

// Helper functions for creating common errors with context
impl CoreError {
    pub fn unknown_ordering_policy(name: impl Into<String>, available: Vec<String>) -> Self {
        let name = name.into();
        Self::UnknownOrderingPolicy {
            src: format!("ordering: {}", name),
            span: (10, 10 + name.len()),
            name,
            available,
        }
    }

    pub fn unknown_country(code: impl Into<String>, supported: Vec<String>) -> Self {
        let code = code.into();
        Self::UnknownCountry {
            src: format!("country: {}", code),
            span: (9, 9 + code.len()),
            code,
            supported,
        }
    }

    pub fn catalog_invalid(asset: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CatalogInvalid {
            asset: asset.into(),
            reason: reason.into(),
        }
    }
}
