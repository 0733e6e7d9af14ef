//! Configuration of integration schemes per transported variable.
//!
//! Each transported variable names its scheme either directly or as a table
//! carrying scheme-specific parameters:
//!
//! ```toml
//! temperature = "analytical"
//! velocity = "Euler"
//! mass = { scheme = "theta", theta = 0.5 }
//! ```

use std::collections::BTreeMap;

use log::info;
use ratestep_core::Scheme;
use serde::Deserialize;
use thiserror::Error;

use crate::registry::{Registry, SelectError};

/// Scheme-specific configuration keys.
pub type Parameters = toml::Table;

/// Errors that can occur when reading scheme configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse integration schemes")]
    Parse(#[from] toml::de::Error),
}

/// The scheme configured for one transported variable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemeEntry {
    /// A parameter-free scheme given by name.
    Name(String),

    /// A scheme name with its parameters.
    Detailed {
        scheme: String,
        #[serde(flatten)]
        parameters: Parameters,
    },
}

impl SchemeEntry {
    /// Returns the configured scheme name.
    #[must_use]
    pub fn scheme(&self) -> &str {
        match self {
            Self::Name(name) | Self::Detailed { scheme: name, .. } => name,
        }
    }

    /// Constructs the configured scheme from `registry`.
    ///
    /// # Errors
    ///
    /// See [`Registry::select`].
    pub fn select(&self, registry: &Registry) -> Result<Box<dyn Scheme>, SelectError> {
        match self {
            Self::Name(name) => registry.select(name, &Parameters::new()),
            Self::Detailed { scheme, parameters } => registry.select(scheme, parameters),
        }
    }
}

/// Integration schemes keyed by transported variable name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct IntegrationSchemes {
    entries: BTreeMap<String, SchemeEntry>,
}

impl IntegrationSchemes {
    /// Parses a TOML table of variable names to scheme entries.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` is not valid TOML or an entry is malformed.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Sets the scheme for `phi`, returning the previous entry if any.
    pub fn insert(&mut self, phi: impl Into<String>, entry: SchemeEntry) -> Option<SchemeEntry> {
        self.entries.insert(phi.into(), entry)
    }

    /// Returns the entry configured for `phi`.
    #[must_use]
    pub fn entry(&self, phi: &str) -> Option<&SchemeEntry> {
        self.entries.get(phi)
    }

    /// Returns the configured variable names in sorted order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Constructs the scheme configured for `phi`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::MissingEntry`] if `phi` has no entry, otherwise
    /// any error from [`Registry::select`].
    pub fn select(&self, registry: &Registry, phi: &str) -> Result<Box<dyn Scheme>, SelectError> {
        let entry = self.entry(phi).ok_or_else(|| SelectError::MissingEntry {
            phi: phi.to_owned(),
        })?;

        let scheme = entry.select(registry)?;
        info!("integrating `{phi}` with the `{}` scheme", scheme.name());
        Ok(scheme)
    }

    /// Constructs the scheme for every configured variable.
    ///
    /// Fails on the first invalid entry, so a bad configuration is reported
    /// before any integration starts.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`Registry::select`].
    pub fn select_all(
        &self,
        registry: &Registry,
    ) -> Result<BTreeMap<String, Box<dyn Scheme>>, SelectError> {
        self.variables()
            .map(|phi| {
                self.select(registry, phi)
                    .map(|scheme| (phi.to_owned(), scheme))
            })
            .collect()
    }
}

/// Reads a required numeric key for `scheme`.
///
/// Integers are accepted and converted.
///
/// # Errors
///
/// Returns [`SelectError::InvalidConfig`] if `key` is missing or not a number.
#[allow(clippy::cast_precision_loss)]
pub fn number(
    parameters: &Parameters,
    scheme: &'static str,
    key: &str,
) -> Result<f64, SelectError> {
    match parameters.get(key) {
        Some(toml::Value::Float(value)) => Ok(*value),
        Some(toml::Value::Integer(value)) => Ok(*value as f64),
        Some(other) => Err(SelectError::InvalidConfig {
            scheme,
            reason: format!("key `{key}` must be a number, got {}", other.type_str()),
        }),
        None => Err(SelectError::InvalidConfig {
            scheme,
            reason: format!("missing required key `{key}`"),
        }),
    }
}

/// Checks that `parameters` holds no keys other than `allowed`.
///
/// # Errors
///
/// Returns [`SelectError::InvalidConfig`] naming the first unrecognized key.
pub fn expect_keys(
    parameters: &Parameters,
    scheme: &'static str,
    allowed: &[&str],
) -> Result<(), SelectError> {
    match parameters.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(SelectError::InvalidConfig {
            scheme,
            reason: format!("unrecognized key `{key}`"),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const SCHEMES: &str = r#"
        temperature = "analytical"
        velocity = "Euler"
        mass = { scheme = "theta", theta = 0.5 }
    "#;

    #[test]
    fn parses_names_and_tables() {
        let schemes = IntegrationSchemes::from_toml_str(SCHEMES).unwrap();

        let variables: Vec<_> = schemes.variables().collect();
        assert_eq!(variables, vec!["mass", "temperature", "velocity"]);

        assert_eq!(
            schemes.entry("velocity"),
            Some(&SchemeEntry::Name("Euler".into()))
        );

        let mass = schemes.entry("mass").unwrap();
        assert_eq!(mass.scheme(), "theta");
        assert!(matches!(
            mass,
            SchemeEntry::Detailed { parameters, .. } if parameters.contains_key("theta")
        ));
    }

    #[test]
    fn selects_per_variable() {
        let schemes = IntegrationSchemes::from_toml_str(SCHEMES).unwrap();
        let registry = Registry::with_builtin();

        let temperature = schemes.select(&registry, "temperature").unwrap();
        let mass = schemes.select(&registry, "mass").unwrap();

        assert_eq!(temperature.name(), "analytical");
        assert_eq!(mass.name(), "theta");
        // 1 / (1 + 0.5 * 2 * 1)
        assert_relative_eq!(mass.dt_eff(1.0, 2.0).unwrap(), 0.5);
    }

    #[test]
    fn missing_variable_is_an_error() {
        let schemes = IntegrationSchemes::from_toml_str(SCHEMES).unwrap();
        let registry = Registry::with_builtin();

        let err = schemes.select(&registry, "pressure").unwrap_err();

        assert_eq!(
            err,
            SelectError::MissingEntry {
                phi: "pressure".into()
            }
        );
    }

    #[test]
    fn select_all_reports_first_bad_entry() {
        let schemes = IntegrationSchemes::from_toml_str(
            r#"
            a = "Euler"
            b = { scheme = "theta" }
            "#,
        )
        .unwrap();

        let err = schemes
            .select_all(&Registry::with_builtin())
            .unwrap_err();

        assert!(matches!(err, SelectError::InvalidConfig { scheme: "theta", .. }));
    }

    #[test]
    fn select_all_builds_every_scheme() {
        let schemes = IntegrationSchemes::from_toml_str(SCHEMES).unwrap();

        let selected = schemes.select_all(&Registry::with_builtin()).unwrap();

        assert_eq!(selected.len(), 3);
        assert_eq!(selected["velocity"].name(), "Euler");
    }

    #[test]
    fn unknown_scheme_in_config() {
        let schemes = IntegrationSchemes::from_toml_str(r#"phi = "RungeKutta""#).unwrap();

        let err = schemes
            .select(&Registry::with_builtin(), "phi")
            .unwrap_err();

        assert!(matches!(err, SelectError::UnknownScheme { name, .. } if name == "RungeKutta"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = IntegrationSchemes::from_toml_str("phi = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn insert_overrides_entry() {
        let mut schemes = IntegrationSchemes::default();

        assert!(schemes.insert("phi", SchemeEntry::Name("Euler".into())).is_none());
        let previous = schemes.insert("phi", SchemeEntry::Name("analytical".into()));

        assert_eq!(previous, Some(SchemeEntry::Name("Euler".into())));
        assert_eq!(schemes.entry("phi").map(SchemeEntry::scheme), Some("analytical"));
    }

    #[test]
    fn number_accepts_integers() {
        let parameters: Parameters = toml::from_str("weight = 2").unwrap();
        assert_eq!(number(&parameters, "test", "weight"), Ok(2.0));
    }

    #[test]
    fn number_rejects_other_types() {
        let parameters: Parameters = toml::from_str("weight = true").unwrap();

        let err = number(&parameters, "test", "weight").unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid configuration for scheme `test`: key `weight` must be a number, got boolean"
        );
    }

    #[test]
    fn expect_keys_rejects_unrecognized() {
        let parameters: Parameters = toml::from_str("theta = 0.5\nomega = 1.0").unwrap();

        assert!(expect_keys(&parameters, "test", &["theta", "omega"]).is_ok());
        let err = expect_keys(&parameters, "test", &["theta"]).unwrap_err();
        assert!(err.to_string().ends_with("unrecognized key `omega`"));
    }
}
