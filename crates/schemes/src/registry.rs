//! Run-time selection of integration schemes by name.
//!
//! A [`Registry`] maps scheme names to factories. Each factory receives the
//! scheme's configuration block and returns a fresh boxed [`Scheme`].
//!
//! The process-wide table returned by [`global`] is populated exactly once,
//! on first use, with the built-in schemes:
//!
//! - `"Euler"` — [`Euler`]
//! - `"analytical"` — [`Analytical`]
//! - `"theta"` — [`Theta`] (requires a `theta` key)
//!
//! Applications that provide their own schemes build a registry up front and
//! hand it to [`install`] before anything calls [`global`]. Once populated,
//! the table is read-only, so lookups need no synchronization.
//!
//! # Example
//!
//! ```
//! use ratestep_core::Scheme;
//! use ratestep_schemes::{Parameters, registry};
//!
//! let scheme = registry::select("Euler", &Parameters::new()).unwrap();
//! assert_eq!(scheme.dt_eff(1.0, 1.0).unwrap(), 0.5);
//! ```

mod error;

use std::{
    collections::{BTreeMap, btree_map::Entry},
    fmt,
    sync::OnceLock,
};

use log::{debug, info};
use ratestep_core::Scheme;

use crate::{Analytical, Euler, Parameters, Theta};

pub use error::{RegistryError, SelectError};

/// Constructs a scheme from its configuration block.
pub type Factory = fn(&Parameters) -> Result<Box<dyn Scheme>, SelectError>;

/// A catalog of scheme factories keyed by name.
#[derive(Clone, Default)]
pub struct Registry {
    factories: BTreeMap<&'static str, Factory>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in schemes.
    #[must_use]
    pub fn with_builtin() -> Self {
        let builtin: [(&'static str, Factory); 3] = [
            (Euler::NAME, euler),
            (Analytical::NAME, analytical),
            (Theta::NAME, theta),
        ];

        Self {
            factories: builtin.into_iter().collect(),
        }
    }

    /// Registers `factory` under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is empty or already registered. The registry
    /// is left unchanged on error.
    pub fn register(&mut self, name: &'static str, factory: Factory) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }

        match self.factories.entry(name) {
            Entry::Occupied(_) => Err(RegistryError::Duplicate { name }),
            Entry::Vacant(entry) => {
                entry.insert(factory);
                debug!("registered integration scheme `{name}`");
                Ok(())
            }
        }
    }

    /// Constructs a new instance of the scheme registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::UnknownScheme`] if `name` is not registered, or
    /// the factory's error if `parameters` are invalid for the scheme.
    pub fn select(
        &self,
        name: &str,
        parameters: &Parameters,
    ) -> Result<Box<dyn Scheme>, SelectError> {
        let Some(factory) = self.factories.get(name) else {
            return Err(SelectError::UnknownScheme {
                name: name.to_owned(),
                available: self.names().collect(),
            });
        };

        let scheme = factory(parameters)?;
        debug!("selected integration scheme `{}`", scheme.name());
        Ok(scheme)
    }

    /// Returns `true` if a scheme is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    /// Returns the number of registered schemes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` if no schemes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("schemes", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

fn euler(parameters: &Parameters) -> Result<Box<dyn Scheme>, SelectError> {
    Ok(Box::new(Euler::from_parameters(parameters)?))
}

fn analytical(parameters: &Parameters) -> Result<Box<dyn Scheme>, SelectError> {
    Ok(Box::new(Analytical::from_parameters(parameters)?))
}

fn theta(parameters: &Parameters) -> Result<Box<dyn Scheme>, SelectError> {
    Ok(Box::new(Theta::from_parameters(parameters)?))
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Returns the process-wide registry.
///
/// The first call populates it with the built-in schemes unless [`install`]
/// already supplied a table.
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(|| {
        let registry = Registry::with_builtin();
        info!(
            "initialized integration scheme registry with {} schemes",
            registry.len()
        );
        registry
    })
}

/// Installs `registry` as the process-wide table.
///
/// # Errors
///
/// Returns `registry` back if the process-wide table is already populated.
pub fn install(registry: Registry) -> Result<(), Registry> {
    GLOBAL.set(registry)?;
    info!("installed custom integration scheme registry");
    Ok(())
}

/// Selects a scheme from the process-wide registry.
///
/// # Errors
///
/// See [`Registry::select`].
pub fn select(name: &str, parameters: &Parameters) -> Result<Box<dyn Scheme>, SelectError> {
    global().select(name, parameters)
}
