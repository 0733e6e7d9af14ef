//! Run-time selectable schemes for semi-implicit rate integration.
//!
//! Each scheme implements [`ratestep_core::Scheme`] and is selected by name
//! through a [`Registry`]:
//!
//! - [`Euler`] (`"Euler"`) — `Δt / (1 + B Δt)`
//! - [`Analytical`] (`"analytical"`) — `(1 - exp(-B Δt)) / B`
//! - [`Theta`] (`"theta"`) — `Δt / (1 + θ B Δt)`
//!
//! Schemes are usually chosen per transported variable from configuration,
//! see [`IntegrationSchemes`].
//!
//! # Example
//!
//! ```
//! use ratestep_core::{Contribution, Staging};
//! use ratestep_schemes::{IntegrationSchemes, Registry};
//!
//! let schemes = IntegrationSchemes::from_toml_str(r#"temperature = "Euler""#).unwrap();
//! let scheme = schemes.select(&Registry::with_builtin(), "temperature").unwrap();
//!
//! let contributions = [Contribution::new(2.0, 0.5), Contribution::new(0.0, 0.5)];
//! let staging = scheme.staging(&0.0, 1.0, &contributions).unwrap();
//!
//! assert_eq!(staging.dt_eff(), 0.5);
//! assert_eq!(staging.total(), 1.0);
//! ```

mod analytical;
mod config;
mod euler;
mod theta;

pub mod registry;

pub use analytical::Analytical;
pub use config::{ConfigError, IntegrationSchemes, Parameters, SchemeEntry, expect_keys, number};
pub use euler::Euler;
pub use registry::{Factory, Registry, RegistryError, SelectError};
pub use theta::{Theta, ThetaError};
