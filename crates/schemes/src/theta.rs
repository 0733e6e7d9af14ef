use ratestep_core::{DomainError, Scheme, check_inputs};
use thiserror::Error;

use crate::config::{self, Parameters};
use crate::euler::weighted_dt_eff;
use crate::registry::SelectError;

/// Theta-weighted integration scheme.
///
/// Blends the old and new values of `φ` in the sink term:
///
/// ```text
/// φⁿ⁺¹ = φⁿ + (A - B (θ φⁿ⁺¹ + (1 - θ) φⁿ)) Δt   =>   Δt_e = Δt / (1 + θ B Δt)
/// ```
///
/// `θ = 1` reproduces [`Euler`](crate::Euler), `θ = 1/2` is Crank–Nicolson,
/// and `θ = 0` is the explicit limit `Δt_e = Δt`.
///
/// Selected as `"theta"` with a required `theta` key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theta {
    theta: f64,
}

/// Errors that can occur when constructing a [`Theta`] scheme.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ThetaError {
    #[error("theta must be finite and within [0, 1], got {0}")]
    OutOfRange(f64),
}

impl Theta {
    /// The name this scheme is selected by.
    pub const NAME: &'static str = "theta";

    /// Creates a scheme with implicitness `theta`.
    ///
    /// # Errors
    ///
    /// Returns an error if `theta` is non-finite or outside `[0, 1]`.
    pub fn new(theta: f64) -> Result<Self, ThetaError> {
        if !theta.is_finite() || !(0.0..=1.0).contains(&theta) {
            return Err(ThetaError::OutOfRange(theta));
        }
        Ok(Self { theta })
    }

    /// Creates the Crank–Nicolson scheme, `θ = 1/2`.
    #[must_use]
    pub fn crank_nicolson() -> Self {
        Self { theta: 0.5 }
    }

    /// Builds the scheme from its configuration block.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::InvalidConfig`] if `theta` is missing, is not a
    /// number, or is out of range, or if any other key is present.
    pub fn from_parameters(parameters: &Parameters) -> Result<Self, SelectError> {
        config::expect_keys(parameters, Self::NAME, &["theta"])?;
        let theta = config::number(parameters, Self::NAME, "theta")?;
        Self::new(theta).map_err(|err| SelectError::InvalidConfig {
            scheme: Self::NAME,
            reason: err.to_string(),
        })
    }

    /// Returns the implicitness weight.
    #[must_use]
    pub fn theta(&self) -> f64 {
        self.theta
    }
}

impl Scheme for Theta {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn dt_eff(&self, dt: f64, beta: f64) -> Result<f64, DomainError> {
        check_inputs(dt, beta)?;
        weighted_dt_eff(dt, beta, self.theta)
    }

    fn clone_box(&self) -> Box<dyn Scheme> {
        Box::new(*self)
    }
}
