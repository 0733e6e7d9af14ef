use ratestep_core::{DomainError, Scheme, check_inputs};

use crate::config::{self, Parameters};
use crate::registry::SelectError;

/// Euler-implicit integration scheme.
///
/// The sink is evaluated at the end of the step:
///
/// ```text
/// φⁿ⁺¹ = φⁿ + (A - B φⁿ⁺¹) Δt   =>   Δt_e = Δt / (1 + B Δt)
/// ```
///
/// Unconditionally stable for `B >= 0`, first-order accurate.
///
/// # Domain
///
/// When `1 + B Δt` overflows the step is evaluated in its limit `1 / B`.
/// Fails with [`DomainError::Unrepresentable`] only if the quotient underflows
/// to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euler;

impl Euler {
    /// The name this scheme is selected by.
    pub const NAME: &'static str = "Euler";

    /// Builds the scheme from its configuration block, which takes no keys.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::InvalidConfig`] if `parameters` is not empty.
    pub fn from_parameters(parameters: &Parameters) -> Result<Self, SelectError> {
        config::expect_keys(parameters, Self::NAME, &[])?;
        Ok(Self)
    }
}

impl Scheme for Euler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn dt_eff(&self, dt: f64, beta: f64) -> Result<f64, DomainError> {
        check_inputs(dt, beta)?;
        weighted_dt_eff(dt, beta, 1.0)
    }

    fn clone_box(&self) -> Box<dyn Scheme> {
        Box::new(*self)
    }
}

/// Returns `dt / (1 + weight * beta * dt)` for already validated inputs.
///
/// If the denominator overflows, `1 / (weight * beta)` is returned instead,
/// capped at `dt`.
pub(crate) fn weighted_dt_eff(dt: f64, beta: f64, weight: f64) -> Result<f64, DomainError> {
    let denominator = 1.0 + weight * beta * dt;
    let dt_eff = if denominator.is_finite() {
        dt / denominator
    } else {
        (1.0 / (weight * beta)).min(dt)
    };

    if dt_eff > 0.0 {
        Ok(dt_eff)
    } else {
        Err(DomainError::Unrepresentable { dt, beta })
    }
}
