use std::fmt::Debug;

use crate::{Contribution, DomainError, RateValue, Staging, integrate};

/// A strategy for integrating `dφ/dt = A - B φ` over one time step.
///
/// A scheme only decides the effective time step `Δt_e = f(Δt, B)`; the
/// update itself is shared by all schemes (see [`delta`](crate::delta)).
///
/// Schemes carry no per-step state, so one instance may be shared by any
/// number of transported quantities and threads.
///
/// Every implementation must satisfy, for finite `dt > 0` and `beta >= 0`:
///
/// - `dt_eff(dt, 0.0) == dt`
/// - `dt_eff` is non-increasing in `beta`
/// - `0 < dt_eff(dt, beta) <= dt`
pub trait Scheme: Debug + Send + Sync {
    /// Returns the name this scheme is selected by.
    fn name(&self) -> &'static str;

    /// Returns the effective time step for step size `dt` and aggregate
    /// implicit coefficient `beta`.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if `dt` or `beta` is out of range, or if the
    /// result cannot be represented for these inputs.
    fn dt_eff(&self, dt: f64, beta: f64) -> Result<f64, DomainError>;

    /// Returns a boxed copy of this scheme.
    fn clone_box(&self) -> Box<dyn Scheme>;
}

impl Clone for Box<dyn Scheme> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl<'s> dyn Scheme + 's {
    /// Performs the full integration with aggregate coefficients.
    ///
    /// See [`delta`](crate::delta).
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the effective time step cannot be computed.
    pub fn delta<T: RateValue>(
        &self,
        phi: &T,
        dt: f64,
        alpha: &T,
        beta: f64,
    ) -> Result<T, DomainError> {
        integrate::delta(self, phi, dt, alpha, beta)
    }

    /// Starts a staged integration over `contributions`.
    ///
    /// See [`Staging::new`].
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the effective time step cannot be computed.
    pub fn staging<'a, T: RateValue>(
        &self,
        phi: &'a T,
        dt: f64,
        contributions: &'a [Contribution<T>],
    ) -> Result<Staging<'a, T>, DomainError> {
        Staging::new(self, phi, dt, contributions)
    }
}

/// Checks that `dt` is finite and positive and `beta` is finite and
/// non-negative.
///
/// # Errors
///
/// Returns [`DomainError::TimeStep`] or [`DomainError::ImplicitCoefficient`]
/// for the first argument that is out of range.
pub fn check_inputs(dt: f64, beta: f64) -> Result<(), DomainError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(DomainError::TimeStep { dt });
    }
    if !beta.is_finite() || beta < 0.0 {
        return Err(DomainError::ImplicitCoefficient { beta });
    }
    Ok(())
}
