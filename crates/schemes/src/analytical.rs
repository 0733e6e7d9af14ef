use ratestep_core::{DomainError, Scheme, check_inputs};

use crate::config::{self, Parameters};
use crate::registry::SelectError;

/// Analytical (exact) integration scheme.
///
/// Integrates the linear equation exactly over the step, treating `A` and `B`
/// as constant:
///
/// ```text
/// Δt_e = (1 - exp(-B Δt)) / B     for B > 0
/// Δt_e = Δt                       for B = 0
/// ```
///
/// The numerator is evaluated with `exp_m1`, so the result tends smoothly to
/// `Δt` as `B` tends to zero instead of losing precision to cancellation. For
/// large `B` the result tends to `1 / B`, which cannot overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Analytical;

impl Analytical {
    /// The name this scheme is selected by.
    pub const NAME: &'static str = "analytical";

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

impl Scheme for Analytical {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn dt_eff(&self, dt: f64, beta: f64) -> Result<f64, DomainError> {
        check_inputs(dt, beta)?;

        if beta == 0.0 {
            return Ok(dt);
        }

        // Rounding can push the quotient a hair above dt when B Δt is tiny.
        let dt_eff = (-(-beta * dt).exp_m1() / beta).min(dt);

        if dt_eff > 0.0 {
            Ok(dt_eff)
        } else {
            Err(DomainError::Unrepresentable { dt, beta })
        }
    }

    fn clone_box(&self) -> Box<dyn Scheme> {
        Box::new(*self)
    }
}
