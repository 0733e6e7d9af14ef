use std::iter::Sum;

use crate::{DomainError, RateValue, Scheme, stage_delta};

/// The explicit and implicit coefficients of one physical process.
///
/// A rate equation whose coefficients are sums of contributions,
///
/// ```text
/// dφ/dt = (Σ alpha_i) - (Σ beta_i) φ
/// ```
///
/// can be integrated one contribution at a time with [`Staging`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution<T> {
    pub alpha: T,
    pub beta: f64,
}

impl<T> Contribution<T> {
    /// Creates a contribution from its explicit and implicit coefficients.
    pub fn new(alpha: T, beta: f64) -> Self {
        Self { alpha, beta }
    }
}

/// Sums contributions into the aggregate coefficients `(A, B)`.
impl<T: RateValue> Sum for Contribution<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(T::zero(), 0.0), |acc, c| {
            Self::new(acc.alpha + c.alpha, acc.beta + c.beta)
        })
    }
}

/// One time step of staged integration.
///
/// Construction sums the implicit coefficients of every contribution and
/// evaluates the scheme's effective time step exactly once. Each stage is
/// then integrated with that shared `Δt_e`, so the stage increments always
/// add up to the increment of the aggregate equation.
///
/// # Example
///
/// ```
/// use ratestep_core::{Contribution, DomainError, Scheme, Staging, check_inputs};
///
/// #[derive(Debug, Clone, Copy)]
/// struct Explicit;
///
/// impl Scheme for Explicit {
///     fn name(&self) -> &'static str {
///         "explicit"
///     }
///
///     fn dt_eff(&self, dt: f64, beta: f64) -> Result<f64, DomainError> {
///         check_inputs(dt, beta)?;
///         Ok(dt)
///     }
///
///     fn clone_box(&self) -> Box<dyn Scheme> {
///         Box::new(*self)
///     }
/// }
///
/// let contributions = [Contribution::new(2.0, 0.0), Contribution::new(1.0, 1.0)];
/// let staging = Staging::new(&Explicit, &1.0, 0.5, &contributions).unwrap();
///
/// assert_eq!(staging.stage(0), Some(1.0));
/// assert_eq!(staging.stage(1), Some(0.0));
/// assert_eq!(staging.total(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Staging<'a, T> {
    phi: &'a T,
    dt_eff: f64,
    beta: f64,
    contributions: &'a [Contribution<T>],
}

impl<'a, T: RateValue> Staging<'a, T> {
    /// Prepares a staged step for `phi` over `dt`.
    ///
    /// An empty `contributions` slice is valid and yields a zero increment.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the scheme cannot compute an effective time
    /// step for `dt` and the aggregate implicit coefficient.
    pub fn new<S: Scheme + ?Sized>(
        scheme: &S,
        phi: &'a T,
        dt: f64,
        contributions: &'a [Contribution<T>],
    ) -> Result<Self, DomainError> {
        let beta = contributions.iter().map(|c| c.beta).sum();
        let dt_eff = scheme.dt_eff(dt, beta)?;

        Ok(Self {
            phi,
            dt_eff,
            beta,
            contributions,
        })
    }

    /// Returns the effective time step shared by all stages.
    #[must_use]
    pub fn dt_eff(&self) -> f64 {
        self.dt_eff
    }

    /// Returns the aggregate implicit coefficient.
    #[must_use]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    /// Returns `true` if there are no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }

    /// Returns the increment due to the contribution at `index`.
    #[must_use]
    pub fn stage(&self, index: usize) -> Option<T> {
        self.contributions
            .get(index)
            .map(|c| stage_delta(self.phi, self.dt_eff, &c.alpha, c.beta))
    }

    /// Returns the increment of each stage, in contribution order.
    pub fn deltas(&self) -> impl Iterator<Item = T> + '_ {
        self.contributions
            .iter()
            .map(|c| stage_delta(self.phi, self.dt_eff, &c.alpha, c.beta))
    }

    /// Returns the sum of all stage increments.
    #[must_use]
    pub fn total(&self) -> T {
        self.deltas().fold(T::zero(), |acc, d| acc + d)
    }
}
