use crate::{DomainError, RateValue, Scheme};

/// Performs the full integration with aggregate coefficients.
///
/// # Algorithm
///
/// ```text
/// Δt_e = scheme.dt_eff(dt, beta)
/// Δφ   = (alpha - beta * phi) * Δt_e
/// ```
///
/// The increment is returned; adding it to `phi` is left to the caller.
///
/// # Errors
///
/// Returns a [`DomainError`] if the scheme cannot compute an effective time
/// step for `dt` and `beta`.
pub fn delta<S, T>(
    scheme: &S,
    phi: &T,
    dt: f64,
    alpha: &T,
    beta: f64,
) -> Result<T, DomainError>
where
    S: Scheme + ?Sized,
    T: RateValue,
{
    let dt_eff = scheme.dt_eff(dt, beta)?;
    Ok(stage_delta(phi, dt_eff, alpha, beta))
}

/// Performs one stage of a staged integration.
///
/// Returns `(alpha - beta * phi) * dt_eff`, where `dt_eff` must have been
/// computed once from the sum of the implicit coefficients of *all* stages in
/// the step. Prefer [`Staging`](crate::Staging), which enforces that order.
#[must_use]
pub fn stage_delta<T: RateValue>(phi: &T, dt_eff: f64, alpha: &T, beta: f64) -> T {
    (alpha.clone() - phi.clone() * beta) * dt_eff
}
