use thiserror::Error;

/// Errors raised when an effective time step cannot be computed.
///
/// This enum is marked `#[non_exhaustive]` so schemes may report additional
/// failure modes in future releases.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum DomainError {
    #[error("time step must be finite and positive, got {dt}")]
    TimeStep { dt: f64 },

    #[error("implicit coefficient must be finite and non-negative, got {beta}")]
    ImplicitCoefficient { beta: f64 },

    #[error("effective time step is not representable for dt = {dt}, beta = {beta}")]
    Unrepresentable { dt: f64, beta: f64 },
}
