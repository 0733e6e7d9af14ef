//! Core traits and types for semi-implicit rate integration.
//!
//! This crate advances quantities governed by the rate equation
//!
//! ```text
//! dφ/dt = A - B φ
//! ```
//!
//! where `A` is an explicit source and `B` is an implicit sink coefficient.
//! Every scheme reduces to the same closed-form update
//!
//! ```text
//! Δφ = (A - B φⁿ) Δt_e
//! ```
//!
//! and differs only in how it maps the real time step and `B` to the
//! effective time step `Δt_e`.
//!
//! - [`Scheme`] — a strategy that computes the effective time step
//! - [`RateValue`] — the numeric algebra a transported quantity must support
//! - [`delta`] — the full update from aggregate coefficients
//! - [`stage_delta`] — the update for one contribution given a shared `Δt_e`
//! - [`Staging`], [`Contribution`] — staged integration over several
//!   contributions that share one effective time step

mod error;
mod integrate;
mod scheme;
mod staging;
mod value;

pub use error::DomainError;
pub use integrate::{delta, stage_delta};
pub use scheme::{Scheme, check_inputs};
pub use staging::{Contribution, Staging};
pub use value::RateValue;
