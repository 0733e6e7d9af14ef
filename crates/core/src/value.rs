use std::ops::{Mul, Sub};

use num_traits::Zero;

/// A quantity that can be advanced by a semi-implicit rate update.
///
/// The update `(alpha - beta * phi) * dt_eff` needs subtraction, scaling by
/// an `f64`, and a zero for accumulating stage increments. Scalars like `f64`
/// and fixed-size vectors like `nalgebra::Vector3<f64>` satisfy this trait
/// automatically through the blanket implementation.
pub trait RateValue: Clone + Zero + Sub<Output = Self> + Mul<f64, Output = Self> {}

impl<T> RateValue for T where T: Clone + Zero + Sub<Output = T> + Mul<f64, Output = T> {}
