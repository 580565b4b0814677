use approx::{abs_diff_eq, relative_eq};

/// Floating point modulo in the range of [0, divisor) for positive divisors.
///
/// Negative values wrap around from the top, unlike the `%` operator.
pub fn modulo(value: f64, divisor: f64) -> f64 {
    let remainder = value.rem_euclid(divisor);
    // rem_euclid rounds tiny negative values up to the divisor itself
    if remainder >= divisor {
        0.0
    } else {
        remainder
    }
}

/// Clamp the value to [min, max].
///
/// Unlike `f64::clamp` this never panics. If the bounds are inverted, `min` wins.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Compare two values relative to their magnitude.
///
/// Values close to zero fall back to an absolute comparison with the same tolerance.
pub fn equals_relative(lhs: f64, rhs: f64, tolerance: f64) -> bool {
    relative_eq!(lhs, rhs, epsilon = tolerance, max_relative = tolerance)
}

/// Compare two values with an absolute tolerance.
pub fn equals_absolute(lhs: f64, rhs: f64, tolerance: f64) -> bool {
    abs_diff_eq!(lhs, rhs, epsilon = tolerance)
}

pub fn max3(a: f64, b: f64, c: f64) -> f64 {
    a.max(b.max(c))
}

pub fn min3(a: f64, b: f64, c: f64) -> f64 {
    a.min(b.min(c))
}

/// Linear interpolation between `x0` and `x1`.
pub fn interpolate(alpha: f64, x0: f64, x1: f64) -> f64 {
    x0 + (x1 - x0) * alpha
}

pub fn square(x: f64) -> f64 {
    x * x
}
