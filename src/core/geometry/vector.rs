/// Representation of a 3D vector.
///
/// This is the `f64` vector of the glam crate.
pub type Vector3 = glam::DVec3;

/// Steering helpers on top of [`Vector3`].
pub trait VectorExt: Sized {
    /// Get the unit vector in the same direction.
    ///
    /// The zero vector stays the zero vector.
    fn normalized(self) -> Self;

    /// Calculate the component parallel to the unit basis vector.
    fn parallel_component(self, unit_basis: Self) -> Self;

    /// Calculate the component perpendicular to the unit basis vector.
    fn perpendicular_component(self, unit_basis: Self) -> Self;

    /// Shorten the vector to `max_length` if it is longer.
    fn truncate_length(self, max_length: f64) -> Self;

    /// Project the vector onto the horizontal (XZ) plane.
    fn set_y_to_zero(self) -> Self;

    /// Rotate the vector about the vertical (Y) axis by the angle in radians.
    fn rotate_about_global_y(self, angle: f64) -> Self;

    /// Linear interpolation towards `other`; `alpha == 0` gives `self`.
    fn interpolate(self, alpha: f64, other: Self) -> Self;

    /// Component-wise relative equality.
    fn equals_relative(self, other: Self, tolerance: f64) -> bool;
}

impl VectorExt for Vector3 {
    fn normalized(self) -> Self {
        self.normalize_or_zero()
    }

    fn parallel_component(self, unit_basis: Self) -> Self {
        unit_basis * self.dot(unit_basis)
    }

    fn perpendicular_component(self, unit_basis: Self) -> Self {
        self - self.parallel_component(unit_basis)
    }

    fn truncate_length(self, max_length: f64) -> Self {
        let length = self.length();
        if length > max_length {
            self * (max_length / length)
        } else {
            self
        }
    }

    fn set_y_to_zero(self) -> Self {
        Self::new(self.x, 0.0, self.z)
    }

    fn rotate_about_global_y(self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(self.x * c + self.z * s, self.y, self.z * c - self.x * s)
    }

    fn interpolate(self, alpha: f64, other: Self) -> Self {
        self.lerp(other, alpha)
    }

    fn equals_relative(self, other: Self, tolerance: f64) -> bool {
        use super::scalar::equals_relative;
        equals_relative(self.x, other.x, tolerance)
            && equals_relative(self.y, other.y, tolerance)
            && equals_relative(self.z, other.z, tolerance)
    }
}
