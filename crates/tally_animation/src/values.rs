//! Animatable value types

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + t * (other - self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_interpolation() {
        assert!((0.0_f32.lerp(&1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((10.0_f32.lerp(&20.0, 0.25) - 12.5).abs() < 1e-6);
        assert!((100.0_f32.lerp(&0.0, 0.75) - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_interpolation_endpoints() {
        assert_eq!(3.0_f32.lerp(&9.0, 0.0), 3.0);
        assert_eq!(3.0_f32.lerp(&9.0, 1.0), 9.0);
    }
}
