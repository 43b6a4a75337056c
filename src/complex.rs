use glam::Vec2;
use num_complex::Complex32;

/// Complex number used for every spectral quantity of the simulation.
pub type Complex = Complex32;

/// Named helpers on top of `num_complex` used throughout the ocean code.
pub trait ComplexExt {
    /// e^(i*angle) = cos(angle) + i*sin(angle)
    fn euler(angle: f32) -> Self;

    /// Complex conjugate.
    fn conjugate(&self) -> Self;

    /// Length of the number in the complex plane.
    fn magnitude(&self) -> f32;

    /// The number as a point in the cartesian plane (re, im).
    fn cartesian(&self) -> Vec2;
}

impl ComplexExt for Complex {
    #[inline]
    fn euler(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Complex::new(cos, sin)
    }

    #[inline]
    fn conjugate(&self) -> Self {
        self.conj()
    }

    #[inline]
    fn magnitude(&self) -> f32 {
        self.norm()
    }

    #[inline]
    fn cartesian(&self) -> Vec2 {
        Vec2::new(self.re, self.im)
    }
}
