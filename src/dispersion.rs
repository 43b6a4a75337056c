use glam::Vec2;
use std::f32::consts::TAU;

/// Deep water dispersion relation, quantized to multiples of the fundamental
/// frequency `2*pi / period_time` so the whole field repeats after exactly one
/// period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispersionRelation {
    gravity: f32,
    fundamental: f32,
}

impl DispersionRelation {
    pub fn new(gravity: f32, period_time: f32) -> Self {
        Self {
            gravity,
            fundamental: TAU / period_time,
        }
    }

    /// The fundamental angular frequency w0.
    pub fn fundamental(&self) -> f32 {
        self.fundamental
    }

    /// Angular frequency of a wave, `floor(sqrt(g*|k|) / w0) * w0`.
    #[inline]
    pub fn frequency(&self, wave: Vec2) -> f32 {
        self.harmonic(wave) as f32 * self.fundamental
    }

    /// Integer multiple of w0 the wave oscillates with.
    #[inline]
    pub fn harmonic(&self, wave: Vec2) -> u32 {
        ((self.gravity * wave.length()).sqrt() / self.fundamental).floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::WaveGrid;

    #[test]
    fn test_frequencies_are_multiples_of_the_fundamental() {
        let dispersion = DispersionRelation::new(9.81, 20.0);
        let grid = WaveGrid::new(16, 32.0);
        let w0 = dispersion.fundamental();

        for z in 0..16 {
            for x in 0..16 {
                let omega = dispersion.frequency(grid.wave_vector(x, z));
                let ratio = omega / w0;
                assert!((ratio - ratio.round()).abs() < 1e-4, "omega {} at ({}, {})", omega, x, z);
                assert!(omega <= (9.81 * grid.wave_vector(x, z).length()).sqrt() + 1e-5);
            }
        }
    }

    #[test]
    fn test_still_wave_has_zero_frequency() {
        let dispersion = DispersionRelation::new(9.81, 5.0);
        assert_eq!(dispersion.frequency(Vec2::ZERO), 0.0);
        assert_eq!(dispersion.harmonic(Vec2::ZERO), 0);
    }

    #[test]
    fn test_quantization_rounds_down() {
        // sqrt(9.81 * 1) = 3.132..., w0 = 2*pi/2 = pi -> 0 harmonics
        let dispersion = DispersionRelation::new(9.81, 2.0);
        assert_eq!(dispersion.harmonic(Vec2::new(1.0, 0.0)), 0);
        // sqrt(9.81 * 4) = 6.264..., pi fits once
        assert_eq!(dispersion.harmonic(Vec2::new(0.0, 4.0)), 1);
    }
}
