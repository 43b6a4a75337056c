use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::complex::Complex;
use crate::params::OceanParams;

/// Below this wave vector length the spectrum is zero.
const MIN_SPECTRUM_WAVE: f32 = 1e-4;

/// Fraction of the largest wave below which waves get suppressed.
const SMALL_WAVE_FACTOR: f32 = 0.001;

/// Phillips spectrum together with the random source used to draw the initial
/// amplitudes. The RNG is seeded explicitly so a spectrum is reproducible.
#[derive(Debug, Clone)]
pub struct SpectrumModel {
    spectrum_scale: f32,
    wind_direction: Vec2,
    wind_speed: f32,
    gravity: f32,
    rng: StdRng,
}

impl SpectrumModel {
    pub fn new(params: &OceanParams) -> Self {
        Self::with_rng(params, StdRng::seed_from_u64(params.seed))
    }

    pub fn with_rng(params: &OceanParams, rng: StdRng) -> Self {
        Self {
            spectrum_scale: params.spectrum_scale,
            wind_direction: params.wind_direction.normalize_or_zero(),
            wind_speed: params.wind_speed,
            gravity: params.gravity,
            rng,
        }
    }

    /// Largest wave arising from a continuous wind of the configured speed.
    pub fn largest_wave(&self) -> f32 {
        self.wind_speed * self.wind_speed / self.gravity
    }

    /// Phillips spectrum for a wave vector.
    pub fn phillips_spectrum(&self, wave: Vec2) -> f32 {
        let k = wave.length();
        if k < MIN_SPECTRUM_WAVE {
            return 0.0;
        }

        let l = self.largest_wave();
        let k_l = k * l;
        if k_l <= 0.0 {
            // calm wind, no energy anywhere
            return 0.0;
        }

        let k2 = k * k;
        let k4 = k2 * k2;

        let alignment = (wave / k).dot(self.wind_direction).abs();
        let alignment8 = alignment.powi(8);

        let smallest = l * SMALL_WAVE_FACTOR;
        let small_wave_suppression = (-k2 * smallest * smallest).exp();

        self.spectrum_scale * (-1.0 / (k_l * k_l)).exp() / k4 * alignment8 * small_wave_suppression
    }

    /// Draws a standard normal distributed value (mean 0, deviation 1).
    pub fn gaussian(&mut self) -> f32 {
        self.rng.sample(StandardNormal)
    }

    /// Random initial amplitude of a wave, `(g1 + i*g2) * sqrt(P(k) / 2)`.
    pub fn height_zero(&mut self, wave: Vec2) -> Complex {
        let random = Complex::new(self.gaussian(), self.gaussian());
        random * (self.phillips_spectrum(wave) / 2.0).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(seed: u64) -> SpectrumModel {
        let params = OceanParams {
            seed,
            ..OceanParams::default()
        }
        .validate()
        .unwrap();
        SpectrumModel::new(&params)
    }

    #[test]
    fn test_spectrum_is_zero_for_tiny_waves() {
        let model = model(1);
        assert_eq!(model.phillips_spectrum(Vec2::ZERO), 0.0);
        assert_eq!(model.phillips_spectrum(Vec2::new(1e-5, 0.0)), 0.0);
    }

    #[test]
    fn test_spectrum_follows_wind() {
        let model = model(1);
        let along = model.phillips_spectrum(Vec2::new(0.5, 0.5));
        let against = model.phillips_spectrum(Vec2::new(-0.5, -0.5));
        let across = model.phillips_spectrum(Vec2::new(0.5, -0.5));

        assert!(along > 0.0);
        assert!((along - against).abs() <= along * 1e-5);
        assert!(across < 1e-10);
    }

    #[test]
    fn test_calm_wind_has_no_energy() {
        let params = OceanParams {
            wind_speed: 0.0,
            ..OceanParams::default()
        };
        let model = SpectrumModel::new(&params.validate().unwrap());
        let value = model.phillips_spectrum(Vec2::new(1.0, 1.0));
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_seed_makes_amplitudes_reproducible() {
        let wave = Vec2::new(0.3, 0.2);
        let mut a = model(7);
        let mut b = model(7);
        let mut c = model(8);

        let first: Vec<Complex> = (0..16).map(|_| a.height_zero(wave)).collect();
        let second: Vec<Complex> = (0..16).map(|_| b.height_zero(wave)).collect();
        let third: Vec<Complex> = (0..16).map(|_| c.height_zero(wave)).collect();

        assert_eq!(first, second);
        assert_ne!(first, third);
    }

    #[test]
    fn test_gaussian_is_standard_normal() {
        let mut model = model(3);
        let samples: Vec<f32> = (0..20_000).map(|_| model.gaussian()).collect();
        let mean = samples.iter().sum::<f32>() / samples.len() as f32;
        let variance =
            samples.iter().map(|s| (s - mean) * (s - mean)).sum::<f32>() / samples.len() as f32;

        assert!(mean.abs() < 0.05, "mean {}", mean);
        assert!((variance - 1.0).abs() < 0.05, "variance {}", variance);
    }
}
