use glam::Vec2;
use rayon::prelude::*;

use super::{normal_from_gradient, HeightFieldSynthesizer, SpectralField, SurfaceSample};
use crate::complex::{Complex, ComplexExt};
use crate::grid::MIN_WAVE_LENGTH;

/// Reference strategy: every point sums the contribution of every wave.
///
/// O(N^2) per point and O(N^4) per frame. Slow, but it evaluates the field at
/// arbitrary locations and serves as the ground truth for the FFT strategy.
#[derive(Debug, Clone, Default)]
pub struct DirectSummation;

impl DirectSummation {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates the surface at `location` (x, z) and `time`.
    pub fn simulate_point(field: &SpectralField<'_>, location: Vec2, time: f32) -> SurfaceSample {
        let grid = field.grid();
        let n = grid.n();
        let normalization = grid.max_wave_length();

        let mut height = Complex::new(0.0, 0.0);
        let mut gradient = Vec2::ZERO;
        let mut displacement = Vec2::ZERO;

        for z in 0..n {
            for x in 0..n {
                let wave = grid.wave_vector(x, z);
                let sample =
                    field.height(x, z, time) * Complex::euler(wave.dot(location)) / normalization;

                // the real part is the amplitude of the sinusoid
                height += sample;

                // Re(i * k * sample) = -k * Im(sample)
                gradient += -sample.im * wave;

                let length = wave.length();
                if length >= MIN_WAVE_LENGTH {
                    displacement += wave / length * sample.im;
                }
            }
        }

        SurfaceSample {
            height,
            displacement,
            normal: normal_from_gradient(gradient),
        }
    }
}

impl HeightFieldSynthesizer for DirectSummation {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn synthesize(&mut self, field: &SpectralField<'_>, time: f32, samples: &mut Vec<SurfaceSample>) {
        let grid = *field.grid();
        let n = grid.n();

        (0..n * n)
            .into_par_iter()
            .map(|index| {
                let (x, z) = (index % n, index / n);
                let position = grid.original_position(x, z);
                Self::simulate_point(field, Vec2::new(position.x, position.z), time)
            })
            .collect_into_vec(samples);
    }
}
