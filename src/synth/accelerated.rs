use glam::Vec2;
use log::trace;
use rayon::prelude::*;

use super::{normal_from_gradient, HeightFieldSynthesizer, SpectralField, SurfaceSample};
use crate::complex::Complex;
use crate::error::OceanError;
use crate::fft::{FftEngine, StridedView};
use crate::grid::MIN_WAVE_LENGTH;

const HEIGHT: usize = 0;
const SLOPE_X: usize = 1;
const SLOPE_Z: usize = 2;
const DX: usize = 3;
const DZ: usize = 4;

/// FFT strategy: builds five frequency domain buffers per frame and inverse
/// transforms each of them over both grid axes. O(N^2 log N) per frame.
#[derive(Debug, Clone)]
pub struct FftSynthesizer {
    engine: FftEngine,
    /// height, slope x, slope z, displacement x, displacement z
    buffers: [Vec<Complex>; 5],
}

impl FftSynthesizer {
    pub fn new(n: usize) -> Result<Self, OceanError> {
        let engine = FftEngine::new(n)?;
        let zero = vec![Complex::new(0.0, 0.0); n * n];
        Ok(Self {
            engine,
            buffers: [zero.clone(), zero.clone(), zero.clone(), zero.clone(), zero],
        })
    }

    fn fill_spectrum(&mut self, field: &SpectralField<'_>, time: f32) {
        let grid = *field.grid();
        let n = grid.n();

        for z in 0..n {
            for x in 0..n {
                let index = grid.unique_index(x, z);
                let wave = grid.wave_vector(x, z);
                let height = field.height(x, z, time);

                self.buffers[HEIGHT][index] = height;
                self.buffers[SLOPE_X][index] = height * Complex::new(0.0, wave.x);
                self.buffers[SLOPE_Z][index] = height * Complex::new(0.0, wave.y);

                let length = wave.length();
                let (dx, dz) = if length < MIN_WAVE_LENGTH {
                    (Complex::new(0.0, 0.0), Complex::new(0.0, 0.0))
                } else {
                    (
                        height * Complex::new(0.0, -wave.x / length),
                        height * Complex::new(0.0, -wave.y / length),
                    )
                };
                self.buffers[DX][index] = dx;
                self.buffers[DZ][index] = dz;
            }
        }
    }

    /// Inverse transforms every buffer: all columns, then all rows. The row
    /// pass starts only after the column pass of that buffer has returned.
    fn transform(&mut self) {
        let engine = &self.engine;
        let n = engine.n();

        self.buffers.par_iter_mut().for_each(|buffer| {
            let mut scratch = engine.scratch();
            for column in 0..n {
                // columns of an n * n buffer are always in range
                if let Ok(mut view) = StridedView::column(buffer.as_mut_slice(), column, n) {
                    engine.fft_in_place(&mut view, true, &mut scratch);
                }
            }

            buffer
                .par_chunks_mut(n)
                .for_each_init(|| engine.scratch(), |scratch, row| {
                    if let Ok(mut view) = StridedView::row(row, 0, n) {
                        engine.fft_in_place(&mut view, false, scratch);
                    }
                });
        });
    }
}

impl HeightFieldSynthesizer for FftSynthesizer {
    fn name(&self) -> &'static str {
        "fft"
    }

    fn synthesize(&mut self, field: &SpectralField<'_>, time: f32, samples: &mut Vec<SurfaceSample>) {
        let grid = *field.grid();
        let n = grid.n();
        assert_eq!(n, self.engine.n(), "field and synthesizer grid sizes differ");

        self.fill_spectrum(field, time);
        self.transform();
        trace!("fft synthesis done for t = {}", time);

        let normalization = grid.max_wave_length();
        let buffers = &self.buffers;

        samples.clear();
        samples.extend((0..n * n).map(|index| {
            let (x, z) = (index % n, index / n);
            // frequencies are centered at N/2 instead of 0
            let sign = if (x + z) % 2 == 0 { 1.0 } else { -1.0 };
            let scale = sign / normalization;

            let gradient = Vec2::new(buffers[SLOPE_X][index].re, buffers[SLOPE_Z][index].re) * scale;
            SurfaceSample {
                height: buffers[HEIGHT][index] * scale,
                displacement: Vec2::new(buffers[DX][index].re, buffers[DZ][index].re) * scale,
                normal: normal_from_gradient(gradient),
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispersion::DispersionRelation;
    use crate::grid::WaveGrid;
    use crate::mesh::TileableMesh;
    use crate::params::OceanParams;
    use crate::spectrum::SpectrumModel;
    use crate::synth::DirectSummation;

    fn setup(n: usize, seed: u64) -> (OceanParams, TileableMesh) {
        let params = OceanParams {
            point_count: n,
            max_wave_length: 2.0 * n as f32,
            seed,
            ..OceanParams::default()
        }
        .validate()
        .unwrap();
        let mut spectrum = SpectrumModel::new(&params);
        let mesh = TileableMesh::new(WaveGrid::new(n, params.max_wave_length), &mut spectrum);
        (params, mesh)
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        assert!(matches!(FftSynthesizer::new(12), Err(OceanError::NotPowerOfTwo(12))));
    }

    #[test]
    fn test_agrees_with_direct_summation() {
        let (params, mesh) = setup(8, 11);
        let field = SpectralField::new(
            *mesh.grid(),
            DispersionRelation::new(params.gravity, params.period_time),
            mesh.compute(),
        );

        let mut fft = FftSynthesizer::new(8).unwrap();
        let mut direct = DirectSummation::new();
        let (mut fast, mut slow) = (Vec::new(), Vec::new());

        for time in [0.0, 0.37, 4.2] {
            fft.synthesize(&field, time, &mut fast);
            direct.synthesize(&field, time, &mut slow);
            assert_eq!(fast.len(), 64);

            for (index, (a, b)) in fast.iter().zip(&slow).enumerate() {
                assert!((a.height - b.height).norm() < 1e-3, "height at {} t={}", index, time);
                assert!((a.displacement - b.displacement).length() < 1e-3, "displacement at {}", index);
                assert!((a.normal - b.normal).length() < 1e-3, "normal at {}", index);
            }
        }
    }

    #[test]
    fn test_grid_heights_are_real() {
        let (params, mesh) = setup(16, 5);
        let field = SpectralField::new(
            *mesh.grid(),
            DispersionRelation::new(params.gravity, params.period_time),
            mesh.compute(),
        );
        let mut fft = FftSynthesizer::new(16).unwrap();
        let mut samples = Vec::new();

        for time in [0.0, 1.5, 13.0] {
            fft.synthesize(&field, time, &mut samples);
            let largest = samples.iter().map(|s| s.height.re.abs()).fold(0.0, f32::max);
            assert!(largest > 0.0);
            for sample in &samples {
                assert!(sample.height.im.abs() <= 1e-4 * largest.max(1.0));
            }
        }
    }
}
