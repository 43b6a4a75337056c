//! Height field synthesis: turns the static spectral amplitudes into the
//! surface of one point in time.

mod accelerated;
mod direct;

pub use accelerated::FftSynthesizer;
pub use direct::DirectSummation;

use glam::{Vec2, Vec3};

use crate::complex::{Complex, ComplexExt};
use crate::dispersion::DispersionRelation;
use crate::error::OceanError;
use crate::grid::WaveGrid;
use crate::mesh::VertexCompute;
use crate::params::SynthesisBackend;

/// Simulation result of one point on the x-z plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    /// Resulting height; the imaginary part vanishes on grid points.
    pub height: Complex,
    /// Horizontal displacement for choppy waves, (x, z).
    pub displacement: Vec2,
    pub normal: Vec3,
}

impl Default for SurfaceSample {
    fn default() -> Self {
        Self {
            height: Complex::new(0.0, 0.0),
            displacement: Vec2::ZERO,
            normal: Vec3::Y,
        }
    }
}

/// Time evolution of the spectral amplitudes of a mesh.
#[derive(Debug, Clone, Copy)]
pub struct SpectralField<'a> {
    grid: WaveGrid,
    dispersion: DispersionRelation,
    vertices: &'a [VertexCompute],
}

impl<'a> SpectralField<'a> {
    pub fn new(grid: WaveGrid, dispersion: DispersionRelation, vertices: &'a [VertexCompute]) -> Self {
        debug_assert_eq!(vertices.len(), grid.point_count() * grid.point_count());
        Self {
            grid,
            dispersion,
            vertices,
        }
    }

    pub fn grid(&self) -> &WaveGrid {
        &self.grid
    }

    pub fn dispersion(&self) -> &DispersionRelation {
        &self.dispersion
    }

    /// Frequency domain amplitude of wave `(x, z)` at `time`,
    /// `h0 * e^(iwt) + conj(h0(-k)) * e^(-iwt)`.
    #[inline]
    pub fn height(&self, x: usize, z: usize, time: f32) -> Complex {
        let omega = self.dispersion.frequency(self.grid.wave_vector(x, z));
        let phase = Complex::euler(omega * time);

        let vertex = &self.vertices[self.grid.vertex_index(x, z)];
        vertex.height0 * phase + vertex.height0_negative_conj * phase.conjugate()
    }
}

/// Strategy computing the samples of all `N * N` unique grid points.
pub trait HeightFieldSynthesizer: Send {
    fn name(&self) -> &'static str;

    /// Fills `samples` (row major, `N * N`) with the surface at `time`.
    fn synthesize(&mut self, field: &SpectralField<'_>, time: f32, samples: &mut Vec<SurfaceSample>);
}

/// Creates the synthesizer selected by `backend` for a grid of `n` points per axis.
pub fn create_synthesizer(
    backend: SynthesisBackend,
    n: usize,
) -> Result<Box<dyn HeightFieldSynthesizer>, OceanError> {
    Ok(match backend {
        SynthesisBackend::Direct => Box::new(DirectSummation::new()),
        SynthesisBackend::Fft => Box::new(FftSynthesizer::new(n)?),
    })
}

/// Surface normal from the real valued gradient (slope) of the height field.
#[inline]
fn normal_from_gradient(gradient: Vec2) -> Vec3 {
    Vec3::new(-gradient.x, 1.0, -gradient.y).normalize_or_zero()
}
