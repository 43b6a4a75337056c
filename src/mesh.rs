use glam::Vec3;
use log::debug;
use rayon::prelude::*;

use crate::complex::{Complex, ComplexExt};
use crate::grid::WaveGrid;
use crate::spectrum::SpectrumModel;
use crate::synth::SurfaceSample;

/// Static simulation input of a vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexCompute {
    pub original_position: Vec3,
    pub height0: Complex,
    pub height0_negative_conj: Complex,
}

/// A vertex as handed to the renderer; the only data mutated per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexRender {
    pub position: Vec3,
    pub normal: Vec3,
}

/// A face consisting of three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face(pub u32, pub u32, pub u32);

/// Grid mesh of `(N + 1)^2` vertices whose last row and column replicate the
/// first ones, so copies of the tile line up seamlessly.
#[derive(Debug, Clone)]
pub struct TileableMesh {
    grid: WaveGrid,
    compute: Vec<VertexCompute>,
    render: Vec<VertexRender>,
    indices: Vec<u32>,
}

impl TileableMesh {
    /// Draws the spectral amplitudes (once, in row major order of the unique
    /// points) and builds vertices and topology.
    pub fn new(grid: WaveGrid, spectrum: &mut SpectrumModel) -> Self {
        let n = grid.n();
        let point_count = grid.point_count();

        let mut height0 = Vec::with_capacity(n * n);
        for z in 0..n {
            for x in 0..n {
                height0.push(spectrum.height_zero(grid.wave_vector(x, z)));
            }
        }

        let compute: Vec<VertexCompute> = (0..point_count * point_count)
            .map(|index| {
                let (x, z) = (index % point_count, index / point_count);
                let (ux, uz) = (x % n, z % n);
                let (nx, nz) = grid.negated_index(ux, uz);
                VertexCompute {
                    original_position: grid.original_position(x, z),
                    height0: height0[grid.unique_index(ux, uz)],
                    height0_negative_conj: height0[grid.unique_index(nx, nz)].conjugate(),
                }
            })
            .collect();

        let render = compute
            .iter()
            .map(|vertex| VertexRender {
                position: vertex.original_position,
                normal: Vec3::Y,
            })
            .collect();

        let indices = Self::build_indices(point_count);

        debug!(
            "ocean mesh built: {} vertices, {} triangles",
            compute.len(),
            indices.len() / 3
        );

        Self {
            grid,
            compute,
            render,
            indices,
        }
    }

    /// Two counter clockwise triangles per grid quad.
    fn build_indices(point_count: usize) -> Vec<u32> {
        let quads = point_count.saturating_sub(1);
        (0..quads)
            .into_par_iter()
            .flat_map_iter(move |z| {
                (0..quads).flat_map(move |x| {
                    let bottom_left = (z * point_count + x) as u32;
                    let bottom_right = bottom_left + 1;
                    let top_right = bottom_left + point_count as u32 + 1;
                    let top_left = bottom_left + point_count as u32;

                    [
                        bottom_left, bottom_right, top_right,
                        bottom_left, top_right, top_left,
                    ]
                })
            })
            .collect()
    }

    pub fn grid(&self) -> &WaveGrid {
        &self.grid
    }

    pub fn compute(&self) -> &[VertexCompute] {
        &self.compute
    }

    pub fn vertices(&self) -> &[VertexRender] {
        &self.render
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn faces(&self) -> impl Iterator<Item = Face> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|triangle| Face(triangle[0], triangle[1], triangle[2]))
    }

    /// Writes one frame of samples (one per unique point, row major) into the
    /// render vertices, then replicates the first row/column into the last.
    pub fn apply_samples(&mut self, samples: &[SurfaceSample], choppiness: f32) {
        let n = self.grid.n();
        assert_eq!(samples.len(), n * n, "one sample per unique grid point expected");

        for z in 0..n {
            for x in 0..n {
                let sample = &samples[self.grid.unique_index(x, z)];
                self.write(x, z, sample, choppiness);

                // first point has to be replicated three times
                if x == 0 {
                    self.write(n, z, sample, choppiness);
                }
                if z == 0 {
                    self.write(x, n, sample, choppiness);
                }
                if x == 0 && z == 0 {
                    self.write(n, n, sample, choppiness);
                }
            }
        }
    }

    fn write(&mut self, x: usize, z: usize, sample: &SurfaceSample, choppiness: f32) {
        let index = self.grid.vertex_index(x, z);
        let original = self.compute[index].original_position;
        let vertex = &mut self.render[index];

        vertex.position = Vec3::new(
            original.x + choppiness * sample.displacement.x,
            sample.height.re,
            original.z + choppiness * sample.displacement.y,
        );
        vertex.normal = sample.normal;
    }

    /// (min, max) height of the current frame.
    pub fn height_range(&self) -> (f32, f32) {
        self.render
            .iter()
            .fold((f32::MAX, f32::MIN), |(min, max), vertex| {
                (min.min(vertex.position.y), max.max(vertex.position.y))
            })
    }
}
