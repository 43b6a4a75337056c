//! Index space shared by the spectrum, the synthesizers and the mesh.
//!
//! Wave vectors are centered: index `N/2` is the zero frequency and index `0`
//! the most negative one, `k = pi * (2i - N) / L`. Mesh vertices use the same
//! indices with one extra row/column (`N + 1` per axis) for tiling.

use glam::{Vec2, Vec3};
use std::f32::consts::PI;

/// Wave vectors shorter than this carry no direction; their gradient and
/// displacement contributions are dropped.
pub const MIN_WAVE_LENGTH: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveGrid {
    n: usize,
    max_wave_length: f32,
}

impl WaveGrid {
    pub fn new(n: usize, max_wave_length: f32) -> Self {
        Self { n, max_wave_length }
    }

    /// Unique points (and waves) per axis.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Mesh vertices per axis.
    pub fn point_count(&self) -> usize {
        self.n + 1
    }

    pub fn max_wave_length(&self) -> f32 {
        self.max_wave_length
    }

    /// Wave vector of the grid index `(x, z)`.
    #[inline]
    pub fn wave_vector(&self, x: usize, z: usize) -> Vec2 {
        let n = self.n as f32;
        Vec2::new(
            PI * (2.0 * x as f32 - n) / self.max_wave_length,
            PI * (2.0 * z as f32 - n) / self.max_wave_length,
        )
    }

    /// Index of the wave vector `-k` for the wave at `(x, z)`, wrapped into
    /// the unique range. Index 0 maps onto itself since `-pi*N/L` and `pi*N/L`
    /// alias on the grid.
    #[inline]
    pub fn negated_index(&self, x: usize, z: usize) -> (usize, usize) {
        ((self.n - x % self.n) % self.n, (self.n - z % self.n) % self.n)
    }

    /// Index into a buffer of `N * N` unique values.
    #[inline]
    pub fn unique_index(&self, x: usize, z: usize) -> usize {
        z * self.n + x
    }

    /// Index into a buffer of `(N + 1)^2` mesh vertices.
    #[inline]
    pub fn vertex_index(&self, x: usize, z: usize) -> usize {
        z * self.point_count() + x
    }

    /// Rest position of the mesh vertex `(x, z)`. The tile spans
    /// `[-L/2, L/2]` on both axes; z grows opposite to the index for a
    /// right handed coordinate system.
    pub fn original_position(&self, x: usize, z: usize) -> Vec3 {
        let spacing = self.max_wave_length / self.n as f32;
        let half = self.n as f32 / 2.0;
        Vec3::new(
            (x as f32 - half) * spacing,
            0.0,
            -(z as f32 - half) * spacing,
        )
    }
}
