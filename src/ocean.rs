use glam::{Mat4, Vec2, Vec3};
use log::{info, trace};

use crate::dispersion::DispersionRelation;
use crate::error::OceanError;
use crate::grid::WaveGrid;
use crate::mesh::{TileableMesh, VertexRender};
use crate::params::OceanParams;
use crate::spectrum::SpectrumModel;
use crate::synth::{
    create_synthesizer, DirectSummation, HeightFieldSynthesizer, SpectralField, SurfaceSample,
};

/// A tileable ocean patch.
///
/// Owns the validated configuration, the spectral amplitudes (drawn once at
/// construction) and the mesh buffers. `simulate` only ever rewrites the render
/// vertices.
pub struct OceanSimulation {
    params: OceanParams,
    grid: WaveGrid,
    dispersion: DispersionRelation,
    mesh: TileableMesh,
    synthesizer: Box<dyn HeightFieldSynthesizer>,
    samples: Vec<SurfaceSample>,
    animation_time: f32,
    position: Vec3,
}

impl OceanSimulation {
    /// Validates `params` and builds spectrum, mesh and synthesizer.
    pub fn new(params: OceanParams) -> Result<Self, OceanError> {
        let params = params.validate()?;
        let mut spectrum = SpectrumModel::new(&params);
        Self::with_spectrum(params, &mut spectrum)
    }

    /// Like `new`, but draws the amplitudes from the given spectrum model.
    pub fn with_spectrum(params: OceanParams, spectrum: &mut SpectrumModel) -> Result<Self, OceanError> {
        let params = params.validate()?;
        let grid = WaveGrid::new(params.point_count, params.max_wave_length);
        let dispersion = DispersionRelation::new(params.gravity, params.period_time);
        let synthesizer = create_synthesizer(params.backend, params.point_count)?;
        let mesh = TileableMesh::new(grid, spectrum);

        info!(
            "ocean created: N = {}, {} vertices, {} backend",
            params.point_count,
            mesh.vertices().len(),
            synthesizer.name()
        );

        Ok(Self {
            params,
            grid,
            dispersion,
            mesh,
            synthesizer,
            samples: Vec::new(),
            animation_time: 0.0,
            position: Vec3::ZERO,
        })
    }

    pub fn params(&self) -> &OceanParams {
        &self.params
    }

    pub fn mesh(&self) -> &TileableMesh {
        &self.mesh
    }

    /// Render vertices, `(N + 1)^2` of them.
    pub fn vertices(&self) -> &[VertexRender] {
        self.mesh.vertices()
    }

    /// Triangle list indexing `vertices`.
    pub fn indices(&self) -> &[u32] {
        self.mesh.indices()
    }

    fn field(&self) -> SpectralField<'_> {
        SpectralField::new(self.grid, self.dispersion, self.mesh.compute())
    }

    /// Simulates the ocean at time `time` and updates the render vertices.
    pub fn simulate(&mut self, time: f32) {
        let field = SpectralField::new(self.grid, self.dispersion, self.mesh.compute());
        self.synthesizer.synthesize(&field, time, &mut self.samples);
        self.mesh.apply_samples(&self.samples, self.params.choppiness);
        trace!("simulated frame at t = {}", time);
    }

    /// Evaluates the surface at an arbitrary location of the x-z plane by
    /// direct summation, independent of the grid and the selected backend.
    pub fn simulate_point(&self, location: Vec2, time: f32) -> SurfaceSample {
        DirectSummation::simulate_point(&self.field(), location, time)
    }

    pub fn update_animation_time(&mut self, time: f32) {
        self.animation_time = time;
    }

    pub fn animation_time(&self) -> f32 {
        self.animation_time
    }

    /// Advances the animation clock by `dt` and simulates the new time.
    pub fn step(&mut self, dt: f32) {
        self.animation_time += dt;
        self.simulate(self.animation_time);
    }

    /// Object space extent of one tile.
    pub fn tile_size(&self) -> f32 {
        self.params.max_wave_length
    }

    pub fn water_height(&self) -> f32 {
        self.params.water_height
    }

    pub fn set_water_height(&mut self, height: f32) {
        self.params.water_height = height;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Places the tile at `position`, lifted by the water height and scaled from
    /// wave length units to `dimension`.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_translation(Vec3::new(0.0, self.params.water_height, 0.0))
            * Mat4::from_scale(Vec3::splat(self.params.dimension / self.params.max_wave_length))
    }
}
