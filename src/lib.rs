// Export main modules
pub mod complex;
pub mod dispersion;
pub mod error;
pub mod fft;
pub mod grid;
pub mod mesh;
pub mod params;
pub mod spectrum;
pub mod synth;
mod export;
mod ocean;

// Re-export everything for public use
pub use complex::{Complex, ComplexExt};
pub use error::OceanError;
pub use export::{export_glb, save_glb};
pub use mesh::{Face, TileableMesh, VertexCompute, VertexRender};
pub use ocean::OceanSimulation;
pub use params::{OceanParams, SynthesisBackend};
pub use synth::{DirectSummation, FftSynthesizer, HeightFieldSynthesizer, SurfaceSample};

pub mod prelude {
    pub use crate::complex::{Complex, ComplexExt};
    pub use crate::error::OceanError;
    pub use crate::export::{export_glb, save_glb};
    pub use crate::mesh::{Face, VertexRender};
    pub use crate::ocean::OceanSimulation;
    pub use crate::params::{OceanParams, SynthesisBackend};
    pub use crate::synth::SurfaceSample;
}
