use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;

use spectral_ocean::prelude::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// Brute force summation (slow, reference)
    Direct,
    /// Inverse FFT over both axes
    Fft,
}

impl From<Backend> for SynthesisBackend {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Direct => SynthesisBackend::Direct,
            Backend::Fft => SynthesisBackend::Fft,
        }
    }
}

/// Command-line tool to simulate a tileable spectral ocean and export a frame
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Unique points per axis (power of two)
    #[arg(short = 'n', long, default_value_t = 64)]
    point_count: usize,

    /// Maximum extension of a wave in the x-z plane
    #[arg(long, default_value_t = 64.0)]
    max_wave_length: f32,

    /// Dimension of a tile in object space
    #[arg(long, default_value_t = 10.0)]
    dimension: f32,

    /// Scale of the Phillips spectrum
    #[arg(short, long, default_value_t = 1.0)]
    spectrum_scale: f32,

    /// Wind speed for wave generation
    #[arg(long, default_value_t = 12.0)]
    wind_speed: f32,

    /// Wind direction X component
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    wind_dir_x: f32,

    /// Wind direction Z component
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    wind_dir_z: f32,

    /// Seconds after which the simulation repeats
    #[arg(short, long, default_value_t = 20.0)]
    period_time: f32,

    /// Horizontal displacement scale (negative values sharpen crests)
    #[arg(short, long, default_value_t = -0.8, allow_hyphen_values = true)]
    choppiness: f32,

    /// Random seed for the spectral amplitudes
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Synthesis backend
    #[arg(short, long, value_enum, default_value_t = Backend::Fft)]
    backend: Backend,

    /// Start time of the simulation
    #[arg(short, long, default_value_t = 0.0)]
    time: f32,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 1)]
    frames: usize,

    /// Time step between frames
    #[arg(long, default_value_t = 1.0 / 30.0)]
    dt: f32,

    /// Number of tiles along x in the exported scene
    #[arg(long, default_value_t = 1)]
    tiles_x: usize,

    /// Number of tiles along z in the exported scene
    #[arg(long, default_value_t = 1)]
    tiles_z: usize,

    /// Output file path
    #[arg(short, long, default_value = "ocean_surface.glb")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let params = OceanParams {
        point_count: args.point_count,
        max_wave_length: args.max_wave_length,
        dimension: args.dimension,
        spectrum_scale: args.spectrum_scale,
        wind_direction: glam::Vec2::new(args.wind_dir_x, args.wind_dir_z),
        wind_speed: args.wind_speed,
        period_time: args.period_time,
        choppiness: args.choppiness,
        seed: args.seed,
        backend: args.backend.into(),
        ..OceanParams::default()
    };

    info!(
        "Wave parameters: wind speed={}, spectrum scale={}, choppiness={}, period={}s",
        params.wind_speed, params.spectrum_scale, params.choppiness, params.period_time
    );

    let mut ocean = OceanSimulation::new(params).context("invalid ocean parameters")?;

    ocean.update_animation_time(args.time);
    ocean.simulate(args.time);
    for _ in 1..args.frames.max(1) {
        ocean.step(args.dt);
    }

    let (min_height, max_height) = ocean.mesh().height_range();
    info!(
        "Frame at t={:.3}: height range min = {:.4}, max = {:.4}",
        ocean.animation_time(),
        min_height,
        max_height
    );

    info!("Exporting to {}...", args.output.display());
    save_glb(&ocean, &args.output, args.tiles_x.max(1), args.tiles_z.max(1))
        .with_context(|| format!("failed to export {}", args.output.display()))?;

    info!("Done!");
    Ok(())
}
