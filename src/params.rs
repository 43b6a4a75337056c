use glam::Vec2;

use crate::error::OceanError;

/// Strategy used to turn the spectral amplitudes into a height field every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SynthesisBackend {
    /// Brute force summation over every wave vector, O(N^4) per frame.
    Direct,
    /// Separable inverse FFT over both grid axes, O(N^2 log N) per frame.
    #[default]
    Fft,
}

/// Parameters of a tileable spectral ocean
#[derive(Debug, Clone)]
pub struct OceanParams {
    pub point_count: usize,      // Unique points/waves per axis (N), power of two
    pub max_wave_length: f32,    // Maximum extension of a wave in the x-z plane (L)
    pub dimension: f32,          // Size of one tile in object space
    pub spectrum_scale: f32,     // Scale of the Phillips spectrum
    pub wind_direction: Vec2,    // Wind direction on the x-z plane, normalized on validation
    pub wind_speed: f32,         // Wind speed
    pub period_time: f32,        // Seconds after which the simulation repeats
    pub choppiness: f32,         // Horizontal displacement scale (lambda)
    pub gravity: f32,            // Gravity acceleration
    pub water_height: f32,       // Vertical offset of the tile
    pub seed: u64,               // Seed for the spectral amplitudes
    pub backend: SynthesisBackend,
}

impl Default for OceanParams {
    fn default() -> Self {
        Self {
            point_count: 64,
            max_wave_length: 64.0,
            dimension: 10.0,
            spectrum_scale: 1.0,
            wind_direction: Vec2::new(1.0, 1.0).normalize(),
            wind_speed: 12.0,
            period_time: 20.0,
            choppiness: -0.8,
            gravity: 9.81,
            water_height: 0.0,
            seed: 42,
            backend: SynthesisBackend::Fft,
        }
    }
}

impl OceanParams {
    /// Number of vertices per axis of the mesh. The extra row/column replicates
    /// the first one so the tile is seamless.
    pub fn tilde_point_count(&self) -> usize {
        self.point_count + 1
    }

    /// Checks every construction parameter and returns a copy with the wind
    /// direction normalized.
    pub fn validate(&self) -> Result<Self, OceanError> {
        if !self.point_count.is_power_of_two() {
            return Err(OceanError::NotPowerOfTwo(self.point_count));
        }
        positive("max_wave_length", self.max_wave_length)?;
        positive("dimension", self.dimension)?;
        positive("spectrum_scale", self.spectrum_scale)?;
        positive("period_time", self.period_time)?;
        positive("gravity", self.gravity)?;
        finite("wind_speed", self.wind_speed)?;
        finite("choppiness", self.choppiness)?;
        finite("water_height", self.water_height)?;

        if !self.wind_direction.is_finite() {
            return Err(OceanError::NonFinite { name: "wind_direction" });
        }
        let wind_direction = self
            .wind_direction
            .try_normalize()
            .ok_or(OceanError::ZeroWindDirection)?;

        Ok(Self {
            wind_direction,
            ..self.clone()
        })
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), OceanError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(OceanError::NonFinite { name })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), OceanError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(OceanError::NonPositive { name, value })
    }
}
