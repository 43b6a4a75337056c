/// Errors raised while constructing an ocean simulation or one of its parts.
///
/// All of them are configuration errors: once a simulation exists, simulating a
/// frame cannot fail.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum OceanError {
    /// The grid size has to be a power of two greater than zero.
    #[error("point count has to be a power of 2 greater than 0, got {0}")]
    NotPowerOfTwo(usize),
    /// A parameter that has to be strictly positive was not.
    #[error("{name} has to be greater than 0, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    /// A parameter was NaN or infinite.
    #[error("{name} has to be a finite number")]
    NonFinite { name: &'static str },
    /// The wind direction cannot be normalized.
    #[error("length of wind direction has to be greater than 0")]
    ZeroWindDirection,
    /// A strided view addresses a row/column the buffer cannot hold.
    #[error("primitive {primitive} with {count} elements is out of range of a buffer of length {len}")]
    PrimitiveOutOfRange {
        primitive: usize,
        count: usize,
        len: usize,
    },
}
