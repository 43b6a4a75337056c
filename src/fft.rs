//! Radix-2 iterative Cooley-Tukey FFT over rows and columns of a flattened
//! `N x N` buffer.
//!
//! The transform uses positive twiddle exponents and no normalization, i.e. it
//! computes the unnormalized inverse DFT. Its output is reordered for centered
//! frequency indices (index `N/2` is the zero frequency): the two halves of the
//! result are swapped, and for `vertical` transforms the result is additionally
//! mirrored (`k <-> N - k`) because the z axis runs opposite to its index.

use log::debug;
use std::f32::consts::TAU;

use crate::complex::{Complex, ComplexExt};
use crate::error::OceanError;

/// Which primitive of a flattened 2D buffer a view walks along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveMode {
    /// `index = primitive * count + i`
    Rows,
    /// `index = i * count + primitive`
    Columns,
}

/// Bounds checked strided access to one row or column of a flattened 2D
/// buffer, without copying it.
///
/// `B` is either `&[Complex]` (read only) or `&mut [Complex]`.
#[derive(Debug)]
pub struct StridedView<B> {
    buffer: B,
    offset: usize,
    stride: usize,
    count: usize,
}

impl<B: AsRef<[Complex]>> StridedView<B> {
    /// Creates a view on the `primitive`th row or column of `buffer`, where a
    /// primitive is formed by `count` elements.
    pub fn new(
        buffer: B,
        mode: PrimitiveMode,
        primitive: usize,
        count: usize,
    ) -> Result<Self, OceanError> {
        let (offset, stride) = match mode {
            PrimitiveMode::Rows => (primitive * count, 1),
            PrimitiveMode::Columns => (primitive, count),
        };

        let len = buffer.as_ref().len();
        let in_range = match (mode, count) {
            (_, 0) => offset <= len,
            (PrimitiveMode::Columns, _) if primitive >= count => false,
            _ => offset + (count - 1) * stride < len,
        };
        if !in_range {
            return Err(OceanError::PrimitiveOutOfRange {
                primitive,
                count,
                len,
            });
        }

        Ok(Self {
            buffer,
            offset,
            stride,
            count,
        })
    }

    pub fn row(buffer: B, row: usize, count: usize) -> Result<Self, OceanError> {
        Self::new(buffer, PrimitiveMode::Rows, row, count)
    }

    pub fn column(buffer: B, column: usize, count: usize) -> Result<Self, OceanError> {
        Self::new(buffer, PrimitiveMode::Columns, column, count)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    fn buffer_index(&self, i: usize) -> usize {
        assert!(i < self.count, "index {} out of range for view of {} elements", i, self.count);
        self.offset + i * self.stride
    }

    /// The `i`th element of the primitive.
    #[inline]
    pub fn get(&self, i: usize) -> Complex {
        self.buffer.as_ref()[self.buffer_index(i)]
    }
}

impl<B: AsRef<[Complex]> + AsMut<[Complex]>> StridedView<B> {
    #[inline]
    pub fn set(&mut self, i: usize, value: Complex) {
        let index = self.buffer_index(i);
        self.buffer.as_mut()[index] = value;
    }
}

/// Owned double buffer the butterfly stages ping-pong between.
///
/// `active` names the buffer holding the latest stage; only the FFT routine
/// flips it.
#[derive(Debug, Clone)]
pub struct PingPong {
    buffers: [Vec<Complex>; 2],
    active: usize,
}

impl PingPong {
    pub fn new(n: usize) -> Self {
        Self {
            buffers: [vec![Complex::new(0.0, 0.0); n], vec![Complex::new(0.0, 0.0); n]],
            active: 0,
        }
    }

    /// Buffer holding the latest result.
    pub fn active(&self) -> &[Complex] {
        &self.buffers[self.active]
    }

    fn active_mut(&mut self) -> &mut [Complex] {
        &mut self.buffers[self.active]
    }

    /// Makes the other buffer active and returns (previous, new active).
    fn flip(&mut self) -> (&[Complex], &mut [Complex]) {
        self.active ^= 1;
        let active = self.active;
        let (first, second) = self.buffers.split_at_mut(1);
        if active == 0 {
            (second[0].as_slice(), first[0].as_mut_slice())
        } else {
            (first[0].as_slice(), second[0].as_mut_slice())
        }
    }
}

/// Precomputed bit reversal and twiddle tables for transforms of size `N`.
#[derive(Debug, Clone)]
pub struct FftEngine {
    n: usize,
    log_n: u32,
    reversed: Vec<usize>,
    /// `twiddle[stage][k] = e^(2*pi*i*k / 2^(stage+1))`
    twiddle: Vec<Vec<Complex>>,
}

impl FftEngine {
    /// Builds the tables for size `n`, which has to be a power of two.
    pub fn new(n: usize) -> Result<Self, OceanError> {
        if !n.is_power_of_two() {
            return Err(OceanError::NotPowerOfTwo(n));
        }

        let log_n = n.trailing_zeros();
        let reversed = (0..n).map(|i| reverse_bits(i, log_n)).collect();

        let twiddle = (0..log_n)
            .map(|stage| {
                let half = 1usize << stage;
                let size = (half * 2) as f32;
                (0..half)
                    .map(|k| Complex::euler(TAU * k as f32 / size))
                    .collect()
            })
            .collect();

        debug!("fft tables built for N = {} ({} stages)", n, log_n);

        Ok(Self {
            n,
            log_n,
            reversed,
            twiddle,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn reversed(&self) -> &[usize] {
        &self.reversed
    }

    pub fn twiddle(&self) -> &[Vec<Complex>] {
        &self.twiddle
    }

    /// Scratch space sized for this engine.
    pub fn scratch(&self) -> PingPong {
        PingPong::new(self.n)
    }

    /// Transforms the primitive behind `input` and writes the result through
    /// `output`.
    pub fn fft<I, O>(
        &self,
        input: &StridedView<I>,
        output: &mut StridedView<O>,
        vertical: bool,
        scratch: &mut PingPong,
    ) where
        I: AsRef<[Complex]>,
        O: AsRef<[Complex]> + AsMut<[Complex]>,
    {
        self.load(|i| input.get(i), scratch);
        self.butterflies(scratch, vertical);
        self.store(output, scratch);
    }

    /// Transforms the primitive behind `view` in place.
    pub fn fft_in_place<B>(&self, view: &mut StridedView<B>, vertical: bool, scratch: &mut PingPong)
    where
        B: AsRef<[Complex]> + AsMut<[Complex]>,
    {
        self.load(|i| view.get(i), scratch);
        self.butterflies(scratch, vertical);
        self.store(view, scratch);
    }

    fn load(&self, read: impl Fn(usize) -> Complex, scratch: &mut PingPong) {
        assert_eq!(scratch.active().len(), self.n, "scratch does not match the engine size");
        let target = scratch.active_mut();
        for (slot, &source) in target.iter_mut().zip(&self.reversed) {
            *slot = read(source);
        }
    }

    fn store<B>(&self, output: &mut StridedView<B>, scratch: &PingPong)
    where
        B: AsRef<[Complex]> + AsMut<[Complex]>,
    {
        for (i, &value) in scratch.active().iter().enumerate() {
            output.set(i, value);
        }
    }

    /// Runs all stages on the bit reversed data in `scratch` and reorders the
    /// result for centered frequencies.
    fn butterflies(&self, scratch: &mut PingPong, vertical: bool) {
        let n = self.n;
        let mut size = 2;
        for stage in 0..self.log_n as usize {
            let half = size / 2;
            let twiddle = &self.twiddle[stage];
            let (previous, current) = scratch.flip();

            for group in (0..n).step_by(size) {
                for k in 0..half {
                    let even = previous[group + k];
                    let odd = previous[group + half + k] * twiddle[k];
                    current[group + k] = even + odd;
                    current[group + half + k] = even - odd;
                }
            }
            size <<= 1;
        }

        let result = scratch.active_mut();
        let half = n / 2;
        for k in 0..half {
            result.swap(k, k + half);
        }
        if vertical {
            for k in 1..half {
                result.swap(k, n - k);
            }
        }
    }
}

fn reverse_bits(i: usize, bits: u32) -> usize {
    if bits == 0 {
        return 0;
    }
    i.reverse_bits() >> (usize::BITS - bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn signal(n: usize) -> Vec<Complex> {
        (0..n)
            .map(|i| Complex::new((i as f32 * 0.7).sin() + 0.25 * i as f32, (i as f32 * 1.3).cos()))
            .collect()
    }

    /// Direct evaluation of what `fft` produces for centered indices.
    fn centered_dft(input: &[Complex], vertical: bool) -> Vec<Complex> {
        let n = input.len();
        let sign = if vertical { -1.0 } else { 1.0 };
        (0..n)
            .map(|k| {
                input
                    .iter()
                    .enumerate()
                    .map(|(j, &value)| {
                        let alternate = if j % 2 == 0 { 1.0 } else { -1.0 };
                        value * alternate * Complex::euler(sign * 2.0 * PI * (k * j) as f32 / n as f32)
                    })
                    .sum()
            })
            .collect()
    }

    fn assert_close(a: &[Complex], b: &[Complex], tolerance: f32) {
        assert_eq!(a.len(), b.len());
        for (i, (x, y)) in a.iter().zip(b).enumerate() {
            assert!((x - y).norm() < tolerance, "element {}: {} != {}", i, x, y);
        }
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        assert_eq!(FftEngine::new(10).unwrap_err(), OceanError::NotPowerOfTwo(10));
        assert_eq!(FftEngine::new(0).unwrap_err(), OceanError::NotPowerOfTwo(0));
        assert!(FftEngine::new(16).is_ok());
    }

    #[test]
    fn test_tables() {
        let engine = FftEngine::new(8).unwrap();
        assert_eq!(engine.reversed(), &[0, 4, 2, 6, 1, 5, 3, 7]);

        let lengths: Vec<usize> = engine.twiddle().iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![1, 2, 4]);
        assert!((engine.twiddle()[1][1] - Complex::new(0.0, 1.0)).norm() < 1e-6);

        let single = FftEngine::new(1).unwrap();
        assert_eq!(single.reversed(), &[0]);
        assert!(single.twiddle().is_empty());
    }

    #[test]
    fn test_matches_direct_transform() {
        for n in [2, 4, 8, 32] {
            let engine = FftEngine::new(n).unwrap();
            let mut scratch = engine.scratch();
            let data = signal(n);

            for vertical in [false, true] {
                let mut result = vec![Complex::new(0.0, 0.0); n];
                let input = StridedView::row(data.as_slice(), 0, n).unwrap();
                let mut output = StridedView::row(result.as_mut_slice(), 0, n).unwrap();
                engine.fft(&input, &mut output, vertical, &mut scratch);

                assert_close(&result, &centered_dft(&data, vertical), 1e-3 * n as f32);
            }
        }
    }

    #[test]
    fn test_matches_rustfft() {
        let n = 64;
        let engine = FftEngine::new(n).unwrap();
        let mut scratch = engine.scratch();
        let data = signal(n);

        let mut ours = data.clone();
        let mut view = StridedView::row(ours.as_mut_slice(), 0, n).unwrap();
        engine.fft_in_place(&mut view, false, &mut scratch);

        // centered output k is the plain inverse DFT at (k + N/2) mod N
        let mut planner = rustfft::FftPlanner::<f32>::new();
        let mut reference = data.clone();
        planner.plan_fft_inverse(n).process(&mut reference);
        reference.rotate_left(n / 2);

        assert_close(&ours, &reference, 1e-2);
    }

    #[test]
    fn test_strided_views_walk_rows_and_columns() {
        let data: Vec<Complex> = (0..16).map(|i| Complex::new(i as f32, 0.0)).collect();

        let row = StridedView::row(data.as_slice(), 1, 4).unwrap();
        assert_eq!(row.len(), 4);
        assert_eq!(row.get(0).re, 4.0);
        assert_eq!(row.get(3).re, 7.0);

        let column = StridedView::column(data.as_slice(), 2, 4).unwrap();
        assert_eq!(column.get(0).re, 2.0);
        assert_eq!(column.get(3).re, 14.0);

        assert_eq!(
            StridedView::row(data.as_slice(), 4, 4).unwrap_err(),
            OceanError::PrimitiveOutOfRange { primitive: 4, count: 4, len: 16 }
        );
        assert!(StridedView::column(data.as_slice(), 4, 4).is_err());
        assert!(StridedView::column(&data[..12], 2, 4).is_err());
    }

    #[test]
    #[should_panic]
    fn test_view_access_is_bounds_checked() {
        let data = vec![Complex::new(0.0, 0.0); 16];
        let view = StridedView::row(data.as_slice(), 0, 4).unwrap();
        view.get(4);
    }

    #[test]
    fn test_column_pass_writes_only_its_column() {
        let n = 8;
        let engine = FftEngine::new(n).unwrap();
        let mut scratch = engine.scratch();
        let mut data: Vec<Complex> = signal(n * n);
        let before = data.clone();

        let mut view = StridedView::column(data.as_mut_slice(), 3, n).unwrap();
        engine.fft_in_place(&mut view, true, &mut scratch);

        let column: Vec<Complex> = (0..n).map(|z| before[z * n + 3]).collect();
        let expected = centered_dft(&column, true);
        for z in 0..n {
            for x in 0..n {
                let index = z * n + x;
                if x == 3 {
                    assert!((data[index] - expected[z]).norm() < 1e-3);
                } else {
                    assert_eq!(data[index], before[index]);
                }
            }
        }
    }
}
