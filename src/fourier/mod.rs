//! Complex Fourier transforms of volumes and radial shell statistics.
//!
//! Transforms are full complex (no half-complex packing) and unnormalized in
//! the forward direction; the inverse divides by the sample count. Radial
//! statistics visit the non-redundant half-space `kx in 0..=nx/2` only.

use crate::image::{Extents, Volume};
use crate::util::math::signed_freq;
use num_complex::Complex32;
use rustfft::{Fft, FftDirection, FftPlanner};
use std::sync::Arc;

/// Frequency-domain samples of a volume, x-fastest like [`Volume`].
#[derive(Clone, Debug)]
pub struct Spectrum {
    data: Vec<Complex32>,
    extents: Extents,
}

impl Spectrum {
    /// Forward transform of a real volume.
    pub fn forward(volume: &Volume) -> Self {
        let extents = volume.extents();
        let mut data: Vec<Complex32> = volume
            .as_slice()
            .iter()
            .map(|&v| Complex32::new(v, 0.0))
            .collect();
        transform_3d(&mut data, extents, FftDirection::Forward);
        Self { data, extents }
    }

    /// Inverse transform keeping the real part, scaled by `1 / len`.
    pub fn inverse_real(&self) -> Volume {
        let mut data = self.data.clone();
        transform_3d(&mut data, self.extents, FftDirection::Inverse);
        let norm = 1.0 / data.len() as f32;
        let mut out = Volume::zeros_like(self.extents);
        for (dst, src) in out.as_mut_slice().iter_mut().zip(&data) {
            *dst = src.re * norm;
        }
        out
    }

    pub fn extents(&self) -> Extents {
        self.extents
    }

    pub fn as_slice(&self) -> &[Complex32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Complex32] {
        &mut self.data
    }

    /// Largest extent; shell radii are scaled by it.
    pub fn max_extent(&self) -> usize {
        let e = self.extents;
        e.nx.max(e.ny).max(e.nz)
    }

    /// Radial shell of bin `(kx, ky, kz)`: the normalized frequency radius
    /// scaled by the largest extent and rounded.
    pub fn shell_index(&self, k: [usize; 3]) -> usize {
        let e = self.extents.as_array();
        let r2: f32 = (0..3)
            .map(|axis| {
                let f = signed_freq(k[axis], e[axis]) as f32 / e[axis] as f32;
                f * f
            })
            .sum();
        (self.max_extent() as f32 * r2.sqrt()).round() as usize
    }

    /// Visits every bin of the half-space `kx in 0..=nx/2` with its shell.
    pub fn for_each_half<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize, Complex32),
    {
        let e = self.extents;
        for kz in 0..e.nz {
            for ky in 0..e.ny {
                let row = e.nx * (ky + e.ny * kz);
                for kx in 0..=e.nx / 2 {
                    let idx = row + kx;
                    f(idx, self.shell_index([kx, ky, kz]), self.data[idx]);
                }
            }
        }
    }

    /// Number of shells reachable by [`Spectrum::shell_index`].
    pub fn shell_count(&self) -> usize {
        // Corner bin (n/2, n/2, n/2) has the largest radius.
        let e = self.extents;
        self.shell_index([e.nx / 2, e.ny / 2, e.nz / 2]) + 1
    }

    /// Mean amplitude per radial shell over the half-space.
    pub fn radial_amplitude(&self) -> Vec<f32> {
        let shells = self.shell_count();
        let mut sum = vec![0.0f64; shells];
        let mut count = vec![0usize; shells];
        self.for_each_half(|_, r, c| {
            sum[r] += c.norm() as f64;
            count[r] += 1;
        });
        sum.iter()
            .zip(&count)
            .map(|(&s, &n)| if n == 0 { 0.0 } else { (s / n as f64) as f32 })
            .collect()
    }
}

fn transform_3d(data: &mut [Complex32], extents: Extents, direction: FftDirection) {
    let mut planner = FftPlanner::<f32>::new();
    let Extents { nx, ny, nz } = extents;

    if nx > 1 {
        let fft = planner.plan_fft(nx, direction);
        let mut scratch = scratch_for(&fft);
        for line in data.chunks_exact_mut(nx) {
            fft.process_with_scratch(line, &mut scratch);
        }
    }
    if ny > 1 {
        let fft = planner.plan_fft(ny, direction);
        let mut scratch = scratch_for(&fft);
        let mut line = vec![Complex32::default(); ny];
        for z in 0..nz {
            for x in 0..nx {
                let at = |y: usize| x + nx * (y + ny * z);
                for (y, v) in line.iter_mut().enumerate() {
                    *v = data[at(y)];
                }
                fft.process_with_scratch(&mut line, &mut scratch);
                for (y, v) in line.iter().enumerate() {
                    data[at(y)] = *v;
                }
            }
        }
    }
    if nz > 1 {
        let fft = planner.plan_fft(nz, direction);
        let mut scratch = scratch_for(&fft);
        let mut line = vec![Complex32::default(); nz];
        let plane = nx * ny;
        for xy in 0..plane {
            for (z, v) in line.iter_mut().enumerate() {
                *v = data[xy + plane * z];
            }
            fft.process_with_scratch(&mut line, &mut scratch);
            for (z, v) in line.iter().enumerate() {
                data[xy + plane * z] = *v;
            }
        }
    }
}

fn scratch_for(fft: &Arc<dyn Fft<f32>>) -> Vec<Complex32> {
    vec![Complex32::default(); fft.get_inplace_scratch_len()]
}
