//! Dense sample volumes.
//!
//! `Volume` is an owned rank-≤3 grid of `f32` samples stored x-fastest, so the
//! flat index of `(x, y, z)` is `x + nx * (y + ny * z)`. Unused trailing
//! dimensions have extent 1; a 2D image is a volume with `nz == 1` and a 1D
//! signal additionally has `ny == 1`.

use crate::util::{VoxFiltError, VoxFiltResult};
use std::fmt;

#[cfg(feature = "image-io")]
pub mod io;

/// Extents of a volume along x, y and z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Extents {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl Extents {
    /// Creates extents, rejecting any zero dimension.
    pub fn new(nx: usize, ny: usize, nz: usize) -> VoxFiltResult<Self> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(VoxFiltError::InvalidExtents { nx, ny, nz });
        }
        nx.checked_mul(ny)
            .and_then(|v| v.checked_mul(nz))
            .ok_or(VoxFiltError::InvalidExtents { nx, ny, nz })?;
        Ok(Self { nx, ny, nz })
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Always false; extents are at least 1 on every axis.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Extents as an `[nx, ny, nz]` array.
    pub fn as_array(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// True if every extent is at most the matching extent of `outer`.
    pub fn fits_within(&self, outer: &Extents) -> bool {
        self.nx <= outer.nx && self.ny <= outer.ny && self.nz <= outer.nz
    }

    /// True if every extent is odd.
    pub fn all_odd(&self) -> bool {
        self.nx % 2 == 1 && self.ny % 2 == 1 && self.nz % 2 == 1
    }

    /// Effective dimensionality used for neighborhood enumeration.
    ///
    /// Starts at 3, drops to 2 when `nz == 1`, and to 1 when `ny == 1` too.
    pub fn dimensionality(&self) -> usize {
        let mut dim = 3;
        if self.nz == 1 {
            dim -= 1;
            if self.ny == 1 {
                dim -= 1;
            }
        }
        dim
    }

    /// Half-widths `(n - 1) / 2` of a centered stencil with these extents.
    pub fn half_widths(&self) -> [usize; 3] {
        [(self.nx - 1) / 2, (self.ny - 1) / 2, (self.nz - 1) / 2]
    }
}

impl fmt::Display for Extents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.nx, self.ny, self.nz)
    }
}

/// Owned dense volume of `f32` samples.
#[derive(Clone, Debug, PartialEq)]
pub struct Volume {
    data: Vec<f32>,
    extents: Extents,
}

impl Volume {
    /// Allocates a zero-filled volume.
    pub fn zeros(nx: usize, ny: usize, nz: usize) -> VoxFiltResult<Self> {
        Self::filled(nx, ny, nz, 0.0)
    }

    /// Allocates a volume with every sample set to `value`.
    pub fn filled(nx: usize, ny: usize, nz: usize, value: f32) -> VoxFiltResult<Self> {
        let extents = Extents::new(nx, ny, nz)?;
        Ok(Self {
            data: vec![value; extents.len()],
            extents,
        })
    }

    /// Wraps an x-fastest sample buffer.
    pub fn from_vec(data: Vec<f32>, nx: usize, ny: usize, nz: usize) -> VoxFiltResult<Self> {
        let extents = Extents::new(nx, ny, nz)?;
        if data.len() != extents.len() {
            return Err(VoxFiltError::BufferSize {
                needed: extents.len(),
                got: data.len(),
            });
        }
        Ok(Self { data, extents })
    }

    /// Builds a volume by evaluating `f(x, y, z)` at every sample.
    pub fn from_fn<F>(nx: usize, ny: usize, nz: usize, mut f: F) -> VoxFiltResult<Self>
    where
        F: FnMut(usize, usize, usize) -> f32,
    {
        let extents = Extents::new(nx, ny, nz)?;
        let mut data = Vec::with_capacity(extents.len());
        for z in 0..nz {
            for y in 0..ny {
                for x in 0..nx {
                    data.push(f(x, y, z));
                }
            }
        }
        Ok(Self { data, extents })
    }

    pub(crate) fn zeros_like(extents: Extents) -> Self {
        Self {
            data: vec![0.0; extents.len()],
            extents,
        }
    }

    /// Returns the volume extents.
    pub fn extents(&self) -> Extents {
        self.extents
    }

    pub fn nx(&self) -> usize {
        self.extents.nx
    }

    pub fn ny(&self) -> usize {
        self.extents.ny
    }

    pub fn nz(&self) -> usize {
        self.extents.nz
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the volume holds no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the samples in x-fastest order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the samples mutably in x-fastest order.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the volume and returns its sample buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    #[inline]
    pub(crate) fn offset(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.extents.nx * (y + self.extents.ny * z)
    }

    /// Returns the sample at `(x, y, z)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        if x >= self.extents.nx || y >= self.extents.ny || z >= self.extents.nz {
            return None;
        }
        Some(self.data[self.offset(x, y, z)])
    }

    /// Writes the sample at `(x, y, z)`.
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: f32) -> VoxFiltResult<()> {
        if x >= self.extents.nx || y >= self.extents.ny || z >= self.extents.nz {
            return Err(VoxFiltError::invalid_argument(format!(
                "coordinate ({x}, {y}, {z}) outside {}",
                self.extents
            )));
        }
        let idx = self.offset(x, y, z);
        self.data[idx] = value;
        Ok(())
    }

    /// Returns the sample at signed coordinates wrapped toroidally.
    #[inline]
    pub fn get_wrapped(&self, x: isize, y: isize, z: isize) -> f32 {
        use crate::util::math::wrap_index;
        let e = self.extents;
        self.data[self.offset(
            wrap_index(x, e.nx),
            wrap_index(y, e.ny),
            wrap_index(z, e.nz),
        )]
    }

    /// Returns the contiguous x-row at `(y, z)`.
    pub fn row(&self, y: usize, z: usize) -> Option<&[f32]> {
        if y >= self.extents.ny || z >= self.extents.nz {
            return None;
        }
        let start = self.offset(0, y, z);
        self.data.get(start..start + self.extents.nx)
    }

    /// Sets every sample to zero.
    pub fn to_zero(&mut self) {
        self.data.fill(0.0);
    }

    /// Minimum and maximum sample values.
    pub fn min_max(&self) -> (f32, f32) {
        min_max(&self.data)
    }
}

/// Minimum and maximum of `values`; `(inf, -inf)` when empty.
pub(crate) fn min_max(values: &[f32]) -> (f32, f32) {
    values
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
