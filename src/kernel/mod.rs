//! Stencil geometry: kernel shapes, centered kernels and neighborhoods.

use crate::image::{Extents, Volume};
use crate::util::{VoxFiltError, VoxFiltResult};
use std::fmt;
use std::str::FromStr;

pub mod neighborhood;

pub use neighborhood::Neighborhood;

/// Footprint of a median-filter neighborhood.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KernelShape {
    /// Every sample of the rectangular kernel box.
    Block,
    /// Samples within the inscribed disc (2D) or sphere (3D).
    Disc,
    /// Samples on the coordinate axes through the center.
    Cross,
}

impl KernelShape {
    /// All supported shapes.
    pub const ALL: [KernelShape; 3] = [KernelShape::Block, KernelShape::Disc, KernelShape::Cross];

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            KernelShape::Block => "block",
            KernelShape::Disc => "disc",
            KernelShape::Cross => "cross",
        }
    }
}

impl fmt::Display for KernelShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KernelShape {
    type Err = VoxFiltError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "block" | "box" => Ok(KernelShape::Block),
            "disc" | "circular" | "sphere" => Ok(KernelShape::Disc),
            "cross" | "plus" => Ok(KernelShape::Cross),
            other => Err(VoxFiltError::invalid_argument(format!(
                "unsupported kernel shape '{other}'"
            ))),
        }
    }
}

/// Legacy numeric shape tags: 1 = block, 2 = circular, 3 = cross.
impl TryFrom<i64> for KernelShape {
    type Error = VoxFiltError;

    fn try_from(tag: i64) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(KernelShape::Block),
            2 => Ok(KernelShape::Disc),
            3 => Ok(KernelShape::Cross),
            other => Err(VoxFiltError::invalid_argument(format!(
                "unsupported kernel shape tag {other}"
            ))),
        }
    }
}

/// Read-only view of an odd-sized kernel addressed by offsets from its center.
///
/// Offsets along each axis run over `-h..=h` with `h = (n - 1) / 2`. The
/// kernel volume is never modified; the centering lives in this value.
#[derive(Clone, Copy)]
pub struct CenteredKernel<'a> {
    kernel: &'a Volume,
    half: [isize; 3],
}

impl<'a> CenteredKernel<'a> {
    /// Wraps a kernel whose extents are all odd.
    pub fn new(kernel: &'a Volume) -> VoxFiltResult<Self> {
        let extents = kernel.extents();
        if !extents.all_odd() {
            return Err(VoxFiltError::DimensionMismatch {
                reason: "kernel extents must be odd",
                left: extents,
                right: extents,
            });
        }
        let [hx, hy, hz] = extents.half_widths();
        Ok(Self {
            kernel,
            half: [hx as isize, hy as isize, hz as isize],
        })
    }

    /// Half-widths along x, y and z.
    pub fn half(&self) -> [isize; 3] {
        self.half
    }

    /// Kernel extents.
    pub fn extents(&self) -> Extents {
        self.kernel.extents()
    }

    /// Weight at offset `(kx, ky, kz)` from the center.
    #[inline]
    pub fn at(&self, kx: isize, ky: isize, kz: isize) -> f32 {
        let [hx, hy, hz] = self.half;
        self.kernel.as_slice()[self.kernel.offset(
            (kx + hx) as usize,
            (ky + hy) as usize,
            (kz + hz) as usize,
        )]
    }

    /// Kernel x-row at offsets `(ky, kz)`, ordered from `kx = -hx` to `kx = +hx`.
    #[inline]
    pub(crate) fn row(&self, ky: isize, kz: isize) -> &'a [f32] {
        let [_, hy, hz] = self.half;
        let nx = self.kernel.nx();
        let start = self.kernel.offset(0, (ky + hy) as usize, (kz + hz) as usize);
        &self.kernel.as_slice()[start..start + nx]
    }
}
