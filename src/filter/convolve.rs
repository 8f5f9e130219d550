//! Real-space convolution with circulant boundary conditions.
//!
//! Output voxel `p` receives `sum_k K(k) * f(p - k)` where `k` runs over the
//! centered kernel offsets and `f` wraps toroidally. The output domain is split
//! into an interior box, where every tap lands inside the image and plain
//! offsets are used, and a boundary shell evaluated with wrapped lookups:
//!
//! - the corner block: every combination of boundary coordinates on the active
//!   axes, enumerated backwards from the wrap point (`h - 1, ..., 0, n - 1, ...,
//!   n - h`);
//! - six stripes, the low and high boundary slabs of each axis. Stripes of the
//!   first active axis skip the corner block; stripes of later axes keep the
//!   earlier active axes inside the interior range.
//!
//! Every voxel is visited exactly once. An axis is active when the kernel half
//! width along it is non-zero; degenerate image axes are never active.

use crate::filter::FilterOptions;
use crate::image::{Extents, Volume};
use crate::kernel::CenteredKernel;
use crate::trace::{trace_event, trace_span};
use crate::util::math::wrap_index;
use crate::util::{VoxFiltError, VoxFiltResult};
use std::ops::Range;

/// Region of the output domain a voxel was evaluated in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Region {
    Interior,
    Corner,
    Stripe,
}

/// Interior/boundary split of one axis for a kernel half width `h`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AxisSplit {
    n: usize,
    h: usize,
}

impl AxisSplit {
    pub(crate) fn new(n: usize, h: usize) -> Self {
        debug_assert!(2 * h < n);
        Self { n, h }
    }

    fn is_active(&self) -> bool {
        self.h > 0
    }

    fn full(&self) -> Range<usize> {
        0..self.n
    }

    pub(crate) fn interior(&self) -> Range<usize> {
        self.h..self.n - self.h
    }

    fn low(&self) -> Range<usize> {
        0..self.h
    }

    fn high(&self) -> Range<usize> {
        self.n - self.h..self.n
    }

    pub(crate) fn is_boundary(&self, i: usize) -> bool {
        i < self.h || i >= self.n - self.h
    }

    /// Corner coordinates: the boundary set walked backwards from the wrap
    /// point, or the full axis when the axis is flat.
    fn corner(&self) -> Vec<usize> {
        if !self.is_active() {
            return self.full().collect();
        }
        let start = self.h as isize - 1;
        (0..2 * self.h as isize)
            .map(|c| wrap_index(start - c, self.n))
            .collect()
    }
}

pub(crate) fn axis_splits(image: Extents, kernel: &CenteredKernel<'_>) -> [AxisSplit; 3] {
    let [hx, hy, hz] = kernel.half();
    [
        AxisSplit::new(image.nx, hx as usize),
        AxisSplit::new(image.ny, hy as usize),
        AxisSplit::new(image.nz, hz as usize),
    ]
}

/// Calls `visit` once for every voxel, tagged with the region it falls in.
pub(crate) fn visit_regions<F>(axes: &[AxisSplit; 3], mut visit: F)
where
    F: FnMut(Region, [usize; 3]),
{
    let [ax, ay, az] = *axes;
    for z in az.interior() {
        for y in ay.interior() {
            for x in ax.interior() {
                visit(Region::Interior, [x, y, z]);
            }
        }
    }

    let Some(first_active) = axes.iter().position(AxisSplit::is_active) else {
        return;
    };

    let (cx, cy, cz) = (ax.corner(), ay.corner(), az.corner());
    for &z in &cz {
        for &y in &cy {
            for &x in &cx {
                visit(Region::Corner, [x, y, z]);
            }
        }
    }

    let in_corner = |p: [usize; 3]| {
        axes.iter()
            .zip(p)
            .all(|(axis, c)| !axis.is_active() || axis.is_boundary(c))
    };
    for (axis_idx, axis) in axes.iter().enumerate() {
        if !axis.is_active() {
            continue;
        }
        for side in [axis.low(), axis.high()] {
            let ranges: [Range<usize>; 3] = std::array::from_fn(|j| {
                if j == axis_idx {
                    side.clone()
                } else if j < axis_idx {
                    axes[j].interior()
                } else {
                    axes[j].full()
                }
            });
            for z in ranges[2].clone() {
                for y in ranges[1].clone() {
                    for x in ranges[0].clone() {
                        let p = [x, y, z];
                        if axis_idx == first_active && in_corner(p) {
                            continue;
                        }
                        visit(Region::Stripe, p);
                    }
                }
            }
        }
    }
}

/// Kernel sum at an interior voxel; no tap leaves the image.
#[inline]
pub(crate) fn sum_interior(image: &Volume, kernel: &CenteredKernel<'_>, p: [usize; 3]) -> f32 {
    let [hx, hy, hz] = kernel.half();
    let nx = image.nx();
    let data = image.as_slice();
    let [x, y, z] = p.map(|c| c as isize);
    let base_x = (x + hx) as usize;
    let mut sum = 0.0f32;
    for kz in -hz..=hz {
        let jz = (z - kz) as usize;
        for ky in -hy..=hy {
            let jy = (y - ky) as usize;
            let start = image.offset(0, jy, jz);
            let img_row = &data[start..start + nx];
            for (t, &w) in kernel.row(ky, kz).iter().enumerate() {
                sum += w * img_row[base_x - t];
            }
        }
    }
    sum
}

/// Kernel sum at any voxel with circulant wrap on every tap.
#[inline]
pub(crate) fn sum_circulant(image: &Volume, kernel: &CenteredKernel<'_>, p: [usize; 3]) -> f32 {
    let [hx, hy, hz] = kernel.half();
    let e = image.extents();
    let data = image.as_slice();
    let [x, y, z] = p.map(|c| c as isize);
    let mut sum = 0.0f32;
    for kz in -hz..=hz {
        let jz = wrap_index(z - kz, e.nz);
        for ky in -hy..=hy {
            let jy = wrap_index(y - ky, e.ny);
            let start = image.offset(0, jy, jz);
            let img_row = &data[start..start + e.nx];
            for (t, &w) in kernel.row(ky, kz).iter().enumerate() {
                let jx = wrap_index(x + hx - t as isize, e.nx);
                sum += w * img_row[jx];
            }
        }
    }
    sum
}

/// Orders the operands so the second one is the kernel.
///
/// The smaller volume becomes the kernel when it fits inside the larger one on
/// every axis. Axes where both extents are 1 count as fitting either way.
fn order_operands<'a>(
    image: &'a Volume,
    kernel: &'a Volume,
) -> VoxFiltResult<(&'a Volume, &'a Volume)> {
    let (ei, ek) = (image.extents(), kernel.extents());
    if ek.fits_within(&ei) {
        return Ok((image, kernel));
    }
    let image_smaller = ei
        .as_array()
        .into_iter()
        .zip(ek.as_array())
        .all(|(ni, nk)| ni < nk || (ni == 1 && nk == 1));
    if image_smaller {
        return Ok((kernel, image));
    }
    Err(VoxFiltError::DimensionMismatch {
        reason: "input images are incommensurate",
        left: ei,
        right: ek,
    })
}

fn prepare<'a>(
    image: &'a Volume,
    kernel: &'a Volume,
) -> VoxFiltResult<(&'a Volume, CenteredKernel<'a>)> {
    let (image, kernel) = order_operands(image, kernel)?;
    if !kernel.extents().all_odd() {
        return Err(VoxFiltError::DimensionMismatch {
            reason: "real-space convolution kernel must have odd extents",
            left: image.extents(),
            right: kernel.extents(),
        });
    }
    Ok((image, CenteredKernel::new(kernel)?))
}

/// Convolves `image` with `kernel` under circulant boundary conditions.
///
/// If `image` is the smaller operand on every axis the roles are swapped.
/// Fails with `DimensionMismatch` for incommensurate extents or an even
/// kernel extent.
pub fn convolve(image: &Volume, kernel: &Volume) -> VoxFiltResult<Volume> {
    convolve_with(image, kernel, &FilterOptions::default())
}

/// Convolution with explicit execution options.
#[cfg_attr(not(any(feature = "rayon", feature = "tracing")), allow(unused_variables))]
pub fn convolve_with(
    image: &Volume,
    kernel: &Volume,
    opts: &FilterOptions,
) -> VoxFiltResult<Volume> {
    let (image, kernel) = prepare(image, kernel)?;
    let e = image.extents();
    let k = kernel.extents();
    let _span = trace_span!(
        "convolve",
        nx = e.nx,
        ny = e.ny,
        nz = e.nz,
        kernel = k.len(),
        parallel = opts.parallel
    )
    .entered();

    #[cfg(feature = "rayon")]
    if opts.parallel {
        return Ok(crate::filter::rayon::convolve_par(image, &kernel));
    }

    Ok(convolve_split(image, &kernel))
}

fn convolve_split(image: &Volume, kernel: &CenteredKernel<'_>) -> Volume {
    let mut result = Volume::zeros_like(image.extents());
    let axes = axis_splits(image.extents(), kernel);
    let mut counts = [0usize; 3];
    {
        let out = result.as_mut_slice();
        let nx = image.nx();
        let ny = image.ny();
        visit_regions(&axes, |region, p| {
            let idx = p[0] + nx * (p[1] + ny * p[2]);
            out[idx] = match region {
                Region::Interior => {
                    counts[0] += 1;
                    sum_interior(image, kernel, p)
                }
                Region::Corner => {
                    counts[1] += 1;
                    sum_circulant(image, kernel, p)
                }
                Region::Stripe => {
                    counts[2] += 1;
                    sum_circulant(image, kernel, p)
                }
            };
        });
    }
    trace_event!(
        "convolve_regions",
        interior = counts[0],
        corner = counts[1],
        stripes = counts[2]
    );
    result
}

/// Reference convolution that wraps every tap; same preconditions as
/// [`convolve`].
pub fn convolve_circulant(image: &Volume, kernel: &Volume) -> VoxFiltResult<Volume> {
    let (image, kernel) = prepare(image, kernel)?;
    let e = image.extents();
    let mut result = Volume::zeros_like(e);
    let out = result.as_mut_slice();
    let mut idx = 0;
    for z in 0..e.nz {
        for y in 0..e.ny {
            for x in 0..e.nx {
                out[idx] = sum_circulant(image, &kernel, [x, y, z]);
                idx += 1;
            }
        }
    }
    Ok(result)
}
