//! Rayon-parallel filters (feature-gated).
//!
//! Output x-rows are distributed across threads. Each voxel runs the same
//! per-voxel routine as the sequential path, so results are bit-identical.

use crate::filter::convolve::{axis_splits, sum_circulant, sum_interior};
use crate::filter::select::select_kth;
use crate::image::Volume;
use crate::kernel::{CenteredKernel, Neighborhood};
use rayon::prelude::*;

/// Row-parallel convolution; interior voxels skip the wrap arithmetic.
pub(crate) fn convolve_par(image: &Volume, kernel: &CenteredKernel<'_>) -> Volume {
    let e = image.extents();
    let axes = axis_splits(e, kernel);
    let mut result = Volume::zeros_like(e);
    result
        .as_mut_slice()
        .par_chunks_mut(e.nx)
        .enumerate()
        .for_each(|(row, out_row)| {
            let y = row % e.ny;
            let z = row / e.ny;
            let row_boundary = axes[1].is_boundary(y) || axes[2].is_boundary(z);
            for (x, out) in out_row.iter_mut().enumerate() {
                let p = [x, y, z];
                *out = if row_boundary || axes[0].is_boundary(x) {
                    sum_circulant(image, kernel, p)
                } else {
                    sum_interior(image, kernel, p)
                };
            }
        });
    result
}

/// Row-parallel median filter; each row owns its neighborhood buffer.
pub(crate) fn median_par(image: &Volume, hood: &Neighborhood) -> Volume {
    let e = image.extents();
    let rank = hood.len().div_ceil(2);
    let mut result = Volume::zeros_like(e);
    result
        .as_mut_slice()
        .par_chunks_mut(e.nx)
        .enumerate()
        .for_each_init(
            || hood.buffer(),
            |buf, (row, out_row)| {
                let y = row % e.ny;
                let z = row / e.ny;
                for (x, out) in out_row.iter_mut().enumerate() {
                    hood.gather(image, [x, y, z], buf);
                    *out = select_kth(rank, buf);
                }
            },
        );
    result
}
