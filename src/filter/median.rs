//! Median filtering over block, disc and cross neighborhoods.

use crate::filter::select::select_kth;
use crate::filter::FilterOptions;
use crate::image::{Extents, Volume};
use crate::kernel::{KernelShape, Neighborhood};
use crate::trace::trace_span;
use crate::util::VoxFiltResult;

/// Replaces every voxel by the median of its wrapped neighborhood.
///
/// `kernel` gives the neighborhood extents; they must be odd and no larger
/// than the image, and a disc kernel must be equally sized on every active
/// axis. The median is the element of rank `ceil(count / 2)`.
pub fn median_filter(image: &Volume, kernel: Extents, shape: KernelShape) -> VoxFiltResult<Volume> {
    median_filter_with(image, kernel, shape, &FilterOptions::default())
}

/// Median filtering with explicit execution options.
#[cfg_attr(not(any(feature = "rayon", feature = "tracing")), allow(unused_variables))]
pub fn median_filter_with(
    image: &Volume,
    kernel: Extents,
    shape: KernelShape,
    opts: &FilterOptions,
) -> VoxFiltResult<Volume> {
    let hood = Neighborhood::new(image.extents(), kernel, shape)?;
    let e = image.extents();
    let _span = trace_span!(
        "median_filter",
        nx = e.nx,
        ny = e.ny,
        nz = e.nz,
        shape = shape.as_str(),
        count = hood.len(),
        parallel = opts.parallel
    )
    .entered();

    #[cfg(feature = "rayon")]
    if opts.parallel {
        return Ok(crate::filter::rayon::median_par(image, &hood));
    }

    let mut result = Volume::zeros_like(e);
    let out = result.as_mut_slice();
    let mut buf = hood.buffer();
    let rank = hood.len().div_ceil(2);
    let mut idx = 0;
    for z in 0..e.nz {
        for y in 0..e.ny {
            for x in 0..e.nx {
                hood.gather(image, [x, y, z], &mut buf);
                out[idx] = select_kth(rank, &mut buf);
                idx += 1;
            }
        }
    }
    Ok(result)
}
