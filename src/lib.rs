//! voxfilt is a CPU volumetric filtering and image comparison library.
//!
//! It provides real-space convolution and median filtering of 1D/2D/3D
//! sample grids with periodic boundaries, plus a registry of comparators that
//! score the similarity of two equal-sized images. Parallel filtering is
//! available via the `rayon` feature, grayscale image I/O via `image-io` and
//! spans/events via `tracing`.
//!
//! ```
//! use voxfilt::{median_filter, Extents, KernelShape, Volume};
//!
//! # fn main() -> voxfilt::VoxFiltResult<()> {
//! let image = Volume::from_vec(vec![1.0, 2.0, 3.0, 100.0, 5.0, 6.0, 7.0], 7, 1, 1)?;
//! let filtered = median_filter(&image, Extents::new(3, 1, 1)?, KernelShape::Block)?;
//! assert_eq!(filtered.get(3, 0, 0), Some(5.0));
//! # Ok(())
//! # }
//! ```

pub mod cmp;
pub mod filter;
pub mod fourier;
pub mod image;
pub mod kernel;
pub mod lowlevel;
mod trace;
pub mod util;

pub use cmp::{
    compare, create_comparator, create_comparator_with, dump_comparators, parse_modifier,
    register_builtin_comparators, Comparator, ComparatorRegistry, Params,
};
pub use filter::{
    convolve, convolve_with, median_filter, median_filter_with, FilterOptions,
};
pub use image::{Extents, Volume};
pub use kernel::KernelShape;
pub use util::{VoxFiltError, VoxFiltResult};
