//! Low-level building blocks for custom filtering pipelines.
//!
//! These expose the selection primitive, neighborhood enumeration and the
//! always-wrapping reference convolution. Most users should prefer the
//! top-level `convolve`, `median_filter` and `compare` functions.

pub use crate::cmp::validate_input_args;
pub use crate::filter::{convolve_circulant, median_in_place, select_kth};
pub use crate::fourier::Spectrum;
pub use crate::kernel::{CenteredKernel, Neighborhood};
