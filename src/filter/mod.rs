//! Real-space filters: convolution and median filtering.
//!
//! Both filters treat the image as a torus. Convolution splits its output into
//! an interior box and a wrapped boundary shell; median filtering wraps every
//! neighborhood lookup since selection dominates its cost.

pub mod convolve;
pub mod median;
pub mod select;

#[cfg(feature = "rayon")]
pub mod rayon;

pub use convolve::{convolve, convolve_circulant, convolve_with};
pub use median::{median_filter, median_filter_with};
pub use select::{median_in_place, select_kth};

/// Execution options shared by the filters.
#[derive(Clone, Debug, Default)]
pub struct FilterOptions {
    /// Compute output rows in parallel when the `rayon` feature is enabled.
    /// Ignored otherwise; results are identical either way.
    pub parallel: bool,
}
