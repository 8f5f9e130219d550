//! Image comparators: scalar similarity scores between two equal-sized volumes.
//!
//! Lower scores mean more similar, except `frc`, which is a quality measure
//! (higher is better). Comparators are created by name from a
//! [`ComparatorRegistry`] and configured with a [`Params`] set.
//!
//! # Example
//! ```
//! use voxfilt::cmp::{compare, register_builtin_comparators, Params};
//! use voxfilt::Volume;
//!
//! # fn main() -> voxfilt::VoxFiltResult<()> {
//! register_builtin_comparators();
//! let a = Volume::from_fn(8, 8, 1, |x, y, _| (x + y) as f32)?;
//! let score = compare("variance", Some(&a), Some(&a), &Params::new())?;
//! assert_eq!(score, 0.0);
//! # Ok(())
//! # }
//! ```

pub mod dot;
pub mod frc;
pub mod modopt;
pub mod optvariance;
pub mod params;
pub mod phase;
pub mod registry;
pub mod variance;

pub use dot::DotCmp;
pub use frc::FrcCmp;
pub use modopt::parse_modifier;
pub use optvariance::{LinearFit, OptVarianceCmp};
pub use params::{ParamSchema, ParamSpec, ParamType, ParamValue, Params};
pub use phase::PhaseCmp;
pub use registry::{
    comparator_names, compare, create_comparator, create_comparator_with, dump_comparators,
    register_builtin_comparators, ComparatorRegistry,
};
pub use variance::VarianceCmp;

use crate::image::Volume;
use crate::util::{VoxFiltError, VoxFiltResult};

/// A named similarity metric over two volumes.
pub trait Comparator {
    /// Registry key.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Parameters this comparator understands.
    fn param_types(&self) -> ParamSchema;

    fn params(&self) -> &Params;

    fn set_params(&mut self, params: Params);

    /// Computes the metric; `image` and `with` already have equal extents.
    fn evaluate(&self, image: &Volume, with: &Volume) -> VoxFiltResult<f32>;

    /// Validates the inputs and computes the metric.
    fn score(&self, image: &Volume, with: &Volume) -> VoxFiltResult<f32> {
        let (image, with) = validate_input_args(Some(image), Some(with))?;
        self.evaluate(image, with)
    }
}

/// Checks that both images are present and have identical extents.
pub fn validate_input_args<'a>(
    image: Option<&'a Volume>,
    with: Option<&'a Volume>,
) -> VoxFiltResult<(&'a Volume, &'a Volume)> {
    let image = image.ok_or(VoxFiltError::ImageAccess { which: "source" })?;
    let with = with.ok_or(VoxFiltError::ImageAccess { which: "reference" })?;
    if image.extents() != with.extents() {
        return Err(VoxFiltError::DimensionMismatch {
            reason: "images to compare must be the same size",
            left: image.extents(),
            right: with.extents(),
        });
    }
    Ok((image, with))
}
