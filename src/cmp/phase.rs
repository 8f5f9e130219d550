//! Amplitude-weighted mean Fourier phase difference.

use super::{Comparator, ParamSchema, Params};
use crate::fourier::Spectrum;
use crate::image::Volume;
use crate::util::math::angle_sub_2pi;
use crate::util::{VoxFiltError, VoxFiltResult};

/// Mean phase difference in radians, weighted by the amplitudes of `with`.
///
/// Only 1D and 2D images are supported.
#[derive(Clone, Debug, Default)]
pub struct PhaseCmp {
    params: Params,
}

impl PhaseCmp {
    pub const NAME: &'static str = "phase";

    pub fn new() -> Self {
        Self::default()
    }
}

impl Comparator for PhaseCmp {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Mean phase difference"
    }

    fn param_types(&self) -> ParamSchema {
        ParamSchema::new()
    }

    fn params(&self) -> &Params {
        &self.params
    }

    fn set_params(&mut self, params: Params) {
        self.params = params;
    }

    fn evaluate(&self, image: &Volume, with: &Volume) -> VoxFiltResult<f32> {
        if image.nz() > 1 {
            return Err(VoxFiltError::invalid_argument(
                "phase comparison supports 1D and 2D images only",
            ));
        }
        let a = Spectrum::forward(image);
        let b = Spectrum::forward(with);
        let fa = a.as_slice();
        let mut sum = 0.0f64;
        let mut norm = f32::MIN_POSITIVE as f64;
        b.for_each_half(|idx, _, cb| {
            let w = cb.norm() as f64;
            sum += w * angle_sub_2pi(fa[idx].arg(), cb.arg()) as f64;
            norm += w;
        });
        Ok((sum / norm) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::PhaseCmp;
    use crate::cmp::Comparator;
    use crate::image::Volume;
    use crate::util::VoxFiltError;

    #[test]
    fn identical_images_have_zero_phase_error() {
        let a = Volume::from_fn(8, 6, 1, |x, y, _| ((x * 5 + y * 3) % 7) as f32).unwrap();
        assert!(PhaseCmp::new().score(&a, &a).unwrap().abs() < 1e-6);
    }

    #[test]
    fn negated_image_is_half_a_turn_away() {
        let a = Volume::from_fn(8, 1, 1, |x, _, _| ((x * 3) % 5) as f32 - 2.0).unwrap();
        let b = Volume::from_fn(8, 1, 1, |x, _, _| 2.0 - ((x * 3) % 5) as f32).unwrap();
        let score = PhaseCmp::new().score(&a, &b).unwrap();
        assert!((score - std::f32::consts::PI).abs() < 1e-3, "score {score}");
    }

    #[test]
    fn volumes_are_rejected() {
        let a = Volume::zeros(4, 4, 4).unwrap();
        assert!(matches!(
            PhaseCmp::new().score(&a, &a),
            Err(VoxFiltError::InvalidArgument { .. })
        ));
    }
}
