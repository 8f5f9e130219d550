//! Real-space mean squared difference.

use super::{Comparator, ParamSchema, Params};
use crate::image::Volume;
use crate::util::VoxFiltResult;

/// `sum((a - b)^2) / n`.
#[derive(Clone, Debug, Default)]
pub struct VarianceCmp {
    params: Params,
}

impl VarianceCmp {
    pub const NAME: &'static str = "variance";

    pub fn new() -> Self {
        Self::default()
    }
}

impl Comparator for VarianceCmp {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Real-space variance sum((a - b)^2) / n."
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
        let sum: f64 = image
            .as_slice()
            .iter()
            .zip(with.as_slice())
            .map(|(&a, &b)| {
                let d = (a - b) as f64;
                d * d
            })
            .sum();
        Ok((sum / image.len() as f64) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::VarianceCmp;
    use crate::cmp::Comparator;
    use crate::image::Volume;

    #[test]
    fn constant_offset_gives_its_square() {
        let a = Volume::from_fn(5, 4, 1, |x, y, _| (x * y) as f32).unwrap();
        let b = Volume::from_fn(5, 4, 1, |x, y, _| (x * y) as f32 + 3.0).unwrap();
        let cmp = VarianceCmp::new();
        assert!((cmp.score(&a, &b).unwrap() - 9.0).abs() < 1e-6);
        assert_eq!(cmp.score(&a, &a).unwrap(), 0.0);
    }
}
