//! Negated dot product.

use super::{Comparator, ParamSchema, ParamType, Params};
use crate::image::Volume;
use crate::util::VoxFiltResult;

/// `-sum(a * b)` by default so that smaller means more similar.
///
/// `negative = 0` returns the plain dot product; `evenonly` restricts the sum
/// to even flat indices.
#[derive(Clone, Debug, Default)]
pub struct DotCmp {
    params: Params,
}

impl DotCmp {
    pub const NAME: &'static str = "dot";

    pub fn new() -> Self {
        Self::default()
    }
}

impl Comparator for DotCmp {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Dot product * -1"
    }

    fn param_types(&self) -> ParamSchema {
        ParamSchema::new()
            .put(
                "negative",
                ParamType::Int,
                "If set, returns -1 * dot product. Set by default so smaller is better",
            )
            .put(
                "evenonly",
                ParamType::Int,
                "If set, consider only even numbered pixels.",
            )
    }

    fn params(&self) -> &Params {
        &self.params
    }

    fn set_params(&mut self, params: Params) {
        self.params = params;
    }

    fn evaluate(&self, image: &Volume, with: &Volume) -> VoxFiltResult<f32> {
        let negative = self.params.int_or("negative", 1)? != 0;
        let step = if self.params.flag("evenonly")? { 2 } else { 1 };
        let sum: f64 = image
            .as_slice()
            .iter()
            .zip(with.as_slice())
            .step_by(step)
            .map(|(&a, &b)| a as f64 * b as f64)
            .sum();
        let sum = sum as f32;
        Ok(if negative { -sum } else { sum })
    }
}

#[cfg(test)]
mod tests {
    use super::DotCmp;
    use crate::cmp::{Comparator, Params};
    use crate::image::Volume;

    #[test]
    fn sign_and_even_selection() {
        let a = Volume::from_vec(vec![1.0, 2.0, 3.0, 4.0], 4, 1, 1).unwrap();
        let b = Volume::filled(4, 1, 1, 1.0).unwrap();
        let mut cmp = DotCmp::new();
        assert_eq!(cmp.score(&a, &b).unwrap(), -10.0);

        cmp.set_params(Params::new().with("negative", 0i64));
        assert_eq!(cmp.score(&a, &b).unwrap(), 10.0);

        cmp.set_params(Params::new().with("evenonly", 1i64));
        assert_eq!(cmp.score(&a, &b).unwrap(), -4.0);
    }
}
