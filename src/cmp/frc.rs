//! Mean Fourier ring (shell) correlation.

use super::{Comparator, ParamSchema, ParamType, Params};
use crate::fourier::Spectrum;
use crate::image::Volume;
use crate::util::{VoxFiltError, VoxFiltResult};

/// Quality factor: the mean of the Fourier ring correlation curve over shells
/// `1..=N/2`, `N` the largest extent. Higher is better.
///
/// An optional `snr` float array weights shell `r` by `snr[r - 1]`, clamped
/// to the last entry.
#[derive(Clone, Debug, Default)]
pub struct FrcCmp {
    params: Params,
}

impl FrcCmp {
    pub const NAME: &'static str = "frc";

    pub fn new() -> Self {
        Self::default()
    }

    /// Correlation per shell `0..=N/2`; shells without power are `None`.
    pub fn curve(image: &Volume, with: &Volume) -> Vec<Option<f32>> {
        let a = Spectrum::forward(image);
        let b = Spectrum::forward(with);
        let shells = a.max_extent() / 2 + 1;
        let mut cross = vec![0.0f64; shells];
        let mut pa = vec![0.0f64; shells];
        let mut pb = vec![0.0f64; shells];
        a.for_each_half(|idx, r, ca| {
            if r >= shells {
                return;
            }
            let cb = b.as_slice()[idx];
            cross[r] += (ca * cb.conj()).re as f64;
            pa[r] += ca.norm_sqr() as f64;
            pb[r] += cb.norm_sqr() as f64;
        });
        (0..shells)
            .map(|r| {
                let power = pa[r] * pb[r];
                (power > 0.0).then(|| (cross[r] / power.sqrt()) as f32)
            })
            .collect()
    }
}

impl Comparator for FrcCmp {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Mean Fourier ring correlation"
    }

    fn param_types(&self) -> ParamSchema {
        ParamSchema::new().put(
            "snr",
            ParamType::FloatArray,
            "Per-shell weights for shells 1..N/2; the last value repeats",
        )
    }

    fn params(&self) -> &Params {
        &self.params
    }

    fn set_params(&mut self, params: Params) {
        self.params = params;
    }

    fn evaluate(&self, image: &Volume, with: &Volume) -> VoxFiltResult<f32> {
        let snr = self.params.float_array("snr")?;
        let snr = snr.as_deref();
        if snr.is_some_and(|w| w.is_empty()) {
            return Err(VoxFiltError::NullPointer { what: "snr weights" });
        }
        let curve = Self::curve(image, with);
        let mut sum = 0.0f64;
        let mut weight = 0.0f64;
        for (r, frc) in curve.iter().enumerate().skip(1) {
            let Some(frc) = frc else { continue };
            let w = match snr {
                Some(snr) => snr[(r - 1).min(snr.len() - 1)] as f64,
                None => 1.0,
            };
            sum += w * *frc as f64;
            weight += w;
        }
        if weight == 0.0 {
            return Ok(0.0);
        }
        Ok((sum / weight) as f32)
    }
}
