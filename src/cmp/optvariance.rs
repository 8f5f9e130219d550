//! Mean squared difference after an optimal linear density rescale.

use super::{Comparator, ParamSchema, ParamType, Params};
use crate::fourier::Spectrum;
use crate::image::Volume;
use crate::trace::trace_debug;
use crate::util::VoxFiltResult;
use std::borrow::Cow;
use std::cell::Cell;

/// Denominator substituted when the least-squares system is singular.
const SINGULAR_DIV: f64 = 1e-7;

/// Linear density transform `scale * v + shift`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearFit {
    pub scale: f32,
    pub shift: f32,
}

impl LinearFit {
    pub const IDENTITY: LinearFit = LinearFit {
        scale: 1.0,
        shift: 0.0,
    };

    /// Least-squares fit of `scale * x + shift` to `y`, optionally skipping
    /// samples where either `x` or `y` is zero.
    pub fn least_squares(x: &[f32], y: &[f32], skip_zero: bool) -> Self {
        let (mut n, mut sx, mut sy, mut sxx, mut sxy) = (0.0f64, 0.0, 0.0, 0.0, 0.0);
        for (&xi, &yi) in x.iter().zip(y) {
            if skip_zero && (xi == 0.0 || yi == 0.0) {
                continue;
            }
            let (xi, yi) = (xi as f64, yi as f64);
            n += 1.0;
            sx += xi;
            sy += yi;
            sxx += xi * xi;
            sxy += xi * yi;
        }
        let mut div = n * sxx - sx * sx;
        if div == 0.0 {
            div = SINGULAR_DIV;
        }
        Self {
            scale: ((n * sxy - sx * sy) / div) as f32,
            shift: ((sxx * sy - sx * sxy) / div) as f32,
        }
    }

    #[inline]
    pub fn apply(&self, v: f32) -> f32 {
        self.scale * v + self.shift
    }
}

/// Real-space variance after optimizing a linear transform of the density.
///
/// The subject image should be the noisier one. By default it is rescaled to
/// match `with`; `invert` rescales `with` instead. The fit from the most
/// recent call is cached and exposed through [`OptVarianceCmp::last_fit`].
///
/// The cache makes this comparator `!Sync`.
#[derive(Debug, Default)]
pub struct OptVarianceCmp {
    params: Params,
    last_fit: Cell<Option<LinearFit>>,
}

impl OptVarianceCmp {
    pub const NAME: &'static str = "optvariance";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_fit(&self) -> Option<LinearFit> {
        self.last_fit.get()
    }

    /// Scale of the last fit, 1 before any call.
    pub fn scale(&self) -> f32 {
        self.last_fit().unwrap_or(LinearFit::IDENTITY).scale
    }

    /// Shift of the last fit, 0 before any call.
    pub fn shift(&self) -> f32 {
        self.last_fit().unwrap_or(LinearFit::IDENTITY).shift
    }
}

/// Filters `with` so its radial amplitude profile matches `image`.
fn match_radial_profile(image: &Volume, with: &Volume) -> Volume {
    let target = Spectrum::forward(image).radial_amplitude();
    let mut spectrum = Spectrum::forward(with);
    let current = spectrum.radial_amplitude();
    let gain: Vec<f32> = target
        .iter()
        .zip(&current)
        .map(|(&a, &b)| if b == 0.0 { 0.0 } else { a / b })
        .collect();
    let e = spectrum.extents();
    let mut factors = Vec::with_capacity(e.len());
    for kz in 0..e.nz {
        for ky in 0..e.ny {
            for kx in 0..e.nx {
                factors.push(gain[spectrum.shell_index([kx, ky, kz])]);
            }
        }
    }
    for (c, g) in spectrum.as_mut_slice().iter_mut().zip(factors) {
        *c *= g;
    }
    spectrum.inverse_real()
}

impl Comparator for OptVarianceCmp {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Real-space variance after density optimization, self should be noisy and target less noisy. Linear transform applied to density to minimize variance."
    }

    fn param_types(&self) -> ParamSchema {
        ParamSchema::new()
            .put(
                "invert",
                ParamType::Int,
                "If set, 'with' is rescaled rather than 'this'. 'this' should still be the noisier image.",
            )
            .put(
                "keepzero",
                ParamType::Int,
                "If set, zero pixels will not be adjusted in the linear density optimization",
            )
            .put(
                "matchfilt",
                ParamType::Int,
                "If set, with will be filtered so its radial power spectrum matches 'this' before density optimization of this",
            )
            .put(
                "debug",
                ParamType::Int,
                "Performs various debugging actions if set.",
            )
    }

    fn params(&self) -> &Params {
        &self.params
    }

    fn set_params(&mut self, params: Params) {
        self.params = params;
    }

    fn evaluate(&self, image: &Volume, with: &Volume) -> VoxFiltResult<f32> {
        let invert = self.params.flag("invert")?;
        let keepzero = self.params.flag("keepzero")?;
        let matchfilt = self.params.flag("matchfilt")?;
        let debug = self.params.flag("debug")?;

        let with: Cow<'_, Volume> = if matchfilt {
            Cow::Owned(match_radial_profile(image, with))
        } else {
            Cow::Borrowed(with)
        };
        let (source, target) = if invert {
            (with.as_slice(), image.as_slice())
        } else {
            (image.as_slice(), with.as_slice())
        };

        let fit = LinearFit::least_squares(source, target, keepzero);
        let sum: f64 = source
            .iter()
            .zip(target)
            .map(|(&s, &t)| {
                let adjusted = if keepzero && s == 0.0 { s } else { fit.apply(s) };
                let d = (adjusted - t) as f64;
                d * d
            })
            .sum();
        let result = (sum / source.len() as f64) as f32;
        self.last_fit.set(Some(fit));

        if debug {
            trace_debug!(
                "optvariance_fit",
                scale = fit.scale,
                shift = fit.shift,
                result = result,
                invert = invert,
                keepzero = keepzero,
                matchfilt = matchfilt
            );
        }
        Ok(result)
    }
}
