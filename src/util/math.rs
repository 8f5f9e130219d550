//! Index and angle helpers shared by the filters and comparators.

use std::f32::consts::PI;

/// Wraps a signed coordinate onto `[0, len)` using true modulo.
#[inline]
pub(crate) fn wrap_index(i: isize, len: usize) -> usize {
    i.rem_euclid(len as isize) as usize
}

/// Absolute phase difference folded into `[0, PI]`.
pub(crate) fn angle_sub_2pi(a: f32, b: f32) -> f32 {
    let mut diff = (a - b).abs() % (2.0 * PI);
    if diff > PI {
        diff = 2.0 * PI - diff;
    }
    diff
}

/// Signed frequency for FFT bin `k` of an axis with `n` samples.
#[inline]
pub(crate) fn signed_freq(k: usize, n: usize) -> isize {
    if k <= n / 2 {
        k as isize
    } else {
        k as isize - n as isize
    }
}
