//! Small numeric helpers
#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let newval = value as f64;
    newval
}

#[must_use]
pub const fn f64_to_usize(value: f64) -> usize {
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    let newval = value as usize;
    newval
}

/// Return `count` evenly spaced values over the inclusive range `[start, end]`.
///
/// `count == 1` yields the range start only. `count` must be nonzero (checked by
/// the callers).
#[must_use]
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    debug_assert!(count > 0);
    if count == 1 {
        return vec![start];
    }
    let step = (end - start) / usize_to_f64(count - 1);
    (0..count)
        .map(|i| start + usize_to_f64(i) * step)
        .collect()
}
