//! Pure calculation functions for scale-to-fit dimensions.
//!
//! All functions here are pure and testable without any I/O or images.
//!
//! Scale-to-fit composes one uniform ratio from any number of per-axis
//! constraints: start at 1.0 (never upscale) and tighten to the most
//! restrictive `bound / size` among the constrained axes. Both output
//! dimensions use the same ratio, so aspect is always preserved.

use std::collections::BTreeMap;

/// Compute the uniform scale ratio for an image under per-axis constraints.
///
/// Constraint keys are axis names: `"x"` bounds the width, `"y"` the
/// height. Keys without a corresponding bitmap dimension are ignored.
/// The ratio is capped at 1.0 — images already inside every bound are
/// left at their original size.
pub fn scale_ratio(dims: (u32, u32), constraints: &BTreeMap<String, u32>) -> f64 {
    let (width, height) = dims;
    let mut ratio = 1.0_f64;
    for (axis, bound) in constraints {
        let size = match axis.as_str() {
            "x" => width,
            "y" => height,
            _ => continue,
        };
        if size == 0 {
            continue;
        }
        ratio = ratio.min(*bound as f64 / size as f64);
    }
    ratio
}

/// Calculate target dimensions for a scale-to-fit resize.
///
/// Each dimension is rounded and floored at 1 pixel.
///
/// ```
/// # use std::collections::BTreeMap;
/// # use ord_gallery::imaging::scale_to_fit;
/// let constraints = BTreeMap::from([("y".to_string(), 200)]);
/// assert_eq!(scale_to_fit((1000, 500), &constraints), (400, 200));
/// ```
pub fn scale_to_fit(dims: (u32, u32), constraints: &BTreeMap<String, u32>) -> (u32, u32) {
    let ratio = scale_ratio(dims, constraints);
    let width = ((dims.0 as f64 * ratio).round() as u32).max(1);
    let height = ((dims.1 as f64 * ratio).round() as u32).max(1);
    (width, height)
}
