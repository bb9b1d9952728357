//! Half-precision quantization of rotation deltas.

use half::f16;

/// Rotation changes smaller than this are recorded as exactly zero.
///
/// The codec tells zero runs from single deltas by checking whether the
/// stored half-precision value is zero, with no tag bit. Every value this
/// threshold lets through is at least `1e-4`, far above the smallest
/// half-precision subnormal, so a recorded nonzero delta can never be
/// stored as zero. Lowering this below `f16::MIN_POSITIVE_SUBNORMAL`
/// breaks decoding.
pub const CAPTURE_EPSILON: f64 = 1e-4;

/// Round `x` to the nearest IEEE-754 binary16 value, widened back to `f64`.
///
/// Values beyond the half-precision range become infinite; NaN stays NaN.
///
/// # Examples
///
/// ```
/// use polyburn_replay::quantize;
///
/// assert_eq!(quantize(0.5), 0.5);
/// assert_eq!(quantize(0.1), 0.0999755859375);
/// assert_eq!(quantize(1e6), f64::INFINITY);
/// ```
pub fn quantize(x: f64) -> f64 {
    to_half(x).to_f64()
}

/// Correctly rounded `f64` to binary16 conversion.
///
/// `f16::from_f64` narrows through `f32` on hosts with hardware half
/// support, which rounds twice. The software path rounds once and gives
/// the same bits on every host.
pub(crate) fn to_half(x: f64) -> f16 {
    f16::from_f64_const(x)
}

/// Quantize a raw rotation change into the value a frame stores.
///
/// Applies [`quantize`], then snaps anything with magnitude below
/// [`CAPTURE_EPSILON`] to exactly `0.0`. Non-finite changes are recorded
/// as zero so a corrupt input sample cannot poison the accumulated
/// rotation for the rest of the session.
pub fn canonical_delta(raw: f64) -> f64 {
    let delta = quantize(raw);
    if !delta.is_finite() || delta.abs() < CAPTURE_EPSILON {
        0.0
    } else {
        delta
    }
}
