//! Two-sided clamp

/// Clamp `value` into `[minimum, maximum]`.
///
/// Computed as `max(minimum, min(value, maximum))`, so a reversed range
/// resolves to `minimum` instead of panicking like [`f64::clamp`].
pub fn clamp(value: f64, minimum: f64, maximum: f64) -> f64 {
    minimum.max(value.min(maximum))
}
