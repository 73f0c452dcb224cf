//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Floor a f64 and clamp it to the u32 range, returning 0 for non-finite values.
#[must_use]
pub fn floor_f64_to_u32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let max = cast::<u32, f64>(u32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(0.0, max).floor();
    cast::<f64, u32>(clamped).unwrap_or(0)
}

/// Convert a draw that is known to be non-negative into a u32, clamping negatives to 0.
#[must_use]
pub fn non_negative_u32(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

/// Clamp a signed health figure into the `0..=100` band.
#[must_use]
pub fn clamp_health(value: i32) -> u8 {
    let bounded = value.clamp(
        i32::from(crate::constants::HEALTH_MIN),
        i32::from(crate::constants::HEALTH_MAX),
    );
    u8::try_from(bounded).unwrap_or(crate::constants::HEALTH_MIN)
}

/// Convert a count into u32, saturating on overflow.
#[must_use]
pub fn count_to_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_handles_non_finite_and_negative() {
        assert_eq!(floor_f64_to_u32(f64::NAN), 0);
        assert_eq!(floor_f64_to_u32(-3.5), 0);
        assert_eq!(floor_f64_to_u32(17.99), 17);
        assert_eq!(floor_f64_to_u32(f64::from(u32::MAX) * 2.0), u32::MAX);
    }

    #[test]
    fn health_clamps_into_band() {
        assert_eq!(clamp_health(-12), 0);
        assert_eq!(clamp_health(55), 55);
        assert_eq!(clamp_health(140), 100);
    }

    #[test]
    fn non_negative_drops_sign() {
        assert_eq!(non_negative_u32(-1), 0);
        assert_eq!(non_negative_u32(42), 42);
        assert_eq!(count_to_u32(7), 7);
    }
}
