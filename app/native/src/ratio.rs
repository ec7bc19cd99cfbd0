//! Aspect ratio reduction.

use crate::error::DeskwallError;

/// Greatest common divisor by the Euclidean algorithm.
const fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let remainder = a % b;
        a = b;
        b = remainder;
    }
    a
}

/// Reduces `width:height` to lowest terms and formats it as `"a:b"`.
///
/// # Errors
///
/// Returns [`DeskwallError::AspectRatio`] if either term is zero.
///
/// # Examples
///
/// ```
/// use deskwall_lib::ratio::aspect_ratio;
///
/// assert_eq!(aspect_ratio(1920, 1080).unwrap(), "16:9");
/// ```
pub fn aspect_ratio(width: u32, height: u32) -> Result<String, DeskwallError> {
    if width == 0 || height == 0 {
        return Err(DeskwallError::AspectRatio { width, height });
    }

    let divisor = gcd(width, height);
    Ok(format!("{}:{}", width / divisor, height / divisor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_ratios() {
        assert_eq!(aspect_ratio(16, 9).unwrap(), "16:9");
        assert_eq!(aspect_ratio(4, 3).unwrap(), "4:3");
        assert_eq!(aspect_ratio(1920, 1080).unwrap(), "16:9");
        assert_eq!(aspect_ratio(2560, 1080).unwrap(), "64:27");
        assert_eq!(aspect_ratio(1080, 1920).unwrap(), "9:16");
    }

    #[test]
    fn test_ratio_is_scale_invariant() {
        for (x, y) in [(16, 9), (4, 3), (21, 9), (5, 4), (7, 13)] {
            let base = aspect_ratio(x, y).unwrap();
            for k in 1..=50 {
                assert_eq!(aspect_ratio(k * x, k * y).unwrap(), base, "k={k} x={x} y={y}");
            }
        }
    }

    #[test]
    fn test_square_and_coprime_terms() {
        assert_eq!(aspect_ratio(1024, 1024).unwrap(), "1:1");
        assert_eq!(aspect_ratio(1366, 767).unwrap(), "1366:767");
    }

    #[test]
    fn test_zero_terms_are_rejected() {
        assert!(matches!(
            aspect_ratio(0, 1080),
            Err(DeskwallError::AspectRatio { width: 0, height: 1080 })
        ));
        assert!(matches!(aspect_ratio(1920, 0), Err(DeskwallError::AspectRatio { .. })));
        assert!(matches!(aspect_ratio(0, 0), Err(DeskwallError::AspectRatio { .. })));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(1920, 1080), 120);
        assert_eq!(gcd(17, 5), 1);
        assert_eq!(gcd(9, 0), 9);
    }
}
