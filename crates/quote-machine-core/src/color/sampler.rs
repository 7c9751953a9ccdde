use log::{debug, warn};
use rand::Rng;

use super::{contrast_ratio, highest_contrast, Color};

/// Minimum contrast against white for accent colors (WCAG AAA for body text).
pub const ACCENT_MIN_CONTRAST: f64 = 7.0;

/// Draws before the sampler gives up and falls back to black or white.
pub const MAX_SAMPLE_ATTEMPTS: usize = 100_000;

/// Reject-sample a random color whose contrast against `against` is
/// strictly greater than `min_contrast`.
///
/// If no candidate passes within `MAX_SAMPLE_ATTEMPTS` draws, returns
/// whichever of black or white contrasts most with `against`.
pub fn sample_color<R: Rng + ?Sized>(rng: &mut R, min_contrast: f64, against: Color) -> Color {
    for attempt in 1..=MAX_SAMPLE_ATTEMPTS {
        let candidate = Color::from_u24(rng.gen_range(0..=0xFF_FF_FF));
        if contrast_ratio(candidate, against) > min_contrast {
            debug!("Sampled {} after {} draw(s)", candidate, attempt);
            return candidate;
        }
    }

    let fallback = highest_contrast(against, &[Color::BLACK, Color::WHITE]).unwrap_or(Color::BLACK);
    warn!(
        "No color above contrast {} against {} in {} draws, using {}",
        min_contrast, against, MAX_SAMPLE_ATTEMPTS, fallback
    );
    fallback
}

/// Accent color for a freshly shown quote: readable on a white card.
pub fn sample_accent<R: Rng + ?Sized>(rng: &mut R) -> Color {
    sample_color(rng, ACCENT_MIN_CONTRAST, Color::WHITE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_accent_always_beats_threshold() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let color = sample_accent(&mut rng);
            assert!(
                contrast_ratio(color, Color::WHITE) > ACCENT_MIN_CONTRAST,
                "{color} too light"
            );
        }
    }

    #[test]
    fn test_custom_reference_color() {
        let mut rng = StdRng::seed_from_u64(3);
        let color = sample_color(&mut rng, 4.5, Color::BLACK);
        assert!(contrast_ratio(color, Color::BLACK) > 4.5);
    }

    #[test]
    fn test_same_seed_same_color() {
        let a = sample_accent(&mut StdRng::seed_from_u64(99));
        let b = sample_accent(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_unreachable_threshold_falls_back() {
        // Nothing can exceed 21:1, so this must hit the cap
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_color(&mut rng, 21.0, Color::WHITE), Color::BLACK);
        assert_eq!(sample_color(&mut rng, 25.0, Color::BLACK), Color::WHITE);
    }
}
