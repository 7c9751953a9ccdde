use super::Color;

/// Linearize one 8-bit sRGB channel.
fn channel_to_linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance in [0.0, 1.0], 0 for black and 1 for white.
pub fn relative_luminance(color: Color) -> f64 {
    0.2126 * channel_to_linear(color.r())
        + 0.7152 * channel_to_linear(color.g())
        + 0.0722 * channel_to_linear(color.b())
}

/// Contrast ratio between two colors, in [1.0, 21.0].
///
/// `(L_lighter + 0.05) / (L_darker + 0.05)`, so argument order does not matter.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Pick the candidate that stands out most against `base`.
///
/// Ties go to the earlier candidate. Returns `None` for an empty slice.
pub fn highest_contrast(base: Color, candidates: &[Color]) -> Option<Color> {
    let mut best: Option<(Color, f64)> = None;
    for &candidate in candidates {
        let ratio = contrast_ratio(base, candidate);
        match best {
            Some((_, best_ratio)) if ratio <= best_ratio => {}
            _ => best = Some((candidate, ratio)),
        }
    }
    best.map(|(color, _)| color)
}
