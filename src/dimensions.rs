/// Default longest-side limit in pixels.
pub const DEFAULT_MAX_DIMENSION: u32 = 1280;

/// Fits `width x height` inside a `max_dimension` square, keeping the aspect
/// ratio. Never upscales. Both sides are floored, so a very thin image can
/// collapse to zero on its short side.
pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_dimension {
        return (width, height);
    }

    let scale = f64::from(max_dimension) / f64::from(longest);
    // Any side equal to the longest maps to max_dimension exactly; don't let
    // float error shave a pixel off it.
    let fit = |side: u32| {
        if side == longest {
            max_dimension
        } else {
            (f64::from(side) * scale).floor() as u32
        }
    };
    (fit(width), fit(height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_upscales() {
        assert_eq!(fit_within(640, 480, 1280), (640, 480));
        assert_eq!(fit_within(1280, 1280, 1280), (1280, 1280));
        assert_eq!(fit_within(1, 1, 1280), (1, 1));
    }

    #[test]
    fn test_landscape_and_portrait() {
        assert_eq!(fit_within(4000, 3000, 1280), (1280, 960));
        assert_eq!(fit_within(3000, 4000, 1280), (960, 1280));
        assert_eq!(fit_within(1920, 1080, 1280), (1280, 720));
        // 333 * 0.64 = 213.12
        assert_eq!(fit_within(2000, 333, 1280), (1280, 213));
    }

    #[test]
    fn test_floor_rounding() {
        // 1281 -> 1280: scale 0.99921..., 1001 * scale = 1000.21...
        assert_eq!(fit_within(1281, 1001, 1280), (1280, 1000));
        assert_eq!(fit_within(3, 2, 2), (2, 1));
    }

    #[test]
    fn test_degenerate_sizes() {
        assert_eq!(fit_within(4000, 2, 1280), (1280, 0));
        assert_eq!(fit_within(10, 10, 0), (0, 0));
        assert_eq!(fit_within(0, 0, 1280), (0, 0));
    }

    #[test]
    fn test_aspect_ratio_within_a_pixel() {
        for &(w, h) in &[(5000, 3333), (1999, 1001), (7777, 123), (1300, 1299)] {
            let (nw, nh) = fit_within(w, h, 1280);
            assert_eq!(nw.max(nh), 1280);
            let expected_short = f64::from(w.min(h)) * 1280.0 / f64::from(w.max(h));
            assert!((f64::from(nw.min(nh)) - expected_short).abs() < 1.0);
        }
    }

    #[test]
    fn test_square_stays_square() {
        assert_eq!(fit_within(2139, 2139, 1280), (1280, 1280));
        for n in 1281..20_000 {
            assert_eq!(fit_within(n, n, 1280), (1280, 1280), "{n}x{n}");
        }
    }
}
