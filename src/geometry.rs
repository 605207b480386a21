//! Overlay placement math.
//!
//! All functions here are pure and testable without any I/O or images.
//! Coordinates are signed: an overlay larger than its container (or pushed
//! out by padding) resolves to negative offsets, and the compositor clips.

use clap::ValueEnum;

/// Where an overlay sits on the base image.
///
/// Corner anchors are offset inward by the padding; `Center` ignores padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lower")]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

/// Resolve the top-left pixel position for an `element`-sized overlay inside
/// a `container`-sized image.
///
/// Corner anchors keep `padding` pixels between the overlay and the relevant
/// edges. Negative padding pushes the overlay outward past the edge. Center
/// placement integer-truncates, so odd leftovers favor the left/top side.
///
/// No bounds clamping: when element size plus padding exceeds the container,
/// the result goes negative and the overlay is partially off-canvas.
pub fn resolve(
    anchor: Anchor,
    container: (u32, u32),
    element: (u32, u32),
    padding: i64,
) -> (i64, i64) {
    let (cw, ch) = (container.0 as i64, container.1 as i64);
    let (ew, eh) = (element.0 as i64, element.1 as i64);

    match anchor {
        Anchor::TopLeft => (padding, padding),
        Anchor::TopRight => (cw - ew - padding, padding),
        Anchor::BottomLeft => (padding, ch - eh - padding),
        Anchor::BottomRight => (cw - ew - padding, ch - eh - padding),
        Anchor::Center => ((cw - ew) / 2, (ch - eh) / 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHORS: [Anchor; 5] = [
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
        Anchor::Center,
    ];

    #[test]
    fn top_left_is_padding() {
        assert_eq!(resolve(Anchor::TopLeft, (1000, 800), (160, 80), 10), (10, 10));
    }

    #[test]
    fn top_right_hugs_right_edge() {
        assert_eq!(
            resolve(Anchor::TopRight, (1000, 800), (160, 80), 10),
            (830, 10)
        );
    }

    #[test]
    fn bottom_left_hugs_bottom_edge() {
        assert_eq!(
            resolve(Anchor::BottomLeft, (1000, 800), (160, 80), 10),
            (10, 710)
        );
    }

    #[test]
    fn bottom_right_hugs_both_edges() {
        assert_eq!(
            resolve(Anchor::BottomRight, (1000, 800), (160, 80), 10),
            (830, 710)
        );
    }

    #[test]
    fn center_truncates() {
        // (1000-333)/2 = 333.5 → 333, (800-333)/2 = 233.5 → 233
        assert_eq!(
            resolve(Anchor::Center, (1000, 800), (333, 333), 0),
            (333, 233)
        );
    }

    #[test]
    fn center_ignores_padding() {
        assert_eq!(
            resolve(Anchor::Center, (100, 100), (40, 40), 25),
            resolve(Anchor::Center, (100, 100), (40, 40), 0)
        );
    }

    #[test]
    fn zero_padding_corners() {
        assert_eq!(resolve(Anchor::TopLeft, (100, 100), (30, 20), 0), (0, 0));
        assert_eq!(
            resolve(Anchor::BottomRight, (100, 100), (30, 20), 0),
            (70, 80)
        );
    }

    #[test]
    fn negative_padding_pushes_outward() {
        assert_eq!(resolve(Anchor::TopLeft, (100, 100), (30, 20), -5), (-5, -5));
        assert_eq!(
            resolve(Anchor::BottomRight, (100, 100), (30, 20), -5),
            (75, 85)
        );
    }

    #[test]
    fn oversized_element_goes_negative() {
        // 200-wide overlay in a 100-wide container: off-canvas, not an error
        let (x, y) = resolve(Anchor::BottomRight, (100, 100), (200, 150), 10);
        assert_eq!((x, y), (-110, -60));
    }

    #[test]
    fn element_stays_in_bounds_when_it_fits() {
        // Any anchor, any element that fits with its padding, never leaves
        // the container.
        for anchor in ANCHORS {
            for (ew, eh) in [(0, 0), (1, 1), (50, 30), (80, 80)] {
                let (x, y) = resolve(anchor, (100, 100), (ew, eh), 10);
                assert!(x >= 0 && y >= 0, "{anchor:?} ({ew},{eh}) → ({x},{y})");
                assert!(
                    x + ew as i64 <= 100 && y + eh as i64 <= 100,
                    "{anchor:?} ({ew},{eh}) → ({x},{y})"
                );
            }
        }
    }

    #[test]
    fn exact_fit_resolves_to_origin() {
        for anchor in ANCHORS {
            assert_eq!(resolve(anchor, (64, 64), (64, 64), 0), (0, 0), "{anchor:?}");
        }
    }
}
