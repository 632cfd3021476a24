//! Readout labels: value formatting and placement inside the component.

use super::{FeedbackStyle, PaintContext};
use crate::error::StrategyResult;
use kurbo::{Point, Rect, Size, Vec2};

/// Gap between the anchor point and the label box.
pub const LABEL_OFFSET: f64 = 6.0;
const LABEL_PADDING: f64 = 2.0;
const MAX_DIGITS: f64 = 12.0;

/// Format `value` with as many decimals as `resolution` justifies.
///
/// A resolution of 0.01 gives two decimals; a resolution of 1 or more gives none.
/// Non-positive or non-finite resolutions fall back to three decimals.
pub fn format_value(value: f64, resolution: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let digits = if resolution.is_finite() && resolution > 0.0 {
        // nudge so resolutions like 0.0999999 computed from pixel deltas count as 0.1
        (-(resolution.log10() + 1e-9).floor()).clamp(0.0, MAX_DIGITS) as usize
    } else {
        3
    };
    format!("{value:.digits$}")
}

/// Place a label of `extent` next to `anchor`, kept inside `bounds`.
///
/// The preferred spot is above and to the right of the anchor. The label flips
/// to the left when it would clip the right edge, and below when it would clip the top.
pub fn place_label(anchor: Point, extent: Size, bounds: Rect) -> Rect {
    let (w, h) = (extent.width, extent.height);

    let mut x = anchor.x + LABEL_OFFSET;
    if x + w > bounds.x1 {
        x = anchor.x - LABEL_OFFSET - w;
    }
    x = x.max(bounds.x0);

    let mut y = anchor.y - LABEL_OFFSET - h;
    if y < bounds.y0 {
        y = anchor.y + LABEL_OFFSET;
    }
    if y + h > bounds.y1 {
        y = (bounds.y1 - h).max(bounds.y0);
    }

    Rect::new(x, y, x + w, y + h)
}

/// Draw `text` on a halo background near `anchor` and return the dirty rectangle.
pub(crate) fn draw_label(
    ctx: &mut PaintContext<'_>,
    style: &FeedbackStyle,
    anchor: Point,
    text: &str,
) -> StrategyResult<Rect> {
    let extent = ctx.surface.measure_text(text);
    let padded = Size::new(extent.width + 2.0 * LABEL_PADDING, extent.height + 2.0 * LABEL_PADDING);
    let rect = place_label(anchor, padded, ctx.bounds);
    ctx.surface.fill_rect(rect, style.halo)?;
    ctx.surface
        .draw_text(rect.origin() + Vec2::new(LABEL_PADDING, LABEL_PADDING), text, style.text)?;
    Ok(rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_digits_follow_resolution() {
        assert_eq!(format_value(1.23456, 0.01), "1.23");
        assert_eq!(format_value(1.23456, 0.5), "1.2");
        assert_eq!(format_value(1234.4, 10.0), "1234");
        assert_eq!(format_value(2.0, 0.0), "2.000");
        assert_eq!(format_value(f64::INFINITY, 1.0), "inf");
        assert_eq!(format_value(4.9, 0.0999999999999996), "4.9");
    }

    #[test]
    fn test_label_prefers_above_right() {
        let bounds = Rect::new(0.0, 0.0, 400.0, 300.0);
        let rect = place_label(Point::new(100.0, 100.0), Size::new(50.0, 14.0), bounds);
        assert_eq!(rect, Rect::new(106.0, 80.0, 156.0, 94.0));
    }

    #[test]
    fn test_label_flips_left_near_right_edge() {
        let bounds = Rect::new(0.0, 0.0, 400.0, 300.0);
        let rect = place_label(Point::new(380.0, 100.0), Size::new(50.0, 14.0), bounds);
        assert_eq!(rect.x1, 374.0);
        assert!(rect.x0 >= bounds.x0);
    }

    #[test]
    fn test_label_flips_below_near_top_edge() {
        let bounds = Rect::new(0.0, 0.0, 400.0, 300.0);
        let rect = place_label(Point::new(100.0, 5.0), Size::new(50.0, 14.0), bounds);
        assert_eq!(rect.y0, 11.0);
    }

    #[test]
    fn test_label_stays_inside_tiny_bounds() {
        let bounds = Rect::new(0.0, 0.0, 30.0, 10.0);
        let rect = place_label(Point::new(15.0, 5.0), Size::new(50.0, 14.0), bounds);
        assert!(rect.x0 >= bounds.x0);
        assert!(rect.y0 >= bounds.y0);
    }
}
