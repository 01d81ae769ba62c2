//! Three-widget stack for `Left`/`Right` sidebars on rectangular screens.

use embedded_graphics::prelude::*;
use log::{debug, warn};

use super::{Background, LayoutResult, bar_bounds};
use crate::config::{RECT_HEIGHT_PX, STACK_GAP, V_PADDING_COMPACT, V_PADDING_DEFAULT};
use crate::settings::SidebarLocation;
use crate::widgets::{HeightSource, RenderMode, WidgetType};

/// Step of the fitting ladder that produced a vertical layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalFit {
    /// All three widgets at natural height.
    Natural,
    /// All three widgets in compact mode.
    Compact,
    /// Compact mode with the middle widget left out.
    MiddleDropped,
    /// Middle widget left out and padding reduced to the minimum.
    CompactPadding,
}

/// Tallest stack that still leaves room around the middle widget.
const fn limit_with_middle(padding: i32) -> i32 {
    RECT_HEIGHT_PX as i32 - 2 * padding - STACK_GAP
}

/// Space left for the top-plus-bottom pair once padding is reduced.
const fn limit_without_middle(padding: i32) -> i32 {
    RECT_HEIGHT_PX as i32 - 2 * padding
}

fn heights<H: HeightSource>(slots: &[WidgetType; 4], source: &H, mode: RenderMode) -> [i32; 3] {
    [0, 1, 2].map(|slot| source.widget_height(slots[slot], mode) as i32)
}

pub(super) fn layout<H: HeightSource>(
    location: SidebarLocation,
    slots: &[WidgetType; 4],
    source: &H,
) -> LayoutResult {
    let Some(bar) = bar_bounds(location) else {
        return LayoutResult::default();
    };

    let natural = heights(slots, source, RenderMode::NATURAL);
    let compact = heights(slots, source, RenderMode::COMPACT);

    let natural_total: i32 = natural.iter().sum();
    let compact_total: i32 = compact.iter().sum();

    let (fit, mode, h, padding) = if natural_total <= limit_with_middle(V_PADDING_DEFAULT) {
        (VerticalFit::Natural, RenderMode::NATURAL, natural, V_PADDING_DEFAULT)
    } else if compact_total <= limit_with_middle(V_PADDING_DEFAULT) {
        (VerticalFit::Compact, RenderMode::COMPACT, compact, V_PADDING_DEFAULT)
    } else if compact[0] + compact[2] <= limit_with_middle(V_PADDING_DEFAULT) {
        (VerticalFit::MiddleDropped, RenderMode::COMPACT, compact, V_PADDING_DEFAULT)
    } else {
        if compact[0] + compact[2] > limit_without_middle(V_PADDING_COMPACT) {
            warn!(
                "Sidebar widgets overflow: {} + {} px exceeds {} px",
                compact[0],
                compact[2],
                limit_without_middle(V_PADDING_COMPACT)
            );
        }
        (VerticalFit::CompactPadding, RenderMode::COMPACT, compact, V_PADDING_COMPACT)
    };
    debug!("Vertical sidebar fit {:?} with heights {:?}", fit, h);

    let mut result = LayoutResult::new(mode);
    result.fit = Some(fit);
    result.add_background(Background::Bar(bar));

    let x = bar.top_left.x;
    let top = padding;
    let bottom = RECT_HEIGHT_PX as i32 - padding - h[2];

    result.place(0, slots[0], Point::new(x, top), h[0] as u32);
    if matches!(fit, VerticalFit::Natural | VerticalFit::Compact) {
        let middle = ((bottom - h[1]) + (top + h[0])) / 2;
        result.place(1, slots[1], Point::new(x, middle), h[1] as u32);
    }
    result.place(2, slots[2], Point::new(x, bottom), h[2] as u32);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScreenShape;
    use crate::layout::LayoutEngine;
    use crate::layout::test_support::SlotHeights;

    fn run(natural: [u32; 3], compact: [u32; 3]) -> LayoutResult {
        let heights = SlotHeights::uniform(natural, compact);
        LayoutEngine::new(ScreenShape::Rect).layout(
            SidebarLocation::Right,
            &heights.slots,
            &heights,
        )
    }

    fn y(result: &LayoutResult, slot: usize) -> Option<i32> {
        result.placement(slot).map(|p| p.origin.y)
    }

    #[test]
    fn test_limits() {
        assert_eq!(limit_with_middle(V_PADDING_DEFAULT), 142);
        assert_eq!(limit_without_middle(V_PADDING_COMPACT), 160);
    }

    #[test]
    fn test_natural_fit() {
        let result = run([40, 40, 40], [30, 30, 30]);
        assert_eq!(result.fit, Some(VerticalFit::Natural));
        assert_eq!(result.mode, RenderMode::NATURAL);
        assert_eq!(y(&result, 0), Some(8));
        assert_eq!(y(&result, 2), Some(120));
        // ((120 - 40) + (8 + 40)) / 2
        assert_eq!(y(&result, 1), Some(64));
        assert!(result.placements.iter().all(|p| p.origin.x == 114));
    }

    #[test]
    fn test_compact_fit() {
        let result = run([60, 60, 60], [45, 45, 45]);
        assert_eq!(result.fit, Some(VerticalFit::Compact));
        assert_eq!(result.mode, RenderMode::COMPACT);
        assert_eq!(result.placements.len(), 3);
        assert_eq!(result.placement(1).map(|p| p.height), Some(45));
    }

    #[test]
    fn test_middle_dropped() {
        let result = run([70, 70, 70], [70, 70, 70]);
        assert_eq!(result.fit, Some(VerticalFit::MiddleDropped));
        assert_eq!(y(&result, 0), Some(8));
        assert_eq!(y(&result, 1), None);
        assert_eq!(y(&result, 2), Some(90));
    }

    #[test]
    fn test_pair_uses_same_threshold_as_stack() {
        let at_limit = run([80, 80, 62], [80, 80, 62]);
        assert_eq!(at_limit.fit, Some(VerticalFit::MiddleDropped));
        assert_eq!(y(&at_limit, 0), Some(8));

        let over = run([80, 80, 63], [80, 80, 63]);
        assert_eq!(over.fit, Some(VerticalFit::CompactPadding));
        assert_eq!(y(&over, 0), Some(4));

        let pair_150 = run([75, 75, 75], [75, 75, 75]);
        assert_eq!(pair_150.fit, Some(VerticalFit::CompactPadding));
        assert_eq!(y(&pair_150, 2), Some(89));
    }

    #[test]
    fn test_compact_padding_exactly_fits() {
        let result = run([80, 0, 80], [80, 0, 80]);
        assert_eq!(result.fit, Some(VerticalFit::CompactPadding));
        assert_eq!(y(&result, 0), Some(4));
        assert_eq!(y(&result, 2), Some(84));
        assert_eq!(y(&result, 1), None);
    }

    #[test]
    fn test_overflow_still_places_top_and_bottom() {
        let result = run([90, 10, 90], [90, 10, 90]);
        assert_eq!(result.fit, Some(VerticalFit::CompactPadding));
        assert_eq!(y(&result, 0), Some(4));
        assert_eq!(y(&result, 2), Some(74));
    }

    #[test]
    fn test_empty_middle_is_still_placed() {
        let result = run([40, 0, 40], [40, 0, 40]);
        assert_eq!(result.fit, Some(VerticalFit::Natural));
        // ((120 - 0) + (8 + 40)) / 2
        assert_eq!(y(&result, 1), Some(84));
        assert_eq!(result.placement(1).map(|p| p.height), Some(0));
    }

    #[test]
    fn test_left_bar_starts_at_zero() {
        let heights = SlotHeights::uniform([20, 20, 20], [20, 20, 20]);
        let result = LayoutEngine::new(ScreenShape::Rect).layout(
            SidebarLocation::Left,
            &heights.slots,
            &heights,
        );
        assert!(result.placements.iter().all(|p| p.origin.x == 0));
    }
}
