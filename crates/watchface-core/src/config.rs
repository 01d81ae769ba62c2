//! Screen geometry and sidebar sizing constants.
//!
//! Two display shapes are supported: the rectangular 144×168 screen and the
//! round 180×180 screen. Everything positional in the layout engine is
//! expressed relative to the values in this module.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Screen dimensions
// ---------------------------------------------------------------------------

pub const RECT_WIDTH_PX: u32 = 144;
pub const RECT_HEIGHT_PX: u32 = 168;
pub const ROUND_DIAMETER_PX: u32 = 180;

// ---------------------------------------------------------------------------
// Sidebar sizing
// ---------------------------------------------------------------------------

/// Width of one widget column, and of the vertical sidebar on rectangular screens.
pub const WIDGET_WIDTH: u32 = 30;

/// Height of a horizontal bar, and of every non-empty widget in fixed-height mode.
pub const FIXED_WIDGET_HEIGHT: u32 = 51;

/// Horizontal margin between a horizontal bar edge and its outer widgets.
pub const H_PADDING: i32 = 4;

/// Vertical padding above the first and below the last widget of a vertical stack.
pub const V_PADDING_DEFAULT: i32 = 8;

/// Reduced vertical padding used when a stack only fits after compaction.
pub const V_PADDING_COMPACT: i32 = 4;

/// Space kept free around the middle widget of a three-widget stack.
pub const STACK_GAP: i32 = 10;

/// Width of the left and right sidebar regions on round screens.
pub const ROUND_SIDE_WIDTH: u32 = 40;

/// Horizontal inset of widgets inside the round left region.
pub const ROUND_LEFT_X_OFFSET: i32 = 7;

/// Horizontal inset of widgets inside the round right region.
pub const ROUND_RIGHT_X_OFFSET: i32 = 3;

/// Battery percentage at or below which the auto battery widget appears.
pub const AUTO_BATTERY_THRESHOLD_PCT: u8 = 10;

// ---------------------------------------------------------------------------
// Screen shape
// ---------------------------------------------------------------------------

/// Physical display shape of the watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScreenShape {
    #[default]
    Rect,
    Round,
}

impl ScreenShape {
    pub const fn width(self) -> u32 {
        match self {
            ScreenShape::Rect => RECT_WIDTH_PX,
            ScreenShape::Round => ROUND_DIAMETER_PX,
        }
    }

    pub const fn height(self) -> u32 {
        match self {
            ScreenShape::Rect => RECT_HEIGHT_PX,
            ScreenShape::Round => ROUND_DIAMETER_PX,
        }
    }

    pub const fn size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Full-screen bounding rectangle.
    pub const fn bounds(self) -> Rectangle {
        Rectangle::new(Point::zero(), self.size())
    }

    pub const fn is_round(self) -> bool {
        matches!(self, ScreenShape::Round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_sizes() {
        assert_eq!(ScreenShape::Rect.size(), Size::new(144, 168));
        assert_eq!(ScreenShape::Round.size(), Size::new(180, 180));
        assert_eq!(ScreenShape::default(), ScreenShape::Rect);
    }
}
