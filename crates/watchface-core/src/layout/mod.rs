// src/layout/mod.rs
//! Sidebar layout engine.
//!
//! Given the resolved slot array, the sidebar location and a
//! [`HeightSource`], the engine decides where each visible widget is drawn
//! and in which [`RenderMode`]. Heights are queried fresh on every pass
//! since they depend on live state (charging, sleeping, font size).
//!
//! # Arrangements
//!
//! - **Horizontal** (`Top`/`Bottom` on rectangular screens): up to four
//!   widgets spread across a 51 px bar.
//! - **Vertical** (`Left`/`Right` on rectangular screens): three widgets
//!   stacked top, middle and bottom, compacted step by step until they fit.
//! - **Round**: slots 0 and 2 in two regions that follow the screen edge.

mod horizontal;
mod round;
mod vertical;

pub use vertical::VerticalFit;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Rectangle};
use heapless::Vec;

use crate::config::{FIXED_WIDGET_HEIGHT, ScreenShape, WIDGET_WIDTH};
use crate::settings::SidebarLocation;
use crate::widgets::{HeightSource, RenderMode, WidgetType};

/// One widget positioned on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub slot: usize,
    pub widget: WidgetType,
    /// Top-left corner of the widget column.
    pub origin: Point,
    /// Height reported by the widget in the pass's mode.
    pub height: u32,
}

/// Area painted in the sidebar color before widgets are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Bar(Rectangle),
    /// Round screens fill a large disc clipped by the display edge.
    Disc(Circle),
}

/// Output of one layout pass. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutResult {
    pub placements: Vec<Placement, 4>,
    pub backgrounds: Vec<Background, 2>,
    pub mode: RenderMode,
    /// Stage of the vertical ladder used; `None` for other arrangements.
    pub fit: Option<VerticalFit>,
}

impl LayoutResult {
    fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    fn place(&mut self, slot: usize, widget: WidgetType, origin: Point, height: u32) {
        // At most four slots exist, so the push cannot overflow.
        self.placements
            .push(Placement {
                slot,
                widget,
                origin,
                height,
            })
            .ok();
    }

    fn add_background(&mut self, background: Background) {
        self.backgrounds.push(background).ok();
    }

    /// Placement for a given slot, if that slot is drawn.
    pub fn placement(&self, slot: usize) -> Option<&Placement> {
        self.placements.iter().find(|p| p.slot == slot)
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Lays out the sidebar for one screen shape.
#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine {
    shape: ScreenShape,
}

impl LayoutEngine {
    pub fn new(shape: ScreenShape) -> Self {
        Self { shape }
    }

    pub fn shape(&self) -> ScreenShape {
        self.shape
    }

    pub fn layout<H: HeightSource>(
        &self,
        location: SidebarLocation,
        slots: &[WidgetType; 4],
        heights: &H,
    ) -> LayoutResult {
        match (self.shape, location) {
            (_, SidebarLocation::None) => LayoutResult::default(),
            (ScreenShape::Round, _) => round::layout(location, slots, heights),
            (ScreenShape::Rect, SidebarLocation::Top | SidebarLocation::Bottom) => {
                horizontal::layout(location, slots, heights)
            }
            (ScreenShape::Rect, SidebarLocation::Left | SidebarLocation::Right) => {
                vertical::layout(location, slots, heights)
            }
        }
    }
}

/// Bounds of the sidebar bar on a rectangular screen.
pub fn bar_bounds(location: SidebarLocation) -> Option<Rectangle> {
    let shape = ScreenShape::Rect;
    let (w, h) = (shape.width(), shape.height());
    let bounds = match location {
        SidebarLocation::None => return None,
        SidebarLocation::Left => Rectangle::new(Point::zero(), Size::new(WIDGET_WIDTH, h)),
        SidebarLocation::Right => Rectangle::new(
            Point::new((w - WIDGET_WIDTH) as i32, 0),
            Size::new(WIDGET_WIDTH, h),
        ),
        SidebarLocation::Top => Rectangle::new(Point::zero(), Size::new(w, FIXED_WIDGET_HEIGHT)),
        SidebarLocation::Bottom => Rectangle::new(
            Point::new(0, (h - FIXED_WIDGET_HEIGHT) as i32),
            Size::new(w, FIXED_WIDGET_HEIGHT),
        ),
    };
    Some(bounds)
}

/// Top offset that centers content of `height` inside a band of `band` px.
fn centered_in(band: u32, height: u32) -> i32 {
    (band as i32 - height as i32) / 2
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_bounds() {
        assert_eq!(
            bar_bounds(SidebarLocation::Right),
            Some(Rectangle::new(Point::new(114, 0), Size::new(30, 168)))
        );
        assert_eq!(
            bar_bounds(SidebarLocation::Left),
            Some(Rectangle::new(Point::new(0, 0), Size::new(30, 168)))
        );
        assert_eq!(
            bar_bounds(SidebarLocation::Bottom),
            Some(Rectangle::new(Point::new(0, 117), Size::new(144, 51)))
        );
        assert_eq!(
            bar_bounds(SidebarLocation::Top),
            Some(Rectangle::new(Point::new(0, 0), Size::new(144, 51)))
        );
        assert_eq!(bar_bounds(SidebarLocation::None), None);
    }

    #[test]
    fn test_no_sidebar_lays_out_nothing() {
        let heights = test_support::SlotHeights::uniform([30, 30, 30], [30, 30, 30]);
        for shape in [ScreenShape::Rect, ScreenShape::Round] {
            let result = LayoutEngine::new(shape).layout(
                SidebarLocation::None,
                &heights.slots,
                &heights,
            );
            assert!(result.is_empty());
            assert!(result.backgrounds.is_empty());
        }
    }
}
