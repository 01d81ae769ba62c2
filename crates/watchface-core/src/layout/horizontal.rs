//! Up to four widgets across a `Top`/`Bottom` bar on rectangular screens.
//!
//! Slot 0 is pinned to the left margin. The remaining non-empty slots fill
//! three evenly spaced columns ending at the right anchor, left to right;
//! a single extra widget goes to the middle of the bar instead.

use embedded_graphics::prelude::*;
use heapless::Vec;

use super::{Background, LayoutResult, bar_bounds, centered_in};
use crate::config::{FIXED_WIDGET_HEIGHT, H_PADDING, WIDGET_WIDTH};
use crate::settings::SidebarLocation;
use crate::widgets::{HeightSource, RenderMode, WidgetType};

/// Columns to the right of slot 0.
const COLUMNS: i32 = 3;

pub(super) fn layout<H: HeightSource>(
    location: SidebarLocation,
    slots: &[WidgetType; 4],
    source: &H,
) -> LayoutResult {
    let Some(bar) = bar_bounds(location) else {
        return LayoutResult::default();
    };

    let mode = RenderMode::BAR;
    let mut result = LayoutResult::new(mode);
    result.add_background(Background::Bar(bar));

    let bar_width = bar.size.width as i32;
    let right_anchor = bar_width - H_PADDING - WIDGET_WIDTH as i32;

    let place = |result: &mut LayoutResult, slot: usize, x: i32| {
        let height = source.widget_height(slots[slot], mode);
        let y = bar.top_left.y + centered_in(FIXED_WIDGET_HEIGHT, height);
        result.place(slot, slots[slot], Point::new(x, y), height);
    };

    place(&mut result, 0, H_PADDING);

    let active: Vec<usize, 3> = (1..4).filter(|&slot| !slots[slot].is_empty()).collect();
    match active.len() {
        0 => {}
        1 => place(&mut result, active[0], (bar_width - WIDGET_WIDTH as i32) / 2),
        _ => {
            // Two widgets take the first two columns, not the outer ones.
            let span = right_anchor - H_PADDING;
            for (i, &slot) in active.iter().enumerate() {
                let column = (i + 1) as i32;
                place(&mut result, slot, H_PADDING + span * column / COLUMNS);
            }
        }
    }

    result
}
