//! Two-region sidebar for round screens.
//!
//! Only slots 0 and 2 are drawn. Horizontal locations use a top and a
//! bottom band; vertical ones a left and a right band. Each band is backed
//! by a disc much larger than the screen so its inner edge follows a
//! gentle curve.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Circle;

use super::{Background, LayoutResult, centered_in};
use crate::config::{
    FIXED_WIDGET_HEIGHT, ROUND_DIAMETER_PX, ROUND_LEFT_X_OFFSET, ROUND_RIGHT_X_OFFSET,
    ROUND_SIDE_WIDTH, WIDGET_WIDTH,
};
use crate::settings::SidebarLocation;
use crate::widgets::{HeightSource, RenderMode, WidgetType};

const SCREEN: i32 = ROUND_DIAMETER_PX as i32;
const DISC: u32 = 2 * ROUND_DIAMETER_PX;

pub(super) fn layout<H: HeightSource>(
    location: SidebarLocation,
    slots: &[WidgetType; 4],
    source: &H,
) -> LayoutResult {
    if location.is_horizontal() {
        layout_bands(slots, source)
    } else if location.is_vertical() {
        layout_sides(slots, source)
    } else {
        LayoutResult::default()
    }
}

fn layout_bands<H: HeightSource>(slots: &[WidgetType; 4], source: &H) -> LayoutResult {
    let mode = RenderMode::BAR;
    let mut result = LayoutResult::new(mode);

    let band = FIXED_WIDGET_HEIGHT as i32;
    let bottom_band_y = SCREEN - band;
    let disc_x = -(SCREEN / 2);

    result.add_background(Background::Disc(Circle::new(
        Point::new(disc_x, band - DISC as i32),
        DISC,
    )));
    result.add_background(Background::Disc(Circle::new(
        Point::new(disc_x, bottom_band_y),
        DISC,
    )));

    let x = (SCREEN - WIDGET_WIDTH as i32) / 2;
    for (slot, band_y) in [(0, 0), (2, bottom_band_y)] {
        let height = source.widget_height(slots[slot], mode);
        let y = band_y + centered_in(FIXED_WIDGET_HEIGHT, height);
        result.place(slot, slots[slot], Point::new(x, y), height);
    }

    result
}

fn layout_sides<H: HeightSource>(slots: &[WidgetType; 4], source: &H) -> LayoutResult {
    let mode = RenderMode::NATURAL;
    let mut result = LayoutResult::new(mode);

    let side = ROUND_SIDE_WIDTH as i32;
    let right_x = SCREEN - side;
    let disc_y = -(SCREEN / 2);

    result.add_background(Background::Disc(Circle::new(
        Point::new(side - DISC as i32, disc_y),
        DISC,
    )));
    result.add_background(Background::Disc(Circle::new(
        Point::new(right_x, disc_y),
        DISC,
    )));

    let regions = [(0, ROUND_LEFT_X_OFFSET), (2, right_x + ROUND_RIGHT_X_OFFSET)];
    for (slot, x) in regions {
        let height = source.widget_height(slots[slot], mode);
        let y = centered_in(ROUND_DIAMETER_PX, height);
        result.place(slot, slots[slot], Point::new(x, y), height);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScreenShape;
    use crate::layout::LayoutEngine;
    use crate::widgets::WidgetType::*;

    struct Fixed(u32);

    impl HeightSource for Fixed {
        fn widget_height(&self, widget: WidgetType, mode: RenderMode) -> u32 {
            if widget.is_empty() {
                0
            } else if mode.fixed_height {
                FIXED_WIDGET_HEIGHT
            } else {
                self.0
            }
        }
    }

    const LOCATIONS: [SidebarLocation; 4] = [
        SidebarLocation::Left,
        SidebarLocation::Right,
        SidebarLocation::Top,
        SidebarLocation::Bottom,
    ];

    #[test]
    fn test_slots_one_and_three_never_render() {
        let slots = [Date, Seconds, WeekNumber, Beats];
        for location in LOCATIONS {
            let result = LayoutEngine::new(ScreenShape::Round).layout(location, &slots, &Fixed(26));
            let drawn: heapless::Vec<usize, 4> = result.placements.iter().map(|p| p.slot).collect();
            assert_eq!(drawn.as_slice(), &[0, 2], "{location:?}");
            assert_eq!(result.backgrounds.len(), 2);
        }
    }

    #[test]
    fn test_band_positions() {
        let slots = [Date, Empty, WeekNumber, Empty];
        let result =
            LayoutEngine::new(ScreenShape::Round).layout(SidebarLocation::Bottom, &slots, &Fixed(26));
        assert_eq!(result.mode, RenderMode::BAR);
        assert_eq!(result.placement(0).map(|p| p.origin), Some(Point::new(75, 0)));
        assert_eq!(result.placement(2).map(|p| p.origin), Some(Point::new(75, 129)));
        assert_eq!(
            result.backgrounds[1],
            Background::Disc(Circle::new(Point::new(-90, 129), 360))
        );
    }

    #[test]
    fn test_side_positions() {
        let slots = [Date, Empty, WeekNumber, Empty];
        let result =
            LayoutEngine::new(ScreenShape::Round).layout(SidebarLocation::Left, &slots, &Fixed(26));
        assert_eq!(result.mode, RenderMode::NATURAL);
        assert_eq!(result.placement(0).map(|p| p.origin), Some(Point::new(7, 77)));
        assert_eq!(result.placement(2).map(|p| p.origin), Some(Point::new(143, 77)));
        assert_eq!(
            result.backgrounds[0],
            Background::Disc(Circle::new(Point::new(-320, -90), 360))
        );
    }
}
