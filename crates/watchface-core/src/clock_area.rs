//! The large clock drawn in the space the sidebar leaves free.

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_9X18_BOLD, FONT_10X20};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::config::{FIXED_WIDGET_HEIGHT, ROUND_SIDE_WIDTH, ScreenShape, WIDGET_WIDTH};
use crate::settings::{ClockFont, Settings, SidebarLocation};
use crate::time_date::TimeStrings;

const LINE_GAP: i32 = 2;
const DATE_GAP: i32 = 6;
const DATE_FONT: &MonoFont<'static> = &FONT_6X10;

/// Region of the screen not covered by the sidebar.
pub fn clock_bounds(shape: ScreenShape, location: SidebarLocation) -> Rectangle {
    let (w, h) = (shape.width(), shape.height());
    let side = match shape {
        ScreenShape::Rect => WIDGET_WIDTH,
        ScreenShape::Round => ROUND_SIDE_WIDTH,
    };
    let band = FIXED_WIDGET_HEIGHT;

    match (shape, location) {
        (_, SidebarLocation::None) => shape.bounds(),
        (ScreenShape::Rect, SidebarLocation::Left) => {
            Rectangle::new(Point::new(side as i32, 0), Size::new(w - side, h))
        }
        (ScreenShape::Rect, SidebarLocation::Right) => {
            Rectangle::new(Point::zero(), Size::new(w - side, h))
        }
        (ScreenShape::Rect, SidebarLocation::Top) => {
            Rectangle::new(Point::new(0, band as i32), Size::new(w, h - band))
        }
        (ScreenShape::Rect, SidebarLocation::Bottom) => {
            Rectangle::new(Point::zero(), Size::new(w, h - band))
        }
        // Round screens always paint both regions of the chosen axis.
        (ScreenShape::Round, SidebarLocation::Left | SidebarLocation::Right) => {
            Rectangle::new(Point::new(side as i32, 0), Size::new(w - 2 * side, h))
        }
        (ScreenShape::Round, SidebarLocation::Top | SidebarLocation::Bottom) => {
            Rectangle::new(Point::new(0, band as i32), Size::new(w, h - 2 * band))
        }
    }
}

/// Fonts for the hour and minute digits.
pub fn clock_fonts(font: ClockFont) -> (&'static MonoFont<'static>, &'static MonoFont<'static>) {
    match font {
        ClockFont::Default | ClockFont::Leco => (&FONT_10X20, &FONT_10X20),
        ClockFont::Bold => (&FONT_9X18_BOLD, &FONT_9X18_BOLD),
        ClockFont::BoldHours => (&FONT_9X18_BOLD, &FONT_10X20),
        ClockFont::BoldMinutes => (&FONT_10X20, &FONT_9X18_BOLD),
    }
}

fn line_height(font: &MonoFont<'_>) -> i32 {
    font.character_size.height as i32
}

fn draw_text<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    text: &str,
    font: &MonoFont<'_>,
    color: Rgb565,
    position: Point,
    alignment: Alignment,
) -> Result<(), D::Error> {
    let style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Top)
        .build();
    Text::with_text_style(text, position, MonoTextStyle::new(font, color), style).draw(display)?;
    Ok(())
}

/// Clear the clock region and draw the time into it.
///
/// Beside a vertical sidebar (or none) hours sit above minutes; with a
/// horizontal bar the time is one `HH:MM` line followed by the date.
pub fn draw<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    settings: &Settings,
    strings: &TimeStrings,
    shape: ScreenShape,
) -> Result<(), D::Error> {
    let location = settings.sidebar_location;
    let bounds = clock_bounds(shape, location);
    display.fill_solid(&bounds, settings.time_bg_color.to_rgb565())?;

    let color = settings.time_color.to_rgb565();
    let (hours_font, minutes_font) = clock_fonts(settings.clock_font);
    let center = bounds.center();

    if location.is_horizontal() {
        let time_h = line_height(hours_font).max(line_height(minutes_font));
        let block = time_h + DATE_GAP + line_height(DATE_FONT);
        let top = center.y - block / 2;

        let colon_half = hours_font.character_size.width as i32 / 2;
        draw_text(display, ":", hours_font, color, Point::new(center.x, top), Alignment::Center)?;
        draw_text(
            display,
            &strings.hours,
            hours_font,
            color,
            Point::new(center.x - colon_half, top),
            Alignment::Right,
        )?;
        draw_text(
            display,
            &strings.minutes,
            minutes_font,
            color,
            Point::new(center.x + colon_half + 1, top),
            Alignment::Left,
        )?;
        draw_text(
            display,
            &strings.full_date,
            DATE_FONT,
            color,
            Point::new(center.x, top + time_h + DATE_GAP),
            Alignment::Center,
        )?;
    } else {
        let block = line_height(hours_font) + LINE_GAP + line_height(minutes_font);
        let top = center.y - block / 2;
        draw_text(
            display,
            &strings.hours,
            hours_font,
            color,
            Point::new(center.x, top),
            Alignment::Center,
        )?;
        draw_text(
            display,
            &strings.minutes,
            minutes_font,
            color,
            Point::new(center.x, top + line_height(hours_font) + LINE_GAP),
            Alignment::Center,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::settings::WatchColor;
    use heapless::String;

    fn rect(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn test_rect_bounds() {
        let shape = ScreenShape::Rect;
        assert_eq!(clock_bounds(shape, SidebarLocation::Left), rect(30, 0, 114, 168));
        assert_eq!(clock_bounds(shape, SidebarLocation::Right), rect(0, 0, 114, 168));
        assert_eq!(clock_bounds(shape, SidebarLocation::Top), rect(0, 51, 144, 117));
        assert_eq!(clock_bounds(shape, SidebarLocation::Bottom), rect(0, 0, 144, 117));
        assert_eq!(clock_bounds(shape, SidebarLocation::None), rect(0, 0, 144, 168));
    }

    #[test]
    fn test_round_bounds() {
        let shape = ScreenShape::Round;
        assert_eq!(clock_bounds(shape, SidebarLocation::Left), rect(40, 0, 100, 180));
        assert_eq!(clock_bounds(shape, SidebarLocation::Right), rect(40, 0, 100, 180));
        assert_eq!(clock_bounds(shape, SidebarLocation::Top), rect(0, 51, 180, 78));
        assert_eq!(clock_bounds(shape, SidebarLocation::Bottom), rect(0, 51, 180, 78));
        assert_eq!(clock_bounds(shape, SidebarLocation::None), rect(0, 0, 180, 180));
    }

    #[test]
    fn test_bold_variants() {
        assert_eq!(clock_fonts(ClockFont::BoldHours).0.character_size, FONT_9X18_BOLD.character_size);
        assert_eq!(clock_fonts(ClockFont::BoldHours).1.character_size, FONT_10X20.character_size);
        assert_eq!(clock_fonts(ClockFont::Leco).0.character_size, FONT_10X20.character_size);
    }

    fn strings() -> TimeStrings {
        let mut strings = TimeStrings::default();
        strings.hours = String::try_from("10").unwrap();
        strings.minutes = String::try_from("42").unwrap();
        strings.full_date = String::try_from("MON 5 OCT").unwrap();
        strings
    }

    fn count(fb: &FrameBuffer, area: Rectangle, color: Rgb565) -> usize {
        area.points()
            .filter(|p| fb.pixel(p.x as usize, p.y as usize) == Some(color))
            .count()
    }

    #[test]
    fn test_draw_stays_inside_clock_region() {
        for location in [
            SidebarLocation::Left,
            SidebarLocation::Right,
            SidebarLocation::Top,
            SidebarLocation::Bottom,
        ] {
            let settings = Settings {
                sidebar_location: location,
                time_bg_color: WatchColor(0x0000FF),
                ..Settings::default()
            };
            let mut fb = FrameBuffer::new(ScreenShape::Rect);
            draw(&mut fb, &settings, &strings(), ScreenShape::Rect).unwrap();

            let bounds = clock_bounds(ScreenShape::Rect, location);
            let white = WatchColor::WHITE.to_rgb565();
            let blue = WatchColor(0x0000FF).to_rgb565();
            assert!(count(&fb, bounds, white) > 0, "{location:?}");
            assert_eq!(
                count(&fb, ScreenShape::Rect.bounds(), white),
                count(&fb, bounds, white),
                "{location:?}"
            );
            assert_eq!(fb.pixel(bounds.top_left.x as usize, bounds.top_left.y as usize), Some(blue));
        }
    }

    #[test]
    fn test_sidebar_area_left_untouched() {
        let settings = Settings {
            sidebar_location: SidebarLocation::Right,
            time_bg_color: WatchColor(0xFF0000),
            ..Settings::default()
        };
        let mut fb = FrameBuffer::new(ScreenShape::Rect);
        draw(&mut fb, &settings, &strings(), ScreenShape::Rect).unwrap();

        assert_eq!(fb.pixel(113, 0), Some(WatchColor(0xFF0000).to_rgb565()));
        assert_eq!(fb.pixel(114, 0), Some(Rgb565::BLACK));
    }
}
