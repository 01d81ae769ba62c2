//! Fonts and text helpers shared by the sidebar widgets.

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_7X13_BOLD, FONT_9X15_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use super::WidgetContext;
use crate::config::WIDGET_WIDTH;

/// Labels and secondary rows.
pub const SMALL_FONT: &MonoFont<'static> = &FONT_6X10;

/// Primary values with the default font size.
pub const MEDIUM_FONT: &MonoFont<'static> = &FONT_7X13_BOLD;

/// Primary values with large fonts enabled.
pub const LARGE_FONT: &MonoFont<'static> = &FONT_9X15_BOLD;

/// Font for a widget's main value.
pub fn value_font(ctx: &WidgetContext<'_>) -> &'static MonoFont<'static> {
    if ctx.large() { LARGE_FONT } else { MEDIUM_FONT }
}

/// Horizontal center of the widget column starting at `origin`.
pub fn column_center(origin: Point) -> i32 {
    origin.x + (WIDGET_WIDTH / 2) as i32
}

/// Draw `text` horizontally centered on `center_x` with its top edge at `top`.
pub fn draw_centered<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    text: &str,
    font: &MonoFont<'_>,
    color: Rgb565,
    center_x: i32,
    top: i32,
) -> Result<(), D::Error> {
    let character_style = MonoTextStyle::new(font, color);
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Top)
        .build();

    Text::with_text_style(text, Point::new(center_x, top), character_style, text_style)
        .draw(display)?;
    Ok(())
}

/// Draw a temperature centered in the column, followed by a small degree ring.
pub fn draw_temperature<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    text: &str,
    font: &MonoFont<'_>,
    color: Rgb565,
    center_x: i32,
    top: i32,
) -> Result<(), D::Error> {
    draw_centered(display, text, font, color, center_x, top)?;

    let text_width = (text.len() as u32 * font.character_size.width) as i32;
    let ring_x = center_x + text_width / 2 + 1;
    Circle::new(Point::new(ring_x, top), 4)
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(display)
}
