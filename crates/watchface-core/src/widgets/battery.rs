//! Battery meter: a battery outline with level fill and optional percentage.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, Triangle};
use heapless::String;

use super::text::{column_center, draw_centered, value_font};
use super::{SidebarWidget, WidgetContext};

const ICON_HEIGHT: u32 = 14;
const LEVEL_MAX_WIDTH: u32 = 18;
const LOW_LEVEL_PCT: u8 = 20;

#[derive(Debug, Clone, Copy, Default)]
pub struct BatteryMeter;

impl BatteryMeter {
    fn shows_text(ctx: &WidgetContext<'_>) -> bool {
        ctx.settings.show_battery_pct && !ctx.device.battery.charging
    }

    fn percent_text(ctx: &WidgetContext<'_>) -> String<5> {
        let percent = ctx.device.battery.display_percent();
        let mut text = String::new();
        if ctx.large() {
            write!(text, "{}", percent).ok();
        } else if ctx.settings.language.percent_sign_first() {
            write!(text, "%{}", percent).ok();
        } else {
            write!(text, "{}%", percent).ok();
        }
        text
    }
}

impl SidebarWidget for BatteryMeter {
    fn height(&self, ctx: &WidgetContext<'_>) -> u32 {
        if !Self::shows_text(ctx) {
            ICON_HEIGHT
        } else if ctx.large() {
            33
        } else {
            27
        }
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        ctx: &WidgetContext<'_>,
        origin: Point,
    ) -> Result<(), D::Error> {
        let fill = ctx.icons.fill.to_rgb565();
        let stroke = ctx.icons.stroke.to_rgb565();
        let battery = ctx.device.battery;

        let body_style = PrimitiveStyleBuilder::new()
            .stroke_color(stroke)
            .stroke_width(1)
            .fill_color(fill)
            .build();
        Rectangle::new(origin + Point::new(3, 1), Size::new(22, 12))
            .into_styled(body_style)
            .draw(display)?;
        Rectangle::new(origin + Point::new(25, 4), Size::new(2, 6))
            .into_styled(PrimitiveStyle::with_fill(stroke))
            .draw(display)?;

        if battery.charging {
            // Lightning bolt inside the outline.
            let bolt = PrimitiveStyle::with_fill(stroke);
            Triangle::new(
                origin + Point::new(15, 2),
                origin + Point::new(9, 8),
                origin + Point::new(14, 8),
            )
            .into_styled(bolt)
            .draw(display)?;
            Triangle::new(
                origin + Point::new(14, 6),
                origin + Point::new(19, 6),
                origin + Point::new(13, 12),
            )
            .into_styled(bolt)
            .draw(display)?;
        } else {
            let level = (LEVEL_MAX_WIDTH * u32::from(battery.display_percent()) + 50) / 100;
            let level_color = if battery.percent <= LOW_LEVEL_PCT {
                Rgb565::RED
            } else {
                stroke
            };
            Rectangle::new(origin + Point::new(5, 3), Size::new(level.max(1), 8))
                .into_styled(PrimitiveStyle::with_fill(level_color))
                .draw(display)?;
        }

        if Self::shows_text(ctx) {
            let text = Self::percent_text(ctx);
            draw_centered(
                display,
                &text,
                value_font(ctx),
                ctx.text_color(),
                column_center(origin),
                origin.y + ICON_HEIGHT as i32,
            )?;
        }

        Ok(())
    }
}
