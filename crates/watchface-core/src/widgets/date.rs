//! Day name, day number in a box, and the month below.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle};

use super::text::{column_center, draw_centered, value_font};
use super::{SidebarWidget, WidgetContext};

/// Vertical offsets of the box and the month row, per font size.
struct DateMetrics {
    box_top: i32,
    box_height: u32,
    month_top: i32,
}

const DEFAULT_METRICS: DateMetrics = DateMetrics {
    box_top: 16,
    box_height: 20,
    month_top: 40,
};

const LARGE_METRICS: DateMetrics = DateMetrics {
    box_top: 18,
    box_height: 22,
    month_top: 44,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct DateBox;

impl SidebarWidget for DateBox {
    fn height(&self, ctx: &WidgetContext<'_>) -> u32 {
        match (ctx.large(), ctx.mode.compact) {
            (true, true) => 42,
            (true, false) => 62,
            (false, true) => 41,
            (false, false) => 58,
        }
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        ctx: &WidgetContext<'_>,
        origin: Point,
    ) -> Result<(), D::Error> {
        let metrics = if ctx.large() {
            &LARGE_METRICS
        } else {
            &DEFAULT_METRICS
        };
        let font = value_font(ctx);
        let text_color = ctx.text_color();
        let center_x = column_center(origin);

        draw_centered(
            display,
            &ctx.strings.day_name,
            font,
            text_color,
            center_x,
            origin.y,
        )?;

        let box_style = PrimitiveStyleBuilder::new()
            .stroke_color(ctx.icons.stroke.to_rgb565())
            .stroke_width(1)
            .fill_color(ctx.icons.fill.to_rgb565())
            .build();
        Rectangle::new(
            Point::new(origin.x + 2, origin.y + metrics.box_top),
            Size::new(26, metrics.box_height),
        )
        .into_styled(box_style)
        .draw(display)?;

        // The number sits on the icon fill, so it takes the icon stroke color.
        draw_centered(
            display,
            &ctx.strings.day_num,
            font,
            ctx.icons.stroke.to_rgb565(),
            center_x,
            origin.y + metrics.box_top + 3,
        )?;

        if !ctx.mode.compact {
            draw_centered(
                display,
                &ctx.strings.month,
                font,
                text_color,
                center_x,
                origin.y + metrics.month_top,
            )?;
        }

        Ok(())
    }
}
