//! Calendar and clock widgets that only need the cached time strings.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::text::{MEDIUM_FONT, SMALL_FONT, column_center, draw_centered, value_font};
use super::{SidebarWidget, WidgetContext};

const VALUE_TOP: i32 = 12;

fn labelled_height(ctx: &WidgetContext<'_>) -> u32 {
    if ctx.large() { 29 } else { 26 }
}

/// Small label on top, value below.
fn draw_labelled<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    ctx: &WidgetContext<'_>,
    origin: Point,
    label: &str,
    value: &str,
) -> Result<(), D::Error> {
    let center_x = column_center(origin);
    let color = ctx.text_color();
    draw_centered(display, label, SMALL_FONT, color, center_x, origin.y)?;
    draw_centered(
        display,
        value,
        value_font(ctx),
        color,
        center_x,
        origin.y + VALUE_TOP,
    )
}

/// ":SS" below the main clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct Seconds;

impl SidebarWidget for Seconds {
    fn height(&self, _ctx: &WidgetContext<'_>) -> u32 {
        14
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        ctx: &WidgetContext<'_>,
        origin: Point,
    ) -> Result<(), D::Error> {
        draw_centered(
            display,
            &ctx.strings.seconds,
            MEDIUM_FONT,
            ctx.text_color(),
            column_center(origin),
            origin.y,
        )
    }
}

/// Hour in a second time zone under a user-chosen label.
#[derive(Debug, Clone, Copy, Default)]
pub struct AltTimeZone;

impl SidebarWidget for AltTimeZone {
    fn height(&self, ctx: &WidgetContext<'_>) -> u32 {
        labelled_height(ctx)
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        ctx: &WidgetContext<'_>,
        origin: Point,
    ) -> Result<(), D::Error> {
        draw_labelled(
            display,
            ctx,
            origin,
            &ctx.settings.alt_clock_name,
            &ctx.strings.alt_clock,
        )
    }
}

/// Swatch Internet Time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Beats;

impl SidebarWidget for Beats {
    fn height(&self, ctx: &WidgetContext<'_>) -> u32 {
        labelled_height(ctx)
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        ctx: &WidgetContext<'_>,
        origin: Point,
    ) -> Result<(), D::Error> {
        draw_labelled(display, ctx, origin, "@", &ctx.strings.beats)
    }
}

/// ISO week number under a localized label.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekNumber;

impl SidebarWidget for WeekNumber {
    fn height(&self, ctx: &WidgetContext<'_>) -> u32 {
        labelled_height(ctx)
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        ctx: &WidgetContext<'_>,
        origin: Point,
    ) -> Result<(), D::Error> {
        draw_labelled(
            display,
            ctx,
            origin,
            ctx.settings.language.week_label(),
            &ctx.strings.week_num,
        )
    }
}
