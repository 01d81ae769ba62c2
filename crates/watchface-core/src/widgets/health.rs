//! Health widgets: sleep or activity, and heart rate.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle, Triangle,
};
use heapless::String;

use super::text::{MEDIUM_FONT, SMALL_FONT, column_center, draw_centered, value_font};
use super::{SidebarWidget, WidgetContext};

const METERS_PER_MILE: u32 = 1609;

/// Step count text: "850", "4.5k", "12k".
pub fn format_steps(steps: u32, separator: char) -> String<8> {
    let mut text = String::new();
    if steps < 1_000 {
        write!(text, "{}", steps).ok();
    } else if steps < 10_000 {
        write!(text, "{}{}{}k", steps / 1_000, separator, steps / 100 % 10).ok();
    } else {
        write!(text, "{}k", steps / 1_000).ok();
    }
    text
}

/// Walked distance text and whether it needs the small font to fit.
pub fn format_distance(meters: u32, metric: bool, separator: char) -> (String<8>, bool) {
    let mut text = String::new();
    let mut small = false;

    if metric {
        if meters < 100 {
            write!(text, "{}m", meters).ok();
        } else if meters < 1_000 {
            write!(text, "{}{}km", separator, meters / 100).ok();
        } else {
            let km = meters / 1_000;
            small = km > 9;
            write!(text, "{}km", km).ok();
        }
    } else {
        let whole = (meters + METERS_PER_MILE / 2) / METERS_PER_MILE;
        if whole > 0 {
            write!(text, "{}mi", whole).ok();
        } else {
            let tenths = meters * 10 / METERS_PER_MILE % 10;
            write!(text, "{}{}mi", separator, tenths).ok();
        }
    }

    (text, small)
}

fn outlined(ctx: &WidgetContext<'_>) -> PrimitiveStyle<Rgb565> {
    PrimitiveStyleBuilder::new()
        .stroke_color(ctx.icons.stroke.to_rgb565())
        .stroke_width(1)
        .fill_color(ctx.icons.fill.to_rgb565())
        .build()
}

// ---------------------------------------------------------------------------
// Sleep / activity
// ---------------------------------------------------------------------------

/// Sleep time while the user sleeps, otherwise steps or distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthActivity;

impl HealthActivity {
    fn draw_sleep<D: DrawTarget<Color = Rgb565>>(
        display: &mut D,
        ctx: &WidgetContext<'_>,
        origin: Point,
    ) -> Result<(), D::Error> {
        let health = &ctx.device.health;
        let seconds = if ctx.settings.health_use_restful_sleep {
            health.restful_sleep_seconds
        } else {
            health.sleep_seconds
        }
        .unwrap_or(0);
        let minutes = seconds / 60;

        // Crescent moon.
        Circle::new(origin + Point::new(8, 0), 14)
            .into_styled(outlined(ctx))
            .draw(display)?;
        let sky = ctx.settings.sidebar_color.to_rgb565();
        Circle::new(origin + Point::new(12, -2), 12)
            .into_styled(PrimitiveStyle::with_fill(sky))
            .draw(display)?;

        let center_x = column_center(origin);
        let color = ctx.text_color();
        let mut hours_text: String<5> = String::new();
        write!(hours_text, "{}h", minutes / 60).ok();
        draw_centered(display, &hours_text, MEDIUM_FONT, color, center_x, origin.y + 14)?;

        let mut minutes_text: String<4> = String::new();
        write!(minutes_text, "{}m", minutes % 60).ok();
        draw_centered(display, &minutes_text, SMALL_FONT, color, center_x, origin.y + 30)
    }

    fn draw_steps<D: DrawTarget<Color = Rgb565>>(
        display: &mut D,
        ctx: &WidgetContext<'_>,
        origin: Point,
    ) -> Result<(), D::Error> {
        // Two footprints.
        let style = outlined(ctx);
        for (x, y) in [(8, 0), (16, 3)] {
            RoundedRectangle::with_equal_corners(
                Rectangle::new(origin + Point::new(x, y), Size::new(6, 10)),
                Size::new(3, 3),
            )
            .into_styled(style)
            .draw(display)?;
        }

        let health = &ctx.device.health;
        let separator = ctx.settings.decimal_separator;
        let (text, small) = if ctx.settings.health_use_distance {
            format_distance(
                health.distance_meters.unwrap_or(0),
                ctx.settings.use_metric,
                separator,
            )
        } else {
            (format_steps(health.steps.unwrap_or(0), separator), false)
        };
        let font = if small { SMALL_FONT } else { MEDIUM_FONT };

        draw_centered(
            display,
            &text,
            font,
            ctx.text_color(),
            column_center(origin),
            origin.y + 14,
        )
    }
}

impl SidebarWidget for HealthActivity {
    fn height(&self, ctx: &WidgetContext<'_>) -> u32 {
        if ctx.device.health.sleeping { 44 } else { 32 }
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        ctx: &WidgetContext<'_>,
        origin: Point,
    ) -> Result<(), D::Error> {
        if ctx.device.health.sleeping {
            Self::draw_sleep(display, ctx, origin)
        } else {
            Self::draw_steps(display, ctx, origin)
        }
    }
}

// ---------------------------------------------------------------------------
// Heart rate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct HeartRate;

impl SidebarWidget for HeartRate {
    fn height(&self, ctx: &WidgetContext<'_>) -> u32 {
        if ctx.large() { 40 } else { 38 }
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        ctx: &WidgetContext<'_>,
        origin: Point,
    ) -> Result<(), D::Error> {
        let style = outlined(ctx);
        Circle::new(origin + Point::new(6, 1), 10)
            .into_styled(style)
            .draw(display)?;
        Circle::new(origin + Point::new(14, 1), 10)
            .into_styled(style)
            .draw(display)?;
        Triangle::new(
            origin + Point::new(6, 7),
            origin + Point::new(23, 7),
            origin + Point::new(15, 16),
        )
        .into_styled(style)
        .draw(display)?;

        let mut text: String<4> = String::new();
        write!(text, "{}", ctx.device.health.heart_rate_bpm.unwrap_or(0)).ok();
        let text_top = if ctx.large() { 17 } else { 21 };
        draw_centered(
            display,
            &text,
            value_font(ctx),
            ctx.text_color(),
            column_center(origin),
            origin.y + text_top,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_steps() {
        assert_eq!(format_steps(0, '.').as_str(), "0");
        assert_eq!(format_steps(999, '.').as_str(), "999");
        assert_eq!(format_steps(4_567, '.').as_str(), "4.5k");
        assert_eq!(format_steps(4_567, ',').as_str(), "4,5k");
        assert_eq!(format_steps(12_345, '.').as_str(), "12k");
    }

    #[test]
    fn test_format_metric_distance() {
        assert_eq!(format_distance(42, true, '.').0.as_str(), "42m");
        assert_eq!(format_distance(750, true, '.').0.as_str(), ".7km");

        let (text, small) = format_distance(3_400, true, '.');
        assert_eq!((text.as_str(), small), ("3km", false));
        let (text, small) = format_distance(12_000, true, '.');
        assert_eq!((text.as_str(), small), ("12km", true));
    }

    #[test]
    fn test_format_imperial_distance() {
        assert_eq!(format_distance(500, false, '.').0.as_str(), ".3mi");
        assert_eq!(format_distance(2_500, false, '.').0.as_str(), "2mi");
        assert_eq!(format_distance(800, false, ',').0.as_str(), ",4mi");
    }
}
