//! Current conditions and today's forecast.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, Line, Polyline, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle,
};
use heapless::String;

use super::text::{SMALL_FONT, column_center, draw_centered, draw_temperature, value_font};
use super::{SidebarWidget, WidgetContext};
use crate::device::{WeatherCondition, display_temperature};

const ICON_HEIGHT: i32 = 20;
const LOADING: &str = "...";

fn temperature_text(temp_c: i32, ctx: &WidgetContext<'_>) -> String<5> {
    let mut text = String::new();
    write!(text, "{}", display_temperature(temp_c, ctx.settings.use_metric)).ok();
    text
}

// ---------------------------------------------------------------------------
// Current conditions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentWeatherWidget;

impl SidebarWidget for CurrentWeatherWidget {
    fn height(&self, ctx: &WidgetContext<'_>) -> u32 {
        if ctx.large() { 44 } else { 42 }
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        ctx: &WidgetContext<'_>,
        origin: Point,
    ) -> Result<(), D::Error> {
        let center_x = column_center(origin);
        let text_top = origin.y + ICON_HEIGHT + 4;

        let Some(current) = ctx.device.weather.current else {
            return draw_centered(
                display,
                LOADING,
                value_font(ctx),
                ctx.text_color(),
                center_x,
                text_top,
            );
        };

        draw_weather_icon(display, ctx, current.condition, origin + Point::new(2, 0))?;
        draw_temperature(
            display,
            &temperature_text(current.temp_c, ctx),
            value_font(ctx),
            ctx.text_color(),
            center_x,
            text_top,
        )
    }
}

// ---------------------------------------------------------------------------
// Forecast
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastWidget;

impl SidebarWidget for ForecastWidget {
    fn height(&self, ctx: &WidgetContext<'_>) -> u32 {
        if ctx.large() { 63 } else { 60 }
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        ctx: &WidgetContext<'_>,
        origin: Point,
    ) -> Result<(), D::Error> {
        let center_x = column_center(origin);
        let font = value_font(ctx);
        let color = ctx.text_color();
        let high_top = origin.y + ICON_HEIGHT + 3;
        let divider_y = high_top + font.character_size.height as i32 + 3;
        let low_top = divider_y + 3;

        let Some(forecast) = ctx.device.weather.forecast else {
            return draw_centered(display, LOADING, font, color, center_x, high_top);
        };

        draw_weather_icon(display, ctx, forecast.condition, origin + Point::new(2, 0))?;
        draw_temperature(
            display,
            &temperature_text(forecast.high_c, ctx),
            font,
            color,
            center_x,
            high_top,
        )?;
        Line::new(
            Point::new(origin.x + 5, divider_y),
            Point::new(origin.x + 24, divider_y),
        )
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(display)?;
        draw_temperature(
            display,
            &temperature_text(forecast.low_c, ctx),
            font,
            color,
            center_x,
            low_top,
        )
    }
}

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

/// Draw a 26×20 condition icon with its top-left corner at `at`.
fn draw_weather_icon<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    ctx: &WidgetContext<'_>,
    condition: WeatherCondition,
    at: Point,
) -> Result<(), D::Error> {
    let fill = ctx.icons.fill.to_rgb565();
    let stroke = ctx.icons.stroke.to_rgb565();
    let outlined = PrimitiveStyleBuilder::new()
        .stroke_color(stroke)
        .stroke_width(1)
        .fill_color(fill)
        .build();
    let line = PrimitiveStyle::with_stroke(stroke, 1);

    match condition {
        WeatherCondition::ClearDay => {
            Circle::new(at + Point::new(7, 4), 12)
                .into_styled(outlined)
                .draw(display)?;
            let rays = [
                ((13, 0), (13, 2)),
                ((13, 18), (13, 20)),
                ((3, 10), (5, 10)),
                ((21, 10), (23, 10)),
            ];
            for (from, to) in rays {
                Line::new(at + Point::from(from), at + Point::from(to))
                    .into_styled(line)
                    .draw(display)?;
            }
        }
        WeatherCondition::ClearNight => {
            Circle::new(at + Point::new(6, 3), 14)
                .into_styled(outlined)
                .draw(display)?;
            let sky = ctx.settings.sidebar_color.to_rgb565();
            Circle::new(at + Point::new(11, 1), 12)
                .into_styled(PrimitiveStyle::with_fill(sky))
                .draw(display)?;
        }
        WeatherCondition::PartlyCloudy => {
            Circle::new(at + Point::new(2, 0), 10)
                .into_styled(outlined)
                .draw(display)?;
            draw_cloud(display, at, fill, stroke)?;
        }
        WeatherCondition::Cloudy => draw_cloud(display, at, fill, stroke)?,
        WeatherCondition::Rain => {
            draw_cloud(display, at, fill, stroke)?;
            for x in [9, 14, 19] {
                Line::new(at + Point::new(x, 16), at + Point::new(x - 2, 19))
                    .into_styled(line)
                    .draw(display)?;
            }
        }
        WeatherCondition::Snow => {
            draw_cloud(display, at, fill, stroke)?;
            for x in [8, 13, 18] {
                Rectangle::new(at + Point::new(x, 17), Size::new(2, 2))
                    .into_styled(PrimitiveStyle::with_fill(stroke))
                    .draw(display)?;
            }
        }
        WeatherCondition::Thunderstorm => {
            draw_cloud(display, at, fill, stroke)?;
            let bolt = [
                at + Point::new(14, 14),
                at + Point::new(11, 17),
                at + Point::new(15, 17),
                at + Point::new(12, 20),
            ];
            Polyline::new(&bolt).into_styled(line).draw(display)?;
        }
        WeatherCondition::Fog => {
            for (y, inset) in [(6, 2), (11, 0), (16, 4)] {
                Line::new(at + Point::new(inset, y), at + Point::new(25 - inset, y))
                    .into_styled(PrimitiveStyle::with_stroke(stroke, 2))
                    .draw(display)?;
            }
        }
        WeatherCondition::Unknown => {
            draw_centered(display, "?", SMALL_FONT, stroke, at.x + 13, at.y + 5)?;
        }
    }

    Ok(())
}

fn draw_cloud<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    at: Point,
    fill: Rgb565,
    stroke: Rgb565,
) -> Result<(), D::Error> {
    let outlined = PrimitiveStyleBuilder::new()
        .stroke_color(stroke)
        .stroke_width(1)
        .fill_color(fill)
        .build();

    for (x, y, diameter) in [(3, 6, 9), (9, 2, 12), (16, 6, 8)] {
        Circle::new(at + Point::new(x, y), diameter)
            .into_styled(outlined)
            .draw(display)?;
    }
    // Cover the inner arcs, then close the base.
    Rectangle::new(at + Point::new(7, 8), Size::new(13, 6))
        .into_styled(PrimitiveStyle::with_fill(fill))
        .draw(display)?;
    Line::new(at + Point::new(7, 14), at + Point::new(20, 14))
        .into_styled(PrimitiveStyle::with_stroke(stroke, 1))
        .draw(display)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceState;
    use crate::settings::Settings;
    use crate::time_date::TimeStrings;

    #[test]
    fn test_temperature_follows_unit_setting() {
        let device = DeviceState::default();
        let strings = TimeStrings::default();

        let metric = Settings::default();
        let ctx = WidgetContext::new(&metric, &device, &strings);
        assert_eq!(temperature_text(-3, &ctx).as_str(), "-3");

        let imperial = Settings {
            use_metric: false,
            ..Settings::default()
        };
        let ctx = WidgetContext::new(&imperial, &device, &strings);
        assert_eq!(temperature_text(-3, &ctx).as_str(), "27");
    }
}
