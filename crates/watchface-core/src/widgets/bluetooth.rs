//! Crossed-out Bluetooth rune shown while the phone is disconnected.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, Polyline, PrimitiveStyle, PrimitiveStyleBuilder};

use super::{SidebarWidget, WidgetContext};

#[derive(Debug, Clone, Copy, Default)]
pub struct BluetoothDisconnect;

impl SidebarWidget for BluetoothDisconnect {
    fn height(&self, _ctx: &WidgetContext<'_>) -> u32 {
        22
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        ctx: &WidgetContext<'_>,
        origin: Point,
    ) -> Result<(), D::Error> {
        let fill = ctx.icons.fill.to_rgb565();
        let stroke = ctx.icons.stroke.to_rgb565();

        let disc = PrimitiveStyleBuilder::new()
            .stroke_color(stroke)
            .stroke_width(1)
            .fill_color(fill)
            .build();
        Circle::new(origin + Point::new(5, 1), 20)
            .into_styled(disc)
            .draw(display)?;

        let rune = [
            origin + Point::new(11, 7),
            origin + Point::new(19, 15),
            origin + Point::new(15, 19),
            origin + Point::new(15, 3),
            origin + Point::new(19, 7),
            origin + Point::new(11, 15),
        ];
        let line = PrimitiveStyle::with_stroke(stroke, 1);
        Polyline::new(&rune).into_styled(line).draw(display)?;

        Line::new(origin + Point::new(8, 4), origin + Point::new(22, 18))
            .into_styled(PrimitiveStyle::with_stroke(stroke, 2))
            .draw(display)
    }
}
