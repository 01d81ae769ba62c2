//! One sidebar redraw: overrides, slot selection, layout, then drawing.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::PrimitiveStyle;

use crate::config::ScreenShape;
use crate::layout::{Background, LayoutEngine, LayoutResult};
use crate::selector::{ResolvedSlots, resolve_slots};
use crate::settings::DerivedFlags;
use crate::widgets::{SidebarWidget, Widget, WidgetContext};

/// Everything decided for one frame, before any pixel is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarFrame {
    pub slots: ResolvedSlots,
    pub layout: LayoutResult,
}

#[derive(Debug, Clone, Copy)]
pub struct Sidebar {
    engine: LayoutEngine,
}

impl Sidebar {
    pub fn new(shape: ScreenShape) -> Self {
        Self {
            engine: LayoutEngine::new(shape),
        }
    }

    /// Resolve overrides and lay out the current slots.
    pub fn plan(&self, ctx: &WidgetContext<'_>, derived: &DerivedFlags) -> SidebarFrame {
        let slots = resolve_slots(ctx.settings, derived, ctx.device, self.engine.shape());
        let layout = self
            .engine
            .layout(ctx.settings.sidebar_location, &slots.widgets, ctx);
        SidebarFrame { slots, layout }
    }

    /// Plan and draw the sidebar, returning the frame that was drawn.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        ctx: &WidgetContext<'_>,
        derived: &DerivedFlags,
    ) -> Result<SidebarFrame, D::Error> {
        let frame = self.plan(ctx, derived);
        let color = ctx.settings.sidebar_color.to_rgb565();

        for background in &frame.layout.backgrounds {
            match background {
                Background::Bar(area) => display.fill_solid(area, color)?,
                Background::Disc(disc) => disc
                    .into_styled(PrimitiveStyle::with_fill(color))
                    .draw(display)?,
            }
        }

        let widget_ctx = ctx.with_mode(frame.layout.mode);
        for placement in &frame.layout.placements {
            Widget::for_type(placement.widget).draw(display, &widget_ctx, placement.origin)?;
        }

        Ok(frame)
    }
}
