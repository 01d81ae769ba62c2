// src/widgets/mod.rs
//! Sidebar widget registry.
//!
//! Every widget kind has a concrete type implementing [`SidebarWidget`].
//! [`Widget`] is an enum that wraps them and delegates each call, so the
//! layout engine and the render pass can work with any kind without trait
//! objects. [`Widget::for_type`] is the registry lookup.
//!
//! # Height modes
//!
//! A widget's height depends on the [`RenderMode`]: compact mode trims
//! optional rows (the month below the date, for instance) and fixed-height
//! mode makes every non-empty widget report [`FIXED_WIDGET_HEIGHT`] and
//! centers its content inside that band. The empty widget is always 0.

mod battery;
mod bluetooth;
mod clock;
mod date;
mod health;
pub mod text;
mod weather;

pub use battery::BatteryMeter;
pub use bluetooth::BluetoothDisconnect;
pub use clock::{AltTimeZone, Beats, Seconds, WeekNumber};
pub use date::DateBox;
pub use health::{HealthActivity, HeartRate, format_distance, format_steps};
pub use weather::{CurrentWeatherWidget, ForecastWidget};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::FIXED_WIDGET_HEIGHT;
use crate::device::DeviceState;
use crate::settings::{IconColors, Settings};
use crate::time_date::TimeStrings;

// ---------------------------------------------------------------------------
// Widget kinds
// ---------------------------------------------------------------------------

/// Widget kind stored in a sidebar slot.
///
/// The wire id of each kind is fixed. Retired ids (9, 13, 14) and any
/// unknown id decode to [`WidgetType::Empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum WidgetType {
    #[default]
    Empty,
    BluetoothDisconnect,
    BatteryMeter,
    AltTimeZone,
    Date,
    Seconds,
    WeekNumber,
    WeatherCurrent,
    WeatherForecastToday,
    Health,
    Beats,
    HeartRate,
}

impl WidgetType {
    /// Every kind that can be drawn, in wire order.
    pub const ALL: [WidgetType; 12] = [
        WidgetType::Empty,
        WidgetType::BluetoothDisconnect,
        WidgetType::BatteryMeter,
        WidgetType::AltTimeZone,
        WidgetType::Date,
        WidgetType::Seconds,
        WidgetType::WeekNumber,
        WidgetType::WeatherCurrent,
        WidgetType::WeatherForecastToday,
        WidgetType::Health,
        WidgetType::Beats,
        WidgetType::HeartRate,
    ];

    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => WidgetType::BluetoothDisconnect,
            2 => WidgetType::BatteryMeter,
            3 => WidgetType::AltTimeZone,
            4 => WidgetType::Date,
            5 => WidgetType::Seconds,
            6 => WidgetType::WeekNumber,
            7 => WidgetType::WeatherCurrent,
            8 => WidgetType::WeatherForecastToday,
            10 => WidgetType::Health,
            11 => WidgetType::Beats,
            12 => WidgetType::HeartRate,
            _ => WidgetType::Empty,
        }
    }

    pub const fn raw(self) -> u8 {
        match self {
            WidgetType::Empty => 0,
            WidgetType::BluetoothDisconnect => 1,
            WidgetType::BatteryMeter => 2,
            WidgetType::AltTimeZone => 3,
            WidgetType::Date => 4,
            WidgetType::Seconds => 5,
            WidgetType::WeekNumber => 6,
            WidgetType::WeatherCurrent => 7,
            WidgetType::WeatherForecastToday => 8,
            WidgetType::Health => 10,
            WidgetType::Beats => 11,
            WidgetType::HeartRate => 12,
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, WidgetType::Empty)
    }

    pub const fn is_weather(self) -> bool {
        matches!(
            self,
            WidgetType::WeatherCurrent | WidgetType::WeatherForecastToday
        )
    }
}

impl From<u8> for WidgetType {
    fn from(raw: u8) -> Self {
        WidgetType::from_raw(raw)
    }
}

impl From<WidgetType> for u8 {
    fn from(widget: WidgetType) -> Self {
        widget.raw()
    }
}

// ---------------------------------------------------------------------------
// Render context
// ---------------------------------------------------------------------------

/// Height and drawing mode for one layout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderMode {
    /// Trim optional rows.
    pub compact: bool,
    /// Report a uniform height for every non-empty widget.
    pub fixed_height: bool,
}

impl RenderMode {
    pub const NATURAL: RenderMode = RenderMode {
        compact: false,
        fixed_height: false,
    };
    pub const COMPACT: RenderMode = RenderMode {
        compact: true,
        fixed_height: false,
    };
    pub const BAR: RenderMode = RenderMode {
        compact: true,
        fixed_height: true,
    };
}

/// Everything a widget reads while measuring or drawing itself.
#[derive(Debug, Clone, Copy)]
pub struct WidgetContext<'a> {
    pub settings: &'a Settings,
    pub device: &'a DeviceState,
    pub strings: &'a TimeStrings,
    pub icons: IconColors,
    pub mode: RenderMode,
}

impl<'a> WidgetContext<'a> {
    pub fn new(
        settings: &'a Settings,
        device: &'a DeviceState,
        strings: &'a TimeStrings,
    ) -> Self {
        Self {
            settings,
            device,
            strings,
            icons: IconColors::derive(settings),
            mode: RenderMode::NATURAL,
        }
    }

    pub fn with_mode(self, mode: RenderMode) -> Self {
        Self { mode, ..self }
    }

    pub fn text_color(&self) -> Rgb565 {
        self.settings.sidebar_text_color.to_rgb565()
    }

    pub fn large(&self) -> bool {
        self.settings.use_large_fonts
    }
}

/// Measures widget heights for the layout engine.
///
/// Implemented by [`WidgetContext`] for real rendering; tests substitute a
/// fixed table to drive the layout ladder directly.
pub trait HeightSource {
    fn widget_height(&self, widget: WidgetType, mode: RenderMode) -> u32;
}

impl HeightSource for WidgetContext<'_> {
    fn widget_height(&self, widget: WidgetType, mode: RenderMode) -> u32 {
        Widget::for_type(widget).height(&self.with_mode(mode))
    }
}

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// A widget that can be measured and drawn into a 30 px wide sidebar column.
pub trait SidebarWidget {
    /// Height in the context's mode.
    ///
    /// Concrete widgets report their content height; [`Widget`] applies
    /// fixed-height mode on top of it.
    fn height(&self, ctx: &WidgetContext<'_>) -> u32;

    /// Draw the content with its top-left corner at `origin`.
    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        ctx: &WidgetContext<'_>,
        origin: Point,
    ) -> Result<(), D::Error>;
}

/// Draws nothing and takes no space.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyWidget;

impl SidebarWidget for EmptyWidget {
    fn height(&self, _ctx: &WidgetContext<'_>) -> u32 {
        0
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        _display: &mut D,
        _ctx: &WidgetContext<'_>,
        _origin: Point,
    ) -> Result<(), D::Error> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Registry wrapper
// ---------------------------------------------------------------------------

/// Enum over every concrete widget, delegating to the inner type.
///
/// The wrapper also applies fixed-height mode, so individual widgets only
/// ever deal with their natural content height.
#[derive(Debug, Clone, Copy)]
pub enum Widget {
    Empty(EmptyWidget),
    BluetoothDisconnect(BluetoothDisconnect),
    BatteryMeter(BatteryMeter),
    AltTimeZone(AltTimeZone),
    Date(DateBox),
    Seconds(Seconds),
    WeekNumber(WeekNumber),
    WeatherCurrent(CurrentWeatherWidget),
    WeatherForecastToday(ForecastWidget),
    Health(HealthActivity),
    Beats(Beats),
    HeartRate(HeartRate),
}

impl Widget {
    /// Look up the implementation for a widget kind.
    pub fn for_type(kind: WidgetType) -> Self {
        match kind {
            WidgetType::Empty => Widget::Empty(EmptyWidget),
            WidgetType::BluetoothDisconnect => Widget::BluetoothDisconnect(BluetoothDisconnect),
            WidgetType::BatteryMeter => Widget::BatteryMeter(BatteryMeter),
            WidgetType::AltTimeZone => Widget::AltTimeZone(AltTimeZone),
            WidgetType::Date => Widget::Date(DateBox),
            WidgetType::Seconds => Widget::Seconds(Seconds),
            WidgetType::WeekNumber => Widget::WeekNumber(WeekNumber),
            WidgetType::WeatherCurrent => Widget::WeatherCurrent(CurrentWeatherWidget),
            WidgetType::WeatherForecastToday => Widget::WeatherForecastToday(ForecastWidget),
            WidgetType::Health => Widget::Health(HealthActivity),
            WidgetType::Beats => Widget::Beats(Beats),
            WidgetType::HeartRate => Widget::HeartRate(HeartRate),
        }
    }

    fn content_height(&self, ctx: &WidgetContext<'_>) -> u32 {
        match self {
            Widget::Empty(w) => w.height(ctx),
            Widget::BluetoothDisconnect(w) => w.height(ctx),
            Widget::BatteryMeter(w) => w.height(ctx),
            Widget::AltTimeZone(w) => w.height(ctx),
            Widget::Date(w) => w.height(ctx),
            Widget::Seconds(w) => w.height(ctx),
            Widget::WeekNumber(w) => w.height(ctx),
            Widget::WeatherCurrent(w) => w.height(ctx),
            Widget::WeatherForecastToday(w) => w.height(ctx),
            Widget::Health(w) => w.height(ctx),
            Widget::Beats(w) => w.height(ctx),
            Widget::HeartRate(w) => w.height(ctx),
        }
    }
}

impl SidebarWidget for Widget {
    fn height(&self, ctx: &WidgetContext<'_>) -> u32 {
        let content = self.content_height(ctx);
        if ctx.mode.fixed_height && content > 0 {
            FIXED_WIDGET_HEIGHT
        } else {
            content
        }
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        ctx: &WidgetContext<'_>,
        origin: Point,
    ) -> Result<(), D::Error> {
        let origin = if ctx.mode.fixed_height {
            let content = self.content_height(ctx).min(FIXED_WIDGET_HEIGHT);
            origin + Point::new(0, ((FIXED_WIDGET_HEIGHT - content) / 2) as i32)
        } else {
            origin
        };

        match self {
            Widget::Empty(w) => w.draw(display, ctx, origin),
            Widget::BluetoothDisconnect(w) => w.draw(display, ctx, origin),
            Widget::BatteryMeter(w) => w.draw(display, ctx, origin),
            Widget::AltTimeZone(w) => w.draw(display, ctx, origin),
            Widget::Date(w) => w.draw(display, ctx, origin),
            Widget::Seconds(w) => w.draw(display, ctx, origin),
            Widget::WeekNumber(w) => w.draw(display, ctx, origin),
            Widget::WeatherCurrent(w) => w.draw(display, ctx, origin),
            Widget::WeatherForecastToday(w) => w.draw(display, ctx, origin),
            Widget::Health(w) => w.draw(display, ctx, origin),
            Widget::Beats(w) => w.draw(display, ctx, origin),
            Widget::HeartRate(w) => w.draw(display, ctx, origin),
        }
    }
}
