//! User settings snapshot and the flags derived from it.
//!
//! A [`Settings`] value is immutable once installed in the watchface.
//! Configuration messages produce a new snapshot through
//! [`Settings::apply`], after which [`derive`] recomputes the
//! [`DerivedFlags`] from the slot array.

pub mod codec;
mod derived;
mod update;

pub use codec::{CURRENT_SETTINGS_VERSION, SettingsError};
pub use derived::{DerivedFlags, IconColors, derive};
pub use update::SettingsUpdate;

use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;
use serde::{Deserialize, Serialize};

use crate::language::Language;
use crate::widgets::WidgetType;

/// Maximum length of the alternate clock label.
pub const ALT_CLOCK_NAME_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Sidebar location
// ---------------------------------------------------------------------------

/// Where the sidebar sits on screen. Unknown wire values decode to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum SidebarLocation {
    None,
    Left,
    Right,
    #[default]
    Bottom,
    Top,
}

impl SidebarLocation {
    pub const fn raw(self) -> u8 {
        match self {
            SidebarLocation::None => 0,
            SidebarLocation::Left => 1,
            SidebarLocation::Right => 2,
            SidebarLocation::Bottom => 3,
            SidebarLocation::Top => 4,
        }
    }

    /// Number of meaningful slots for this location.
    pub const fn slot_count(self) -> usize {
        match self {
            SidebarLocation::None => 0,
            SidebarLocation::Left | SidebarLocation::Right => 3,
            SidebarLocation::Bottom | SidebarLocation::Top => 4,
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, SidebarLocation::Bottom | SidebarLocation::Top)
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, SidebarLocation::Left | SidebarLocation::Right)
    }
}

impl From<u8> for SidebarLocation {
    fn from(raw: u8) -> Self {
        match raw {
            1 => SidebarLocation::Left,
            2 => SidebarLocation::Right,
            3 => SidebarLocation::Bottom,
            4 => SidebarLocation::Top,
            _ => SidebarLocation::None,
        }
    }
}

impl From<SidebarLocation> for u8 {
    fn from(location: SidebarLocation) -> Self {
        location.raw()
    }
}

// ---------------------------------------------------------------------------
// Small enums
// ---------------------------------------------------------------------------

/// Periodic vibration on the hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum VibeInterval {
    #[default]
    Off,
    EveryHour,
    EveryHalfHour,
}

impl From<u8> for VibeInterval {
    fn from(raw: u8) -> Self {
        match raw {
            1 => VibeInterval::EveryHour,
            2 => VibeInterval::EveryHalfHour,
            _ => VibeInterval::Off,
        }
    }
}

impl From<VibeInterval> for u8 {
    fn from(interval: VibeInterval) -> Self {
        interval as u8
    }
}

/// Typeface of the large clock digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ClockFont {
    #[default]
    Default,
    Leco,
    Bold,
    BoldHours,
    BoldMinutes,
}

impl From<u8> for ClockFont {
    fn from(raw: u8) -> Self {
        match raw {
            1 => ClockFont::Leco,
            2 => ClockFont::Bold,
            3 => ClockFont::BoldHours,
            4 => ClockFont::BoldMinutes,
            _ => ClockFont::Default,
        }
    }
}

impl From<ClockFont> for u8 {
    fn from(font: ClockFont) -> Self {
        font as u8
    }
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// A 24-bit `0xRRGGBB` color as sent by the companion app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchColor(pub u32);

impl WatchColor {
    pub const BLACK: WatchColor = WatchColor(0x000000);
    pub const WHITE: WatchColor = WatchColor(0xFFFFFF);
    pub const LIGHT_GRAY: WatchColor = WatchColor(0xAAAAAA);

    pub const fn to_rgb565(self) -> Rgb565 {
        let r = ((self.0 >> 16) & 0xFF) as u8;
        let g = ((self.0 >> 8) & 0xFF) as u8;
        let b = (self.0 & 0xFF) as u8;
        Rgb565::new(r >> 3, g >> 2, b >> 3)
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Persisted user configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // Colors
    pub time_color: WatchColor,
    pub time_bg_color: WatchColor,
    pub sidebar_color: WatchColor,
    pub sidebar_text_color: WatchColor,

    // General
    pub language: Language,
    pub show_leading_zero: bool,
    pub center_time: bool,
    pub clock_font: ClockFont,
    pub bt_vibe: bool,
    pub hourly_vibe: VibeInterval,

    // Sidebar
    pub widgets: [WidgetType; 4],
    pub sidebar_location: SidebarLocation,
    pub use_large_fonts: bool,
    pub activate_disconnect_icon: bool,

    // Widget specific
    pub use_metric: bool,
    pub show_battery_pct: bool,
    pub disable_autobattery: bool,
    pub alt_clock_name: String<ALT_CLOCK_NAME_LEN>,
    /// Hours relative to local time.
    pub alt_clock_offset: i8,
    pub health_use_distance: bool,
    pub health_use_restful_sleep: bool,
    pub decimal_separator: char,
}

impl Default for Settings {
    fn default() -> Self {
        let mut alt_clock_name = String::new();
        alt_clock_name.push_str("ALT").ok();

        Self {
            time_color: WatchColor::WHITE,
            time_bg_color: WatchColor::BLACK,
            sidebar_color: WatchColor::LIGHT_GRAY,
            sidebar_text_color: WatchColor::BLACK,
            language: Language::English,
            show_leading_zero: false,
            center_time: false,
            clock_font: ClockFont::Default,
            bt_vibe: false,
            hourly_vibe: VibeInterval::Off,
            widgets: [
                WidgetType::BatteryMeter,
                WidgetType::WeatherCurrent,
                WidgetType::Health,
                WidgetType::WeekNumber,
            ],
            sidebar_location: SidebarLocation::Bottom,
            use_large_fonts: false,
            activate_disconnect_icon: true,
            use_metric: true,
            show_battery_pct: true,
            disable_autobattery: false,
            alt_clock_name,
            alt_clock_offset: 0,
            health_use_distance: false,
            health_use_restful_sleep: false,
            decimal_separator: '.',
        }
    }
}

impl Settings {
    /// Flags derived from this snapshot's slot array.
    pub fn derived(&self) -> DerivedFlags {
        derive(&self.widgets)
    }
}
