//! Snapshots of the device and phone state the sidebar reads from.
//!
//! The host fills these from its platform services; the watchface never
//! polls anything itself.

use crate::config::AUTO_BATTERY_THRESHOLD_PCT;

// ---------------------------------------------------------------------------
// Battery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryState {
    /// Charge level, 0-100.
    pub percent: u8,
    pub charging: bool,
}

impl Default for BatteryState {
    fn default() -> Self {
        Self {
            percent: 100,
            charging: false,
        }
    }
}

impl BatteryState {
    pub fn new(percent: u8, charging: bool) -> Self {
        Self {
            percent: percent.min(100),
            charging,
        }
    }

    /// At or below the threshold that brings up the auto battery widget.
    pub fn is_low(&self) -> bool {
        self.percent <= AUTO_BATTERY_THRESHOLD_PCT
    }

    /// Percentage shown to the user. A reading of zero is shown as 5%.
    pub fn display_percent(&self) -> u8 {
        if self.percent == 0 { 5 } else { self.percent }
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Latest health readings. `None` means the metric is unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealthSnapshot {
    pub sleeping: bool,
    pub sleep_seconds: Option<u32>,
    pub restful_sleep_seconds: Option<u32>,
    pub steps: Option<u32>,
    pub distance_meters: Option<u32>,
    pub heart_rate_bpm: Option<u32>,
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Icon category of a weather report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeatherCondition {
    ClearDay,
    ClearNight,
    PartlyCloudy,
    Cloudy,
    Rain,
    Snow,
    Thunderstorm,
    Fog,
    #[default]
    Unknown,
}

impl WeatherCondition {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => WeatherCondition::ClearDay,
            1 => WeatherCondition::ClearNight,
            2 => WeatherCondition::PartlyCloudy,
            3 => WeatherCondition::Cloudy,
            4 => WeatherCondition::Rain,
            5 => WeatherCondition::Snow,
            6 => WeatherCondition::Thunderstorm,
            7 => WeatherCondition::Fog,
            _ => WeatherCondition::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentWeather {
    pub temp_c: i32,
    pub condition: WeatherCondition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forecast {
    pub high_c: i32,
    pub low_c: i32,
    pub condition: WeatherCondition,
}

/// Weather as last reported by the phone. Either part may still be loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeatherSnapshot {
    pub current: Option<CurrentWeather>,
    pub forecast: Option<Forecast>,
}

/// Convert a Celsius reading for display, rounding to the nearest degree.
pub fn display_temperature(temp_c: i32, metric: bool) -> i32 {
    if metric {
        return temp_c;
    }
    let tenths = temp_c * 18 + 320;
    if tenths >= 0 {
        (tenths + 5) / 10
    } else {
        (tenths - 5) / 10
    }
}

// ---------------------------------------------------------------------------
// Device state
// ---------------------------------------------------------------------------

/// Everything the selector and the widgets read about the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceState {
    pub battery: BatteryState,
    pub bluetooth_connected: bool,
    /// Do-not-disturb window; suppresses hourly vibrations.
    pub quiet_time: bool,
    pub health: HealthSnapshot,
    pub weather: WeatherSnapshot,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            battery: BatteryState::default(),
            bluetooth_connected: true,
            quiet_time: false,
            health: HealthSnapshot::default(),
            weather: WeatherSnapshot::default(),
        }
    }
}
