//! Flags recomputed from the slot array every time settings change.

use super::{Settings, WatchColor};
use crate::widgets::WidgetType;

/// Runtime flags that depend only on which widgets are configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedFlags {
    pub disable_weather: bool,
    pub update_screen_every_second: bool,
    pub enable_auto_battery_widget: bool,
    pub enable_alt_time_zone: bool,
    pub enable_beats: bool,
}

impl Default for DerivedFlags {
    fn default() -> Self {
        Self {
            disable_weather: true,
            update_screen_every_second: false,
            enable_auto_battery_widget: true,
            enable_alt_time_zone: false,
            enable_beats: false,
        }
    }
}

/// Compute the flags for a slot assignment.
///
/// All four slots are scanned, including slot 3 for vertical sidebars.
pub fn derive(slots: &[WidgetType; 4]) -> DerivedFlags {
    let mut flags = DerivedFlags::default();

    for widget in slots {
        match widget {
            WidgetType::WeatherCurrent | WidgetType::WeatherForecastToday => {
                flags.disable_weather = false;
            }
            WidgetType::Seconds => flags.update_screen_every_second = true,
            WidgetType::BatteryMeter => flags.enable_auto_battery_widget = false,
            WidgetType::AltTimeZone => flags.enable_alt_time_zone = true,
            WidgetType::Beats => flags.enable_beats = true,
            _ => {}
        }
    }

    flags
}

/// Fill and stroke colors for sidebar icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconColors {
    pub fill: WatchColor,
    pub stroke: WatchColor,
}

impl IconColors {
    /// Icons on a black sidebar are drawn hollow in the text color.
    pub fn derive(settings: &Settings) -> Self {
        if settings.sidebar_color == WatchColor::BLACK {
            Self {
                fill: WatchColor::BLACK,
                stroke: settings.sidebar_text_color,
            }
        } else {
            Self {
                fill: WatchColor::WHITE,
                stroke: WatchColor::BLACK,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every_assignment() -> impl Iterator<Item = [WidgetType; 4]> {
        let all = WidgetType::ALL;
        (0..all.len().pow(4)).map(move |mut n| {
            let mut slots = [WidgetType::Empty; 4];
            for slot in &mut slots {
                *slot = all[n % all.len()];
                n /= all.len();
            }
            slots
        })
    }

    #[test]
    fn test_defaults_for_empty_sidebar() {
        let flags = derive(&[WidgetType::Empty; 4]);
        assert_eq!(flags, DerivedFlags::default());
        assert!(flags.disable_weather);
        assert!(flags.enable_auto_battery_widget);
    }

    #[test]
    fn test_each_widget_sets_its_flag() {
        let flags = derive(&[
            WidgetType::Seconds,
            WidgetType::AltTimeZone,
            WidgetType::Beats,
            WidgetType::WeatherForecastToday,
        ]);
        assert!(flags.update_screen_every_second);
        assert!(flags.enable_alt_time_zone);
        assert!(flags.enable_beats);
        assert!(!flags.disable_weather);
        assert!(flags.enable_auto_battery_widget);
    }

    #[test]
    fn test_slot_three_counts() {
        let flags = derive(&[
            WidgetType::Empty,
            WidgetType::Empty,
            WidgetType::Empty,
            WidgetType::BatteryMeter,
        ]);
        assert!(!flags.enable_auto_battery_widget);
    }

    #[test]
    fn test_derive_is_idempotent() {
        for slots in every_assignment() {
            assert_eq!(derive(&slots), derive(&slots));
        }
    }

    #[test]
    fn test_weather_disabled_iff_no_weather_widget() {
        for slots in every_assignment() {
            let has_weather = slots.iter().any(|w| w.is_weather());
            assert_eq!(derive(&slots).disable_weather, !has_weather, "{slots:?}");
        }
    }

    #[test]
    fn test_icon_colors() {
        let mut settings = Settings::default();
        assert_eq!(
            IconColors::derive(&settings),
            IconColors {
                fill: WatchColor::WHITE,
                stroke: WatchColor::BLACK
            }
        );

        settings.sidebar_color = WatchColor::BLACK;
        settings.sidebar_text_color = WatchColor(0x55AAFF);
        assert_eq!(
            IconColors::derive(&settings),
            IconColors {
                fill: WatchColor::BLACK,
                stroke: WatchColor(0x55AAFF)
            }
        );
    }
}
