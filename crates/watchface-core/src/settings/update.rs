//! Configuration messages from the companion app.

use heapless::String;
use log::debug;

use super::{ALT_CLOCK_NAME_LEN, ClockFont, Settings, SidebarLocation, VibeInterval, WatchColor};
use crate::config::ScreenShape;
use crate::language::Language;
use crate::widgets::WidgetType;

/// One configuration message. Absent fields leave the setting unchanged.
///
/// Colors arrive as `0xRRGGBB`, enumerations as their raw wire ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsUpdate {
    pub time_color: Option<u32>,
    pub time_bg_color: Option<u32>,
    pub sidebar_color: Option<u32>,
    pub sidebar_text_color: Option<u32>,
    pub language: Option<u8>,
    pub show_leading_zero: Option<bool>,
    pub center_time: Option<bool>,
    pub clock_font: Option<u8>,
    pub bt_vibe: Option<bool>,
    pub hourly_vibe: Option<u8>,
    pub widgets: [Option<u8>; 4],
    pub sidebar_location: Option<u8>,
    pub use_large_fonts: Option<bool>,
    pub activate_disconnect_icon: Option<bool>,
    pub use_metric: Option<bool>,
    pub show_battery_pct: Option<bool>,
    pub disable_autobattery: Option<bool>,
    pub alt_clock_name: Option<String<ALT_CLOCK_NAME_LEN>>,
    pub alt_clock_offset: Option<i8>,
    pub health_use_distance: Option<bool>,
    pub health_use_restful_sleep: Option<bool>,
    pub decimal_separator: Option<char>,
}

impl SettingsUpdate {
    /// Whether the message touches the slot array or the sidebar location.
    fn touches_sidebar(&self) -> bool {
        self.sidebar_location.is_some() || self.widgets.iter().any(Option::is_some)
    }
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

impl Settings {
    /// Produce a new snapshot with `update` applied.
    ///
    /// When the message changes the sidebar, the slot array is normalized
    /// for the location and screen shape.
    pub fn apply(&self, update: &SettingsUpdate, shape: ScreenShape) -> Settings {
        let mut next = self.clone();

        set(&mut next.time_color, update.time_color.map(WatchColor));
        set(&mut next.time_bg_color, update.time_bg_color.map(WatchColor));
        set(&mut next.sidebar_color, update.sidebar_color.map(WatchColor));
        set(&mut next.sidebar_text_color, update.sidebar_text_color.map(WatchColor));
        set(&mut next.language, update.language.map(Language::from));
        set(&mut next.show_leading_zero, update.show_leading_zero);
        set(&mut next.center_time, update.center_time);
        set(&mut next.clock_font, update.clock_font.map(ClockFont::from));
        set(&mut next.bt_vibe, update.bt_vibe);
        set(&mut next.hourly_vibe, update.hourly_vibe.map(VibeInterval::from));
        for (slot, raw) in next.widgets.iter_mut().zip(update.widgets) {
            set(slot, raw.map(WidgetType::from_raw));
        }
        set(&mut next.sidebar_location, update.sidebar_location.map(SidebarLocation::from));
        set(&mut next.use_large_fonts, update.use_large_fonts);
        set(&mut next.activate_disconnect_icon, update.activate_disconnect_icon);
        set(&mut next.use_metric, update.use_metric);
        set(&mut next.show_battery_pct, update.show_battery_pct);
        set(&mut next.disable_autobattery, update.disable_autobattery);
        set(&mut next.alt_clock_name, update.alt_clock_name.clone());
        set(&mut next.alt_clock_offset, update.alt_clock_offset);
        set(&mut next.health_use_distance, update.health_use_distance);
        set(&mut next.health_use_restful_sleep, update.health_use_restful_sleep);
        set(&mut next.decimal_separator, update.decimal_separator);

        if update.touches_sidebar() {
            normalize_slots(&mut next.widgets, next.sidebar_location, shape);
        }

        debug!(
            "Settings updated: location {:?}, widgets {:?}",
            next.sidebar_location, next.widgets
        );
        next
    }
}

/// Clear slots the location or shape cannot show and close gaps in
/// horizontal bars.
fn normalize_slots(widgets: &mut [WidgetType; 4], location: SidebarLocation, shape: ScreenShape) {
    match location {
        SidebarLocation::None => *widgets = [WidgetType::Empty; 4],
        SidebarLocation::Left | SidebarLocation::Right => widgets[3] = WidgetType::Empty,
        SidebarLocation::Top | SidebarLocation::Bottom => {}
    }

    if shape.is_round() {
        // Only slots 0 and 2 are visible on round screens.
        widgets[1] = WidgetType::Empty;
        widgets[3] = WidgetType::Empty;
        return;
    }

    if location.is_horizontal() {
        if widgets[1].is_empty() {
            widgets[1] = widgets[2];
            widgets[2] = WidgetType::Empty;
        }
        if widgets[2].is_empty() {
            widgets[2] = widgets[3];
            widgets[3] = WidgetType::Empty;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widgets_update(location: u8, ids: [u8; 4]) -> SettingsUpdate {
        SettingsUpdate {
            sidebar_location: Some(location),
            widgets: ids.map(Some),
            ..SettingsUpdate::default()
        }
    }

    #[test]
    fn test_absent_fields_keep_values() {
        let settings = Settings::default();
        let next = settings.apply(&SettingsUpdate::default(), ScreenShape::Rect);
        assert_eq!(next, settings);
    }

    #[test]
    fn test_apply_returns_new_snapshot() {
        let settings = Settings::default();
        let update = SettingsUpdate {
            sidebar_color: Some(0x000000),
            use_large_fonts: Some(true),
            hourly_vibe: Some(2),
            language: Some(6),
            ..SettingsUpdate::default()
        };
        let next = settings.apply(&update, ScreenShape::Rect);
        assert_eq!(next.sidebar_color, WatchColor::BLACK);
        assert!(next.use_large_fonts);
        assert_eq!(next.hourly_vibe, VibeInterval::EveryHalfHour);
        assert_eq!(next.language, Language::Turkish);
        assert_eq!(settings.sidebar_color, WatchColor::LIGHT_GRAY);
    }

    #[test]
    fn test_vertical_location_clears_slot_three() {
        let next = Settings::default().apply(&widgets_update(2, [2, 7, 4, 6]), ScreenShape::Rect);
        assert_eq!(next.sidebar_location, SidebarLocation::Right);
        assert_eq!(
            next.widgets,
            [
                WidgetType::BatteryMeter,
                WidgetType::WeatherCurrent,
                WidgetType::Date,
                WidgetType::Empty
            ]
        );
    }

    #[test]
    fn test_no_sidebar_clears_everything() {
        let next = Settings::default().apply(&widgets_update(0, [2, 7, 4, 6]), ScreenShape::Rect);
        assert_eq!(next.widgets, [WidgetType::Empty; 4]);
    }

    #[test]
    fn test_horizontal_bar_closes_gaps() {
        let next = Settings::default().apply(&widgets_update(3, [4, 0, 7, 6]), ScreenShape::Rect);
        assert_eq!(
            next.widgets,
            [
                WidgetType::Date,
                WidgetType::WeatherCurrent,
                WidgetType::WeekNumber,
                WidgetType::Empty
            ]
        );
    }

    #[test]
    fn test_round_keeps_outer_slots_only() {
        let next = Settings::default().apply(&widgets_update(3, [4, 7, 2, 6]), ScreenShape::Round);
        assert_eq!(
            next.widgets,
            [
                WidgetType::Date,
                WidgetType::Empty,
                WidgetType::BatteryMeter,
                WidgetType::Empty
            ]
        );
    }

    #[test]
    fn test_stale_widget_id_becomes_empty() {
        let next = Settings::default().apply(&widgets_update(1, [13, 2, 9, 0]), ScreenShape::Rect);
        assert_eq!(
            next.widgets,
            [
                WidgetType::Empty,
                WidgetType::BatteryMeter,
                WidgetType::Empty,
                WidgetType::Empty
            ]
        );
    }
}
