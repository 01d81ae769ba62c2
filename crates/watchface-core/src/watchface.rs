// src/watchface.rs
//! The watchface state machine.
//!
//! [`Watchface`] owns the installed settings snapshot, the flags derived
//! from it, the last known device state and the cached time strings. The
//! host forwards every platform callback as a [`WatchEvent`]; each handler
//! runs to completion and returns an [`Outcome`] listing the side effects
//! to perform and whether the screen needs a redraw.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::{debug, info};

use crate::clock_area;
use crate::config::ScreenShape;
use crate::device::DeviceState;
use crate::events::{Effect, Outcome, TickUnit, VibePattern, WatchEvent, WeatherUpdate};
use crate::settings::{DerivedFlags, Settings, SettingsUpdate, SidebarLocation, VibeInterval};
use crate::sidebar::Sidebar;
use crate::time_date::{TimeStrings, WallTime};
use crate::widgets::WidgetContext;

pub struct Watchface {
    shape: ScreenShape,
    settings: Settings,
    derived: DerivedFlags,
    device: DeviceState,
    time: WallTime,
    strings: TimeStrings,
    clock_24h: bool,
    /// Minute of the hour at which weather is refreshed, picked by the host.
    weather_refresh_minute: u32,
    sidebar: Sidebar,
}

impl Watchface {
    pub fn new(
        shape: ScreenShape,
        settings: Settings,
        device: DeviceState,
        time: WallTime,
        clock_24h: bool,
        weather_refresh_minute: u32,
    ) -> Self {
        let derived = settings.derived();
        let strings = TimeStrings::compute(&time, &settings, &derived, clock_24h);
        Self {
            shape,
            settings,
            derived,
            device,
            time,
            strings,
            clock_24h,
            weather_refresh_minute: weather_refresh_minute % 60,
            sidebar: Sidebar::new(shape),
        }
    }

    pub fn shape(&self) -> ScreenShape {
        self.shape
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn derived(&self) -> &DerivedFlags {
        &self.derived
    }

    pub fn device(&self) -> &DeviceState {
        &self.device
    }

    pub fn strings(&self) -> &TimeStrings {
        &self.strings
    }

    /// Tick subscription the host should hold for the current settings.
    pub fn tick_unit(&self) -> TickUnit {
        if self.derived.update_screen_every_second {
            TickUnit::Second
        } else {
            TickUnit::Minute
        }
    }

    fn has_sidebar(&self) -> bool {
        self.settings.sidebar_location != SidebarLocation::None
    }

    fn sidebar_changed(&self) -> Outcome {
        Outcome {
            redraw: self.has_sidebar(),
            ..Outcome::default()
        }
    }

    fn refresh_strings(&mut self) {
        self.strings =
            TimeStrings::compute(&self.time, &self.settings, &self.derived, self.clock_24h);
    }

    pub fn handle(&mut self, event: WatchEvent) -> Outcome {
        match event {
            WatchEvent::Tick(time) => self.on_tick(time),
            WatchEvent::Bluetooth(connected) => self.on_bluetooth(connected),
            WatchEvent::Battery(battery) => {
                self.device.battery = battery;
                self.sidebar_changed()
            }
            WatchEvent::Focus(focused) => {
                if focused {
                    Outcome::redraw()
                } else {
                    Outcome::default()
                }
            }
            WatchEvent::QuietTime(active) => {
                self.device.quiet_time = active;
                Outcome::default()
            }
            WatchEvent::SettingsReceived(update) => self.on_settings(&update),
            WatchEvent::Weather(update) => {
                match update {
                    WeatherUpdate::Current(current) => self.device.weather.current = Some(current),
                    WeatherUpdate::Forecast(forecast) => {
                        self.device.weather.forecast = Some(forecast)
                    }
                }
                self.sidebar_changed()
            }
            WatchEvent::Health(health) => {
                self.device.health = health;
                self.sidebar_changed()
            }
        }
    }

    fn on_tick(&mut self, time: WallTime) -> Outcome {
        self.time = time;
        self.refresh_strings();

        let mut outcome = Outcome::redraw();
        let (minute, second) = (time.minute(), time.second());

        if !self.derived.disable_weather && minute == self.weather_refresh_minute && second == 0 {
            debug!("Weather refresh at minute {}", minute);
            outcome.push(Effect::RequestWeather);
        }

        if !self.device.quiet_time && second == 0 {
            let vibe = match (self.settings.hourly_vibe, minute) {
                (VibeInterval::EveryHour | VibeInterval::EveryHalfHour, 0) => {
                    Some(VibePattern::DoublePulse)
                }
                (VibeInterval::EveryHalfHour, 30) => Some(VibePattern::ShortPulse),
                _ => None,
            };
            if let Some(pattern) = vibe {
                outcome.push(Effect::Vibrate(pattern));
            }
        }

        outcome
    }

    fn on_bluetooth(&mut self, connected: bool) -> Outcome {
        let was_connected = self.device.bluetooth_connected;
        self.device.bluetooth_connected = connected;
        info!("Bluetooth {}", if connected { "connected" } else { "disconnected" });

        let mut outcome = self.sidebar_changed();
        if was_connected && !connected && self.settings.bt_vibe && !self.device.quiet_time {
            outcome.push(Effect::Vibrate(VibePattern::Disconnect));
        }
        if !was_connected && connected {
            outcome.push(Effect::RequestWeather);
        }
        outcome
    }

    fn on_settings(&mut self, update: &SettingsUpdate) -> Outcome {
        let previous_unit = self.tick_unit();
        self.install(self.settings.apply(update, self.shape));

        let mut outcome = Outcome::redraw();
        outcome.push(Effect::PersistSettings);
        let unit = self.tick_unit();
        if unit != previous_unit {
            info!("Tick unit changed to {:?}", unit);
            outcome.push(Effect::SetTickUnit(unit));
        }
        outcome
    }

    /// Replace the settings snapshot and everything derived from it.
    pub fn install(&mut self, settings: Settings) {
        self.derived = settings.derived();
        self.settings = settings;
        self.refresh_strings();
        info!(
            "Installed settings: sidebar {:?}, widgets {:?}, {:?}",
            self.settings.sidebar_location, self.settings.widgets, self.derived
        );
    }

    /// Full redraw: background, clock area, then the sidebar.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        display.clear(self.settings.time_bg_color.to_rgb565())?;
        clock_area::draw(display, &self.settings, &self.strings, self.shape)?;

        if self.has_sidebar() {
            let ctx = WidgetContext::new(&self.settings, &self.device, &self.strings);
            let frame = self.sidebar.draw(display, &ctx, &self.derived)?;
            debug!(
                "Sidebar drawn: {} widgets, override in slot {:?}",
                frame.layout.placements.len(),
                frame.slots.replaced
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{BatteryState, CurrentWeather, WeatherCondition};
    use crate::framebuffer::FrameBuffer;
    use crate::settings::WatchColor;
    use crate::widgets::WidgetType;
    use chrono::NaiveDate;

    const REFRESH_MINUTE: u32 = 17;

    fn at(h: u32, m: u32, s: u32) -> WallTime {
        let local = NaiveDate::from_ymd_opt(2024, 3, 4)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .unwrap();
        WallTime::new(local, 0)
    }

    fn watchface(settings: Settings) -> Watchface {
        Watchface::new(
            ScreenShape::Rect,
            settings,
            DeviceState::default(),
            at(9, 5, 0),
            true,
            REFRESH_MINUTE,
        )
    }

    #[test]
    fn test_new_computes_strings() {
        let face = watchface(Settings::default());
        assert_eq!(face.strings().hours.as_str(), " 9");
        assert_eq!(face.strings().minutes.as_str(), "05");
        assert_eq!(face.tick_unit(), TickUnit::Minute);
    }

    #[test]
    fn test_weather_requested_on_refresh_minute() {
        let mut face = watchface(Settings::default());
        let outcome = face.handle(WatchEvent::Tick(at(10, REFRESH_MINUTE, 0)));
        assert!(outcome.redraw);
        assert!(outcome.contains(Effect::RequestWeather));

        let outcome = face.handle(WatchEvent::Tick(at(10, REFRESH_MINUTE, 1)));
        assert!(!outcome.contains(Effect::RequestWeather));
        let outcome = face.handle(WatchEvent::Tick(at(10, REFRESH_MINUTE + 1, 0)));
        assert!(!outcome.contains(Effect::RequestWeather));
    }

    #[test]
    fn test_no_weather_request_without_weather_widget() {
        let mut face = watchface(Settings {
            widgets: [WidgetType::Date, WidgetType::Empty, WidgetType::Empty, WidgetType::Empty],
            ..Settings::default()
        });
        let outcome = face.handle(WatchEvent::Tick(at(10, REFRESH_MINUTE, 0)));
        assert!(outcome.effects.is_empty());
    }

    #[test]
    fn test_hourly_vibes() {
        let mut face = watchface(Settings {
            hourly_vibe: VibeInterval::EveryHalfHour,
            ..Settings::default()
        });
        let top = face.handle(WatchEvent::Tick(at(11, 0, 0)));
        assert!(top.contains(Effect::Vibrate(VibePattern::DoublePulse)));
        let half = face.handle(WatchEvent::Tick(at(11, 30, 0)));
        assert!(half.contains(Effect::Vibrate(VibePattern::ShortPulse)));

        face.handle(WatchEvent::QuietTime(true));
        let quiet = face.handle(WatchEvent::Tick(at(12, 0, 0)));
        assert!(!quiet.contains(Effect::Vibrate(VibePattern::DoublePulse)));
    }

    #[test]
    fn test_every_hour_ignores_half_hour() {
        let mut face = watchface(Settings {
            hourly_vibe: VibeInterval::EveryHour,
            ..Settings::default()
        });
        let half = face.handle(WatchEvent::Tick(at(11, 30, 0)));
        assert!(half.effects.is_empty());
    }

    #[test]
    fn test_bluetooth_transitions() {
        let mut face = watchface(Settings {
            bt_vibe: true,
            ..Settings::default()
        });
        let lost = face.handle(WatchEvent::Bluetooth(false));
        assert!(lost.redraw);
        assert_eq!(
            lost.effects.as_slice(),
            &[Effect::Vibrate(VibePattern::Disconnect)]
        );
        assert!(!face.device().bluetooth_connected);

        let still_lost = face.handle(WatchEvent::Bluetooth(false));
        assert!(still_lost.effects.is_empty());

        let back = face.handle(WatchEvent::Bluetooth(true));
        assert_eq!(back.effects.as_slice(), &[Effect::RequestWeather]);
    }

    #[test]
    fn test_sidebar_events_skip_redraw_without_sidebar() {
        let mut face = watchface(Settings {
            sidebar_location: SidebarLocation::None,
            widgets: [WidgetType::Empty; 4],
            ..Settings::default()
        });
        assert!(!face.handle(WatchEvent::Battery(BatteryState::new(40, true))).redraw);
        assert!(!face.handle(WatchEvent::Bluetooth(false)).redraw);
        assert!(face.handle(WatchEvent::Tick(at(9, 6, 0))).redraw);
        assert_eq!(face.device().battery, BatteryState::new(40, true));
    }

    #[test]
    fn test_focus() {
        let mut face = watchface(Settings::default());
        assert!(!face.handle(WatchEvent::Focus(false)).redraw);
        assert!(face.handle(WatchEvent::Focus(true)).redraw);
    }

    #[test]
    fn test_settings_message_switches_tick_unit() {
        let mut face = watchface(Settings::default());
        let update = SettingsUpdate {
            widgets: [None, Some(WidgetType::Seconds.raw()), None, None],
            ..SettingsUpdate::default()
        };
        let outcome = face.handle(WatchEvent::SettingsReceived(update));

        assert!(outcome.redraw);
        assert!(outcome.contains(Effect::PersistSettings));
        assert!(outcome.contains(Effect::SetTickUnit(TickUnit::Second)));
        assert_eq!(face.tick_unit(), TickUnit::Second);
        assert_eq!(face.settings().widgets[1], WidgetType::Seconds);

        let colors_only = SettingsUpdate {
            time_color: Some(0xFF0000),
            ..SettingsUpdate::default()
        };
        let outcome = face.handle(WatchEvent::SettingsReceived(colors_only));
        assert_eq!(outcome.effects.as_slice(), &[Effect::PersistSettings]);
        assert_eq!(face.settings().time_color, WatchColor(0xFF0000));
    }

    #[test]
    fn test_weather_update_is_stored() {
        let mut face = watchface(Settings::default());
        let current = CurrentWeather {
            temp_c: 21,
            condition: WeatherCondition::ClearDay,
        };
        let outcome = face.handle(WatchEvent::Weather(WeatherUpdate::Current(current)));
        assert!(outcome.redraw);
        assert_eq!(face.device().weather.current, Some(current));
        assert_eq!(face.device().weather.forecast, None);
    }

    #[test]
    fn test_draw_full_pass() {
        let face = watchface(Settings {
            sidebar_location: SidebarLocation::Right,
            sidebar_color: WatchColor(0x00FF00),
            time_bg_color: WatchColor(0x0000FF),
            widgets: [WidgetType::Empty; 4],
            ..Settings::default()
        });
        let mut fb = FrameBuffer::new(ScreenShape::Rect);
        face.draw(&mut fb).unwrap();

        assert_eq!(fb.pixel(0, 0), Some(WatchColor(0x0000FF).to_rgb565()));
        assert_eq!(fb.pixel(143, 0), Some(WatchColor(0x00FF00).to_rgb565()));
        assert_eq!(fb.pixel(114, 167), Some(WatchColor(0x00FF00).to_rgb565()));
    }
}
