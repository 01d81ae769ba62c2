//! Inputs to the watchface and the side effects it asks the host to perform.

use heapless::Vec;

use crate::device::{BatteryState, CurrentWeather, Forecast, HealthSnapshot};
use crate::settings::SettingsUpdate;
use crate::time_date::WallTime;

/// Something the host observed and forwards to [`crate::Watchface::handle`].
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// Clock tick, once per minute or once per second.
    Tick(WallTime),
    /// Phone connection changed.
    Bluetooth(bool),
    Battery(BatteryState),
    /// Window gained (`true`) or lost focus, e.g. around notifications.
    Focus(bool),
    QuietTime(bool),
    SettingsReceived(SettingsUpdate),
    Weather(WeatherUpdate),
    Health(HealthSnapshot),
}

/// Weather payload from the phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherUpdate {
    Current(CurrentWeather),
    Forecast(Forecast),
}

/// Granularity of the host tick subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickUnit {
    Second,
    Minute,
}

/// Vibration requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VibePattern {
    DoublePulse,
    ShortPulse,
    /// Long custom pattern played when the phone disconnects.
    Disconnect,
}

impl VibePattern {
    /// On/off segment durations in milliseconds, starting with "on".
    pub const fn durations(self) -> &'static [u32] {
        match self {
            VibePattern::DoublePulse => &[200, 100, 200],
            VibePattern::ShortPulse => &[200],
            VibePattern::Disconnect => &[200, 100, 100, 100, 500],
        }
    }
}

/// Side effect for the host to carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    RequestWeather,
    Vibrate(VibePattern),
    SetTickUnit(TickUnit),
    /// Store the current settings snapshot.
    PersistSettings,
}

/// One event never produces more than this many effects.
pub const MAX_EFFECTS: usize = 4;

pub type Effects = Vec<Effect, MAX_EFFECTS>;

/// Result of handling one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub effects: Effects,
    /// The screen must be redrawn.
    pub redraw: bool,
}

impl Outcome {
    pub fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }

    pub fn push(&mut self, effect: Effect) {
        // Handlers emit at most MAX_EFFECTS effects.
        self.effects.push(effect).ok();
    }

    pub fn contains(&self, effect: Effect) -> bool {
        self.effects.contains(&effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnect_pattern() {
        assert_eq!(
            VibePattern::Disconnect.durations(),
            &[200, 100, 100, 100, 500]
        );
        assert_eq!(VibePattern::DoublePulse.durations().len() % 2, 1);
    }

    #[test]
    fn test_outcome_collects_effects() {
        let mut outcome = Outcome::redraw();
        outcome.push(Effect::PersistSettings);
        outcome.push(Effect::SetTickUnit(TickUnit::Second));

        assert!(outcome.redraw);
        assert!(outcome.contains(Effect::PersistSettings));
        assert!(!outcome.contains(Effect::RequestWeather));
        assert_eq!(outcome.effects.len(), 2);
    }
}
