//! Chooses which slot a status override (auto battery or disconnect icon)
//! temporarily replaces.
//!
//! Overrides are evaluated per frame and applied to a copy of the slot
//! array. The stored settings are never touched.

use log::debug;

use crate::config::ScreenShape;
use crate::device::DeviceState;
use crate::settings::{DerivedFlags, Settings, SidebarLocation};
use crate::widgets::WidgetType;

/// Slot an override should replace.
///
/// Rectangular screens prefer, in order: the first empty slot among 0-2,
/// slot 3 when it is visible and empty, the first visible weather widget,
/// and finally slot 1. Round screens only show slots 0 and 2 and prefer
/// an empty one, then a weather one, then slot 0.
pub fn select_replaceable_slot(
    slots: &[WidgetType; 4],
    location: SidebarLocation,
    shape: ScreenShape,
) -> usize {
    match shape {
        ScreenShape::Round => select_round(slots),
        ScreenShape::Rect => select_rect(slots, location),
    }
}

fn select_rect(slots: &[WidgetType; 4], location: SidebarLocation) -> usize {
    if let Some(slot) = slots[..3].iter().position(|w| w.is_empty()) {
        return slot;
    }

    let visible = if location.is_horizontal() { 4 } else { 3 };
    if visible == 4 && slots[3].is_empty() {
        return 3;
    }

    slots[..visible]
        .iter()
        .position(|w| w.is_weather())
        .unwrap_or(1)
}

fn select_round(slots: &[WidgetType; 4]) -> usize {
    const VISIBLE: [usize; 2] = [0, 2];

    VISIBLE
        .into_iter()
        .find(|&slot| slots[slot].is_empty())
        .or_else(|| VISIBLE.into_iter().find(|&slot| slots[slot].is_weather()))
        .unwrap_or(0)
}

/// Which status overrides apply to the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub auto_battery: bool,
    pub disconnect: bool,
}

impl Overrides {
    pub fn evaluate(settings: &Settings, derived: &DerivedFlags, device: &DeviceState) -> Self {
        let battery = device.battery;
        Self {
            auto_battery: derived.enable_auto_battery_widget
                && !settings.disable_autobattery
                && (battery.is_low() || battery.charging),
            disconnect: settings.activate_disconnect_icon && !device.bluetooth_connected,
        }
    }

    /// Widget to show in the replaced slot. The battery wins over the
    /// disconnect icon.
    pub fn replacement(&self) -> Option<WidgetType> {
        if self.auto_battery {
            Some(WidgetType::BatteryMeter)
        } else if self.disconnect {
            Some(WidgetType::BluetoothDisconnect)
        } else {
            None
        }
    }
}

/// Slot array for one frame, with any override applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSlots {
    pub widgets: [WidgetType; 4],
    /// Slot taken over by an override, if any.
    pub replaced: Option<usize>,
}

/// Apply this frame's override, if any, to a copy of the configured slots.
pub fn resolve_slots(
    settings: &Settings,
    derived: &DerivedFlags,
    device: &DeviceState,
    shape: ScreenShape,
) -> ResolvedSlots {
    let mut widgets = settings.widgets;
    let location = settings.sidebar_location;

    if location == SidebarLocation::None {
        return ResolvedSlots {
            widgets,
            replaced: None,
        };
    }

    let Some(replacement) = Overrides::evaluate(settings, derived, device).replacement() else {
        return ResolvedSlots {
            widgets,
            replaced: None,
        };
    };

    let slot = select_replaceable_slot(&widgets, location, shape);
    debug!(
        "Override {:?} replaces slot {} ({:?})",
        replacement, slot, widgets[slot]
    );
    widgets[slot] = replacement;

    ResolvedSlots {
        widgets,
        replaced: Some(slot),
    }
}
