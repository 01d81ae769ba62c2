//! Desktop simulator for the sidebar watchface.
//!
//! Runs `watchface-core` in an SDL2 window via `embedded-graphics-simulator`,
//! ticking from the host clock. Device state that a watch would report
//! (battery, Bluetooth, health, weather) is driven from the keyboard.
//!
//! Pass `--round` for the 180x180 round screen and `--12h` for a 12-hour clock.
//!
//! # Key bindings
//!
//! | Key       | Action                                 |
//! |-----------|----------------------------------------|
//! | 1-4       | Cycle the widget in slot 1-4           |
//! | L         | Cycle sidebar location                 |
//! | F         | Toggle large fonts                     |
//! | B         | Toggle Bluetooth connection            |
//! | C         | Toggle charging                        |
//! | Up / Down | Battery level +/- 5 %                  |
//! | S         | Toggle sleeping                        |
//! | W         | Deliver mock weather                   |
//! | Q         | Quit                                   |

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use chrono::{Local, Timelike};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{debug, error, info, warn};

use watchface_core::config::ScreenShape;
use watchface_core::device::{
    BatteryState, CurrentWeather, DeviceState, Forecast, HealthSnapshot, WeatherCondition,
};
use watchface_core::events::{Effect, TickUnit, WeatherUpdate};
use watchface_core::framebuffer::FrameBuffer;
use watchface_core::settings::codec::{self, CURRENT_SETTINGS_VERSION};
use watchface_core::settings::{SettingsUpdate, SidebarLocation};
use watchface_core::time_date::WallTime;
use watchface_core::{WatchEvent, Watchface, WidgetType};

// ---------------------------------------------------------------------------
// Window constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 3;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

const BATTERY_STEP: u8 = 5;

// ---------------------------------------------------------------------------
// Host stand-ins
// ---------------------------------------------------------------------------

struct Options {
    shape: ScreenShape,
    clock_24h: bool,
}

impl Options {
    fn from_args() -> Self {
        let mut options = Self {
            shape: ScreenShape::Rect,
            clock_24h: true,
        };
        for arg in std::env::args().skip(1) {
            match arg.as_str() {
                "--round" => options.shape = ScreenShape::Round,
                "--12h" => options.clock_24h = false,
                other => warn!("Ignoring unknown argument {}", other),
            }
        }
        options
    }
}

fn wall_time_now() -> WallTime {
    let now = Local::now();
    WallTime::new(now.naive_local(), now.offset().local_minus_utc())
}

/// Minute of the hour for weather refreshes, spread across devices.
fn pick_refresh_minute() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() % 60)
        .unwrap_or(0)
}

/// In-memory stand-in for the watch's key-value store.
#[derive(Default)]
struct SettingsStore {
    version: Option<u32>,
    bytes: Option<Vec<u8>>,
}

impl SettingsStore {
    fn persist(&mut self, watchface: &Watchface) {
        match codec::encode(watchface.settings()) {
            Ok(bytes) => {
                debug!("Persisted {} settings bytes", bytes.len());
                self.version = Some(CURRENT_SETTINGS_VERSION);
                self.bytes = Some(bytes);
            }
            Err(e) => error!("Failed to persist settings: {}", e),
        }
    }
}

fn mock_weather() -> [WeatherUpdate; 2] {
    [
        WeatherUpdate::Current(CurrentWeather {
            temp_c: 18,
            condition: WeatherCondition::PartlyCloudy,
        }),
        WeatherUpdate::Forecast(Forecast {
            high_c: 22,
            low_c: 11,
            condition: WeatherCondition::Rain,
        }),
    ]
}

fn next_widget(current: WidgetType) -> WidgetType {
    let all = WidgetType::ALL;
    let index = all.iter().position(|&w| w == current).unwrap_or(0);
    all[(index + 1) % all.len()]
}

fn next_location(current: SidebarLocation) -> SidebarLocation {
    SidebarLocation::from((current.raw() + 1) % 5)
}

// ---------------------------------------------------------------------------
// Input mapping
// ---------------------------------------------------------------------------

/// Translate a key press into the event a watch would deliver.
fn keycode_to_event(keycode: Keycode, watchface: &Watchface) -> Option<WatchEvent> {
    let settings = watchface.settings();
    let device = watchface.device();

    let slot = match keycode {
        Keycode::Num1 | Keycode::Kp1 => Some(0),
        Keycode::Num2 | Keycode::Kp2 => Some(1),
        Keycode::Num3 | Keycode::Kp3 => Some(2),
        Keycode::Num4 | Keycode::Kp4 => Some(3),
        _ => None,
    };
    if let Some(slot) = slot {
        let mut update = SettingsUpdate::default();
        update.widgets[slot] = Some(next_widget(settings.widgets[slot]).raw());
        return Some(WatchEvent::SettingsReceived(update));
    }

    let event = match keycode {
        Keycode::L => WatchEvent::SettingsReceived(SettingsUpdate {
            sidebar_location: Some(next_location(settings.sidebar_location).raw()),
            ..SettingsUpdate::default()
        }),
        Keycode::F => WatchEvent::SettingsReceived(SettingsUpdate {
            use_large_fonts: Some(!settings.use_large_fonts),
            ..SettingsUpdate::default()
        }),
        Keycode::B => WatchEvent::Bluetooth(!device.bluetooth_connected),
        Keycode::C => WatchEvent::Battery(BatteryState::new(
            device.battery.percent,
            !device.battery.charging,
        )),
        Keycode::Up => WatchEvent::Battery(BatteryState::new(
            device.battery.percent.saturating_add(BATTERY_STEP),
            device.battery.charging,
        )),
        Keycode::Down => WatchEvent::Battery(BatteryState::new(
            device.battery.percent.saturating_sub(BATTERY_STEP),
            device.battery.charging,
        )),
        Keycode::S => WatchEvent::Health(HealthSnapshot {
            sleeping: !device.health.sleeping,
            ..device.health
        }),
        _ => return None,
    };
    Some(event)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    let options = Options::from_args();
    info!("Starting watchface simulator");
    info!(
        "Display: {:?} {}×{} (scale {}×)",
        options.shape,
        options.shape.width(),
        options.shape.height(),
        WINDOW_SCALE
    );
    info!("Keys: 1-4=Widgets  L=Location  F=Fonts  B=BT  C=Charge  ↑/↓=Battery  S=Sleep  W=Weather  Q=Quit");

    let mut store = SettingsStore::default();
    let settings = codec::load(store.version, store.bytes.as_deref());

    let device = DeviceState {
        health: HealthSnapshot {
            steps: Some(6_420),
            distance_meters: Some(4_800),
            heart_rate_bpm: Some(64),
            sleep_seconds: Some(7 * 3600 + 20 * 60),
            restful_sleep_seconds: Some(2 * 3600),
            ..HealthSnapshot::default()
        },
        ..DeviceState::default()
    };

    let mut watchface = Watchface::new(
        options.shape,
        settings,
        device,
        wall_time_now(),
        options.clock_24h,
        pick_refresh_minute(),
    );
    let mut tick_unit = watchface.tick_unit();

    let mut display = SimulatorDisplay::<Rgb565>::new(options.shape.size());
    let mut framebuffer = FrameBuffer::new(options.shape);

    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Watchface Simulator", &output_settings);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = watchface.draw(&mut framebuffer);
    let _ = framebuffer.flush(&mut display);
    window.update(&display);

    let mut last_second = Local::now().second();
    let mut needs_redraw = false;
    let mut pending: Vec<WatchEvent> = mock_weather().map(WatchEvent::Weather).to_vec();

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Q | Keycode::Escape => break 'running,
                    Keycode::W => pending.extend(mock_weather().map(WatchEvent::Weather)),
                    _ => {
                        if let Some(event) = keycode_to_event(keycode, &watchface) {
                            pending.push(event);
                        }
                    }
                },
                _ => {}
            }
        }

        // --- Clock ----------------------------------------------------------
        let now = wall_time_now();
        if now.second() != last_second {
            last_second = now.second();
            if tick_unit == TickUnit::Second || now.second() == 0 {
                pending.push(WatchEvent::Tick(now));
            }
        }

        // --- Event handling ---------------------------------------------------
        for event in pending.drain(..).collect::<Vec<_>>() {
            let outcome = watchface.handle(event);
            needs_redraw |= outcome.redraw;

            for effect in outcome.effects {
                match effect {
                    Effect::RequestWeather => {
                        info!("Weather requested");
                        pending.extend(mock_weather().map(WatchEvent::Weather));
                    }
                    Effect::Vibrate(pattern) => {
                        info!("Vibrate {:?} {:?} ms", pattern, pattern.durations());
                    }
                    Effect::SetTickUnit(unit) => {
                        info!("Tick unit now {:?}", unit);
                        tick_unit = unit;
                    }
                    Effect::PersistSettings => store.persist(&watchface),
                }
            }
        }

        // --- Render -------------------------------------------------------
        if needs_redraw {
            if let Err(e) = watchface.draw(&mut framebuffer) {
                error!("Draw error: {:?}", e);
            }
            if let Err(e) = framebuffer.flush(&mut display) {
                error!("Flush error: {:?}", e);
            }
            needs_redraw = false;
        }

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
