//! Hardware-independent core of the sidebar watchface.
//!
//! The watchface shows a large clock next to a sidebar of up to four
//! configurable widgets. This crate owns everything that does not touch
//! hardware: the persisted settings and their derived flags, the widget
//! registry, the override selector, the layout engine, drawing into any
//! `DrawTarget<Color = Rgb565>` and the event-driven watchface state machine.
//!
//! It is `#![no_std]` with `extern crate alloc` so it builds for watch
//! targets as well as desktop hosts (the simulator and tests).

#![no_std]

extern crate alloc;

pub mod clock_area;
pub mod config;
pub mod device;
pub mod events;
pub mod framebuffer;
pub mod language;
pub mod layout;
pub mod selector;
pub mod settings;
pub mod sidebar;
pub mod time_date;
pub mod watchface;
pub mod widgets;

pub use events::{Effect, Outcome, WatchEvent};
pub use settings::{DerivedFlags, Settings};
pub use watchface::Watchface;
pub use widgets::WidgetType;
