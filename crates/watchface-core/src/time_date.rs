//! Text for the clock, the date and the time-based widgets.
//!
//! All strings are recomputed on each tick from a [`WallTime`] and cached
//! in [`TimeStrings`] so the render pass only reads them.

use core::fmt::Write;

use chrono::{Datelike, NaiveDateTime, Timelike};
use heapless::String;

use crate::settings::{DerivedFlags, Settings};

const SECONDS_PER_DAY: i64 = 86_400;

/// Biel Mean Time is UTC+1.
const BMT_OFFSET_SECS: i64 = 3_600;

/// Local wall-clock time plus the zone offset needed for Swatch beats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    pub local: NaiveDateTime,
    /// Seconds east of UTC.
    pub utc_offset_secs: i32,
}

impl WallTime {
    pub fn new(local: NaiveDateTime, utc_offset_secs: i32) -> Self {
        Self {
            local,
            utc_offset_secs,
        }
    }

    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    pub fn minute(&self) -> u32 {
        self.local.minute()
    }

    pub fn second(&self) -> u32 {
        self.local.second()
    }

    /// Swatch Internet Time, 0-999.
    pub fn beats(&self) -> u32 {
        let local_secs = i64::from(self.local.num_seconds_from_midnight());
        let utc_secs = (local_secs - i64::from(self.utc_offset_secs)).rem_euclid(SECONDS_PER_DAY);
        let bmt_secs = (utc_secs + BMT_OFFSET_SECS) % SECONDS_PER_DAY;
        ((bmt_secs * 10 / 864) % 1000) as u32
    }
}

/// Cached text for one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeStrings {
    pub hours: String<3>,
    pub minutes: String<3>,
    pub day_name: String<4>,
    pub day_num: String<3>,
    pub month: String<4>,
    pub week_num: String<3>,
    /// ":SS", only kept current when the seconds widget is configured.
    pub seconds: String<4>,
    pub alt_clock: String<4>,
    pub beats: String<4>,
    /// "DAY D MON" for horizontal bars.
    pub full_date: String<12>,
}

impl TimeStrings {
    pub fn compute(
        time: &WallTime,
        settings: &Settings,
        derived: &DerivedFlags,
        clock_24h: bool,
    ) -> Self {
        let local = &time.local;
        let language = settings.language;
        let mut strings = TimeStrings::default();

        let hour = display_hour(local.hour(), clock_24h);
        if settings.show_leading_zero {
            write!(strings.hours, "{:02}", hour).ok();
        } else if settings.center_time {
            write!(strings.hours, "{}", hour).ok();
        } else {
            write!(strings.hours, "{:2}", hour).ok();
        }
        write!(strings.minutes, "{:02}", local.minute()).ok();

        let day_name = language.day_names()[local.weekday().num_days_from_sunday() as usize];
        let month = language.month_names()[local.month0() as usize];
        strings.day_name.push_str(day_name).ok();
        strings.month.push_str(month).ok();
        write!(strings.day_num, "{}", local.day()).ok();
        write!(strings.week_num, "{:02}", local.iso_week().week()).ok();
        write!(strings.full_date, "{} {} {}", day_name, local.day(), month).ok();

        if derived.update_screen_every_second {
            write!(strings.seconds, ":{:02}", local.second()).ok();
        }

        if derived.enable_alt_time_zone {
            strings.alt_clock = alt_clock_text(
                local.hour(),
                settings.alt_clock_offset,
                clock_24h,
                settings.show_leading_zero,
            );
        }

        if derived.enable_beats {
            write!(strings.beats, "{}", time.beats()).ok();
        }

        strings
    }
}

fn display_hour(hour: u32, clock_24h: bool) -> u32 {
    if clock_24h {
        hour
    } else {
        match hour % 12 {
            0 => 12,
            h => h,
        }
    }
}

/// Hour text for the alternate time zone widget.
///
/// The 12-hour form is suffixed with `a` or `p` and never zero-padded.
pub fn alt_clock_text(local_hour: u32, offset: i8, clock_24h: bool, leading_zero: bool) -> String<4> {
    let hour = (local_hour as i32 + i32::from(offset)).rem_euclid(24) as u32;
    let mut text = String::new();

    if clock_24h {
        if leading_zero {
            write!(text, "{:02}", hour).ok();
        } else {
            write!(text, "{}", hour).ok();
        }
    } else {
        let suffix = if hour < 12 { 'a' } else { 'p' };
        write!(text, "{}{}", display_hour(hour, false), suffix).ok();
    }

    text
}
