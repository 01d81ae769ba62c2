//! Localized day, month and label strings.
//!
//! Only the abbreviations the sidebar and clock area need are kept. All
//! strings are uppercase ASCII so they render with the built-in mono fonts.

use serde::{Deserialize, Serialize};

/// Display language. Unknown wire ids fall back to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Language {
    #[default]
    English,
    French,
    German,
    Spanish,
    Italian,
    Dutch,
    Turkish,
}

impl From<u8> for Language {
    fn from(raw: u8) -> Self {
        match raw {
            1 => Language::French,
            2 => Language::German,
            3 => Language::Spanish,
            4 => Language::Italian,
            5 => Language::Dutch,
            6 => Language::Turkish,
            _ => Language::English,
        }
    }
}

impl From<Language> for u8 {
    fn from(language: Language) -> Self {
        language as u8
    }
}

impl Language {
    /// Abbreviated weekday names, Sunday first.
    pub const fn day_names(self) -> &'static [&'static str; 7] {
        match self {
            Language::English => &["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"],
            Language::French => &["DIM", "LUN", "MAR", "MER", "JEU", "VEN", "SAM"],
            Language::German => &["SO", "MO", "DI", "MI", "DO", "FR", "SA"],
            Language::Spanish => &["DOM", "LUN", "MAR", "MIE", "JUE", "VIE", "SAB"],
            Language::Italian => &["DOM", "LUN", "MAR", "MER", "GIO", "VEN", "SAB"],
            Language::Dutch => &["ZO", "MA", "DI", "WO", "DO", "VR", "ZA"],
            Language::Turkish => &["PAZ", "PZT", "SAL", "CAR", "PER", "CUM", "CMT"],
        }
    }

    /// Abbreviated month names, January first.
    pub const fn month_names(self) -> &'static [&'static str; 12] {
        match self {
            Language::English => &[
                "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
            ],
            Language::French => &[
                "JAN", "FEV", "MAR", "AVR", "MAI", "JUN", "JUL", "AOU", "SEP", "OCT", "NOV", "DEC",
            ],
            Language::German => &[
                "JAN", "FEB", "MRZ", "APR", "MAI", "JUN", "JUL", "AUG", "SEP", "OKT", "NOV", "DEZ",
            ],
            Language::Spanish => &[
                "ENE", "FEB", "MAR", "ABR", "MAY", "JUN", "JUL", "AGO", "SEP", "OCT", "NOV", "DIC",
            ],
            Language::Italian => &[
                "GEN", "FEB", "MAR", "APR", "MAG", "GIU", "LUG", "AGO", "SET", "OTT", "NOV", "DIC",
            ],
            Language::Dutch => &[
                "JAN", "FEB", "MRT", "APR", "MEI", "JUN", "JUL", "AUG", "SEP", "OKT", "NOV", "DEC",
            ],
            Language::Turkish => &[
                "OCA", "SUB", "MAR", "NIS", "MAY", "HAZ", "TEM", "AGU", "EYL", "EKI", "KAS", "ARA",
            ],
        }
    }

    /// Label drawn above the week number.
    pub const fn week_label(self) -> &'static str {
        match self {
            Language::English | Language::Dutch => "WK",
            Language::French | Language::Spanish => "SEM",
            Language::German => "KW",
            Language::Italian => "SETT",
            Language::Turkish => "HF",
        }
    }

    /// Whether the percent sign precedes the number ("%50").
    pub const fn percent_sign_first(self) -> bool {
        matches!(self, Language::Turkish)
    }
}
