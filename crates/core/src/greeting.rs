//! Time-of-day greeting and business-hours window

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Part of the day used to pick a greeting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    /// Before 12:00
    Morning,
    /// 12:00 to 16:59
    Afternoon,
    /// 17:00 onwards
    Evening,
}

impl DayPeriod {
    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            DayPeriod::Morning
        } else if hour < 17 {
            DayPeriod::Afternoon
        } else {
            DayPeriod::Evening
        }
    }

    pub fn greeting(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "Good morning",
            DayPeriod::Afternoon => "Good afternoon",
            DayPeriod::Evening => "Good evening",
        }
    }
}

/// Greeting for a local hour (0-23)
pub fn greeting_for_hour(hour: u32) -> &'static str {
    DayPeriod::from_hour(hour).greeting()
}

/// Daily opening window, `open_hour <= hour < close_hour`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    #[serde(default = "default_open_hour")]
    pub open_hour: u32,
    #[serde(default = "default_close_hour")]
    pub close_hour: u32,
}

fn default_open_hour() -> u32 {
    9
}

fn default_close_hour() -> u32 {
    18
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            open_hour: default_open_hour(),
            close_hour: default_close_hour(),
        }
    }
}

impl BusinessHours {
    pub fn new(open_hour: u32, close_hour: u32) -> Self {
        Self {
            open_hour,
            close_hour,
        }
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.open_hour <= hour && hour < self.close_hour
    }
}

/// Greeting and opening state derived once when a session starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGreeting {
    pub greeting: &'static str,
    pub is_business_hours: bool,
}

impl SessionGreeting {
    pub fn at(now: NaiveDateTime, hours: &BusinessHours) -> Self {
        let hour = now.hour();
        Self {
            greeting: greeting_for_hour(hour),
            is_business_hours: hours.contains(hour),
        }
    }
}
