use chrono::{DateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

/// Hand angles in degrees: 0 at 12 o'clock, increasing clockwise.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ClockReading {
    pub hour_deg: f32,
    pub minute_deg: f32,
    pub second_deg: f32,
}

impl ClockReading {
    /// Angles for a wall-clock time.
    ///
    /// The hour hand snaps to the twelve hour positions; minutes do not
    /// advance it.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour_deg: (hour % 12) as f32 * 30.0,
            minute_deg: (minute % 60) as f32 * 6.0,
            second_deg: (second % 60) as f32 * 6.0,
        }
    }

    /// A leap second reads as second 59; chrono keeps it in the nanoseconds.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self::from_hms(time.hour(), time.minute(), time.second())
    }
}

/// Source of the current time of day.
pub trait TimeSource {
    fn now(&self) -> NaiveTime;

    fn reading(&self) -> ClockReading {
        ClockReading::from_time(&self.now())
    }
}

/// System clock read in a named IANA zone.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ZonedClock {
    zone: Tz,
}

impl ZonedClock {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    #[inline]
    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Local time of day in this zone at the given UTC instant.
    pub fn time_at(&self, utc: DateTime<Utc>) -> NaiveTime {
        utc.with_timezone(&self.zone).time()
    }
}

impl Default for ZonedClock {
    fn default() -> Self {
        Self::new(chrono_tz::Europe::Moscow)
    }
}

impl TimeSource for ZonedClock {
    fn now(&self) -> NaiveTime {
        self.time_at(Utc::now())
    }
}

/// A clock stopped at a fixed time; for tests and screenshots.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedClock(pub NaiveTime);

impl FixedClock {
    /// Returns `None` for an out-of-range time.
    pub fn hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }
}

impl TimeSource for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}
