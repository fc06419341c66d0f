//! Wake/sleep window policy.
//!
//! The waking window bounds the chart and constrains which times of day a
//! new consumption may be entered at. When sleep time is at or before wake
//! time the window crosses midnight and the membership test wraps.

use crate::UserSettings;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};

/// Granularity of the entry-time grid, in minutes
pub const SLOT_MINUTES: u32 = 15;

/// Hours before sleep time after which caffeine may still impair sleep
pub const SLEEP_CUTOFF_HOURS: i64 = 4;

/// Test whether a time of day falls inside the waking window `[wake, sleep)`
///
/// A window with `sleep <= wake` crosses midnight, so membership becomes
/// `t >= wake || t < sleep`.
pub fn in_waking_window(t: NaiveTime, wake: NaiveTime, sleep: NaiveTime) -> bool {
    if sleep > wake {
        t >= wake && t < sleep
    } else {
        t >= wake || t < sleep
    }
}

/// Display-only sleep cutoff marker: 4 hours before sleep time
///
/// Wraps around midnight (sleep at 02:00 gives a 22:00 cutoff).
pub fn sleep_cutoff(sleep: NaiveTime) -> NaiveTime {
    sleep - Duration::hours(SLEEP_CUTOFF_HOURS)
}

/// All entry-time slots on the 15-minute grid inside the waking window
///
/// Slots are listed in clock order starting at midnight.
pub fn time_slots(wake: NaiveTime, sleep: NaiveTime) -> Vec<NaiveTime> {
    let mut slots = Vec::new();
    for hour in 0..24 {
        for minute in (0..60).step_by(SLOT_MINUTES as usize) {
            if let Some(t) = NaiveTime::from_hms_opt(hour, minute, 0) {
                if in_waking_window(t, wake, sleep) {
                    slots.push(t);
                }
            }
        }
    }
    slots
}

/// Round a time of day to the nearest slot on the 15-minute grid
///
/// Rounding past the top of the hour carries into the next hour and wraps
/// at midnight.
pub fn round_to_slot(t: NaiveTime) -> NaiveTime {
    let total_minutes = t.hour() * 60 + t.minute();
    let rounded = ((total_minutes as f64 / SLOT_MINUTES as f64).round() as u32) * SLOT_MINUTES;
    let wrapped = rounded % (24 * 60);
    NaiveTime::from_hms_opt(wrapped / 60, wrapped % 60, 0).unwrap_or(t)
}

/// Chart window bounds for the reference day
///
/// Both bounds land on `date`; a window whose sleep time is at or before
/// its wake time therefore comes back inverted and yields an empty series
/// downstream.
pub fn window_bounds(settings: &UserSettings, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(settings.wake_time).and_utc();
    let end = date.and_time(settings.sleep_time).and_utc();
    (start, end)
}
