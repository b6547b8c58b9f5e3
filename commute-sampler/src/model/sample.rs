use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::SamplerError;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// one observation written to the run file. the duration is the service's
/// text verbatim ("25 mins") and is never parsed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub time: String,
    pub duration: String,
}

/// calendar used to render the displayed timestamp before the fixed offset is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayZone {
    #[default]
    Local,
    Utc,
}

/// the departure submitted to the service, placed `lead` past `now` so the
/// service never sees a departure in the past.
pub fn departure_time(now: i64, lead: &Duration) -> Result<i64, SamplerError> {
    i64::try_from(lead.as_secs())
        .ok()
        .and_then(|lead_secs| now.checked_add(lead_secs))
        .ok_or(SamplerError::TimestampOutOfRange(now))
}

/// renders a departure time as `YYYY-MM-DD HH:MM:SS` in `zone`, shifted by a
/// fixed number of hours. the shift is applied to the wall-clock time after
/// conversion, so it does not follow daylight saving.
pub fn display_timestamp(
    departure: i64,
    offset_hours: i64,
    zone: DisplayZone,
) -> Result<String, SamplerError> {
    let utc = DateTime::<Utc>::from_timestamp(departure, 0)
        .ok_or(SamplerError::TimestampOutOfRange(departure))?;
    let offset = TimeDelta::try_hours(offset_hours)
        .ok_or(SamplerError::TimestampOutOfRange(departure))?;
    let shifted = match zone {
        DisplayZone::Local => shift_wall_clock(&utc, &Local, offset),
        DisplayZone::Utc => shift_wall_clock(&utc, &Utc, offset),
    };
    shifted
        .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
        .ok_or(SamplerError::TimestampOutOfRange(departure))
}

/// wall-clock time of `utc` in `tz`, plus `offset` as plain calendar arithmetic.
fn shift_wall_clock<Tz: TimeZone>(
    utc: &DateTime<Utc>,
    tz: &Tz,
    offset: TimeDelta,
) -> Option<NaiveDateTime> {
    utc.with_timezone(tz).naive_local().checked_add_signed(offset)
}
