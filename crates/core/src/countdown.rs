//! Countdown arithmetic: end-date parsing, remaining-time decomposition and
//! the end-of-countdown dispatch.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::CoreError;
use crate::settings::EndAction;

/// Message shown by the `show_ended` end action.
pub const ENDED_MESSAGE: &str = "Sale Ended";

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Naive layouts the admin form and hand-edited records produce.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Offset-carrying layouts RFC 3339 parsing rejects (no seconds). A trailing
/// `Z` is rewritten to `+00:00` before these are tried.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

// ---------------------------------------------------------------------------
// End date parsing
// ---------------------------------------------------------------------------

/// Parse a settings `endDate` into an instant.
///
/// RFC 3339 strings carry their own offset. Naive date-times (what a
/// `datetime-local` input submits) are read in `local`. A bare date is
/// midnight UTC.
pub fn parse_end_date(raw: &str, local: FixedOffset) -> Result<DateTime<Utc>, CoreError> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let zoned = match raw.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => raw.to_string(),
    };
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&zoned, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return local
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| invalid_end_date(raw));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }

    Err(invalid_end_date(raw))
}

fn invalid_end_date(raw: &str) -> CoreError {
    CoreError::Validation(format!("'{raw}' is not a recognised end date"))
}

// ---------------------------------------------------------------------------
// Remaining time
// ---------------------------------------------------------------------------

/// Time left on the countdown, split into whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// Split a non-negative millisecond distance; `None` once it has gone
    /// negative.
    pub fn from_millis(distance_ms: i64) -> Option<Self> {
        if distance_ms < 0 {
            return None;
        }
        Some(Self {
            days: distance_ms / MS_PER_DAY,
            hours: (distance_ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (distance_ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (distance_ms % MS_PER_MINUTE) / MS_PER_SECOND,
        })
    }

    pub fn display(&self) -> TimerDisplay {
        TimerDisplay {
            days: format!("{:02}", self.days),
            hours: format!("{:02}", self.hours),
            minutes: format!("{:02}", self.minutes),
            seconds: format!("{:02}", self.seconds),
        }
    }
}

/// Zero-padded text for the four timer cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerDisplay {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

/// Outcome of one countdown recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running(Remaining),
    Finished,
}

pub fn tick(end: DateTime<Utc>, now: DateTime<Utc>) -> Tick {
    let distance = end.signed_duration_since(now).num_milliseconds();
    match Remaining::from_millis(distance) {
        Some(remaining) => Tick::Running(remaining),
        None => Tick::Finished,
    }
}

// ---------------------------------------------------------------------------
// End-of-countdown dispatch
// ---------------------------------------------------------------------------

/// Presentation change applied when the countdown finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndOutcome {
    /// The bar disappears.
    HideBar,
    /// The timer is hidden; the message is replaced when one is given.
    HideTimer { message: Option<String> },
}

/// Resolve the configured end action. `custom_message` only matters for
/// [`EndAction::ShowCustom`], and only when non-empty.
pub fn end_outcome(action: EndAction, custom_message: &str) -> EndOutcome {
    match action {
        EndAction::Hide => EndOutcome::HideBar,
        EndAction::ShowEnded => EndOutcome::HideTimer {
            message: Some(ENDED_MESSAGE.to_string()),
        },
        EndAction::ShowCustom => EndOutcome::HideTimer {
            message: (!custom_message.is_empty()).then(|| custom_message.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Duration;

    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn decomposes_into_whole_units() {
        let remaining = Remaining::from_millis(90_061 * 1000).unwrap();
        assert_eq!(
            remaining,
            Remaining {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );

        let display = remaining.display();
        assert_eq!(display.days, "01");
        assert_eq!(display.hours, "01");
        assert_eq!(display.minutes, "01");
        assert_eq!(display.seconds, "01");
    }

    #[test]
    fn partial_seconds_are_floored() {
        let remaining = Remaining::from_millis(59_999).unwrap();
        assert_eq!(remaining.minutes, 0);
        assert_eq!(remaining.seconds, 59);
    }

    #[test]
    fn large_day_counts_are_not_truncated() {
        let remaining = Remaining::from_millis(123 * MS_PER_DAY).unwrap();
        assert_eq!(remaining.display().days, "123");
    }

    #[test]
    fn zero_is_still_running_and_negative_is_finished() {
        let end = Utc::now();
        assert_matches!(tick(end, end), Tick::Running(r) if r.seconds == 0);
        assert_eq!(tick(end, end + Duration::milliseconds(1)), Tick::Finished);
        assert_eq!(tick(end, end + Duration::seconds(10)), Tick::Finished);
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let end = parse_end_date("2030-06-01T12:00:00+02:00", utc()).unwrap();
        assert_eq!(end.to_rfc3339(), "2030-06-01T10:00:00+00:00");
    }

    #[test]
    fn parses_offset_datetime_without_seconds() {
        let berlin = FixedOffset::east_opt(3600).unwrap();

        let end = parse_end_date("2030-06-01T12:00Z", berlin).unwrap();
        assert_eq!(end.to_rfc3339(), "2030-06-01T12:00:00+00:00");

        let end = parse_end_date("2030-06-01T12:00+02:00", utc()).unwrap();
        assert_eq!(end.to_rfc3339(), "2030-06-01T10:00:00+00:00");

        let end = parse_end_date("2030-06-01T12:00-0500", utc()).unwrap();
        assert_eq!(end.to_rfc3339(), "2030-06-01T17:00:00+00:00");
    }

    #[test]
    fn naive_datetime_uses_local_offset() {
        let berlin = FixedOffset::east_opt(3600).unwrap();
        let end = parse_end_date("2030-06-01T12:30", berlin).unwrap();
        assert_eq!(end.to_rfc3339(), "2030-06-01T11:30:00+00:00");

        let end = parse_end_date("2030-06-01 12:30:15", utc()).unwrap();
        assert_eq!(end.to_rfc3339(), "2030-06-01T12:30:15+00:00");
    }

    #[test]
    fn bare_date_is_midnight_utc() {
        let berlin = FixedOffset::east_opt(3600).unwrap();
        let end = parse_end_date("2030-06-01", berlin).unwrap();
        assert_eq!(end.to_rfc3339(), "2030-06-01T00:00:00+00:00");
    }

    #[test]
    fn garbage_end_date_is_rejected() {
        for raw in ["", "tomorrow", "2030-13-01T00:00", "01/06/2030"] {
            assert_matches!(parse_end_date(raw, utc()), Err(CoreError::Validation(_)));
        }
    }

    #[test]
    fn custom_message_is_ignored_unless_show_custom() {
        assert_eq!(end_outcome(EndAction::Hide, "Bye"), EndOutcome::HideBar);
        assert_eq!(
            end_outcome(EndAction::ShowEnded, "Bye"),
            EndOutcome::HideTimer {
                message: Some(ENDED_MESSAGE.to_string())
            }
        );
        assert_eq!(
            end_outcome(EndAction::ShowCustom, "Bye"),
            EndOutcome::HideTimer {
                message: Some("Bye".to_string())
            }
        );
    }

    #[test]
    fn empty_custom_message_keeps_current_text() {
        assert_eq!(
            end_outcome(EndAction::ShowCustom, ""),
            EndOutcome::HideTimer { message: None }
        );
    }
}
