use crate::lastfm::model::Event;
use chrono::{DateTime, NaiveDateTime};

/// Destination calendar, resolved by display name once per run.
#[derive(Debug, Clone)]
pub struct CalendarTarget {
    pub name: String,
    pub id: String,
}

/// The creation payload for one show, with the start timestamp already
/// split into the calendar's date and time-of-day fields.
#[derive(Debug, Clone)]
pub struct CalendarEntry {
    pub title: String,
    pub location: String,
    pub description: String,
    pub date: String,
    pub time: String,
}

// Formats the source actually emits, most common first.
const SOURCE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%a, %d %b %Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

impl CalendarEntry {
    /// The source gives no duration, so the entry's start and end are the
    /// same instant.
    pub fn from_event(event: &Event) -> Result<Self, ScheduleError> {
        let starts_at = parse_source_timestamp(&event.starts_at)?;

        Ok(Self {
            title: event.title.clone(),
            location: event.venue.clone(),
            description: event.description.clone().unwrap_or_default(),
            date: starts_at.format("%Y-%m-%d").to_string(),
            time: starts_at.format("%H:%M:%S").to_string(),
        })
    }
}

fn parse_source_timestamp(raw: &str) -> Result<NaiveDateTime, ScheduleError> {
    let raw = raw.trim();

    for format in SOURCE_TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed);
        }
    }

    // Some feeds append a numeric offset; the calendar fields stay in the
    // event's own wall-clock time.
    if let Ok(parsed) = DateTime::parse_from_str(raw, "%a, %d %b %Y %H:%M:%S %z") {
        return Ok(parsed.naive_local());
    }

    Err(ScheduleError {
        raw: raw.to_string(),
    })
}

#[derive(Debug, thiserror::Error)]
#[error("unrecognized start timestamp '{raw}'")]
pub struct ScheduleError {
    pub raw: String,
}

/// Outcome of one synchronizer run over a batch of events.
#[derive(Debug, Default)]
pub struct SyncResult {
    pub events_added: usize,
    pub failures: Vec<EventFailure>,
}

/// One failed creation attempt, with enough context to name the show.
#[derive(Debug, Clone)]
pub struct EventFailure {
    pub venue: String,
    pub date: String,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_starting_at(starts_at: &str) -> Event {
        Event {
            artist: "The Midnight Ramblers".to_string(),
            title: "The Midnight Ramblers at Stubb's".to_string(),
            venue: "Stubb's".to_string(),
            city: "Austin".to_string(),
            starts_at: starts_at.to_string(),
            description: Some("With special guests".to_string()),
        }
    }

    #[test_log::test]
    fn splits_an_iso_timestamp_into_date_and_time() {
        let entry = CalendarEntry::from_event(&event_starting_at("2012-08-15T20:00:00")).unwrap();

        assert_eq!(entry.date, "2012-08-15");
        assert_eq!(entry.time, "20:00:00");
    }

    #[test_log::test]
    fn splits_the_source_long_form_timestamp() {
        let entry =
            CalendarEntry::from_event(&event_starting_at("Wed, 15 Aug 2012 20:00:00")).unwrap();

        assert_eq!(entry.date, "2012-08-15");
        assert_eq!(entry.time, "20:00:00");
    }

    #[test_log::test]
    fn accepts_a_trailing_utc_offset() {
        let entry =
            CalendarEntry::from_event(&event_starting_at("Wed, 15 Aug 2012 20:00:00 +0000"))
                .unwrap();

        assert_eq!(entry.date, "2012-08-15");
        assert_eq!(entry.time, "20:00:00");
    }

    #[test_log::test]
    fn an_unparseable_timestamp_is_an_error_naming_the_raw_value() {
        let err = CalendarEntry::from_event(&event_starting_at("sometime next week")).unwrap_err();

        assert_eq!(err.raw, "sometime next week");
    }

    #[test_log::test]
    fn a_missing_description_becomes_an_empty_string() {
        let mut event = event_starting_at("2012-08-15T20:00:00");
        event.description = None;

        let entry = CalendarEntry::from_event(&event).unwrap();

        assert_eq!(entry.description, "");
    }
}
