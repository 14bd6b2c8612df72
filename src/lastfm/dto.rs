use super::model::Event;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_either::SingleOrVec;
use serde_json::Value;
use tracing::warn;

/// Input set for the get-events-for-artist operation.
#[derive(Debug, Serialize)]
pub struct GetEventsInputs<'a> {
    #[serde(rename = "APIKey")]
    pub api_key: &'a str,
    #[serde(rename = "Artist")]
    pub artist: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct EventsResponse {
    pub events: EventList,
}

// Note: the source sends `event` as a bare object when there is exactly one
// record, and omits the key entirely when the total is zero.
#[derive(Debug, Deserialize)]
pub struct EventList {
    #[serde(rename = "@attr")]
    pub attr: EventListAttr,
    #[serde(default)]
    pub event: Option<SingleOrVec<ResponseEvent>>,
}

impl EventList {
    pub fn into_records(self) -> Vec<ResponseEvent> {
        match self.event {
            None => Vec::new(),
            Some(SingleOrVec::Single(record)) => vec![record],
            Some(SingleOrVec::Vec(records)) => records,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EventListAttr {
    #[serde(deserialize_with = "deserialize_count")]
    pub total: u32,
}

#[derive(Debug, Deserialize)]
pub struct ResponseEvent {
    pub title: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(default, deserialize_with = "deserialize_optional_str")]
    pub description: Option<String>,
    pub venue: ResponseVenue,
}

#[derive(Debug, Deserialize)]
pub struct ResponseVenue {
    pub name: String,
    #[serde(default)]
    pub location: Option<ResponseLocation>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseLocation {
    #[serde(default, deserialize_with = "deserialize_optional_str")]
    pub city: Option<String>,
}

impl ResponseEvent {
    /// Converts one record, or drops it when it carries no usable city.
    pub fn to_model(self, artist: &str) -> Option<Event> {
        let city = match self.venue.location.and_then(|location| location.city) {
            Some(city) => city,
            None => {
                warn!(
                    "Event at '{}' has no venue city (skipping it)",
                    self.venue.name
                );
                return None;
            }
        };

        Some(Event {
            artist: artist.to_string(),
            title: self.title,
            venue: self.venue.name,
            city,
            starts_at: self.start_date,
            description: self.description,
        })
    }
}

// The source types counts as strings.
fn deserialize_count<'de, D>(d: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::String(s) => s.parse().map_err(de::Error::custom),
        Value::Number(n) => n
            .as_u64()
            .map(|n| n as u32)
            .ok_or_else(|| de::Error::custom("count is not a non-negative integer")),
        other => Err(de::Error::custom(format!("unexpected count: {}", other))),
    }
}

fn deserialize_optional_str<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn should_deserialize_a_list_of_events() {
        let response = serde_json::from_str::<EventsResponse>(
            r##"
              {
                "events": {
                  "@attr": { "artist": "The Midnight Ramblers", "total": "3" },
                  "event": [
                    {
                      "title": "The Midnight Ramblers at Stubb's",
                      "startDate": "Wed, 15 Aug 2012 20:00:00",
                      "description": "With special guests",
                      "venue": {
                        "name": "Stubb's",
                        "location": { "city": "Austin", "country": "United States" }
                      }
                    },
                    {
                      "title": "The Midnight Ramblers at Paradise Rock Club",
                      "startDate": "Fri, 17 Aug 2012 21:00:00",
                      "venue": {
                        "name": "Paradise Rock Club",
                        "location": { "city": "Boston", "country": "United States" }
                      }
                    }
                  ]
                }
              }"##,
        )
        .unwrap();

        assert_eq!(response.events.attr.total, 3);

        let records = response.events.into_records();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].venue.name, "Stubb's");
        assert_eq!(records[0].description.as_deref(), Some("With special guests"));
        assert_eq!(records[1].description, None);
    }

    #[test_log::test]
    fn should_deserialize_a_single_event_sent_as_a_bare_object() {
        let response = serde_json::from_str::<EventsResponse>(
            r##"
              {
                "events": {
                  "@attr": { "total": "1" },
                  "event": {
                    "title": "The Midnight Ramblers at Stubb's",
                    "startDate": "2012-08-15T20:00:00",
                    "venue": { "name": "Stubb's", "location": { "city": "Austin" } }
                  }
                }
              }"##,
        )
        .unwrap();

        assert_eq!(response.events.attr.total, 1);
        assert_eq!(response.events.into_records().len(), 1);
    }

    #[test_log::test]
    fn should_deserialize_an_empty_answer_without_an_event_key() {
        let response = serde_json::from_str::<EventsResponse>(
            r##"{ "events": { "@attr": { "total": "0" } } }"##,
        )
        .unwrap();

        assert_eq!(response.events.attr.total, 0);
        assert!(response.events.into_records().is_empty());
    }

    #[test_log::test]
    fn a_record_without_a_city_is_dropped_on_conversion() {
        let record = serde_json::from_str::<ResponseEvent>(
            r##"
              {
                "title": "Secret show",
                "startDate": "2012-08-15T20:00:00",
                "venue": { "name": "Undisclosed" }
              }"##,
        )
        .unwrap();

        assert!(record.to_model("The Midnight Ramblers").is_none());
    }

    #[test_log::test]
    fn an_empty_city_counts_as_missing() {
        let record = serde_json::from_str::<ResponseEvent>(
            r##"
              {
                "title": "Secret show",
                "startDate": "2012-08-15T20:00:00",
                "venue": { "name": "Undisclosed", "location": { "city": "" } }
              }"##,
        )
        .unwrap();

        assert!(record.to_model("The Midnight Ramblers").is_none());
    }

    #[test_log::test]
    fn conversion_keeps_the_raw_start_timestamp() {
        let record = serde_json::from_str::<ResponseEvent>(
            r##"
              {
                "title": "The Midnight Ramblers at Stubb's",
                "startDate": "Wed, 15 Aug 2012 20:00:00",
                "venue": { "name": "Stubb's", "location": { "city": "Austin" } }
              }"##,
        )
        .unwrap();

        let event = record.to_model("The Midnight Ramblers").unwrap();

        assert_eq!(event.starts_at, "Wed, 15 Aug 2012 20:00:00");
        assert_eq!(event.artist, "The Midnight Ramblers");
        assert_eq!(event.city, "Austin");
    }

    #[test_log::test]
    fn get_events_inputs_serialize_with_gateway_field_names() {
        let inputs = GetEventsInputs {
            api_key: "key",
            artist: "The Midnight Ramblers",
        };

        let value = serde_json::to_value(&inputs).unwrap();

        assert_eq!(value["APIKey"], "key");
        assert_eq!(value["Artist"], "The Midnight Ramblers");
    }
}
