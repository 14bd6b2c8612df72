use super::dto::{EventsResponse, GetEventsInputs};
use super::model::{ArtistEvents, Event};
use crate::api::EventSource;
use crate::config::model::LastFmConfig;
use crate::gateway::session::{GatewayError, GatewaySession, Operation};
use async_trait::async_trait;
use tracing::info;

pub struct LastFmAPI {
    session: GatewaySession,
    api_key: String,
}

impl LastFmAPI {
    pub fn new(session: GatewaySession, config: &LastFmConfig) -> Self {
        Self {
            session,
            api_key: config.api_key.clone(),
        }
    }

    /// One remote query for everything the source knows about the band,
    /// in response order. Filtering is the caller's job.
    #[tracing::instrument(skip(self))]
    pub async fn get_events(&self, band: &str) -> Result<ArtistEvents, GatewayError> {
        info!("Querying the event source for '{}' shows", band);

        let inputs = GetEventsInputs {
            api_key: &self.api_key,
            artist: band,
        };
        let response: EventsResponse = self
            .session
            .execute(Operation::GetEventsForArtist, &inputs)
            .await?;

        let total_found = response.events.attr.total;
        let events = response
            .events
            .into_records()
            .into_iter()
            .filter_map(|record| record.to_model(band))
            .collect();

        info!("Source reports {} '{}' shows overall", total_found, band);

        Ok(ArtistEvents { total_found, events })
    }
}

#[async_trait]
impl EventSource for LastFmAPI {
    async fn events_for_artist(&self, band: &str) -> Result<ArtistEvents, GatewayError> {
        self.get_events(band).await
    }
}

/// Keeps only events in the given town, preserving source order.
pub fn filter_by_town(events: Vec<Event>, town: &str) -> Vec<Event> {
    events
        .into_iter()
        .filter(|event| event.is_in_town(town))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(venue: &str, city: &str) -> Event {
        Event {
            artist: "The Midnight Ramblers".to_string(),
            title: format!("The Midnight Ramblers at {}", venue),
            venue: venue.to_string(),
            city: city.to_string(),
            starts_at: "2012-08-15T20:00:00".to_string(),
            description: None,
        }
    }

    #[test_log::test]
    fn filter_keeps_exact_case_insensitive_matches_in_source_order() {
        let events = vec![
            event("Stubb's", "Austin"),
            event("Paradise Rock Club", "Boston"),
            event("Mohawk", "austin"),
        ];

        let matching = filter_by_town(events, "Austin");

        assert_eq!(matching.len(), 2);
        assert_eq!(matching[0].venue, "Stubb's");
        assert_eq!(matching[1].venue, "Mohawk");
    }

    #[test_log::test]
    fn filter_rejects_partial_city_matches() {
        let events = vec![event("Stubb's", "Austin, TX")];

        assert!(filter_by_town(events, "Austin").is_empty());
    }

    #[test_log::test]
    fn filter_of_nothing_is_nothing() {
        assert!(filter_by_town(Vec::new(), "Austin").is_empty());
    }
}
