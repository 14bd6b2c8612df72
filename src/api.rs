use crate::calendar::api::APIError;
use crate::calendar::model::{CalendarEntry, CalendarTarget, EventFailure, SyncResult};
use crate::gateway::session::GatewayError;
use crate::lastfm::api::filter_by_town;
use crate::lastfm::model::{ArtistEvents, Event};
use async_trait::async_trait;
use itertools::Itertools;
use tracing::{error, info};

/// The one remote operation the finder stage depends on.
#[async_trait]
pub trait EventSource {
    async fn events_for_artist(&self, band: &str) -> Result<ArtistEvents, GatewayError>;
}

/// The two remote operations the synchronizer stage depends on.
#[async_trait]
pub trait CalendarService {
    async fn resolve_calendar(&self, name: &str) -> Result<CalendarTarget, APIError>;

    async fn create_event(
        &self,
        target: &CalendarTarget,
        entry: &CalendarEntry,
    ) -> Result<(), APIError>;
}

/// What to do with the rest of the batch after one event fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first per-event failure, leaving later events
    /// unattempted.
    #[default]
    FailFast,
    /// Keep going; every failure is still recorded and fails the run's
    /// exit status.
    BestEffort,
}

#[derive(Debug, Clone)]
pub struct SyncParams {
    pub band: String,
    pub town: String,
    pub calendar_name: String,
    pub policy: FailurePolicy,
}

/// Run-level outcome. `total_found` is the source's own count across all
/// cities; `matching` is the post-filter count actually attempted.
#[derive(Debug)]
pub struct RunReport {
    pub band: String,
    pub town: String,
    pub calendar_name: String,
    pub total_found: u32,
    pub matching: usize,
    pub events_added: usize,
    pub failures: Vec<EventFailure>,
}

impl RunReport {
    pub fn summary(&self) -> String {
        if self.matching == 0 {
            return format!("No '{}' events found in {}", self.band, self.town);
        }

        let shows = if self.matching == 1 { "show" } else { "shows" };

        format!(
            "Found {} matching {} ({} '{}' events overall)\nSuccessfully added {} of {} events to '{}'",
            self.matching,
            shows,
            self.total_found,
            self.band,
            self.events_added,
            self.matching,
            self.calendar_name,
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("the gateway or a connected service rejected the configured credentials")]
    Credential(#[source] GatewayError),
    #[error("failed to look up events for artist '{band}'")]
    EventLookup {
        band: String,
        #[source]
        source: GatewayError,
    },
    #[error("failed to locate calendar '{name}'")]
    CalendarLookup {
        name: String,
        #[source]
        source: APIError,
    },
    #[error("no calendar named '{name}' exists")]
    CalendarNotFound { name: String },
}

/// Full pipeline: find, filter, resolve the calendar, create entries.
/// Zero matches short-circuit before the calendar is even resolved.
pub async fn run_sync<S, C>(
    source: &S,
    calendar: &C,
    params: &SyncParams,
) -> Result<RunReport, SyncError>
where
    S: EventSource + Sync,
    C: CalendarService + Sync,
{
    let ArtistEvents {
        total_found,
        events,
    } = source
        .events_for_artist(&params.band)
        .await
        .map_err(|err| {
            if err.is_credential() {
                SyncError::Credential(err)
            } else {
                SyncError::EventLookup {
                    band: params.band.clone(),
                    source: err,
                }
            }
        })?;

    let matching = filter_by_town(events, &params.town);

    info!(
        "{} of {} '{}' shows are in {}",
        matching.len(),
        total_found,
        params.band,
        params.town
    );

    if matching.is_empty() {
        return Ok(RunReport {
            band: params.band.clone(),
            town: params.town.clone(),
            calendar_name: params.calendar_name.clone(),
            total_found,
            matching: 0,
            events_added: 0,
            failures: Vec::new(),
        });
    }

    info!(
        "Matched venues: {}",
        matching.iter().map(|event| event.venue.as_str()).join(", ")
    );

    let target = calendar
        .resolve_calendar(&params.calendar_name)
        .await
        .map_err(|err| match err {
            APIError::CalendarNotFound { name } => SyncError::CalendarNotFound { name },
            APIError::Gateway(inner) if inner.is_credential() => SyncError::Credential(inner),
            err => SyncError::CalendarLookup {
                name: params.calendar_name.clone(),
                source: err,
            },
        })?;

    let result = sync_events(calendar, &target, &matching, params.policy).await?;

    Ok(RunReport {
        band: params.band.clone(),
        town: params.town.clone(),
        calendar_name: params.calendar_name.clone(),
        total_found,
        matching: matching.len(),
        events_added: result.events_added,
        failures: result.failures,
    })
}

/// Creates one calendar entry per event, in order. A credential rejection
/// aborts outright; any other per-event failure is recorded and the policy
/// decides whether the rest of the batch is attempted.
pub async fn sync_events<C>(
    calendar: &C,
    target: &CalendarTarget,
    events: &[Event],
    policy: FailurePolicy,
) -> Result<SyncResult, SyncError>
where
    C: CalendarService + Sync,
{
    let mut result = SyncResult::default();

    for event in events {
        let entry = match CalendarEntry::from_event(event) {
            Ok(entry) => entry,
            Err(err) => {
                error!(
                    "Cannot format the {} show for the calendar: {}",
                    event.venue, err
                );
                result.failures.push(EventFailure {
                    venue: event.venue.clone(),
                    date: event.starts_at.clone(),
                    reason: err.to_string(),
                });
                match policy {
                    FailurePolicy::FailFast => break,
                    FailurePolicy::BestEffort => continue,
                }
            }
        };

        match calendar.create_event(target, &entry).await {
            Ok(()) => result.events_added += 1,
            Err(APIError::Gateway(inner)) if inner.is_credential() => {
                return Err(SyncError::Credential(inner));
            }
            Err(err) => {
                error!(
                    "Failed to add the {} show on {} to '{}': {}",
                    event.venue, entry.date, target.name, err
                );
                result.failures.push(EventFailure {
                    venue: event.venue.clone(),
                    date: entry.date.clone(),
                    reason: err.to_string(),
                });
                if policy == FailurePolicy::FailFast {
                    break;
                }
            }
        }
    }

    Ok(result)
}
