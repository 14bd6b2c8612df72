use super::dto::{
    CreateEventInputs, CreateEventResponse, SearchCalendarsInputs, SearchCalendarsResponse,
};
use super::model::{CalendarEntry, CalendarTarget};
use crate::api::CalendarService;
use crate::config::model::GoogleConfig;
use crate::gateway::session::{GatewayError, GatewaySession, Operation};
use async_trait::async_trait;
use tracing::info;

pub struct GoogleCalendarAPI {
    session: GatewaySession,
    credentials: GoogleConfig,
}

impl GoogleCalendarAPI {
    pub fn new(session: GatewaySession, config: &GoogleConfig) -> Self {
        Self {
            session,
            credentials: config.clone(),
        }
    }

    /// One remote name-to-id lookup. An answer without an id is the
    /// distinct not-found failure; nothing may be created against an
    /// unresolved calendar.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_calendar(&self, name: &str) -> Result<CalendarTarget, APIError> {
        let inputs = SearchCalendarsInputs::new(&self.credentials, name);
        let response: SearchCalendarsResponse = self
            .session
            .execute(Operation::SearchCalendarsByName, &inputs)
            .await?;

        match response.calendar_id.filter(|id| !id.is_empty()) {
            Some(id) => {
                info!("Successfully located calendar '{}'", name);
                Ok(CalendarTarget {
                    name: name.to_string(),
                    id,
                })
            }
            None => Err(APIError::CalendarNotFound {
                name: name.to_string(),
            }),
        }
    }

    #[tracing::instrument(skip(self, entry), fields(venue = %entry.location, date = %entry.date))]
    pub async fn create_event(
        &self,
        target: &CalendarTarget,
        entry: &CalendarEntry,
    ) -> Result<(), APIError> {
        let inputs = CreateEventInputs::new(&self.credentials, &target.id, entry);
        let _ack: CreateEventResponse = self
            .session
            .execute(Operation::CreateCalendarEvent, &inputs)
            .await?;

        info!("Successfully added the {} date to '{}'", entry.location, target.name);

        Ok(())
    }
}

#[async_trait]
impl CalendarService for GoogleCalendarAPI {
    async fn resolve_calendar(&self, name: &str) -> Result<CalendarTarget, APIError> {
        GoogleCalendarAPI::resolve_calendar(self, name).await
    }

    async fn create_event(
        &self,
        target: &CalendarTarget,
        entry: &CalendarEntry,
    ) -> Result<(), APIError> {
        GoogleCalendarAPI::create_event(self, target, entry).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("no calendar named '{name}' exists")]
    CalendarNotFound { name: String },
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl APIError {
    pub fn is_credential(&self) -> bool {
        matches!(self, APIError::Gateway(err) if err.is_credential())
    }
}
