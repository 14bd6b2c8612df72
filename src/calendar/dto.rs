use super::model::CalendarEntry;
use crate::config::model::GoogleConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input set for the search-calendar-by-name operation.
#[derive(Debug, Serialize)]
pub struct SearchCalendarsInputs<'a> {
    #[serde(rename = "ClientID")]
    pub client_id: &'a str,
    #[serde(rename = "ClientSecret")]
    pub client_secret: &'a str,
    #[serde(rename = "AccessToken")]
    pub access_token: &'a str,
    #[serde(rename = "RefreshToken")]
    pub refresh_token: &'a str,
    #[serde(rename = "CalendarName")]
    pub calendar_name: &'a str,
}

impl<'a> SearchCalendarsInputs<'a> {
    pub fn new(credentials: &'a GoogleConfig, calendar_name: &'a str) -> Self {
        Self {
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
            access_token: &credentials.access_token,
            refresh_token: &credentials.refresh_token,
            calendar_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchCalendarsResponse {
    #[serde(rename = "CalendarId", default)]
    pub calendar_id: Option<String>,
}

/// Input set for the create-calendar-event operation. Start and end carry
/// the same date/time pair.
#[derive(Debug, Serialize)]
pub struct CreateEventInputs<'a> {
    #[serde(rename = "ClientID")]
    pub client_id: &'a str,
    #[serde(rename = "ClientSecret")]
    pub client_secret: &'a str,
    #[serde(rename = "RefreshToken")]
    pub refresh_token: &'a str,
    #[serde(rename = "CalendarID")]
    pub calendar_id: &'a str,
    #[serde(rename = "EventTitle")]
    pub title: &'a str,
    #[serde(rename = "EventLocation")]
    pub location: &'a str,
    #[serde(rename = "EventDescription")]
    pub description: &'a str,
    #[serde(rename = "StartDate")]
    pub start_date: &'a str,
    #[serde(rename = "StartTime")]
    pub start_time: &'a str,
    #[serde(rename = "EndDate")]
    pub end_date: &'a str,
    #[serde(rename = "EndTime")]
    pub end_time: &'a str,
}

impl<'a> CreateEventInputs<'a> {
    pub fn new(credentials: &'a GoogleConfig, calendar_id: &'a str, entry: &'a CalendarEntry) -> Self {
        Self {
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
            refresh_token: &credentials.refresh_token,
            calendar_id,
            title: &entry.title,
            location: &entry.location,
            description: &entry.description,
            start_date: &entry.date,
            start_time: &entry.time,
            end_date: &entry.date,
            end_time: &entry.time,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateEventResponse {
    #[serde(rename = "Response", default)]
    pub response: Value,
}
