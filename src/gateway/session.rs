use crate::config::model::GatewayConfig;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error};

pub const DEFAULT_GATEWAY_URL: &str = "https://live.choreos.io/api-2.0/choreos";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote operations exposed by the aggregation gateway, keyed by their
/// library path.
#[derive(strum::IntoStaticStr, Debug, Clone, Copy)]
pub enum Operation {
    #[strum(serialize = "LastFm/Artist/GetEvents")]
    GetEventsForArtist,
    #[strum(serialize = "Google/Calendar/SearchCalendarsByName")]
    SearchCalendarsByName,
    #[strum(serialize = "Google/Calendar/CreateEvent")]
    CreateCalendarEvent,
}

/// Authenticated session against the gateway. Cheap to clone; read-only
/// after creation and reused by every remote call of a run.
#[derive(Debug, Clone)]
pub struct GatewaySession {
    client: Client,
    base_url: String,
    account: String,
    app_key_name: String,
    app_key_value: String,
}

impl GatewaySession {
    pub fn connect(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            account: config.account.clone(),
            app_key_name: config.app_key_name.clone(),
            app_key_value: config.app_key_value.clone(),
        })
    }

    /// Executes one gateway operation: the input set goes out as JSON, the
    /// response body comes back parsed into the operation's output type.
    #[tracing::instrument(skip_all, fields(operation = ?operation))]
    pub async fn execute<I, O>(&self, operation: Operation, inputs: &I) -> Result<O, GatewayError>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let path: &'static str = operation.into();
        let url = format!("{}/{}", self.base_url, path);

        debug!("Executing gateway operation at {}", url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account, Some(&self.app_key_value))
            .header("X-App-Key-Name", &self.app_key_name)
            .json(inputs)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, message));
        }

        let body = response.text().await?;

        serde_json::from_str::<O>(&body).map_err(|err| {
            error!("Gateway response for {} did not parse: {}", path, err);
            GatewayError::InvalidResponse(err)
        })
    }
}

fn classify_failure(status: StatusCode, message: String) -> GatewayError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        GatewayError::Credential { message }
    } else {
        GatewayError::Service {
            status: status.as_u16(),
            message,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("the gateway rejected the configured credentials: {message}")]
    Credential { message: String },
    #[error("gateway call failed with status {status}: {message}")]
    Service { status: u16, message: String },
    #[error("gateway request failed")]
    Transport(#[from] reqwest::Error),
    #[error("gateway returned an undecodable response")]
    InvalidResponse(#[from] serde_json::Error),
}

impl GatewayError {
    pub fn is_credential(&self) -> bool {
        matches!(self, GatewayError::Credential { .. })
    }
}
