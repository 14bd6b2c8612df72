use crate::config::model::{Config, GatewayConfig, GoogleConfig, LastFmConfig};
use crate::gateway::session::DEFAULT_GATEWAY_URL;
use std::env;

pub fn load_config() -> Config {
    let gateway = GatewayConfig {
        url: env::var("GATEWAY_URL").unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string()),
        account: load_string_config("GATEWAY_ACCOUNT"),
        app_key_name: load_string_config("GATEWAY_APP_KEY_NAME"),
        app_key_value: load_string_config("GATEWAY_APP_KEY_VALUE"),
    };

    let lastfm = LastFmConfig {
        api_key: load_string_config("LASTFM_API_KEY"),
    };

    let google = GoogleConfig {
        client_id: load_string_config("GOOGLE_CLIENT_ID"),
        client_secret: load_string_config("GOOGLE_CLIENT_SECRET"),
        access_token: load_string_config("GOOGLE_ACCESS_TOKEN"),
        refresh_token: load_string_config("GOOGLE_REFRESH_TOKEN"),
    };

    Config {
        gateway,
        lastfm,
        google,
        calendar_name: load_string_config("GOOGLE_CALENDAR_NAME"),
    }
}

fn load_string_config(name: &str) -> String {
    let value = env::var(name).unwrap_or_else(|_| panic!("{} must be set.", name));

    if value.is_empty() {
        panic!("{} must not be empty.", name);
    }

    value
}
