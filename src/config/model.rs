/// Full run configuration, loaded once at startup and handed to the
/// pipeline explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub lastfm: LastFmConfig,
    pub google: GoogleConfig,
    pub calendar_name: String,
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub url: String,
    pub account: String,
    pub app_key_name: String,
    pub app_key_value: String,
}

#[derive(Debug, Clone)]
pub struct LastFmConfig {
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub access_token: String,
    pub refresh_token: String,
}
