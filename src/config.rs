use anyhow::{Result, anyhow};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";

/// Spotify settings loaded from environment variables.
///
/// Credentials are optional here: a game played from a cached catalog with
/// `--no-playback` never talks to Spotify.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub access_token: Option<String>,
    pub api_url: String,
    pub accounts_url: String,
}

impl Config {
    /// Build the configuration from a variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_url = non_empty("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let accounts_url =
            non_empty("SPOTIFY_ACCOUNTS_URL").unwrap_or_else(|| DEFAULT_ACCOUNTS_URL.to_string());

        for (key, url) in [("SPOTIFY_API_URL", &api_url), ("SPOTIFY_ACCOUNTS_URL", &accounts_url)] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(anyhow!("{key} must be an http(s) URL, got '{url}'"));
            }
        }

        Ok(Config {
            client_id: non_empty("SPOTIFY_ID"),
            client_secret: non_empty("SPOTIFY_SECRET"),
            access_token: non_empty("SPOTIFY_ACCESS_TOKEN"),
            api_url: api_url.trim_end_matches('/').to_string(),
            accounts_url: accounts_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client id and secret for the client-credentials token exchange
    pub fn client_credentials(&self) -> Result<(&str, &str)> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Ok((id.as_str(), secret.as_str())),
            _ => Err(anyhow!(
                "SPOTIFY_ID and SPOTIFY_SECRET must be set to download a playlist"
            )),
        }
    }
}

/// Load configuration from `.env` and environment
pub fn load_config() -> Result<Config> {
    // Load `.env` file if present
    dotenv::dotenv().ok();
    Config::from_lookup(|key| std::env::var(key).ok())
}
