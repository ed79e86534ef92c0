use crate::config::Config;
use crate::game::CatalogRow;
use crate::models::{PlaylistItemsPage, StartPlaybackRequest, TokenResponse};
use crate::playback::Playback;
use anyhow::{Result, anyhow};
use tracing::{debug, warn};
use ureq::Agent;
use urlencoding::encode;

/// Spotify items per page; the API maximum for playlist tracks
const PAGE_SIZE: u32 = 100;

/// Extract the Spotify id from a share link, URI or bare id.
///
/// `https://open.spotify.com/playlist/321iL49aeqqqtKfrQLO91I?si=aeeb` and
/// `spotify:playlist:321iL49aeqqqtKfrQLO91I` both give `321iL49aeqqqtKfrQLO91I`.
pub fn spotify_id(link: &str) -> &str {
    let last = link.trim().rsplit(['/', ':']).next().unwrap_or(link);
    last.split('?').next().unwrap_or(last)
}

/// A small blocking Spotify Web API client for playlist reads and playback
pub struct SpotifyClient {
    agent: Agent,
    config: Config,
}

impl SpotifyClient {
    pub fn new(config: Config) -> Self {
        SpotifyClient {
            agent: Agent::new(),
            config,
        }
    }

    /// Exchange the client id and secret for an app access token
    fn request_app_token(&self) -> Result<String> {
        let (client_id, client_secret) = self.config.client_credentials()?;
        let url = format!("{}/api/token", self.config.accounts_url);

        let response = self
            .agent
            .post(&url)
            .send_form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id),
                ("client_secret", client_secret),
            ])
            .map_err(|e| anyhow!("Token request failed: {}", e))?;

        let token: TokenResponse = serde_json::from_str(&response.into_string()?)
            .map_err(|e| anyhow!("Failed to parse token response: {}", e))?;
        debug!(token_type = %token.token_type, expires_in = ?token.expires_in, "Got app token");

        Ok(token.access_token)
    }

    /// Token for reading playlists: the user token when present, otherwise
    /// an app token
    fn read_token(&self) -> Result<String> {
        match &self.config.access_token {
            Some(token) => Ok(token.clone()),
            None => self.request_app_token(),
        }
    }

    /// Fetch every track of a playlist, following pagination
    pub fn fetch_playlist_rows(&self, playlist: &str) -> Result<Vec<CatalogRow>> {
        let token = self.read_token()?;
        let playlist_id = spotify_id(playlist);
        let mut next_url = Some(format!(
            "{}/playlists/{}/tracks?limit={}",
            self.config.api_url,
            encode(playlist_id),
            PAGE_SIZE
        ));

        let mut rows = Vec::new();
        let mut skipped = 0;
        let mut pages = 0;

        while let Some(url) = next_url.take() {
            pages += 1;
            debug!(page = pages, %url, "Fetching playlist page");

            let response = self
                .agent
                .get(&url)
                .set("Authorization", &format!("Bearer {token}"))
                .call()
                .map_err(|e| anyhow!("HTTP request failed: {}", e))?;

            let page: PlaylistItemsPage = serde_json::from_str(&response.into_string()?)
                .map_err(|e| anyhow!("Failed to parse JSON response: {}", e))?;

            for item in &page.items {
                match item.track.as_ref().and_then(|track| track.to_row()) {
                    Some(row) => rows.push(row),
                    None => {
                        skipped += 1;
                        warn!(?item, "Skipping playlist entry that is not a playable track");
                    }
                }
            }

            next_url = page.next;
        }

        println!(
            "Fetched {} tracks from playlist {} ({} pages, {} skipped)",
            rows.len(),
            playlist_id,
            pages,
            skipped
        );
        Ok(rows)
    }

    /// Start a track on the user's active Spotify device
    pub fn start_playback(&self, track_url: &str) -> Result<()> {
        let token = self.config.access_token.as_deref().ok_or_else(|| {
            anyhow!("SPOTIFY_ACCESS_TOKEN must be set to control playback")
        })?;
        let body = StartPlaybackRequest {
            uris: vec![format!("spotify:track:{}", spotify_id(track_url))],
        };

        self.agent
            .put(&format!("{}/me/player/play", self.config.api_url))
            .set("Authorization", &format!("Bearer {token}"))
            .send_json(&body)
            .map_err(|e| anyhow!("Playback request failed: {}", e))?;

        debug!(uri = %body.uris[0], "Playback started");
        Ok(())
    }
}

impl Playback for SpotifyClient {
    fn play(&self, url: &str) -> Result<()> {
        self.start_playback(url)
    }
}
