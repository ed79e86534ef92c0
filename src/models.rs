use serde::{Deserialize, Serialize};

use crate::game::CatalogRow;

/// Response of the client-credentials token exchange
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: Option<u64>,
}

/// One page of `GET /playlists/{id}/tracks`
#[derive(Debug, Deserialize)]
pub struct PlaylistItemsPage {
    pub items: Vec<PlaylistItem>,
    /// URL of the next page, if any
    pub next: Option<String>,
    pub total: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItem {
    /// Null for tracks that were removed or are unavailable
    pub track: Option<Track>,
}

/// A playlist entry. Podcast episodes share this shape but lack artists and
/// album, so every field is lenient.
#[derive(Debug, Default, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    pub album: Option<Album>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Album {
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// Body of `PUT /me/player/play`
#[derive(Debug, Serialize)]
pub struct StartPlaybackRequest {
    pub uris: Vec<String>,
}

impl Track {
    /// Joined artist names, e.g. "Queen, David Bowie"
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|artist| artist.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Convert to a catalog row, or `None` when the entry cannot be played
    /// as a game tile
    pub fn to_row(&self) -> Option<CatalogRow> {
        if self.name.is_empty() || self.artists.is_empty() {
            return None;
        }
        let release = self.album.as_ref()?.release_date.clone()?;
        let url = self.external_urls.spotify.clone()?;

        Some(CatalogRow {
            song_name: self.name.clone(),
            artists: self.artist_names(),
            release,
            url,
        })
    }
}
