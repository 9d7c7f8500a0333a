use super::model::SpotifyArtist;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub artists: Option<ArtistPageResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ArtistPageResponse {
    #[serde(default)]
    pub items: Vec<ArtistResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ArtistResponse {
    pub name: String,
    pub external_urls: ExternalUrlsResponse,
    #[serde(default)]
    pub images: Vec<ImageResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ExternalUrlsResponse {
    pub spotify: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImageResponse {
    pub url: String,
}

impl SearchResponse {
    /// The first artist found, if it can be played on Spotify
    pub fn to_model(self) -> Option<SpotifyArtist> {
        let artist = self.artists?.items.into_iter().next()?;

        Some(SpotifyArtist {
            name: artist.name,
            url: artist.external_urls.spotify?,
            image_url: artist.images.into_iter().next().map(|image| image.url),
        })
    }
}
