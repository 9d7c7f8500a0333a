#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyArtist {
    pub name: String,
    pub url: String,
    pub image_url: Option<String>,
}
