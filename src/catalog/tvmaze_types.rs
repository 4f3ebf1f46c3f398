/// TVMaze API response types for deserialization.
///
/// These structures mirror the JSON response format from the TVMaze API.
/// Only the fields this crate consumes are declared.
use serde::Deserialize;

/// One element of the `/search/shows` response.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeSearchResult {
    /// The matching show
    pub show: TvMazeShow,
}

/// A show object as embedded in search results.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeShow {
    pub id: u64,
    pub name: String,
    /// Summary in HTML format (may be null)
    pub summary: Option<String>,
    /// Image set (null when the show has no artwork)
    pub image: Option<TvMazeImage>,
}

/// Image URLs of a show.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeImage {
    pub medium: Option<String>,
}

/// A single episode from the `/shows/{id}/episodes` response.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeEpisode {
    pub id: u64,
    /// Episode title (may be null for episodes without a title)
    pub name: Option<String>,
    pub season: u32,
    /// Episode number within the season
    pub number: u32,
}
