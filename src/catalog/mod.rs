/// Data structures and traits for querying a tv show catalog.
///
/// This module provides the records produced by a catalog lookup (shows and
/// their episodes), the error type shared by all catalog operations, and the
/// trait through which the rest of the crate talks to a catalog.
mod tvmaze;
mod tvmaze_types;

pub use tvmaze::{TvMazeCatalog, parse_episodes_response, parse_search_response};

use thiserror::Error;

/// Errors that can occur while querying a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request could not be completed or the server rejected it
    #[error("Request failed: {0}")]
    RequestError(String),

    /// The response body was not valid JSON or lacked expected fields
    #[error("Failed to parse API response: {0}")]
    ParseError(String),
}

/// A tv show as returned by a catalog search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    /// Identifier assigned by the remote catalog
    pub id: u64,
    /// The name of the show
    pub name: String,
    /// Summary as delivered by the catalog (may contain markup)
    pub summary: String,
    /// Image URL, or the placeholder URL if the catalog has none
    pub image: String,
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    /// Identifier assigned by the remote catalog
    pub id: u64,
    /// The episode title
    pub name: String,
    /// The season this episode belongs to
    pub season: u32,
    /// The episode number within the season
    pub number: u32,
}

/// Trait for catalogs that can look up shows and their episodes.
///
/// Both lookups return records in the order the catalog delivers them.
/// Implementations never sort or filter.
pub trait ShowCatalog {
    /// Searches the catalog for shows matching a free-text term.
    ///
    /// The term is passed through unchanged, including the empty string.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::RequestError` if the request fails and
    /// `CatalogError::ParseError` if the response cannot be understood.
    fn search_shows(&self, term: &str) -> Result<Vec<Show>, CatalogError>;

    /// Fetches the episode list of the show with the given identifier.
    ///
    /// # Errors
    ///
    /// Same as [`ShowCatalog::search_shows`].
    fn episodes_of_show(&self, show_id: u64) -> Result<Vec<Episode>, CatalogError>;
}
