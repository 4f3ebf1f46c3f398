//! TV Show Finder - search a tv show catalog and browse episode lists
//!
//! This library queries the TVMaze catalog for shows matching a search term,
//! keeps the results on an in-memory page of show cards, and on request
//! fetches and shows the episode list of a single show. The page renders to
//! an HTML document or to plain text.
//!
//! # Examples
//!
//! ```no_run
//! use tv_show_finder::{ShowBrowser, TvMazeCatalog};
//!
//! let browser = ShowBrowser::new(TvMazeCatalog::new()?);
//! browser.submit_search("batman")?;
//!
//! let first_card = browser.page().shows.cards()[0].handle;
//! browser.open_episodes(first_card)?;
//!
//! println!("{}", browser.render_text());
//! # Ok::<(), tv_show_finder::ShowFinderError>(())
//! ```

mod browser;
mod catalog;
mod config;
mod page;
mod render;

use std::io;
use thiserror::Error;

pub use browser::{EpisodesTicket, RenderOutcome, SearchTicket, ShowBrowser};
pub use catalog::{
    CatalogError, Episode, Show, ShowCatalog, TvMazeCatalog, parse_episodes_response,
    parse_search_response,
};
pub use config::{BrowserConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, PLACEHOLDER_IMAGE};
pub use page::{CardHandle, EpisodesArea, Page, ShowCard, ShowsList};
pub use render::{
    episode_label, render_episode_item, render_page, render_page_text, render_show_card,
    summary_text,
};

/// Top-level error type for show finder operations
#[derive(Debug, Error)]
pub enum ShowFinderError {
    /// Error while querying the catalog
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The card is not (or no longer) on the page
    #[error("No show card {0} on the page")]
    UnknownCard(CardHandle),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
