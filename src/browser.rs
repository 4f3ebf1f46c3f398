//! Show browser view-controller
//!
//! `ShowBrowser` owns the page for the length of a session and runs the two
//! pipelines against it:
//!
//! - search: hide the episode area, fetch matching shows, replace the cards
//! - episodes: resolve a card to its show, fetch the episodes, replace and
//!   reveal the episode area
//!
//! Each pipeline carries a request token that increases with every request.
//! A response is only rendered if its token is still the latest one issued
//! for that pipeline; anything older is discarded. Starting a search also
//! retires any pending episode request, since its card is about to go away.

use crate::catalog::{CatalogError, Episode, Show, ShowCatalog};
use crate::page::{CardHandle, Page};
use crate::render::{render_page, render_page_text};
use crate::ShowFinderError;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Result of completing a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The response was rendered with the given number of entries
    Rendered { count: usize },
    /// A newer request was issued meanwhile; the response was discarded
    Stale,
}

/// A search request that has been issued but not yet completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    token: u64,
    term: String,
}

impl SearchTicket {
    /// The term to search for
    pub fn term(&self) -> &str {
        &self.term
    }
}

/// An episode request that has been issued but not yet completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodesTicket {
    token: u64,
    show_id: u64,
}

impl EpisodesTicket {
    /// The show whose episodes are requested
    pub fn show_id(&self) -> u64 {
        self.show_id
    }
}

struct BrowserState {
    page: Page,
    latest_search: u64,
    latest_episodes: u64,
}

/// View-controller tying a catalog to a page
///
/// All methods take `&self`; the browser can be shared between threads when
/// the catalog can, and concurrent requests race only on which response is
/// the latest.
pub struct ShowBrowser<C> {
    catalog: C,
    state: Mutex<BrowserState>,
}

impl<C> ShowBrowser<C>
where
    C: ShowCatalog,
{
    /// Creates a browser with an empty page and a hidden episode area
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            state: Mutex::new(BrowserState {
                page: Page::default(),
                latest_search: 0,
                latest_episodes: 0,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, BrowserState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handles a search form submission
    ///
    /// The episode area is hidden before the catalog is queried; the cards
    /// are replaced only after the response arrives.
    ///
    /// # Errors
    ///
    /// Returns the catalog error if the lookup fails. The page then keeps
    /// its previous cards and shows the error banner.
    pub fn submit_search(&self, term: &str) -> Result<RenderOutcome, ShowFinderError> {
        let ticket = self.begin_search(term);
        let result = self.catalog.search_shows(ticket.term());
        self.complete_search(ticket, result)
    }

    /// Handles a click on the "Episodes" button of a card
    ///
    /// # Errors
    ///
    /// Returns `ShowFinderError::UnknownCard` if the card is no longer on the
    /// page, or the catalog error if the lookup fails.
    pub fn open_episodes(&self, card: CardHandle) -> Result<RenderOutcome, ShowFinderError> {
        let ticket = self.begin_episodes(card)?;
        let result = self.catalog.episodes_of_show(ticket.show_id());
        self.complete_episodes(ticket, result)
    }

    /// Shows the episodes of a show given by id rather than by card
    ///
    /// # Errors
    ///
    /// Returns the catalog error if the lookup fails.
    pub fn open_episodes_of_show(&self, show_id: u64) -> Result<RenderOutcome, ShowFinderError> {
        let ticket = self.begin_episodes_of_show(show_id);
        let result = self.catalog.episodes_of_show(ticket.show_id());
        self.complete_episodes(ticket, result)
    }

    /// Issues a search request: hides the episode area and returns the ticket
    pub fn begin_search(&self, term: &str) -> SearchTicket {
        let mut state = self.state();
        state.latest_search += 1;
        state.latest_episodes += 1;
        state.page.episodes.hide();
        state.page.search_input = Some(term.to_string());

        debug!(token = state.latest_search, term, "search issued");
        SearchTicket {
            token: state.latest_search,
            term: term.to_string(),
        }
    }

    /// Completes a search request with the catalog's response
    ///
    /// # Errors
    ///
    /// Returns the catalog error of a current request. Errors of stale
    /// requests are discarded along with the request.
    pub fn complete_search(
        &self,
        ticket: SearchTicket,
        result: Result<Vec<Show>, CatalogError>,
    ) -> Result<RenderOutcome, ShowFinderError> {
        let mut state = self.state();
        if ticket.token != state.latest_search {
            debug!(
                token = ticket.token,
                latest = state.latest_search,
                "discarding stale search response"
            );
            return Ok(RenderOutcome::Stale);
        }

        match result {
            Ok(shows) => {
                let count = shows.len();
                state.page.shows.replace(shows);
                state.page.error = None;
                info!(term = %ticket.term, count, "rendered shows");
                state.page.search_term = Some(ticket.term);
                Ok(RenderOutcome::Rendered { count })
            }
            Err(e) => {
                warn!(term = %ticket.term, error = %e, "show search failed");
                state.page.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Issues an episode request for the show behind a card
    ///
    /// # Errors
    ///
    /// Returns `ShowFinderError::UnknownCard` if the card is not on the page.
    pub fn begin_episodes(&self, card: CardHandle) -> Result<EpisodesTicket, ShowFinderError> {
        let mut state = self.state();
        let show_id = state
            .page
            .shows
            .show_id(card)
            .ok_or(ShowFinderError::UnknownCard(card))?;

        Ok(Self::issue_episodes(&mut state, show_id))
    }

    /// Issues an episode request for a show given by id
    pub fn begin_episodes_of_show(&self, show_id: u64) -> EpisodesTicket {
        Self::issue_episodes(&mut self.state(), show_id)
    }

    fn issue_episodes(state: &mut BrowserState, show_id: u64) -> EpisodesTicket {
        state.latest_episodes += 1;
        debug!(token = state.latest_episodes, show_id, "episodes issued");
        EpisodesTicket {
            token: state.latest_episodes,
            show_id,
        }
    }

    /// Completes an episode request with the catalog's response
    ///
    /// # Errors
    ///
    /// Returns the catalog error of a current request. Errors of stale
    /// requests are discarded along with the request.
    pub fn complete_episodes(
        &self,
        ticket: EpisodesTicket,
        result: Result<Vec<Episode>, CatalogError>,
    ) -> Result<RenderOutcome, ShowFinderError> {
        let mut state = self.state();
        if ticket.token != state.latest_episodes {
            debug!(
                token = ticket.token,
                latest = state.latest_episodes,
                "discarding stale episodes response"
            );
            return Ok(RenderOutcome::Stale);
        }

        match result {
            Ok(episodes) => {
                let count = episodes.len();
                state.page.episodes.show_episodes(episodes);
                state.page.error = None;
                info!(show_id = ticket.show_id, count, "rendered episodes");
                Ok(RenderOutcome::Rendered { count })
            }
            Err(e) => {
                warn!(show_id = ticket.show_id, error = %e, "episode lookup failed");
                state.page.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Returns a snapshot of the page
    pub fn page(&self) -> Page {
        self.state().page.clone()
    }

    /// Renders the page as an HTML document
    pub fn render_html(&self) -> String {
        render_page(&self.state().page)
    }

    /// Renders the page as plain text
    pub fn render_text(&self) -> String {
        render_page_text(&self.state().page)
    }

    /// Writes the HTML document of the page to a file
    ///
    /// # Errors
    ///
    /// Returns `ShowFinderError::Io` if the file cannot be written.
    pub fn write_html(&self, path: &Path) -> Result<(), ShowFinderError> {
        fs::write(path, self.render_html())?;
        debug!(path = %path.display(), "page written");
        Ok(())
    }
}
