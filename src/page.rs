//! Page model
//!
//! The page is made of two render targets: the list of show cards and the
//! episode area. Both are always replaced as a whole, never merged. Each card
//! gets a `CardHandle` when it is inserted, and the show list keeps the
//! mapping from handle to show id so an "Episodes" action on a card can be
//! tied back to its show.

use crate::catalog::{Episode, Show};
use std::collections::HashMap;
use std::fmt;

/// Opaque handle of a rendered show card
///
/// Handles are never reused within a page, so a handle from an earlier
/// search stops resolving once its card has been replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardHandle(u64);

impl CardHandle {
    /// Returns the raw handle value
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CardHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card-{}", self.0)
    }
}

/// A show card as currently rendered in the show list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowCard {
    /// Handle identifying this card
    pub handle: CardHandle,
    /// The show displayed by this card
    pub show: Show,
}

/// The container of rendered show cards
#[derive(Debug, Clone, Default)]
pub struct ShowsList {
    cards: Vec<ShowCard>,
    show_ids: HashMap<CardHandle, u64>,
    next_handle: u64,
}

impl ShowsList {
    /// Replaces every card with one card per show, in the given order
    pub fn replace(&mut self, shows: Vec<Show>) {
        self.cards.clear();
        self.show_ids.clear();

        for show in shows {
            let handle = CardHandle(self.next_handle);
            self.next_handle += 1;
            self.show_ids.insert(handle, show.id);
            self.cards.push(ShowCard { handle, show });
        }
    }

    /// Returns the show id of the card with the given handle
    pub fn show_id(&self, handle: CardHandle) -> Option<u64> {
        self.show_ids.get(&handle).copied()
    }

    /// Returns the rendered cards in display order
    pub fn cards(&self) -> &[ShowCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// The episode area, hidden until a show's episodes are requested
#[derive(Debug, Clone, Default)]
pub struct EpisodesArea {
    visible: bool,
    episodes: Vec<Episode>,
}

impl EpisodesArea {
    /// Hides the area; its items stay until they are replaced
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Replaces all items with one item per episode and reveals the area
    pub fn show_episodes(&mut self, episodes: Vec<Episode>) {
        self.episodes = episodes;
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the episode items in display order
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }
}

/// The whole page: search input, show list, episode area and error banner
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// The term typed into the search form, rendered or not
    pub search_input: Option<String>,
    /// The term whose results the show list currently holds
    pub search_term: Option<String>,
    pub shows: ShowsList,
    pub episodes: EpisodesArea,
    /// Message of the most recent failed action, shown as a banner
    pub error: Option<String>,
}
