//! Markup generation for the page
//!
//! Everything that comes from the catalog is escaped before it is put into
//! markup. Show summaries arrive as HTML; they are reduced to plain text
//! first and then escaped, so a summary can never inject markup into the
//! page.

use crate::catalog::Episode;
use crate::page::{Page, ShowCard};
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Returns the display label of an episode, e.g. `Pilot (season 1, number 1)`
pub fn episode_label(episode: &Episode) -> String {
    format!(
        "{} (season {}, number {})",
        episode.name, episode.season, episode.number
    )
}

/// Converts a summary delivered as HTML into plain text
pub fn summary_text(summary: &str) -> String {
    nanohtml2text::html2text(summary).trim().to_string()
}

/// Renders the markup of a single show card
///
/// The card shows the image (with the show name as `alt` text), the name, the
/// summary and an "Episodes" button carrying the card handle.
pub fn render_show_card(card: &ShowCard) -> String {
    let show = &card.show;
    format!(
        r#"<div class="show-card" data-show-id="{id}">
  <img src="{image}" alt="{alt}" class="show-image">
  <div class="show-body">
    <h5 class="show-name">{name}</h5>
    <div><small>{summary}</small></div>
    <button type="button" class="show-episodes" data-card="{handle}">Episodes</button>
  </div>
</div>"#,
        id = show.id,
        image = encode_double_quoted_attribute(&show.image),
        alt = encode_double_quoted_attribute(&show.name),
        name = encode_text(&show.name),
        summary = encode_text(&summary_text(&show.summary)),
        handle = card.handle.value(),
    )
}

/// Renders the list item of a single episode
pub fn render_episode_item(episode: &Episode) -> String {
    format!("<li>{}</li>", encode_text(&episode_label(episode)))
}

/// Renders the complete HTML document of a page
pub fn render_page(page: &Page) -> String {
    let mut html = String::new();
    let term = page.search_input.as_deref().unwrap_or_default();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>TV Show Finder</title>\n");
    html.push_str("</head>\n<body>\n");

    if let Some(error) = &page.error {
        html.push_str(&format!(
            "<div class=\"error\" role=\"alert\">{}</div>\n",
            encode_text(error)
        ));
    }

    html.push_str("<form id=\"search-form\" method=\"get\">\n");
    html.push_str(&format!(
        "  <input id=\"search-term\" name=\"q\" value=\"{}\">\n",
        encode_double_quoted_attribute(term)
    ));
    html.push_str("  <button type=\"submit\">Go!</button>\n</form>\n");

    html.push_str("<section id=\"shows-list\">\n");
    for card in page.shows.cards() {
        html.push_str(&render_show_card(card));
        html.push('\n');
    }
    html.push_str("</section>\n");

    let hidden = if page.episodes.is_visible() { "" } else { " hidden" };
    html.push_str(&format!("<section id=\"episodes-area\"{hidden}>\n"));
    html.push_str("<h2>Episodes</h2>\n<ul id=\"episodes-list\">\n");
    for episode in page.episodes.episodes() {
        html.push_str(&render_episode_item(episode));
        html.push('\n');
    }
    html.push_str("</ul>\n</section>\n</body>\n</html>\n");

    html
}

/// Renders a page as plain text for the terminal
///
/// Cards are numbered from 1 in display order. The episode area only
/// appears when it is visible.
pub fn render_page_text(page: &Page) -> String {
    let mut text = String::new();

    if let Some(error) = &page.error {
        text.push_str(&format!("Error: {}\n\n", error));
    }

    if let Some(term) = &page.search_term {
        text.push_str(&format!("Shows matching '{}':\n", term));
    }

    if page.shows.is_empty() {
        if page.search_term.is_some() {
            text.push_str("  (no shows found)\n");
        }
    } else {
        for (index, card) in page.shows.cards().iter().enumerate() {
            let show = &card.show;
            text.push_str(&format!("[{}] {} (id {})\n", index + 1, show.name, show.id));
            let summary = summary_text(&show.summary);
            if !summary.is_empty() {
                text.push_str(&format!("    {}\n", summary));
            }
            text.push_str(&format!("    Image: {}\n", show.image));
        }
    }

    if page.episodes.is_visible() {
        text.push_str("\nEpisodes:\n");
        for episode in page.episodes.episodes() {
            text.push_str(&format!("  - {}\n", episode_label(episode)));
        }
    }

    text
}
