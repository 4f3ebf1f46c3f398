/// TVMaze catalog implementation.
use super::tvmaze_types::{TvMazeEpisode, TvMazeSearchResult, TvMazeShow};
use super::{CatalogError, Episode, Show, ShowCatalog};
use crate::config::BrowserConfig;
use reqwest::blocking::{Client, RequestBuilder};
use tracing::debug;

/// Catalog backed by the TVMaze API.
///
/// This catalog queries https://api.tvmaze.com (or the configured base URL)
/// using the show search and the per-show episode list endpoints.
pub struct TvMazeCatalog {
    client: Client,
    base_url: String,
    placeholder_image: String,
}

impl TvMazeCatalog {
    /// Creates a TVMaze catalog with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::RequestError` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, CatalogError> {
        Self::from_config(&BrowserConfig::default())
    }

    /// Creates a TVMaze catalog from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::RequestError` if the HTTP client cannot be built.
    pub fn from_config(config: &BrowserConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::RequestError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            placeholder_image: config.placeholder_image.clone(),
        })
    }

    /// Sends a prepared request and returns the body of a successful response.
    fn fetch_body(request: RequestBuilder) -> Result<String, CatalogError> {
        let response = request
            .send()
            .map_err(|e| CatalogError::RequestError(e.to_string()))?;

        // Ensure request was successful
        if !response.status().is_success() {
            return Err(CatalogError::RequestError(format!(
                "HTTP {} {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .text()
            .map_err(|e| CatalogError::RequestError(e.to_string()))
    }
}

impl ShowCatalog for TvMazeCatalog {
    fn search_shows(&self, term: &str) -> Result<Vec<Show>, CatalogError> {
        let url = format!("{}/search/shows", self.base_url);
        debug!(%url, term, "searching shows");

        let body = Self::fetch_body(self.client.get(&url).query(&[("q", term)]))?;
        let shows = parse_search_response(&body, &self.placeholder_image)?;

        debug!(count = shows.len(), "search returned shows");
        Ok(shows)
    }

    fn episodes_of_show(&self, show_id: u64) -> Result<Vec<Episode>, CatalogError> {
        let url = format!("{}/shows/{}/episodes", self.base_url, show_id);
        debug!(%url, show_id, "fetching episodes");

        let body = Self::fetch_body(self.client.get(&url))?;
        let episodes = parse_episodes_response(&body)?;

        debug!(count = episodes.len(), "episode list fetched");
        Ok(episodes)
    }
}

/// Parses the body of a `/search/shows` response into shows.
///
/// Shows keep the order of the response. A show without an image (or with
/// an image object lacking a `medium` URL) gets `placeholder_image`, and a
/// null summary becomes the empty string.
///
/// # Errors
///
/// Returns `CatalogError::ParseError` if the body is not a JSON array of
/// search results.
pub fn parse_search_response(
    body: &str,
    placeholder_image: &str,
) -> Result<Vec<Show>, CatalogError> {
    let results: Vec<TvMazeSearchResult> =
        serde_json::from_str(body).map_err(|e| CatalogError::ParseError(e.to_string()))?;

    Ok(results
        .into_iter()
        .map(|result| convert_show(result.show, placeholder_image))
        .collect())
}

/// Parses the body of a `/shows/{id}/episodes` response into episodes.
///
/// # Errors
///
/// Returns `CatalogError::ParseError` if the body is not a JSON array of
/// episodes.
pub fn parse_episodes_response(body: &str) -> Result<Vec<Episode>, CatalogError> {
    let episodes: Vec<TvMazeEpisode> =
        serde_json::from_str(body).map_err(|e| CatalogError::ParseError(e.to_string()))?;

    Ok(episodes.into_iter().map(convert_episode).collect())
}

/// Converts a TVMaze show to our Show record.
fn convert_show(tvmaze_show: TvMazeShow, placeholder_image: &str) -> Show {
    Show {
        id: tvmaze_show.id,
        name: tvmaze_show.name,
        summary: tvmaze_show.summary.unwrap_or_default(),
        image: tvmaze_show
            .image
            .and_then(|image| image.medium)
            .unwrap_or_else(|| placeholder_image.to_string()),
    }
}

/// Converts a TVMaze episode to our Episode record.
fn convert_episode(tvmaze_episode: TvMazeEpisode) -> Episode {
    Episode {
        id: tvmaze_episode.id,
        name: tvmaze_episode.name.unwrap_or_else(|| "Unknown".to_string()),
        season: tvmaze_episode.season,
        number: tvmaze_episode.number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PLACEHOLDER_IMAGE;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BATMAN_SEARCH: &str = r#"[
        {"score": 0.9, "show": {"id": 1, "name": "Batman", "summary": "<p>Dark</p>",
            "image": null}},
        {"score": 0.8, "show": {"id": 2, "name": "Batwoman", "summary": "<p>Hero</p>",
            "image": {"medium": "http://x/img2.jpg", "original": "http://x/img2-full.jpg"}}}
    ]"#;

    const PILOT_EPISODES: &str = r#"[
        {"id": 10, "name": "Pilot", "season": 1, "number": 1, "airdate": "2020-01-01"}
    ]"#;

    // The blocking client must be built and dropped outside the async runtime.
    async fn on_blocking_catalog<T, F>(server: &MockServer, job: F) -> T
    where
        T: Send + 'static,
        F: FnOnce(TvMazeCatalog) -> T + Send + 'static,
    {
        let config = BrowserConfig::default().with_base_url(server.uri());
        tokio::task::spawn_blocking(move || job(TvMazeCatalog::from_config(&config).unwrap()))
            .await
            .unwrap()
    }

    #[test]
    fn test_parse_search_response_keeps_order_and_defaults_image() {
        let shows = parse_search_response(BATMAN_SEARCH, PLACEHOLDER_IMAGE).unwrap();

        assert_eq!(shows.len(), 2);
        assert_eq!(
            shows[0],
            Show {
                id: 1,
                name: "Batman".to_string(),
                summary: "<p>Dark</p>".to_string(),
                image: PLACEHOLDER_IMAGE.to_string(),
            }
        );
        assert_eq!(shows[1].id, 2);
        assert_eq!(shows[1].name, "Batwoman");
        assert_eq!(shows[1].image, "http://x/img2.jpg");
    }

    #[test]
    fn test_parse_search_response_missing_image_and_null_summary() {
        let body = r#"[
            {"show": {"id": 5, "name": "No Art", "summary": null}},
            {"show": {"id": 6, "name": "Half Art", "summary": "x",
                "image": {"original": "http://x/o.jpg"}}}
        ]"#;
        let shows = parse_search_response(body, "http://placeholder").unwrap();

        assert_eq!(shows[0].image, "http://placeholder");
        assert_eq!(shows[0].summary, "");
        assert_eq!(shows[1].image, "http://placeholder");
    }

    #[test]
    fn test_parse_search_response_empty_array() {
        assert!(parse_search_response("[]", PLACEHOLDER_IMAGE).unwrap().is_empty());
    }

    #[test]
    fn test_parse_search_response_rejects_invalid_json() {
        let result = parse_search_response("<html>busy</html>", PLACEHOLDER_IMAGE);
        assert!(matches!(result, Err(CatalogError::ParseError(_))));
    }

    #[test]
    fn test_parse_search_response_rejects_missing_show() {
        let result = parse_search_response(r#"[{"score": 1.0}]"#, PLACEHOLDER_IMAGE);
        assert!(matches!(result, Err(CatalogError::ParseError(_))));
    }

    #[test]
    fn test_parse_episodes_response() {
        let episodes = parse_episodes_response(PILOT_EPISODES).unwrap();
        assert_eq!(
            episodes,
            vec![Episode {
                id: 10,
                name: "Pilot".to_string(),
                season: 1,
                number: 1,
            }]
        );
    }

    #[test]
    fn test_parse_episodes_response_keeps_api_order() {
        let body = r#"[
            {"id": 3, "name": "C", "season": 2, "number": 1},
            {"id": 1, "name": "A", "season": 1, "number": 1},
            {"id": 2, "name": null, "season": 1, "number": 2}
        ]"#;
        let episodes = parse_episodes_response(body).unwrap();

        let ids: Vec<u64> = episodes.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(episodes[2].name, "Unknown");
    }

    #[test]
    fn test_parse_episodes_response_rejects_missing_number() {
        let body = r#"[{"id": 3, "name": "Special", "season": 2, "number": null}]"#;
        assert!(matches!(
            parse_episodes_response(body),
            Err(CatalogError::ParseError(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_search_shows_via_http() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/shows"))
            .and(query_param("q", "batman"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BATMAN_SEARCH))
            .mount(&mock_server)
            .await;

        let shows = on_blocking_catalog(&mock_server, |catalog| catalog.search_shows("batman"))
            .await
            .unwrap();

        assert_eq!(shows.len(), 2);
        assert_eq!(shows[0].name, "Batman");
        assert_eq!(shows[1].image, "http://x/img2.jpg");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_search_shows_passes_empty_term() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/shows"))
            .and(query_param("q", ""))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let shows = on_blocking_catalog(&mock_server, |catalog| catalog.search_shows(""))
            .await
            .unwrap();

        assert!(shows.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_episodes_of_show_via_http() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shows/1/episodes"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PILOT_EPISODES))
            .mount(&mock_server)
            .await;

        let episodes = on_blocking_catalog(&mock_server, |catalog| catalog.episodes_of_show(1))
            .await
            .unwrap();

        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].name, "Pilot");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_http_error_status_is_request_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shows/999/episodes"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let result =
            on_blocking_catalog(&mock_server, |catalog| catalog.episodes_of_show(999)).await;

        match result {
            Err(CatalogError::RequestError(message)) => assert_eq!(message, "HTTP 404 Not Found"),
            other => panic!("expected request error, got {:?}", other),
        }
    }
}
