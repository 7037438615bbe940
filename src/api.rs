// API client module: a small blocking HTTP client for the photo search
// endpoint, plus the response shapes we deserialize from it.

use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::ImageSize;

/// Build the HTTP client shared by the search client and the downloader.
/// No timeout is applied unless one is configured.
pub fn build_http_client(config: &Config) -> Result<Client> {
    Client::builder()
        .user_agent(concat!("photofetch/", env!("CARGO_PKG_VERSION")))
        .timeout(config.timeout)
        .build()
        .map_err(Error::HttpClient)
}

/// Anything that can answer a keyword search with one page of photos.
pub trait PhotoSearch {
    fn search(&self, query: &str, per_page: u32) -> Result<SearchResponse>;
}

/// One page of search results. `total` and `total_pages` describe the whole
/// result set on the provider side, not just this page.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u64,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub urls: PhotoUrls,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alt_description: Option<String>,
    pub user: Author,
}

/// Download URLs for every size the API serves. All keys are required; a
/// result missing one is treated as a malformed response.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoUrls {
    pub raw: String,
    pub full: String,
    pub regular: String,
    pub small: String,
    pub thumb: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub name: String,
}

impl PhotoUrls {
    pub fn get(&self, size: ImageSize) -> &str {
        match size {
            ImageSize::Raw => &self.raw,
            ImageSize::Full => &self.full,
            ImageSize::Regular => &self.regular,
            ImageSize::Small => &self.small,
            ImageSize::Thumb => &self.thumb,
        }
    }
}

impl SearchResult {
    pub fn url_for(&self, size: ImageSize) -> &str {
        self.urls.get(size)
    }

    pub fn author(&self) -> &str {
        &self.user.name
    }

    /// Description if present, otherwise the alt text.
    pub fn caption(&self) -> Option<&str> {
        self.description
            .as_deref()
            .or(self.alt_description.as_deref())
            .filter(|c| !c.trim().is_empty())
    }
}

/// Search client bound to one API base URL and access key.
#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    base_url: String,
    access_key: String,
}

impl SearchClient {
    pub fn new(client: Client, config: &Config) -> Self {
        SearchClient {
            client,
            base_url: config.api_url.clone(),
            access_key: config.access_key.clone(),
        }
    }
}

impl PhotoSearch for SearchClient {
    /// GET `/search/photos` and parse the first page. Non-success statuses
    /// become `Error::Api`, bodies of the wrong shape `Error::Parse`.
    fn search(&self, query: &str, per_page: u32) -> Result<SearchResponse> {
        let url = format!("{}/search/photos", &self.base_url);
        debug!("GET {} query={:?} per_page={}", url, query, per_page);

        let per_page = per_page.to_string();
        // The access key travels in the query string, so strip URLs from
        // transport errors before they reach any output.
        let res = self
            .client
            .get(&url)
            .header("Accept-Version", "v1")
            .query(&[
                ("query", query),
                ("per_page", per_page.as_str()),
                ("client_id", self.access_key.as_str()),
            ])
            .send()
            .map_err(|e| Error::network(&url, e.without_url()))?;

        let status = res.status();
        let body = res
            .text()
            .map_err(|e| Error::network(&url, e.without_url()))?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: SearchResponse = serde_json::from_str(&body).map_err(Error::Parse)?;
        info!(
            "search {:?}: {} results on this page, {} total",
            query,
            parsed.results.len(),
            parsed.total
        );
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn config_for(server: &mockito::ServerGuard) -> Config {
        Config::from_lookup(|key| match key {
            crate::config::ACCESS_KEY_VAR => Some("test-key".into()),
            crate::config::API_URL_VAR => Some(server.url()),
            _ => None,
        })
        .unwrap()
    }

    fn client_for(server: &mockito::ServerGuard) -> SearchClient {
        let config = config_for(server);
        SearchClient::new(build_http_client(&config).unwrap(), &config)
    }

    const TWO_RESULTS: &str = r#"{
        "total": 133,
        "total_pages": 67,
        "results": [
            {
                "id": "abc",
                "description": "Snowy peaks",
                "alt_description": null,
                "urls": {
                    "raw": "https://img.example/abc?raw",
                    "full": "https://img.example/abc?full",
                    "regular": "https://img.example/abc?regular",
                    "small": "https://img.example/abc?small",
                    "thumb": "https://img.example/abc?thumb"
                },
                "user": { "name": "Ada Peak" }
            },
            {
                "id": "def",
                "description": null,
                "alt_description": "a valley at dawn",
                "urls": {
                    "raw": "https://img.example/def?raw",
                    "full": "https://img.example/def?full",
                    "regular": "https://img.example/def?regular",
                    "small": "https://img.example/def?small",
                    "thumb": "https://img.example/def?thumb"
                },
                "user": { "name": "Bo Vale" }
            }
        ]
    }"#;

    #[test]
    fn search_sends_query_and_parses_results() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/search/photos")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".into(), "mountain view".into()),
                Matcher::UrlEncoded("per_page".into(), "2".into()),
                Matcher::UrlEncoded("client_id".into(), "test-key".into()),
            ]))
            .match_header("accept-version", "v1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(TWO_RESULTS)
            .create();

        let response = client_for(&server).search("mountain view", 2).unwrap();

        mock.assert();
        assert_eq!(response.total, 133);
        assert_eq!(response.total_pages, 67);
        assert_eq!(response.results.len(), 2);

        let first = &response.results[0];
        assert_eq!(first.id, "abc");
        assert_eq!(first.author(), "Ada Peak");
        assert_eq!(first.caption(), Some("Snowy peaks"));
        assert_eq!(first.url_for(ImageSize::Small), "https://img.example/abc?small");

        let second = &response.results[1];
        assert_eq!(second.caption(), Some("a valley at dawn"));
        assert_eq!(second.url_for(ImageSize::Raw), "https://img.example/def?raw");
    }

    #[test]
    fn empty_result_list_is_not_an_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/search/photos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"total":0,"total_pages":0,"results":[]}"#)
            .create();

        let response = client_for(&server).search("zzzzqqq", 10).unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn non_success_status_is_an_api_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/search/photos")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"errors":["OAuth error: The access token is invalid"]}"#)
            .create();

        let err = client_for(&server).search("cats", 5).unwrap_err();
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 401);
                assert!(message.contains("access token is invalid"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn unexpected_body_is_a_parse_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/search/photos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"results":[{"id":"abc"}]}"#)
            .create();

        let err = client_for(&server).search("cats", 5).unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "got {err:?}");
    }

    #[test]
    fn unreachable_host_is_a_network_error_without_the_key() {
        let config = Config::from_lookup(|key| match key {
            crate::config::ACCESS_KEY_VAR => Some("test-key".into()),
            crate::config::API_URL_VAR => Some("http://127.0.0.1:1".into()),
            _ => None,
        })
        .unwrap();
        let client = SearchClient::new(build_http_client(&config).unwrap(), &config);

        let err = client.search("cats", 5).unwrap_err();
        assert!(matches!(err, Error::Network { .. }), "got {err:?}");
        assert!(!err.to_string().contains("test-key"));
    }
}
