//! SteamGridDB API client.
//!
//! Async HTTP client using `reqwest` with Bearer token authentication.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::types::{ApiResponse, ImageData, ImageFilters, SearchResult};

const DEFAULT_BASE_URL: &str = "https://www.steamgriddb.com/api/v2";

/// Characters escaped in a URL path segment (RFC 3986 unreserved are kept).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Errors from the SteamGridDB client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid API key")]
    InvalidKey,
}

/// SteamGridDB API client.
pub struct Client {
    http: reqwest::Client,
    // Image URLs point at the CDN; the API key is not sent there.
    cdn: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Creates a new client with the given API key.
    pub fn new(api_key: &str) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth =
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| Error::InvalidKey)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        let cdn = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            cdn,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Overrides the API base URL (no trailing slash).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Performs an authenticated GET request.
    async fn get(&self, endpoint: &str, params: &[(String, String)]) -> Result<Vec<u8>, Error> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::trace!(%url, "SteamGridDB request");
        let resp = self.http.get(&url).query(params).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.bytes().await?.to_vec())
    }

    /// Searches for games by name or slug.
    pub async fn search(&self, term: &str) -> Result<Vec<SearchResult>, Error> {
        let encoded = utf8_percent_encode(term, PATH_SEGMENT).to_string();
        let body = self
            .get(&format!("/search/autocomplete/{encoded}"), &[])
            .await?;
        let resp: ApiResponse<Vec<SearchResult>> = serde_json::from_slice(&body)?;
        Ok(resp.data)
    }

    /// Returns grid images for a game.
    pub async fn get_grids(
        &self,
        game_id: i32,
        filters: Option<&ImageFilters>,
    ) -> Result<Vec<ImageData>, Error> {
        let params = build_params(filters);
        let body = self.get(&format!("/grids/game/{game_id}"), &params).await?;
        let resp: ApiResponse<Vec<ImageData>> = serde_json::from_slice(&body)?;
        Ok(resp.data)
    }

    /// Streams the image at `url` into `out`, returning the byte count.
    ///
    /// The writer is flushed on success. On error, whatever was already
    /// written stays in `out`; callers own cleanup.
    pub async fn download_to<W>(&self, url: &str, out: &mut W) -> Result<u64, Error>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut resp = self.cdn.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body: "download failed".into(),
            });
        }

        let mut written = 0u64;
        while let Some(chunk) = resp.chunk().await? {
            out.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        out.flush().await?;
        Ok(written)
    }
}

/// Builds query parameters from filters.
fn build_params(filters: Option<&ImageFilters>) -> Vec<(String, String)> {
    let mut params = Vec::new();

    if let Some(f) = filters {
        if !f.dimensions.is_empty() {
            params.push(("dimensions".into(), f.dimensions.join(",")));
        }
        if f.static_only {
            params.push(("types".into(), "static".into()));
        }
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Starts a mock HTTP server answering one request with `status` and `body`.
    ///
    /// The raw request head is sent back through the returned receiver.
    async fn mock_server(
        status: u16,
        body: &[u8],
    ) -> (String, oneshot::Receiver<String>, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let url = format!("http://127.0.0.1:{port}");
        let body = body.to_vec();
        let (req_tx, req_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                let n = stream.read(&mut buf).await.unwrap_or(0);
                let _ = req_tx.send(String::from_utf8_lossy(&buf[..n]).into_owned());

                let head = format!(
                    "HTTP/1.1 {status} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = stream.write_all(head.as_bytes()).await;
                let _ = stream.write_all(&body).await;
                let _ = stream.shutdown().await;
            }
        });

        (url, req_rx, handle)
    }

    #[tokio::test]
    async fn search_returns_results() {
        let json = r#"{"success":true,"data":[
            {"id":1,"name":"Test Game","types":["steam"],"verified":true},
            {"id":2,"name":"Test Game 2","types":["origin"]}
        ]}"#;
        let (url, _req, handle) = mock_server(200, json.as_bytes()).await;

        let client = Client::new("test-key").unwrap().with_base_url(url);
        let results = client.search("test-game").await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, 1);
        assert!(results[0].verified);
        assert_eq!(results[1].id, 2);

        handle.abort();
    }

    #[tokio::test]
    async fn search_sends_bearer_and_encodes_slug() {
        let (url, req, handle) = mock_server(200, br#"{"data":[]}"#).await;

        let client = Client::new("secret").unwrap().with_base_url(url);
        let results = client.search("half-life 2").await.unwrap();
        assert!(results.is_empty());

        let head = req.await.unwrap();
        assert!(
            head.starts_with("GET /search/autocomplete/half-life%202 HTTP/1.1"),
            "unexpected request line: {head}"
        );
        assert!(
            head.to_ascii_lowercase()
                .contains("authorization: bearer secret"),
            "missing bearer header: {head}"
        );

        handle.abort();
    }

    #[tokio::test]
    async fn get_grids_sends_filters() {
        let json = r#"{"success":true,"data":[
            {"id":100,"url":"https://example.com/grid.png","mime":"image/png","width":920,"height":430}
        ]}"#;
        let (url, req, handle) = mock_server(200, json.as_bytes()).await;

        let client = Client::new("test-key").unwrap().with_base_url(url);
        let filters = ImageFilters::static_with_dimensions(["600x900", "920x430"]);
        let grids = client.get_grids(42, Some(&filters)).await.unwrap();

        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0].width, 920);
        assert_eq!(grids[0].mime, "image/png");

        let head = req.await.unwrap();
        assert!(
            head.starts_with(
                "GET /grids/game/42?dimensions=600x900%2C920x430&types=static HTTP/1.1"
            ),
            "unexpected request line: {head}"
        );

        handle.abort();
    }

    #[tokio::test]
    async fn search_api_error() {
        let (url, _req, handle) =
            mock_server(401, br#"{"success":false,"errors":["Unauthorized"]}"#).await;

        let client = Client::new("bad-key").unwrap().with_base_url(url);
        let err = client.search("test").await.unwrap_err();
        assert!(matches!(err, Error::Api { status: 401, .. }), "got {err}");

        handle.abort();
    }

    #[tokio::test]
    async fn search_malformed_body() {
        let (url, _req, handle) = mock_server(200, b"<html>oops</html>").await;

        let client = Client::new("test-key").unwrap().with_base_url(url);
        let err = client.search("test").await.unwrap_err();
        assert!(matches!(err, Error::Json(_)), "got {err}");

        handle.abort();
    }

    #[tokio::test]
    async fn download_streams_body_without_auth() {
        let payload = vec![0xABu8; 20_000];
        let (url, req, handle) = mock_server(200, &payload).await;

        let client = Client::new("secret").unwrap();
        let mut out = Vec::new();
        let written = client
            .download_to(&format!("{url}/img.png"), &mut out)
            .await
            .unwrap();

        assert_eq!(written, payload.len() as u64);
        assert_eq!(out, payload);

        let head = req.await.unwrap();
        assert!(!head.to_ascii_lowercase().contains("authorization"));

        handle.abort();
    }

    #[tokio::test]
    async fn download_error_status() {
        let (url, _req, handle) = mock_server(404, b"").await;

        let client = Client::new("test-key").unwrap();
        let mut out = Vec::new();
        let err = client.download_to(&url, &mut out).await.unwrap_err();

        assert!(matches!(err, Error::Api { status: 404, .. }), "got {err}");
        assert!(out.is_empty());

        handle.abort();
    }

    #[test]
    fn client_new_rejects_invalid_header() {
        assert!(matches!(Client::new("bad\nkey"), Err(Error::InvalidKey)));
    }

    #[test]
    fn build_params_no_filters() {
        assert!(build_params(None).is_empty());
    }

    #[test]
    fn build_params_static_dimensions() {
        let filters = ImageFilters::static_with_dimensions(["600x900", "920x430"]);
        let params = build_params(Some(&filters));
        assert_eq!(
            params,
            vec![
                ("dimensions".to_string(), "600x900,920x430".to_string()),
                ("types".to_string(), "static".to_string()),
            ]
        );
    }

    #[test]
    fn build_params_without_static_flag() {
        let filters = ImageFilters {
            dimensions: vec!["920x430".into()],
            static_only: false,
        };
        let params = build_params(Some(&filters));
        assert_eq!(
            params,
            vec![("dimensions".to_string(), "920x430".to_string())]
        );
    }
}
