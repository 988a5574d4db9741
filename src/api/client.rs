use std::time::Duration;

use futures::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use super::types::ArticlePage;

/// Maximum response body size. A page of five records is a few KB; anything
/// near this limit means a misbehaving backend.
const MAX_RESPONSE_SIZE: usize = 2 * 1024 * 1024; // 2MB

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request timed out")]
    Timeout,
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Malformed API response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Insecure API base URL: HTTPS required (except localhost)")]
    InsecureBaseUrl,
}

impl ApiError {
    /// True if the error is transient and the request should be retried.
    fn is_retryable(&self) -> bool {
        match self {
            ApiError::Timeout | ApiError::Network(_) => true,
            ApiError::HttpStatus(status) => *status >= 500,
            ApiError::ResponseTooLarge(_)
            | ApiError::Decode(_)
            | ApiError::InvalidBaseUrl(_)
            | ApiError::InsecureBaseUrl => false,
        }
    }
}

/// HTTP client for the article backend.
///
/// Cheap to clone: the inner reqwest client is an `Arc` around its pool, and
/// spawned tasks each take a clone.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    token: Option<SecretString>,
    timeout: Duration,
}

impl ApiClient {
    /// Build a client against `base_url`.
    ///
    /// The base URL must be HTTPS; plain HTTP is accepted only for
    /// localhost so the console can point at a dev backend. The bearer
    /// token, when present, is attached to every request.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        token: Option<SecretString>,
    ) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        match base.scheme() {
            "https" => {}
            "http" => {
                let is_localhost = matches!(base.host_str(), Some("localhost" | "127.0.0.1"));
                if !is_localhost {
                    tracing::error!(base_url = %base, "Rejecting non-HTTPS API base URL");
                    return Err(ApiError::InsecureBaseUrl);
                }
                tracing::warn!(base_url = %base, "Using non-HTTPS API base URL (localhost only)");
            }
            other => {
                return Err(ApiError::InvalidBaseUrl(format!(
                    "unsupported scheme '{other}'"
                )));
            }
        }

        // Url::join drops the last path segment unless the base ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            http,
            base,
            token,
            timeout,
        })
    }

    /// Fetch one page of articles: `GET articles/?skip&limit`.
    ///
    /// Transient failures (timeout, network, HTTP 5xx) retry with
    /// exponential backoff: 1s, 2s, 4s.
    pub async fn read_articles(&self, skip: u64, limit: u64) -> Result<ArticlePage, ApiError> {
        let mut url = self.endpoint("articles/")?;
        url.query_pairs_mut()
            .append_pair("skip", &skip.to_string())
            .append_pair("limit", &limit.to_string());

        tracing::debug!(%skip, %limit, "Requesting article page");
        self.with_retry(|| self.get_json::<ArticlePage>(url.clone()))
            .await
    }

    /// Delete an article: `DELETE articles/{id}`. Not retried; the caller
    /// refetches the page afterwards either way.
    pub async fn delete_article(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("articles/{id}"))?;
        let request = self.authorize(self.http.delete(url));

        let response = tokio::time::timeout(self.timeout, request.send())
            .await
            .map_err(|_| ApiError::Timeout)?
            .map_err(ApiError::Network)?;

        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }

    /// Ask the backend to crawl content for pending articles:
    /// `POST articles/crawl-content`. Fire-and-forget from the console's
    /// point of view; the response body is ignored.
    pub async fn trigger_crawl(&self) -> Result<(), ApiError> {
        let url = self.endpoint("articles/crawl-content")?;
        let request = self.authorize(self.http.post(url));

        let response = tokio::time::timeout(self.timeout, request.send())
            .await
            .map_err(|_| ApiError::Timeout)?
            .map_err(ApiError::Network)?;

        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{path}: {e}")))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header(
                "Authorization",
                format!("Bearer {}", token.expose_secret()),
            ),
            None => request,
        }
    }

    async fn with_retry<F, Fut, T>(&self, op: F) -> Result<T, ApiError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, ApiError>>,
    {
        let mut retry_count = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && retry_count < MAX_RETRIES => {
                    let delay = 1u64 << retry_count; // 1s, 2s, 4s
                    tracing::debug!(
                        error = %e,
                        retry = retry_count + 1,
                        delay_secs = delay,
                        "Retrying API request after transient error"
                    );
                    tokio::time::sleep(Duration::from_secs(delay)).await;
                    retry_count += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let request = self.authorize(self.http.get(url));

        let response = tokio::time::timeout(self.timeout, request.send())
            .await
            .map_err(|_| ApiError::Timeout)?
            .map_err(ApiError::Network)?;

        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status().as_u16()));
        }

        let body = read_limited(response, MAX_RESPONSE_SIZE).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

async fn read_limited(response: reqwest::Response, limit: usize) -> Result<Vec<u8>, ApiError> {
    // Fast path: trust Content-Length when present.
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(ApiError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(ApiError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(ApiError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE_BODY: &str = r#"{
        "data": [{"id": "a1", "title": "X", "article_type": "blog",
                  "url": "http://x", "ai_abstract": null, "audio": "no"}],
        "count": 1
    }"#;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri(), Duration::from_secs(5), None).unwrap()
    }

    #[tokio::test]
    async fn read_articles_sends_skip_and_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles/"))
            .and(query_param("skip", "5"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server).read_articles(5, 5).await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.count, 1);
    }

    #[tokio::test]
    async fn http_404_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server).read_articles(0, 5).await;
        assert!(matches!(result, Err(ApiError::HttpStatus(404))));
    }

    #[tokio::test]
    async fn http_500_retries_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server).read_articles(0, 5).await.unwrap();
        assert_eq!(page.count, 1);
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server).read_articles(0, 5).await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn oversize_body_rejected() {
        let server = MockServer::start().await;
        let big = "x".repeat(MAX_RESPONSE_SIZE + 1);
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(big))
            .mount(&server)
            .await;

        let result = client_for(&server).read_articles(0, 5).await;
        assert!(matches!(result, Err(ApiError::ResponseTooLarge(_))));
    }

    #[tokio::test]
    async fn bearer_token_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("Authorization", "Bearer sekrit"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(
            &server.uri(),
            Duration::from_secs(5),
            Some(SecretString::from("sekrit".to_string())),
        )
        .unwrap();
        client.read_articles(0, 5).await.unwrap();
    }

    #[tokio::test]
    async fn delete_article_hits_id_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/articles/a1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).delete_article("a1").await.unwrap();
    }

    #[test]
    fn non_localhost_http_rejected() {
        let result = ApiClient::new("http://example.com/api", Duration::from_secs(5), None);
        assert!(matches!(result, Err(ApiError::InsecureBaseUrl)));
    }

    #[test]
    fn https_accepted() {
        assert!(ApiClient::new("https://api.example.com/v1", Duration::from_secs(5), None).is_ok());
    }

    #[test]
    fn garbage_base_url_rejected() {
        let result = ApiClient::new("not a url", Duration::from_secs(5), None);
        assert!(matches!(result, Err(ApiError::InvalidBaseUrl(_))));
    }
}
