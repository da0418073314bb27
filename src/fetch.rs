use std::time::Duration;

use scraper::Html;
use tokio::time::Instant;
use tracing::debug;
use url::Url;

use crate::error::{Result, ScrapeError};

/// Enforces a minimum gap between consecutive requests.
#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, last: None }
    }

    /// Sleeps until `delay` has passed since the previous call.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last {
            tokio::time::sleep_until(last + self.delay).await;
        }
        self.last = Some(Instant::now());
    }
}

/// Sequential, paced HTTP GETs returning parsed HTML documents.
pub struct Fetcher {
    client: reqwest::Client,
    pacer: Pacer,
    requests: usize,
}

impl Fetcher {
    pub fn new(delay: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(Self {
            client,
            pacer: Pacer::new(delay),
            requests: 0,
        })
    }

    /// Fetch `url` and parse the body. Non-2xx responses are errors.
    pub async fn get_document(&mut self, url: &Url) -> Result<Html> {
        let body = self.get_text(url).await?;
        Ok(Html::parse_document(&body))
    }

    async fn get_text(&mut self, url: &Url) -> Result<String> {
        self.pacer.wait().await;
        self.requests += 1;
        debug!("GET {}", url);

        let fetch_err = |source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        };
        self.client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(fetch_err)?
            .text()
            .await
            .map_err(fetch_err)
    }

    /// Number of requests issued so far.
    pub fn requests(&self) -> usize {
        self.requests
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn html_server(status: u16, body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/visitor/"))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_string(body.to_string())
                    .insert_header("content-type", "text/html; charset=utf-8"),
            )
            .mount(&server)
            .await;
        server
    }

    fn url(server: &MockServer) -> Url {
        Url::parse(&format!("{}/visitor/", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn parses_response_body() {
        let server = html_server(200, "<html><body><p id='x'>hi</p></body></html>").await;
        let mut fetcher = Fetcher::new(Duration::ZERO).unwrap();

        let doc = fetcher.get_document(&url(&server)).await.unwrap();
        let sel = scraper::Selector::parse("p#x").unwrap();
        let text: String = doc.select(&sel).next().unwrap().text().collect();
        assert_eq!(text, "hi");
        assert_eq!(fetcher.requests(), 1);
    }

    #[tokio::test]
    async fn http_error_status_is_fetch_failure() {
        let server = html_server(503, "busy").await;
        let mut fetcher = Fetcher::new(Duration::ZERO).unwrap();

        let err = fetcher.get_document(&url(&server)).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Fetch { .. }));
    }

    #[tokio::test]
    async fn consecutive_requests_are_spaced_by_delay() {
        let server = html_server(200, "<html></html>").await;
        let mut fetcher = Fetcher::new(Duration::from_millis(60)).unwrap();
        let target = url(&server);

        let start = std::time::Instant::now();
        for _ in 0..3 {
            fetcher.get_document(&target).await.unwrap();
        }
        // first request is immediate, the next two wait
        assert!(start.elapsed() >= Duration::from_millis(120));
        assert_eq!(fetcher.requests(), 3);
    }
}
