use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use reqwest::{redirect::Policy, Client};
use scraper::Html;
use url::Url;

use crate::config::Config;
use crate::error::SaintError;

/// One client per run; every request shares its timeout and user agent.
pub fn build_client(cfg: &Config) -> Result<Client> {
    Client::builder()
        .redirect(Policy::limited(10))
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .user_agent(&cfg.user_agent)
        .build()
        .context("Failed to build HTTP client")
}

/// GET `url` and parse the body as an HTML document.
///
/// Connection problems, timeouts and unreadable bodies are reported as
/// [`SaintError::Network`]; 4xx and 5xx responses as [`SaintError::Http`].
pub async fn fetch_page(client: &Client, url: &Url) -> Result<Html, SaintError> {
    debug!("GET {}", url);

    let network_error = |source| SaintError::Network {
        url: url.to_string(),
        source,
    };

    let response = client.get(url.clone()).send().await.map_err(network_error)?;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(SaintError::Http {
            url: url.to_string(),
            status,
        });
    }

    let body = response.text().await.map_err(network_error)?;
    debug!("Fetched {} bytes from {}", body.len(), url);

    Ok(Html::parse_document(&body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use scraper::Selector;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(timeout_secs: u64) -> Config {
        Config {
            timeout_secs,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_page_parses_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body><h1>Hello</h1></body></html>")
                    .insert_header("content-type", "text/html"),
            )
            .mount(&server)
            .await;

        let client = build_client(&test_config(5)).unwrap();
        let url = Url::parse(&format!("{}/page", server.uri())).unwrap();
        let document = fetch_page(&client, &url).await.unwrap();

        let h1 = Selector::parse("h1").unwrap();
        let text: String = document.select(&h1).next().unwrap().text().collect();
        assert_eq!(text, "Hello");
    }

    #[tokio::test]
    async fn test_fetch_page_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_client(&test_config(5)).unwrap();
        let url = Url::parse(&format!("{}/missing", server.uri())).unwrap();
        let err = fetch_page(&client, &url).await.unwrap_err();

        match err {
            SaintError::Http { url: failed, status } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert!(failed.ends_with("/missing"));
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_timeout_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let client = build_client(&test_config(1)).unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let err = fetch_page(&client, &url).await.unwrap_err();

        assert!(matches!(err, SaintError::Network { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_fetch_page_connection_refused() {
        // Bind and drop a listener to get a port nobody is serving.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let client = build_client(&test_config(5)).unwrap();
        let url = Url::parse(&format!("http://127.0.0.1:{port}/")).unwrap();
        let err = fetch_page(&client, &url).await.unwrap_err();

        assert!(matches!(err, SaintError::Network { .. }), "{err:?}");
        assert!(err.to_string().contains(&port.to_string()));
    }
}
