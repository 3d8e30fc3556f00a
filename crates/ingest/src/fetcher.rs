use anyhow::{Context, Result};

use crate::config::ScrapeConfig;

pub fn build_client(config: &ScrapeConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.as_str())
        .build()
        .context("failed to build HTTP client")
}

/// Fetches one page as text. Non-success statuses are errors; there is no
/// retry, a failed page simply waits for the next run.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String> {
    tracing::debug!(url, "fetching page");

    let response = client
        .get(url)
        .header("Accept", "text/html,application/xhtml+xml")
        .send()
        .await
        .with_context(|| format!("failed to fetch {url}"))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("{} returned HTTP {}", url, status);
    }

    let body = response
        .text()
        .await
        .with_context(|| format!("failed to read body of {url}"))?;
    tracing::debug!(url, bytes = body.len(), "fetched page");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn returns_body_on_success() {
        let server = MockServer::start_async().await;
        let page = server
            .mock_async(|when, then| {
                when.method(GET).path("/nl/dossiers");
                then.status(200).body("<html>ok</html>");
            })
            .await;

        let client = build_client(&ScrapeConfig::default()).unwrap();
        let body = fetch_page(&client, &server.url("/nl/dossiers")).await.unwrap();
        assert_eq!(body, "<html>ok</html>");
        page.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/nl/agenda");
                then.status(503);
            })
            .await;

        let client = build_client(&ScrapeConfig::default()).unwrap();
        let err = fetch_page(&client, &server.url("/nl/agenda")).await.unwrap_err();
        assert!(err.to_string().contains("503"), "{err}");
    }
}
