// Deployment metadata: "last updated" dates for menu cards
//
// One GET spawned on the tokio runtime per menu; the result (or nothing,
// on failure) comes back over a oneshot channel the menu drains each frame.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::sync::oneshot::{self, error::TryRecvError, Receiver};

/// Label shown until a deployment date arrives
pub const PLACEHOLDER_LABEL: &str = "Loading...";

/// Errors from fetching or decoding deployment metadata
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed deployment list: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No async runtime to fetch on: {0}")]
    Runtime(#[from] TryCurrentError),
}

/// One deployment as reported by the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeploymentRecord {
    pub id: String,

    /// ISO-8601 timestamp, absent or null when unknown
    #[serde(rename = "lastUpdate", default)]
    pub last_update: Option<String>,
}

impl DeploymentRecord {
    /// Card label for this record, `None` when the timestamp is unusable
    pub fn label(&self) -> Option<String> {
        self.last_update.as_deref().and_then(format_update_label)
    }
}

#[derive(Debug, Deserialize)]
struct DeploymentList {
    #[serde(default)]
    deployments: Vec<DeploymentRecord>,
}

/// Parse the endpoint's JSON body
pub fn parse_deployments(body: &str) -> Result<Vec<DeploymentRecord>, FetchError> {
    let list: DeploymentList = serde_json::from_str(body)?;
    Ok(list.deployments)
}

/// Parse an ISO-8601 timestamp with or without offset, or a bare date
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// "Updated Mar 05, 2024"
pub fn format_update_label(raw: &str) -> Option<String> {
    parse_timestamp(raw).map(|when| format!("Updated {}", when.format("%b %d, %Y")))
}

/// Append a `t=<unix-millis>` cache-busting parameter
pub fn cache_busted_url(base: &str, now: DateTime<Utc>) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}t={}", base, separator, now.timestamp_millis())
}

/// GET the deployment list
///
/// The client carries no timeout; a hung request just leaves the
/// placeholders in place.
pub async fn fetch_deployments(
    client: &Client,
    url: &str,
) -> Result<Vec<DeploymentRecord>, FetchError> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    parse_deployments(&body)
}

/// What a poll of the fetcher produced
#[derive(Debug, PartialEq)]
pub enum FetchPoll {
    /// Still in flight
    Pending,
    Ready(Vec<DeploymentRecord>),
    /// The fetch failed or its result was already taken
    Closed,
}

/// Fire-and-forget deployment fetch
///
/// The task is never awaited and never retried. On failure it logs and
/// drops its sender, which the menu sees as `FetchPoll::Closed`.
#[derive(Debug)]
pub struct DeploymentFetcher {
    receiver: Receiver<Vec<DeploymentRecord>>,
}

impl DeploymentFetcher {
    /// Start fetching `<base_url>?t=<now>` in the background
    ///
    /// Fails when called outside a tokio runtime.
    pub fn spawn(base_url: &str) -> Result<Self, FetchError> {
        let url = cache_busted_url(base_url, Utc::now());
        info!("Fetching deployments from {}", url);
        Self::spawn_with(async move {
            let client = Client::new();
            fetch_deployments(&client, &url).await
        })
    }

    /// Run any fetch job as a task on the current runtime
    pub fn spawn_with<F>(job: F) -> Result<Self, FetchError>
    where
        F: Future<Output = Result<Vec<DeploymentRecord>, FetchError>> + Send + 'static,
    {
        let handle = Handle::try_current()?;
        let (sender, receiver) = oneshot::channel();
        handle.spawn(async move {
            match job.await {
                Ok(records) => {
                    debug!("Fetched {} deployment records", records.len());
                    // The menu may already be gone
                    let _ = sender.send(records);
                }
                Err(e) => warn!("Deployment fetch failed: {}", e),
            }
        });
        Ok(Self { receiver })
    }

    /// Check for a result without blocking
    pub fn poll(&mut self) -> FetchPoll {
        match self.receiver.try_recv() {
            Ok(records) => FetchPoll::Ready(records),
            Err(TryRecvError::Empty) => FetchPoll::Pending,
            Err(TryRecvError::Closed) => FetchPoll::Closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::{Duration, Instant};

    async fn wait_for(fetcher: &mut DeploymentFetcher) -> FetchPoll {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            match fetcher.poll() {
                FetchPoll::Pending if Instant::now() < deadline => {
                    tokio::time::sleep(Duration::from_millis(5)).await
                }
                other => return other,
            }
        }
    }

    #[test]
    fn test_parse_deployments() {
        let body = r#"{"deployments":[
            {"id":"snake","lastUpdate":"2024-03-05T14:30:00Z"},
            {"id":"pong","lastUpdate":null},
            {"id":"tetris"}
        ]}"#;
        let records = parse_deployments(body).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].last_update.as_deref(), Some("2024-03-05T14:30:00Z"));
        assert_eq!(records[1].last_update, None);
        assert_eq!(records[2].last_update, None);
    }

    #[test]
    fn test_parse_missing_list_is_empty() {
        assert!(parse_deployments("{}").unwrap().is_empty());
        assert!(matches!(
            parse_deployments("<html>"),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn test_update_label_format() {
        assert_eq!(
            format_update_label("2024-03-05T14:30:00Z").as_deref(),
            Some("Updated Mar 05, 2024")
        );
        assert_eq!(
            format_update_label("2023-12-31T23:00:00-05:00").as_deref(),
            Some("Updated Jan 01, 2024")
        );
        assert_eq!(
            format_update_label("2024-07-19T08:00:00.123").as_deref(),
            Some("Updated Jul 19, 2024")
        );
        assert_eq!(
            format_update_label("2024-07-19").as_deref(),
            Some("Updated Jul 19, 2024")
        );
        assert_eq!(format_update_label("yesterday"), None);
        assert_eq!(format_update_label(""), None);
    }

    #[test]
    fn test_record_label() {
        let record = DeploymentRecord {
            id: "snake".to_string(),
            last_update: Some("not a date".to_string()),
        };
        assert_eq!(record.label(), None);
    }

    #[test]
    fn test_cache_busted_url() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            cache_busted_url("https://example.com/api/deployments", now),
            "https://example.com/api/deployments?t=1704164645000"
        );
        assert_eq!(
            cache_busted_url("/api/deployments?env=prod", now),
            "/api/deployments?env=prod&t=1704164645000"
        );
    }

    #[tokio::test]
    async fn test_fetcher_delivers_records() {
        let mut fetcher = DeploymentFetcher::spawn_with(async {
            Ok(vec![DeploymentRecord {
                id: "snake".to_string(),
                last_update: None,
            }])
        })
        .unwrap();
        match wait_for(&mut fetcher).await {
            FetchPoll::Ready(records) => assert_eq!(records[0].id, "snake"),
            other => panic!("unexpected poll result {:?}", other),
        }
        assert_eq!(wait_for(&mut fetcher).await, FetchPoll::Closed);
    }

    #[tokio::test]
    async fn test_failed_fetch_closes_channel() {
        let mut fetcher =
            DeploymentFetcher::spawn_with(async { parse_deployments("oops") }).unwrap();
        assert_eq!(wait_for(&mut fetcher).await, FetchPoll::Closed);
    }

    #[tokio::test]
    async fn test_fetch_waits_out_slow_endpoint() {
        // Endpoint that accepts the request and answers after a delay
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/api/deployments", listener.local_addr().unwrap());
        tokio::spawn(async move {
            use tokio::io::{AsyncReadExt, AsyncWriteExt};
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await.unwrap();
            tokio::time::sleep(Duration::from_millis(300)).await;
            let body = r#"{"deployments":[{"id":"pong","lastUpdate":"2024-02-01"}]}"#;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });

        let mut fetcher = DeploymentFetcher::spawn(&url).unwrap();
        match wait_for(&mut fetcher).await {
            FetchPoll::Ready(records) => {
                assert_eq!(records[0].label().as_deref(), Some("Updated Feb 01, 2024"))
            }
            other => panic!("unexpected poll result {:?}", other),
        }
    }

    #[test]
    fn test_spawn_outside_runtime_is_an_error() {
        let result = DeploymentFetcher::spawn("http://127.0.0.1:9/api/deployments");
        assert!(matches!(result, Err(FetchError::Runtime(_))));
    }
}
