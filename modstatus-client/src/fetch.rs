//! HTTP fetch for the machine-readable status endpoint

use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::{Method, Request, StatusCode};
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use modstatus_common::{parse, StatusRecord};
use std::time::Duration;
use tracing::debug;

/// Fetch failure taxonomy. Every variant names the target so callers can
/// report which server misbehaved. None of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The server answered with something other than HTTP 200.
    #[error("HTTP {status} received from {target}")]
    Status { status: u16, target: String },

    /// Connection-level failure (refused, unreachable, DNS).
    #[error("failed to reach {target}: {source}")]
    Transport {
        target: String,
        #[source]
        source: hyper_util::client::legacy::Error,
    },

    /// The response body could not be read.
    #[error("failed to read response body from {target}: {source}")]
    Body {
        target: String,
        #[source]
        source: hyper::Error,
    },

    /// No response within the configured budget.
    #[error("request to {target} timed out after {timeout_secs}s")]
    Timeout { target: String, timeout_secs: u64 },

    /// The target did not form a valid request URI.
    #[error("invalid target address '{target}': {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: hyper::http::Error,
    },
}

/// Fetch the raw report from `http://<target>/server-status?auto`.
///
/// Success is strictly HTTP 200; any other status is fatal and the body is
/// never parsed. The body is decoded lossily as UTF-8.
pub async fn fetch_raw(target: &str, timeout: Duration) -> Result<String, FetchError> {
    let url = format!("http://{}/server-status?auto", target);
    debug!("Fetching {}", url);

    let request = Request::builder()
        .method(Method::GET)
        .uri(&url)
        .body(Empty::<Bytes>::new())
        .map_err(|source| FetchError::InvalidTarget {
            target: target.to_string(),
            source,
        })?;

    let client = Client::builder(TokioExecutor::new()).build_http();

    let response = match tokio::time::timeout(timeout, client.request(request)).await {
        Ok(Ok(response)) => response,
        Ok(Err(source)) => {
            return Err(FetchError::Transport {
                target: target.to_string(),
                source,
            })
        }
        Err(_) => {
            return Err(FetchError::Timeout {
                target: target.to_string(),
                timeout_secs: timeout.as_secs(),
            })
        }
    };

    if response.status() != StatusCode::OK {
        return Err(FetchError::Status {
            status: response.status().as_u16(),
            target: target.to_string(),
        });
    }

    let body = response
        .collect()
        .await
        .map_err(|source| FetchError::Body {
            target: target.to_string(),
            source,
        })?
        .to_bytes();

    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Fetch the report from `target` and parse it in one step.
pub async fn fetch_and_parse(target: &str, timeout: Duration) -> Result<StatusRecord, FetchError> {
    let raw = fetch_raw(target, timeout).await?;
    Ok(parse(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on an ephemeral port and return the
    /// address to fetch from.
    async fn spawn_stub(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();

            // Read until the end of the request headers.
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
        });

        addr.to_string()
    }

    #[tokio::test]
    async fn test_fetch_and_parse_ok() {
        let target = spawn_stub("200 OK", "BusyWorkers: 1\nIdleWorkers: 8\n").await;

        let record = fetch_and_parse(&target, Duration::from_secs(5)).await.unwrap();
        assert_eq!(record.busy_workers, Some(1));
        assert_eq!(record.idle_workers, Some(8));
        assert_eq!(record.cpuload, None);
    }

    #[tokio::test]
    async fn test_non_200_is_fatal() {
        let target = spawn_stub("404 Not Found", "not here").await;

        let err = fetch_and_parse(&target, Duration::from_secs(5)).await.unwrap_err();
        match err {
            FetchError::Status { status, .. } => assert_eq!(status, 404),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop to find a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let target = listener.local_addr().unwrap().to_string();
        drop(listener);

        let err = fetch_raw(&target, Duration::from_secs(5)).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
