//! HTTP transport with per-request timeout and exponential backoff.

use std::time::Duration;

use rand::Rng;
use reqwest::{Client, Response, StatusCode};
use tokio::time::sleep;

use crate::error::{Error, Result};

/// User agent sent with every request.
const USER_AGENT: &str = concat!("album-backup/", env!("CARGO_PKG_VERSION"));

/// Highest exponent used for the backoff delay.
const MAX_BACKOFF_EXPONENT: u32 = 6;

/// HTTP client shared by API calls and asset downloads.
///
/// Each call to [`TransportClient::get`] makes up to `max_tries` sequential
/// attempts; attempts of one call never overlap.
#[derive(Debug, Clone)]
pub struct TransportClient {
    client: Client,
    max_tries: u32,
    backoff: Duration,
}

impl TransportClient {
    /// Build a client with the given per-request timeout and retry settings.
    pub fn new(timeout: Duration, max_tries: u32, backoff: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_tries: max_tries.max(1),
            backoff,
        })
    }

    /// GET a URL, retrying connection failures, timeouts, 429 and 5xx.
    ///
    /// Once retries are used up, the last response is returned as-is so the
    /// caller can map its status; a last transport error is returned as `Err`.
    pub async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Response> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            tracing::debug!("GET {} (try {}/{})", url, attempt, self.max_tries);

            let result = self.client.get(url).query(query).send().await;
            let last_try = attempt >= self.max_tries;

            match result {
                Ok(response) if is_retryable_status(response.status()) && !last_try => {
                    tracing::debug!("GET {} returned {}, backing off", url, response.status());
                }
                Ok(response) => return Ok(response),
                Err(e) if is_retryable_error(&e) && !last_try => {
                    tracing::debug!("GET {} failed: {}, backing off", url, e);
                }
                Err(e) => return Err(Error::Http(e)),
            }

            sleep(self.backoff_delay(attempt)).await;
        }
    }

    /// Delay before the attempt following `attempt` (1-based).
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let base_ms = self.backoff.as_millis() as u64;
        if base_ms == 0 {
            return Duration::ZERO;
        }

        let exponent = (attempt - 1).min(MAX_BACKOFF_EXPONENT);
        let jitter = rand::thread_rng().gen_range(0..=base_ms / 2);
        Duration::from_millis(base_ms * 2u64.pow(exponent) + jitter)
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn is_retryable_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(tries: u32) -> TransportClient {
        TransportClient::new(Duration::from_secs(5), tries, Duration::ZERO).unwrap()
    }

    #[tokio::test]
    async fn test_retries_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(3)
            .get(&format!("{}/flaky", server.uri()), &[])
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_returns_last_response_when_exhausted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/down"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let response = client(2)
            .get(&format!("{}/down", server.uri()), &[])
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(5)
            .get(&format!("{}/missing", server.uri()), &[])
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_backoff_grows() {
        let transport =
            TransportClient::new(Duration::from_secs(1), 5, Duration::from_millis(100)).unwrap();
        let first = transport.backoff_delay(1);
        let third = transport.backoff_delay(3);
        assert!(first >= Duration::from_millis(100) && first <= Duration::from_millis(150));
        assert!(third >= Duration::from_millis(400) && third <= Duration::from_millis(450));
    }
}
