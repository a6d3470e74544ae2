use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::trace;

/// Upper bound when the job count is derived from the machine
const MAX_AUTO_JOBS: usize = 8;

/// Networking errors for registry communication
#[derive(Debug, Error)]
pub enum NetworkingError {
    #[error("HTTP request failed: {source}")]
    RequestFailed {
        #[from]
        source: reqwest::Error,
    },

    #[error("Semaphore acquire error: {source}")]
    SemaphoreError {
        #[from]
        source: tokio::sync::AcquireError,
    },

    #[error("Invalid job count: {count} (must be > 0)")]
    InvalidJobCount { count: usize },

    #[error("Invalid timeout: {seconds}s (must be > 0)")]
    InvalidTimeout { seconds: u64 },
}

/// Status and body of a completed GET
#[derive(Debug, Clone)]
pub struct TextResponse {
    pub status: StatusCode,
    pub body: String,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct NetworkingConfig {
    /// Maximum concurrent requests (from CLI --jobs); `None` derives it
    pub max_jobs: Option<usize>,
    /// HTTP client timeout in seconds
    pub timeout_seconds: u64,
    /// Enable request/response tracing
    pub trace_requests: bool,
}

impl Default for NetworkingConfig {
    fn default() -> Self {
        Self {
            max_jobs: None,
            timeout_seconds: 10,
            trace_requests: false,
        }
    }
}

/// Shared HTTP client with a bound on requests in flight
#[derive(Debug)]
pub struct NetworkingManager {
    client: Client,
    config: NetworkingConfig,
    semaphore: Arc<Semaphore>,
    jobs: usize,
}

impl NetworkingManager {
    pub fn new(config: NetworkingConfig) -> Result<Self, NetworkingError> {
        trace!("Initializing networking manager");

        let jobs = match config.max_jobs {
            Some(0) => return Err(NetworkingError::InvalidJobCount { count: 0 }),
            Some(count) => count,
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .min(MAX_AUTO_JOBS),
        };

        if config.timeout_seconds == 0 {
            return Err(NetworkingError::InvalidTimeout { seconds: 0 });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("depviz/", env!("CARGO_PKG_VERSION")))
            .build()?;

        trace!(
            "Networking manager initialized with {} concurrent requests, {}s timeout",
            jobs, config.timeout_seconds
        );

        Ok(Self {
            client,
            semaphore: Arc::new(Semaphore::new(jobs)),
            config,
            jobs,
        })
    }

    /// Resolved concurrent request limit
    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// GET `url` and read the whole body, holding a request slot throughout
    ///
    /// Non-success statuses are returned as-is; callers decide what a 404 means.
    pub async fn get_text(&self, url: &str) -> Result<TextResponse, NetworkingError> {
        let _permit = self.semaphore.acquire().await?;

        if self.config.trace_requests {
            trace!("GET {}", url);
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if self.config.trace_requests {
            trace!("GET {} -> {} ({} bytes)", url, status, body.len());
        }

        Ok(TextResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
