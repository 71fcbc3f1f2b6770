use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Semaphore;
use tracing::warn;

use crate::error::{CheckError, FetchFailure};
use crate::extractor::html_paragraph_text;
use crate::models::{FetchedReference, ReferenceSource};
use crate::traits::ReferenceFetcher;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

const USER_AGENT: &str = "Mozilla/5.0";

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub max_concurrent: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

pub struct HttpReferenceFetcher {
    client: Client,
    max_concurrent: usize,
}

impl HttpReferenceFetcher {
    pub fn new(options: FetchOptions) -> Result<Self, CheckError> {
        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            max_concurrent: options.max_concurrent.max(1),
        })
    }
}

#[async_trait]
impl ReferenceFetcher for HttpReferenceFetcher {
    async fn fetch_all(&self, sources: &[ReferenceSource]) -> Vec<FetchedReference> {
        let limiter = Arc::new(Semaphore::new(self.max_concurrent));

        let mut handles = Vec::with_capacity(sources.len());
        for source in sources {
            let client = self.client.clone();
            let source = source.clone();
            let limiter = Arc::clone(&limiter);
            handles.push(tokio::spawn(async move {
                // the semaphore is never closed, so acquisition cannot fail
                let _permit = limiter.acquire_owned().await.ok();
                fetch_reference(&client, source).await
            }));
        }

        // awaiting in spawn order reassembles the configured source order
        let mut fetched = Vec::with_capacity(handles.len());
        for (handle, source) in handles.into_iter().zip(sources) {
            match handle.await {
                Ok(reference) => fetched.push(reference),
                Err(join_error) => fetched.push(FetchedReference::failed(
                    source.clone(),
                    FetchFailure::Request(join_error.to_string()),
                )),
            }
        }
        fetched
    }
}

async fn fetch_reference(client: &Client, source: ReferenceSource) -> FetchedReference {
    match paragraph_text_from_url(client, &source).await {
        Ok(text) => FetchedReference::ok(source, text),
        Err(failure) => {
            warn!(source = %source, reason = %failure, "reference fetch failed");
            FetchedReference::failed(source, failure)
        }
    }
}

async fn paragraph_text_from_url(
    client: &Client,
    source: &ReferenceSource,
) -> Result<String, FetchFailure> {
    let response = client
        .get(source.as_str())
        .send()
        .await
        .map_err(request_failure)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchFailure::Status(status.as_u16()));
    }

    let body = response.text().await.map_err(|error| {
        if error.is_timeout() {
            FetchFailure::Timeout
        } else {
            FetchFailure::Body(error.to_string())
        }
    })?;

    Ok(html_paragraph_text(&body))
}

fn request_failure(error: reqwest::Error) -> FetchFailure {
    if error.is_timeout() {
        FetchFailure::Timeout
    } else {
        FetchFailure::Request(error.to_string())
    }
}
