use anyhow::Result;
use futures::StreamExt;
use futures::stream;
use reqwest::Client;

use crate::capture::CaptureClient;
use crate::cdx::CdxClient;
use crate::config::Config;
use crate::data_models::{IndexRecord, OrganicResult, SearchResponse};
use crate::error::{CaptureError, SearchError};
use crate::extract::{displayed_link, extract_snippet, extract_title};

/// Resolves a query against the CDX index and turns each capture into a result.
pub struct SearchService {
    cdx: CdxClient,
    captures: CaptureClient,
    fetch_concurrency: usize,
}

impl SearchService {
    pub fn new(config: &Config) -> Result<SearchService> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.upstream_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &Config) -> SearchService {
        SearchService {
            cdx: CdxClient::new(
                client.clone(),
                &config.cdx_base_url,
                &config.cdx_index_id,
                config.max_results,
            ),
            captures: CaptureClient::new(client, &config.capture_base_url),
            fetch_concurrency: config.fetch_concurrency.max(1),
        }
    }

    pub async fn handle(&self, query: &str) -> Result<SearchResponse, SearchError> {
        let query = trim_query(query);
        if query.is_empty() {
            return Err(SearchError::BadRequest(
                "Missing query parameter".to_string(),
            ));
        }

        let records = self.cdx.lookup(query).await?;

        // `buffered` yields in input order, so positions stay tied to index order
        // no matter how many fetches run at once.
        let results: Vec<OrganicResult> = stream::iter(records.into_iter().enumerate())
            .map(|(i, record)| async move {
                match self.build_result(i + 1, &record).await {
                    Ok(result) => Some(result),
                    Err(e) => {
                        tracing::warn!(
                            url = %record.url,
                            filename = %record.filename,
                            "WARC fetch error: {e}"
                        );
                        None
                    }
                }
            })
            .buffered(self.fetch_concurrency)
            .filter_map(|result| async move { result })
            .collect()
            .await;

        Ok(SearchResponse::new(query.to_string(), results))
    }

    async fn build_result(
        &self,
        position: usize,
        record: &IndexRecord,
    ) -> Result<OrganicResult, CaptureError> {
        let text = self.captures.fetch(record).await?;
        let displayed_link = displayed_link(&record.url)
            .ok_or_else(|| CaptureError::InvalidUrl(record.url.clone()))?;

        Ok(OrganicResult {
            position,
            title: extract_title(&text).unwrap_or_else(|| record.url.clone()),
            link: record.url.clone(),
            displayed_link,
            snippet: extract_snippet(&text),
        })
    }
}

/// Strips whitespace and byte-order marks from both ends.
fn trim_query(query: &str) -> &str {
    query.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}
