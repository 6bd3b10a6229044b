use reqwest::Client;

use crate::data_models::IndexRecord;
use crate::error::SearchError;

/// Client for a CDX server's JSON-lines capture index.
#[derive(Debug, Clone)]
pub struct CdxClient {
    client: Client,
    base_url: String,
    index_id: String,
    limit: usize,
}

impl CdxClient {
    pub fn new(client: Client, base_url: &str, index_id: &str, limit: usize) -> CdxClient {
        CdxClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            index_id: index_id.to_string(),
            limit,
        }
    }

    /// Wildcard lookup url: every capture whose url contains `query`.
    pub fn lookup_url(&self, query: &str) -> String {
        format!(
            "{}/{}?url=*{}*&output=json&limit={}",
            self.base_url,
            self.index_id,
            urlencoding::encode(query),
            self.limit
        )
    }

    pub async fn lookup(&self, query: &str) -> Result<Vec<IndexRecord>, SearchError> {
        let url = self.lookup_url(query);
        tracing::debug!(%url, "querying CDX index");

        let res = self.client.get(&url).send().await?;
        if !res.status().is_success() {
            return Err(SearchError::LookupFailed(res.status()));
        }
        let body = res.text().await?;

        let mut records = parse_records(&body)?;
        records.truncate(self.limit);
        tracing::debug!(records = records.len(), "CDX lookup finished");
        Ok(records)
    }
}

/// Parse a JSON-lines body. A single bad line fails the whole batch.
pub fn parse_records(body: &str) -> Result<Vec<IndexRecord>, SearchError> {
    body.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str::<IndexRecord>(line).map_err(SearchError::from))
        .collect()
}
