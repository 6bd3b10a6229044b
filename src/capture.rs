use reqwest::Client;
use reqwest::header::RANGE;

use crate::data_models::IndexRecord;
use crate::error::CaptureError;

/// Ranged reads against the blob store holding WARC files.
#[derive(Debug, Clone)]
pub struct CaptureClient {
    client: Client,
    base_url: String,
}

impl CaptureClient {
    pub fn new(client: Client, base_url: &str) -> CaptureClient {
        CaptureClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn object_url(&self, filename: &str) -> String {
        format!("{}/{}", self.base_url, filename)
    }

    /// Fetch the bytes of one capture as (lossy) text.
    ///
    /// Non-success responses are not treated as failures; their body is
    /// returned like any other so extraction falls back to defaults.
    pub async fn fetch(&self, record: &IndexRecord) -> Result<String, CaptureError> {
        let url = self.object_url(&record.filename);
        let res = self
            .client
            .get(&url)
            .header(RANGE, record.byte_range())
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "capture store returned non-success status");
        }

        let bytes = res.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[test]
fn test_object_url() {
    let client = CaptureClient::new(Client::new(), "https://commoncrawl.s3.amazonaws.com/");
    assert_eq!(
        client.object_url("crawl-data/CC-MAIN-2026-04/segments/1/warc/a.warc.gz"),
        "https://commoncrawl.s3.amazonaws.com/crawl-data/CC-MAIN-2026-04/segments/1/warc/a.warc.gz"
    );
}
