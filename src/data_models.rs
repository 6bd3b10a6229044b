use serde::{Deserialize, Deserializer, Serialize};

pub const ENGINE: &str = "commoncrawl";

/// One line of a CDX index response: a pointer to a capture inside a WARC file.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IndexRecord {
    pub url: String,
    pub filename: String,
    #[serde(deserialize_with = "de_u64_lenient")]
    pub offset: u64,
    #[serde(deserialize_with = "de_u64_lenient")]
    pub length: u64,
}

impl IndexRecord {
    /// Value of the `Range` header used to fetch this capture.
    ///
    /// The end bound is `offset + length` and the range is inclusive, so one
    /// byte past the record is requested as well.
    pub fn byte_range(&self) -> String {
        format!("bytes={}-{}", self.offset, self.offset.saturating_add(self.length))
    }
}

// CDX servers write offset/length as strings ("12345"); accept plain numbers too.
fn de_u64_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrganicResult {
    pub position: usize,
    pub title: String,
    pub link: String,
    pub displayed_link: String,
    pub snippet: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchMetadata {
    pub query: String,
    pub results_returned: usize,
    pub engine: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub search_metadata: SearchMetadata,
    pub organic_results: Vec<OrganicResult>,
}

impl SearchResponse {
    pub fn new(query: String, organic_results: Vec<OrganicResult>) -> SearchResponse {
        SearchResponse {
            search_metadata: SearchMetadata {
                query,
                results_returned: organic_results.len(),
                engine: ENGINE.to_string(),
            },
            organic_results,
        }
    }
}

#[test]
fn test_index_record_accepts_string_and_numeric_offsets() {
    let line = r#"{"urlkey": "com,example)/", "timestamp": "20260112093011", "url": "https://example.com/", "mime": "text/html", "status": "200", "length": "5123", "offset": "987654", "filename": "crawl-data/CC-MAIN-2026-04/segments/1/warc/a.warc.gz"}"#;
    let record: IndexRecord = serde_json::from_str(line).unwrap();
    assert_eq!(record.url, "https://example.com/");
    assert_eq!(record.offset, 987654);
    assert_eq!(record.length, 5123);

    let line = r#"{"url": "https://example.com/", "filename": "a.warc.gz", "offset": 10, "length": 20}"#;
    let record: IndexRecord = serde_json::from_str(line).unwrap();
    assert_eq!((record.offset, record.length), (10, 20));
}

#[test]
fn test_index_record_rejects_missing_fields() {
    assert!(serde_json::from_str::<IndexRecord>(r#"{"url": "https://example.com/"}"#).is_err());
    assert!(
        serde_json::from_str::<IndexRecord>(
            r#"{"url": "u", "filename": "f", "offset": "ten", "length": "1"}"#
        )
        .is_err()
    );
}

#[test]
fn test_byte_range_is_inclusive_of_end_offset() {
    let record = IndexRecord {
        url: "https://example.com/".into(),
        filename: "a.warc.gz".into(),
        offset: 100,
        length: 50,
    };
    assert_eq!(record.byte_range(), "bytes=100-150");
}

#[test]
fn test_response_counts_results() {
    let response = SearchResponse::new(
        "rust".into(),
        vec![OrganicResult {
            position: 2,
            title: "Rust".into(),
            link: "https://rust-lang.org/".into(),
            displayed_link: "rust-lang.org".into(),
            snippet: String::new(),
        }],
    );
    assert_eq!(response.search_metadata.results_returned, 1);
    assert_eq!(response.search_metadata.engine, "commoncrawl");

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["organic_results"][0]["position"], 2);
    assert_eq!(value["search_metadata"]["query"], "rust");
}
