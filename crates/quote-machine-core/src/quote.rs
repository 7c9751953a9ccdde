use log::debug;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

pub const DEFAULT_ENDPOINT: &str = "https://api.quotable.io/random";

const SHARE_URL: &str = "https://twitter.com/intent/tweet";
const SHARE_RELATED: &str = "braydentbabbitt";

/// A single quotation. Two quotes are "the same favorite" when their ids match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub text: String,
    pub author: String,
}

impl Quote {
    pub fn new(id: impl Into<String>, text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            author: author.into(),
        }
    }

    pub fn same_id(&self, other: &Quote) -> bool {
        self.id == other.id
    }

    /// Link that opens a pre-filled post for this quote.
    pub fn share_url(&self) -> String {
        let text = format!("\"{}\" - {}", self.text, self.author);
        match Url::parse_with_params(SHARE_URL, &[("related", SHARE_RELATED), ("text", text.as_str())]) {
            Ok(url) => url.into(),
            Err(_) => SHARE_URL.to_string(),
        }
    }
}

/// Wire shape of the quote API. Accepts both quotable's field names and ours.
#[derive(Deserialize)]
struct QuoteRecord {
    #[serde(rename = "_id", alias = "id")]
    id: String,
    #[serde(rename = "content", alias = "text")]
    text: String,
    author: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuotePayload {
    Single(QuoteRecord),
    Batch(Vec<QuoteRecord>),
}

/// Turn a response body into a `Quote`.
pub fn parse_quote(body: &[u8]) -> Result<Quote, QuoteError> {
    let payload: QuotePayload = serde_json::from_slice(body).map_err(|e| {
        QuoteError::MalformedResponse(format!("expected a quote object: {}", e))
    })?;

    let record = match payload {
        QuotePayload::Single(record) => record,
        QuotePayload::Batch(records) => records
            .into_iter()
            .next()
            .ok_or_else(|| QuoteError::MalformedResponse("empty quote list".to_string()))?,
    };

    if record.id.trim().is_empty() {
        return Err(QuoteError::MalformedResponse("quote has an empty id".to_string()));
    }

    Ok(Quote {
        id: record.id,
        text: record.text,
        author: record.author,
    })
}

/// Client for the random quote endpoint. No retries, no caching.
#[derive(Clone)]
pub struct QuoteClient {
    client: Client,
    endpoint: String,
}

impl QuoteClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    /// Use a preconfigured `reqwest::Client` (proxies, TLS, user agent).
    pub fn with_client(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }

    pub async fn fetch_random_quote(&self) -> Result<Quote, QuoteError> {
        debug!("GET {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(QuoteError::Network(format!(
                "quote request failed with status: {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        parse_quote(&body)
    }
}

impl Default for QuoteClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quotable_shape() {
        let body = br#"{"_id":"abc","content":"Hello","author":"World","tags":["x"],"length":5}"#;
        assert_eq!(parse_quote(body).unwrap(), Quote::new("abc", "Hello", "World"));
    }

    #[test]
    fn test_parse_normalized_shape() {
        let body = br#"{"id":"abc","text":"Hello","author":"World"}"#;
        assert_eq!(parse_quote(body).unwrap(), Quote::new("abc", "Hello", "World"));
    }

    #[test]
    fn test_parse_array_takes_first() {
        let body = br#"[{"_id":"a","content":"One","author":"X"},{"_id":"b","content":"Two","author":"Y"}]"#;
        assert_eq!(parse_quote(body).unwrap().id, "a");
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let body = br#"{"_id":"abc","content":"Hello"}"#;
        assert!(matches!(parse_quote(body), Err(QuoteError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_rejects_non_json_and_empty_list() {
        assert!(matches!(parse_quote(b"<html>"), Err(QuoteError::MalformedResponse(_))));
        assert!(matches!(parse_quote(b"[]"), Err(QuoteError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_rejects_blank_id() {
        let body = br#"{"_id":"  ","content":"Hello","author":"World"}"#;
        assert!(matches!(parse_quote(body), Err(QuoteError::MalformedResponse(_))));
    }

    #[test]
    fn test_share_url_encodes_quote() {
        let url = Quote::new("abc", "Be & do", "Me").share_url();
        assert!(url.starts_with("https://twitter.com/intent/tweet?related=braydentbabbitt&text="));
        assert!(url.contains("Be+%26+do"), "{url}");
        assert!(!url.contains(' '));
    }
}
