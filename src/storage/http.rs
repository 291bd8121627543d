use std::{marker::PhantomData, time::Duration};

use async_trait::async_trait;
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client, RequestBuilder,
};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::{RecordStore, StoredRecord};
use crate::{
    config::ApiConfig,
    domain::{Page, PageRequest},
    errors::{CommunityError, Result},
};

pub const NO_ERROR_DETAILS: &str = "No error details returned from server";

/// Best human-readable message in an error response body: the JSON
/// `message`, then `error`, then the JSON itself; non-JSON bodies are
/// returned as text.
pub fn extract_error_detail(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return NO_ERROR_DETAILS.to_string();
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(json) => ["message", "error"]
            .iter()
            .find_map(|key| json.get(key).and_then(detail_text))
            .unwrap_or_else(|| json.to_string()),
        Err(_) => trimmed.to_string(),
    }
}

/// Text for a `message`/`error` value; falsy values (null, blank, `0`, `false`) are skipped.
fn detail_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// REST-backed store. Lists and reads go to `{prefix}/{collection}`, writes
/// to `{prefix}/{item}` with the identifier carried in the body.
pub struct HttpStore<R> {
    client: Client,
    collection_url: Url,
    item_url: Url,
    _record: PhantomData<fn() -> R>,
}

impl<R: StoredRecord> HttpStore<R> {
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let base = api.validated_base()?;
        let root = format!(
            "{}{}",
            base.as_str().trim_end_matches('/'),
            api.path_prefix.trim_end_matches('/')
        );
        let endpoint = |segment: &str| {
            Url::parse(&format!("{root}/{segment}"))
                .map_err(|err| CommunityError::Config(format!("invalid endpoint `{root}/{segment}`: {err}")))
        };

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(api.timeout_secs.max(1)))
            .build()
            .map_err(|err| CommunityError::Config(format!("could not build HTTP client: {err}")))?;

        Ok(Self {
            client,
            collection_url: endpoint(R::NAMES.collection)?,
            item_url: endpoint(R::NAMES.item)?,
            _record: PhantomData,
        })
    }

    fn record_url(&self, id: &str) -> Result<Url> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|_| CommunityError::Config(format!("`{}` cannot take a path", self.collection_url)))?
            .push(id);
        Ok(url)
    }

    /// Sends the request and returns the body of a 2xx response.
    async fn execute(&self, request: RequestBuilder, action: &'static str) -> Result<String> {
        let response = request.send().await.map_err(|err| {
            warn!(action, error = %err, "request failed before a response");
            CommunityError::Network(err.to_string())
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| CommunityError::Network(err.to_string()))?;
        if !status.is_success() {
            let detail = extract_error_detail(&body);
            warn!(action, status = status.as_u16(), %detail, "request rejected");
            return Err(CommunityError::Remote {
                status: status.as_u16(),
                detail,
            });
        }
        debug!(action, status = status.as_u16(), bytes = body.len(), "request succeeded");
        Ok(body)
    }

    fn decode(body: &str) -> Result<R> {
        serde_json::from_str(body).map_err(|err| {
            CommunityError::Decode(format!("{} response: {err}", R::NAMES.label))
        })
    }

    /// Saved record from a write response. An empty body echoes what was sent.
    fn decode_write(body: &str, sent: &R) -> Result<R> {
        if body.trim().is_empty() {
            Ok(sent.clone())
        } else {
            Self::decode(body)
        }
    }
}

#[async_trait]
impl<R: StoredRecord> RecordStore<R> for HttpStore<R> {
    async fn list(&self, request: PageRequest) -> Result<Page<R>> {
        let call = self.client.get(self.collection_url.clone()).query(&[
            ("page", request.page.to_string()),
            ("size", request.size.to_string()),
        ]);
        let body = self.execute(call, "list").await?;
        Page::from_json(&body, request)
    }

    async fn get(&self, id: &str) -> Result<R> {
        let call = self.client.get(self.record_url(id)?);
        let body = self.execute(call, "get").await?;
        Self::decode(&body)
    }

    async fn create(&self, record: &R) -> Result<R> {
        let call = self.client.post(self.item_url.clone()).json(record);
        let body = self.execute(call, "create").await?;
        Self::decode_write(&body, record)
    }

    async fn update(&self, id: &str, record: &R) -> Result<R> {
        debug!(resource = R::NAMES.label, %id, "updating record");
        let call = self.client.put(self.item_url.clone()).json(record);
        let body = self.execute(call, "update").await?;
        Self::decode_write(&body, record)
    }

    fn describe(&self) -> String {
        self.collection_url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_wins_over_error() {
        assert_eq!(
            extract_error_detail(r#"{"message":"duplicate email","error":"Conflict"}"#),
            "duplicate email"
        );
        assert_eq!(extract_error_detail(r#"{"error":"Bad Request"}"#), "Bad Request");
    }

    #[test]
    fn json_without_known_keys_is_echoed() {
        assert_eq!(
            extract_error_detail(r#"{"status":500}"#),
            r#"{"status":500}"#
        );
    }

    #[test]
    fn non_string_details_are_surfaced() {
        assert_eq!(extract_error_detail(r#"{"message":42}"#), "42");
        assert_eq!(
            extract_error_detail(r#"{"message":null,"error":true}"#),
            "true"
        );
        assert_eq!(extract_error_detail(r#"{"error":0}"#), r#"{"error":0}"#);
    }

    #[test]
    fn plain_text_and_empty_bodies() {
        assert_eq!(extract_error_detail("Gateway Timeout\n"), "Gateway Timeout");
        assert_eq!(extract_error_detail("   "), NO_ERROR_DETAILS);
    }
}
