//! Parse Server cloud-function gateway.
//!
//! [`ParseGateway::invoke`] is the only place that talks HTTP.  It POSTs the
//! parameters to `{server}/functions/{name}` and hands back the `result`
//! field of the reply.  [`decode_records`] then turns that payload into typed
//! records; it is a pure function so tests can exercise decoding without a
//! server.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{GatewayError, Result};
use crate::record::{MalformedPolicy, Record};

const APPLICATION_ID_HEADER: &str = "X-Parse-Application-Id";
const CLIENT_KEY_HEADER: &str = "X-Parse-Client-Key";

/// Error body Parse sends with non-2xx replies.
#[derive(Debug, Deserialize)]
struct ParseErrorBody {
    code: i64,
    error: String,
}

/// Client for one Parse Server application.
pub struct ParseGateway {
    /// Base URL including the mount path, e.g. `https://host/parse`.
    server_url: String,
    application_id: String,
    client_key: String,
    /// Replaces `Record::FUNCTION` when set.
    function_override: Option<String>,
    policy: MalformedPolicy,
    client: reqwest::Client,
}

impl ParseGateway {
    pub fn new(
        server_url: impl Into<String>,
        application_id: impl Into<String>,
        client_key: impl Into<String>,
    ) -> Self {
        Self {
            server_url: server_url.into().trim_end_matches('/').to_string(),
            application_id: application_id.into(),
            client_key: client_key.into(),
            function_override: None,
            policy: MalformedPolicy::default(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_function(mut self, function: Option<String>) -> Self {
        self.function_override = function;
        self
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Call a cloud function and return its `result` payload.
    pub async fn invoke(&self, function: &str, params: Map<String, Value>) -> Result<Value> {
        let url = format!("{}/functions/{}", self.server_url, function);
        tracing::debug!(%url, "invoking cloud function");

        let response = self
            .client
            .post(&url)
            .header(APPLICATION_ID_HEADER, &self.application_id)
            .header(CLIENT_KEY_HEADER, &self.client_key)
            .json(&Value::Object(params))
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(match serde_json::from_slice::<ParseErrorBody>(&body) {
                Ok(err) => GatewayError::Backend {
                    code: err.code,
                    message: err.error,
                },
                Err(_) => GatewayError::Status(status),
            });
        }

        let reply: Value = serde_json::from_slice(&body)
            .map_err(|e| GatewayError::UnexpectedShape(format!("reply is not JSON: {e}")))?;

        match reply {
            Value::Object(mut fields) => fields.remove("result").ok_or_else(|| {
                GatewayError::UnexpectedShape("reply has no `result` field".into())
            }),
            _ => Err(GatewayError::UnexpectedShape("reply is not a JSON object".into())),
        }
    }

    /// Call the listing function for `R` and decode every entry.
    pub async fn fetch_all<R: Record>(&self) -> Result<Vec<R>> {
        let function = self.function_override.as_deref().unwrap_or(R::FUNCTION);
        let payload = self.invoke(function, Map::new()).await?;
        let records = decode_records::<R>(payload, self.policy)?;
        tracing::info!(function, count = records.len(), "records fetched");
        Ok(records)
    }
}

/// Decode a cloud-function payload into records.
///
/// A payload of the wrong structure fails as a whole.  Individual entries
/// that fail to decode are dropped or fail the call depending on `policy`.
pub fn decode_records<R: Record>(payload: Value, policy: MalformedPolicy) -> Result<Vec<R>> {
    let entries = R::entries(payload)?;
    let mut records = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        match R::decode(entry) {
            Ok(record) => records.push(record),
            Err(reason) => match policy {
                MalformedPolicy::Skip => {
                    tracing::warn!(index, %reason, "skipping malformed record");
                }
                MalformedPolicy::Reject => {
                    return Err(GatewayError::MalformedRecord { index, reason });
                }
            },
        }
    }

    Ok(records)
}
