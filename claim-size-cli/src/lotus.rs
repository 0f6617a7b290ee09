//! Minimal Lotus full-node JSON-RPC client.

use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::address::ProviderAddress;
use crate::claims::Claim;
use crate::endpoint::ApiInfo;
use crate::error::LotusError;

pub type ClaimId = u64;

#[derive(Debug, Serialize)]
pub(crate) struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: Vec<Value>,
    id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JsonRpcResponse {
    /// `None` when the key is absent, `Some(Value::Null)` for an explicit null.
    #[serde(default, deserialize_with = "present")]
    result: Option<Value>,
    error: Option<JsonRpcErrorObject>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
pub(crate) struct JsonRpcErrorObject {
    code: i64,
    message: String,
}

/// Generates a JSON-RPC request for Filecoin.StateGetClaims at the chain head.
pub(crate) fn state_get_claims_request(provider: &ProviderAddress) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".to_owned(),
        method: "Filecoin.StateGetClaims".to_owned(),
        // Empty tipset key selects the current head.
        params: vec![json!(provider.as_str()), Value::Null],
        id: 1,
    }
}

pub struct LotusClient {
    http: reqwest::Client,
    info: ApiInfo,
}

impl LotusClient {
    pub fn new(info: ApiInfo) -> Self {
        Self {
            http: reqwest::Client::new(),
            info,
        }
    }

    pub fn url(&self) -> &str {
        &self.info.url
    }

    /// Fetch every claim held by `provider`, ordered by claim id.
    pub async fn state_get_claims(
        &self,
        provider: &ProviderAddress,
    ) -> Result<Vec<Claim>, LotusError> {
        let claims: Option<HashMap<String, Claim>> =
            self.call(&state_get_claims_request(provider)).await?;

        let mut by_id = BTreeMap::new();
        for (id, claim) in claims.unwrap_or_default() {
            let id: ClaimId = id.parse().map_err(|_| LotusError::InvalidClaimId(id))?;
            by_id.insert(id, claim);
        }
        Ok(by_id.into_values().collect())
    }

    async fn call<T: DeserializeOwned>(
        &self,
        request: &JsonRpcRequest,
    ) -> Result<Option<T>, LotusError> {
        tracing::debug!("POST {} {}", self.info.url, request.method);

        let mut builder = self.http.post(&self.info.url).json(request);
        if let Some(token) = &self.info.token {
            builder = builder.bearer_auth(token);
        }

        let transport = |source| LotusError::Transport {
            url: self.info.url.clone(),
            source,
        };
        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        let parsed = serde_json::from_str::<JsonRpcResponse>(&body);
        match parsed {
            Ok(JsonRpcResponse {
                error: Some(error), ..
            }) => Err(LotusError::Rpc {
                code: error.code,
                message: error.message,
            }),
            _ if !status.is_success() => Err(LotusError::Status {
                status,
                body: body.trim().to_string(),
            }),
            Ok(JsonRpcResponse { result: None, .. }) => Err(LotusError::MissingResult),
            Ok(JsonRpcResponse {
                result: Some(result),
                ..
            }) => Ok(serde_json::from_value(result)?),
            Err(e) => Err(LotusError::Decode(e)),
        }
    }
}
