//! The request/response envelope.
//!
//! ```text
//! Request:  { method, params?, id?, jsonrpc? }
//! Success:  { result, id? }
//! Error:    { error: { code, message, details? }, id? }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RpcError;

/// Request identifier, echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    String(String),
    Number(i64),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<RequestId>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl Request {
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: None,
            id: None,
            method: method.into(),
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
}

impl Response {
    pub fn success(result: Value) -> Self {
        Self {
            jsonrpc: None,
            id: None,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(error: &RpcError) -> Self {
        Self {
            jsonrpc: None,
            id: None,
            result: None,
            error: Some(error.to_error_object()),
        }
    }

    pub fn from_result(result: Result<Value, RpcError>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(e) => Self::failure(&e),
        }
    }

    /// Echo the caller's `id` and `jsonrpc` marker.
    pub fn for_request(mut self, request: &Request) -> Self {
        self.id = request.id.clone();
        self.jsonrpc = request.jsonrpc.clone();
        self
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Parse one raw request body. Malformed JSON is a parse error; well-formed
/// JSON without a string `method` is an invalid request.
pub fn parse_request(raw: &[u8]) -> Result<Request, RpcError> {
    let value: Value = serde_json::from_slice(raw).map_err(|e| RpcError::Parse(e.to_string()))?;
    serde_json::from_value(value).map_err(|e| RpcError::InvalidRequest(e.to_string()))
}
