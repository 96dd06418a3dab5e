//! Parameter extraction.
//!
//! Params arrive either as an object keyed by name or as a positional array;
//! each accessor takes both the name and the position. Every failure here is
//! an invalid-params error and happens before any network call.

use nano_mcp_types::RawAmount;
use serde_json::Value;

use crate::error::RpcError;

pub(crate) struct Params<'a> {
    value: &'a Value,
}

impl<'a> Params<'a> {
    pub(crate) fn new(value: &'a Value) -> Result<Self, RpcError> {
        match value {
            Value::Object(_) | Value::Array(_) | Value::Null => Ok(Self { value }),
            _ => Err(RpcError::InvalidParams(
                "params must be an object or an array".into(),
            )),
        }
    }

    fn get(&self, name: &str, index: usize) -> Option<&'a Value> {
        let found = match self.value {
            Value::Object(map) => map.get(name),
            Value::Array(items) => items.get(index),
            _ => None,
        };
        found.filter(|v| !v.is_null())
    }

    pub(crate) fn required_str(&self, name: &str, index: usize) -> Result<&'a str, RpcError> {
        self.optional_str(name, index)?
            .ok_or_else(|| RpcError::InvalidParams(format!("missing parameter: {name}")))
    }

    pub(crate) fn optional_str(&self, name: &str, index: usize) -> Result<Option<&'a str>, RpcError> {
        match self.get(name, index) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(RpcError::InvalidParams(format!("{name} must be a string"))),
        }
    }

    pub(crate) fn optional_u64(&self, name: &str, index: usize) -> Result<Option<u64>, RpcError> {
        let invalid = || RpcError::InvalidParams(format!("{name} must be a non-negative integer"));
        match self.get(name, index) {
            None => Ok(None),
            Some(Value::Number(n)) => n.as_u64().map(Some).ok_or_else(invalid),
            Some(Value::String(s)) => s.trim().parse().map(Some).map_err(|_| invalid()),
            Some(_) => Err(invalid()),
        }
    }

    /// A raw amount given as a decimal string or a JSON integer.
    pub(crate) fn raw_amount(&self, name: &str, index: usize) -> Result<Option<RawAmount>, RpcError> {
        let invalid = |detail: String| RpcError::InvalidParams(format!("{name}: {detail}"));
        match self.get(name, index) {
            None => Ok(None),
            Some(Value::String(s)) => s.parse().map(Some).map_err(|e| invalid(format!("{e}"))),
            Some(Value::Number(n)) => n
                .as_u64()
                .map(|v| Some(RawAmount::from(u128::from(v))))
                .ok_or_else(|| invalid("must be a non-negative integer".into())),
            Some(_) => Err(invalid("must be a string".into())),
        }
    }

    pub(crate) fn required_raw_amount(&self, name: &str, index: usize) -> Result<RawAmount, RpcError> {
        self.raw_amount(name, index)?
            .ok_or_else(|| RpcError::InvalidParams(format!("missing parameter: {name}")))
    }

    /// A display-unit amount given as a decimal string or a JSON number.
    ///
    /// JSON numbers are taken by their literal text, so `1.5` is exact but
    /// exponent forms are rejected.
    pub(crate) fn required_display_amount(&self, name: &str, index: usize) -> Result<RawAmount, RpcError> {
        let text = match self.get(name, index) {
            None => return Err(RpcError::InvalidParams(format!("missing parameter: {name}"))),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(_) => return Err(RpcError::InvalidParams(format!("{name} must be a string"))),
        };
        RawAmount::from_display(&text).map_err(|e| RpcError::InvalidParams(format!("{name}: {e}")))
    }
}

/// Unit of the `amount` passed to `send`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AmountUnit {
    Raw,
    Nano,
}

impl AmountUnit {
    pub(crate) fn parse(unit: Option<&str>) -> Result<Self, RpcError> {
        match unit.map(str::to_ascii_lowercase).as_deref() {
            None | Some("raw") => Ok(AmountUnit::Raw),
            Some("nano") => Ok(AmountUnit::Nano),
            Some(other) => Err(RpcError::InvalidParams(format!(
                "unit must be \"raw\" or \"nano\", got \"{other}\""
            ))),
        }
    }
}
