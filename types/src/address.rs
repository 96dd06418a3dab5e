//! Account address type with `nano_` prefix.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::TypesError;

/// A ledger account address, prefixed with `nano_` (or the legacy `xrb_`).
///
/// Derived from the account's public key via base32 encoding plus a Blake2b
/// checksum. Full checksum validation lives in `nano_mcp_crypto::address`;
/// this type only guarantees the prefix and character shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Account(String);

impl Account {
    /// The standard prefix for all addresses.
    pub const PREFIX: &'static str = "nano_";
    /// Prefix still accepted from older wallets.
    pub const LEGACY_PREFIX: &'static str = "xrb_";

    /// Wrap a raw address string after a shallow shape check.
    pub fn new(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        let body = s
            .strip_prefix(Self::PREFIX)
            .or_else(|| s.strip_prefix(Self::LEGACY_PREFIX))
            .ok_or_else(|| TypesError::InvalidAddress(s.clone()))?;
        if body.is_empty() || !body.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(TypesError::InvalidAddress(s));
        }
        Ok(Self(s))
    }

    /// Prefix an encoded body with `nano_`.
    ///
    /// For address encoders, whose base32 output is alphanumeric by
    /// construction; anything else should go through [`Account::new`].
    pub fn from_encoded_body(body: &str) -> Self {
        Self(format!("{}{body}", Self::PREFIX))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The encoded part after the prefix.
    pub fn body(&self) -> &str {
        self.0
            .strip_prefix(Self::PREFIX)
            .or_else(|| self.0.strip_prefix(Self::LEGACY_PREFIX))
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Account {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Account {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Account::new(s).map_err(serde::de::Error::custom)
    }
}
