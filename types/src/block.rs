//! State blocks: the single block format used for open, receive, and send.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::{Account, BlockHash, RawAmount, Signature, WorkNonce};

/// What a state block does to its account chain. Passed to the node as the
/// `subtype` of a `process` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockSubtype {
    /// First block of an account; `previous` is the zero hash.
    Open,
    /// Pockets a pending block; `link` is the source block hash.
    Receive,
    /// Moves funds out; `link` is the recipient's public key.
    Send,
}

impl BlockSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockSubtype::Open => "open",
            BlockSubtype::Receive => "receive",
            BlockSubtype::Send => "send",
        }
    }
}

impl fmt::Display for BlockSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BlockSubtype {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The unsigned fields of a state block.
///
/// `balance` is the account balance *after* this block, never a delta.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateBlock {
    pub account: Account,
    pub previous: BlockHash,
    pub representative: Account,
    pub balance: RawAmount,
    pub link: BlockHash,
}

/// A state block with its signature and work, ready for submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedBlock {
    pub block: StateBlock,
    pub subtype: BlockSubtype,
    /// Hash of the unsigned fields (what was signed).
    pub hash: BlockHash,
    pub signature: Signature,
    pub work: WorkNonce,
}

/// Serializes to the node's JSON block shape (`json_block` form).
impl Serialize for SignedBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("StateBlock", 8)?;
        s.serialize_field("type", "state")?;
        s.serialize_field("account", &self.block.account)?;
        s.serialize_field("previous", &self.block.previous)?;
        s.serialize_field("representative", &self.block.representative)?;
        s.serialize_field("balance", &self.block.balance)?;
        s.serialize_field("link", &self.block.link)?;
        s.serialize_field("signature", &self.signature.to_string())?;
        s.serialize_field("work", &self.work.to_string())?;
        s.end()
    }
}
