//! The closed set of methods the dispatcher knows.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Initialize,
    GenerateWallet,
    GetBalance,
    GetAccountInfo,
    GetPendingBlocks,
    ConvertToDisplayUnit,
    ConvertFromDisplayUnit,
    Send,
    ReceiveAll,
}

impl Method {
    pub const ALL: [Method; 9] = [
        Method::Initialize,
        Method::GenerateWallet,
        Method::GetBalance,
        Method::GetAccountInfo,
        Method::GetPendingBlocks,
        Method::ConvertToDisplayUnit,
        Method::ConvertFromDisplayUnit,
        Method::Send,
        Method::ReceiveAll,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Method::Initialize => "initialize",
            Method::GenerateWallet => "generateWallet",
            Method::GetBalance => "getBalance",
            Method::GetAccountInfo => "getAccountInfo",
            Method::GetPendingBlocks => "getPendingBlocks",
            Method::ConvertToDisplayUnit => "convertToDisplayUnit",
            Method::ConvertFromDisplayUnit => "convertFromDisplayUnit",
            Method::Send => "send",
            Method::ReceiveAll => "receiveAll",
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Methods that create keys or move funds. Left unregistered in read-only
    /// mode.
    pub fn is_mutating(&self) -> bool {
        matches!(self, Method::GenerateWallet | Method::Send | Method::ReceiveAll)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
