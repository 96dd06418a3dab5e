//! Proof-of-work nonce.

use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// A work nonce. Rendered on the wire as 16 hex characters (big-endian).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorkNonce(pub u64);

impl fmt::Display for WorkNonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for WorkNonce {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.len() > 16 {
            return Err(TypesError::InvalidWork(s.to_string()));
        }
        u64::from_str_radix(s, 16)
            .map(WorkNonce)
            .map_err(|_| TypesError::InvalidWork(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_sixteen_hex_chars() {
        assert_eq!(WorkNonce(0x2bf2_9ef0).to_string(), "000000002bf29ef0");
        let parsed: WorkNonce = "2bf29ef00786a6bc".parse().unwrap();
        assert_eq!(parsed.0, 0x2bf29ef00786a6bc);
    }

    #[test]
    fn rejects_empty_and_oversized() {
        assert!("".parse::<WorkNonce>().is_err());
        assert!("0123456789abcdef0".parse::<WorkNonce>().is_err());
        assert!("xyz".parse::<WorkNonce>().is_err());
    }
}
