//! Raw token amounts.
//!
//! Amounts are arbitrary-precision unsigned integers in the ledger's smallest
//! unit ("raw"). They cross the wire as decimal strings and never pass through
//! floating point, since ordinary balances exceed both 2^53 and 2^64.
//!
//! One display unit is 10^30 raw.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use crate::TypesError;

/// Number of decimal places between a display unit and raw.
pub const DISPLAY_DECIMALS: usize = 30;

/// An amount in raw units.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RawAmount(BigUint);

fn display_scale() -> BigUint {
    BigUint::from(10u32).pow(DISPLAY_DECIMALS as u32)
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

impl RawAmount {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// One display unit (10^30 raw).
    pub fn one_display_unit() -> Self {
        Self(display_scale())
    }

    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        if other.0 > self.0 {
            None
        } else {
            Some(Self(&self.0 - &other.0))
        }
    }

    /// Parse a display-unit decimal string (e.g. `"1.23"`) into raw.
    ///
    /// At most [`DISPLAY_DECIMALS`] fractional digits are accepted; anything
    /// finer than one raw is rejected rather than rounded.
    pub fn from_display(display: &str) -> Result<Self, TypesError> {
        let s = display.trim();
        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if (int_part.is_empty() && frac_part.is_empty())
            || !all_digits(int_part)
            || !all_digits(frac_part)
        {
            return Err(TypesError::InvalidAmount(display.to_string()));
        }
        if frac_part.len() > DISPLAY_DECIMALS {
            return Err(TypesError::TooPrecise {
                max: DISPLAY_DECIMALS,
            });
        }

        let int_value = if int_part.is_empty() {
            BigUint::zero()
        } else {
            parse_digits(int_part)?
        };
        let frac_value = if frac_part.is_empty() {
            BigUint::zero()
        } else {
            let padded = format!("{frac_part:0<width$}", width = DISPLAY_DECIMALS);
            parse_digits(&padded)?
        };
        Ok(Self(int_value * display_scale() + frac_value))
    }

    /// Render as a normalized display-unit decimal string: no leading zeros in
    /// the integer part, no trailing zeros in the fraction, no bare `.`.
    pub fn to_display(&self) -> String {
        let scale = display_scale();
        let int_value = &self.0 / &scale;
        let frac_value = &self.0 % &scale;
        if frac_value.is_zero() {
            return int_value.to_string();
        }
        let frac = format!(
            "{:0>width$}",
            frac_value.to_string(),
            width = DISPLAY_DECIMALS
        );
        format!("{int_value}.{}", frac.trim_end_matches('0'))
    }

    /// Encode as the 16-byte big-endian balance field of a state block.
    pub fn to_be_bytes_16(&self) -> Result<[u8; 16], TypesError> {
        let bytes = self.0.to_bytes_be();
        if bytes.len() > 16 {
            return Err(TypesError::BalanceOverflow(self.to_string()));
        }
        let mut out = [0u8; 16];
        out[16 - bytes.len()..].copy_from_slice(&bytes);
        Ok(out)
    }

    /// The largest balance a state block can carry.
    pub fn max_balance() -> Self {
        Self((BigUint::one() << 128u32) - BigUint::one())
    }
}

fn parse_digits(s: &str) -> Result<BigUint, TypesError> {
    BigUint::parse_bytes(s.as_bytes(), 10).ok_or_else(|| TypesError::InvalidAmount(s.to_string()))
}

impl FromStr for RawAmount {
    type Err = TypesError;

    /// Parse a raw decimal integer string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !all_digits(s) {
            return Err(TypesError::InvalidAmount(s.to_string()));
        }
        parse_digits(s).map(Self)
    }
}

impl From<u128> for RawAmount {
    fn from(raw: u128) -> Self {
        Self(BigUint::from(raw))
    }
}

impl Add for RawAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a RawAmount> for &'a RawAmount {
    type Output = RawAmount;
    fn add(self, rhs: &'a RawAmount) -> RawAmount {
        RawAmount(&self.0 + &rhs.0)
    }
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for RawAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RawAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawVisitor;

        impl serde::de::Visitor<'_> for RawVisitor {
            type Value = RawAmount;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a raw amount as a decimal string")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(RawAmount(BigUint::from(v)))
            }
        }

        deserializer.deserialize_any(RawVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: &str = "1000000000000000000000000000000";

    #[test]
    fn one_display_unit_is_ten_to_the_thirty() {
        assert_eq!(RawAmount::from_display("1").unwrap().to_string(), ONE);
        assert_eq!(RawAmount::from_str(ONE).unwrap().to_display(), "1");
    }

    #[test]
    fn fractional_amounts_keep_precision() {
        let raw = RawAmount::from_display("1.23").unwrap();
        assert_eq!(raw.to_string(), "1230000000000000000000000000000");
        assert_eq!(raw.to_display(), "1.23");

        let one_raw = RawAmount::from_display("0.000000000000000000000000000001").unwrap();
        assert_eq!(one_raw, RawAmount::from(1));
        assert_eq!(one_raw.to_display(), "0.000000000000000000000000000001");
    }

    #[test]
    fn display_is_normalized() {
        let raw = RawAmount::from_display("007.500").unwrap();
        assert_eq!(raw.to_display(), "7.5");
        assert_eq!(RawAmount::from_display(".5").unwrap().to_display(), "0.5");
        assert_eq!(RawAmount::from_display("2.").unwrap().to_display(), "2");
        assert_eq!(RawAmount::zero().to_display(), "0");
    }

    #[test]
    fn rejects_too_many_fractional_digits() {
        let too_fine = format!("0.{}", "1".repeat(DISPLAY_DECIMALS + 1));
        assert_eq!(
            RawAmount::from_display(&too_fine),
            Err(TypesError::TooPrecise {
                max: DISPLAY_DECIMALS
            })
        );
    }

    #[test]
    fn rejects_signs_exponents_and_garbage() {
        for bad in ["-1", "+1", "1e5", "", ".", "1.2.3", "abc", " "] {
            assert!(RawAmount::from_display(bad).is_err(), "{bad:?} should fail");
        }
        for bad in ["-1", "1.5", "", "0x10"] {
            assert!(bad.parse::<RawAmount>().is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn addition_above_two_pow_53_is_exact() {
        let balance: RawAmount = "9007199254740993000000000000000".parse().unwrap();
        let amount: RawAmount = "1".parse().unwrap();
        assert_eq!(
            (&balance + &amount).to_string(),
            "9007199254740993000000000000001"
        );
    }

    #[test]
    fn checked_sub_refuses_underflow() {
        let five = RawAmount::from(5);
        let six = RawAmount::from(6);
        assert_eq!(six.checked_sub(&five), Some(RawAmount::from(1)));
        assert_eq!(five.checked_sub(&six), None);
        assert_eq!(five.checked_sub(&five), Some(RawAmount::zero()));
    }

    #[test]
    fn balance_field_encoding() {
        let bytes = RawAmount::from(0x0102u128).to_be_bytes_16().unwrap();
        assert_eq!(&bytes[14..], &[0x01, 0x02]);
        assert!(bytes[..14].iter().all(|b| *b == 0));

        assert!(RawAmount::max_balance().to_be_bytes_16().is_ok());
        let too_big = &RawAmount::max_balance() + &RawAmount::from(1);
        assert!(matches!(
            too_big.to_be_bytes_16(),
            Err(TypesError::BalanceOverflow(_))
        ));
    }

    #[test]
    fn serde_as_decimal_string() {
        let raw: RawAmount = ONE.parse().unwrap();
        assert_eq!(serde_json::to_string(&raw).unwrap(), format!("\"{ONE}\""));
        let from_number: RawAmount = serde_json::from_str("42").unwrap();
        assert_eq!(from_number, RawAmount::from(42));
    }
}
