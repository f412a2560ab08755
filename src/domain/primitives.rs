use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 20-byte account/contract address, displayed as lowercase `0x...` hex.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 20]);

impl Address {
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn parse(s: &str) -> anyhow::Result<Self> {
        let trimmed = s.trim();
        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if hex_part.len() != 40 {
            anyhow::bail!("address must be 20 bytes of hex: {}", s);
        }
        let bytes = hex::decode(hex_part)?;
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        if arr == [0u8; 20] {
            anyhow::bail!("address is the zero address");
        }
        Ok(Address(arr))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for Address {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Address::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// 32-byte hash word, displayed as lowercase `0x...` hex.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bytes32(pub [u8; 32]);

impl Bytes32 {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        let trimmed = s.trim();
        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if hex_part.len() != 64 {
            anyhow::bail!("expected 32 bytes of hex: {}", s);
        }
        let bytes = hex::decode(hex_part)?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Bytes32(arr))
    }
}

impl fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for Bytes32 {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bytes32::parse(s)
    }
}

impl Serialize for Bytes32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Bytes32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Bytes32::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Token quantity in base units. Serialized as a decimal string because
/// 18-decimal supplies overflow JSON's safe integer range.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_raw(raw: u128) -> Self {
        Amount(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v: u128 = s.trim().parse()?;
        Ok(Amount(v))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a human token quantity ("100000", "1.5") into base units.
pub fn parse_units(s: &str, decimals: u8) -> anyhow::Result<Amount> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        anyhow::bail!("empty amount");
    }
    let scale = 10u128
        .checked_pow(decimals as u32)
        .ok_or_else(|| anyhow::anyhow!("decimals out of range: {}", decimals))?;

    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (trimmed, ""),
    };
    if frac_part.len() > decimals as usize {
        anyhow::bail!(
            "amount has more than {} fractional digits: {}",
            decimals,
            s
        );
    }

    let int_units: u128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse()?
    };
    let frac_units: u128 = if frac_part.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac_part, width = decimals as usize);
        padded.parse()?
    };

    int_units
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_units))
        .map(Amount)
        .ok_or_else(|| anyhow::anyhow!("amount overflows: {}", s))
}

/// Render base units as a human token quantity, trimming trailing zeros.
pub fn format_units(amount: Amount, decimals: u8) -> String {
    let scale = 10u128.pow(decimals as u32);
    let int_part = amount.raw() / scale;
    let frac_part = amount.raw() % scale;
    if frac_part == 0 {
        return int_part.to_string();
    }
    let frac = format!("{:0>width$}", frac_part, width = decimals as usize);
    format!("{}.{}", int_part, frac.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::{format_units, parse_units, Address, Amount, Bytes32};

    #[test]
    fn address_parsing_accepts_prefixed_and_bare_hex() {
        let a = Address::parse("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap();
        let b = Address::parse("f39fd6e51aad88f6f4ce6ab8827279cfffb92266").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
    }

    #[test]
    fn address_parsing_rejects_zero_and_short_input() {
        assert!(Address::parse("0x0000000000000000000000000000000000000000").is_err());
        assert!(Address::parse("0x1234").is_err());
        assert!(Address::parse("not-an-address").is_err());
    }

    #[test]
    fn bytes32_round_trips_through_display() {
        let h = Bytes32([7u8; 32]);
        assert_eq!(Bytes32::parse(&h.to_string()).unwrap(), h);
    }

    #[test]
    fn parse_units_scales_whole_and_fractional_amounts() {
        assert_eq!(
            parse_units("40", 18).unwrap(),
            Amount::from_raw(40_000_000_000_000_000_000)
        );
        assert_eq!(
            parse_units("1.5", 18).unwrap(),
            Amount::from_raw(1_500_000_000_000_000_000)
        );
        assert_eq!(parse_units("0", 18).unwrap(), Amount::ZERO);
    }

    #[test]
    fn parse_units_rejects_excess_precision() {
        assert!(parse_units("1.0000000000000000001", 18).is_err());
        assert!(parse_units("", 18).is_err());
    }

    #[test]
    fn format_units_trims_trailing_zeros() {
        assert_eq!(
            format_units(Amount::from_raw(1_500_000_000_000_000_000), 18),
            "1.5"
        );
        assert_eq!(
            format_units(Amount::from_raw(40_000_000_000_000_000_000), 18),
            "40"
        );
    }

    #[test]
    fn amount_serializes_as_decimal_string() {
        let v = Amount::from_raw(500_000_000_000_000_000_000_000);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "\"500000000000000000000000\"");
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
