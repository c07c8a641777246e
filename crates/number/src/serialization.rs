//! `serde_with` adapters for `U256` values.
//!
//! Amounts travel as arbitrary-precision decimal strings and packed words
//! (exchange rates, locations) travel as 64-character hex strings. Both
//! adapters reject anything that does not fit in 256 bits.

use {
    primitive_types::U256,
    serde::{Deserialize, Deserializer, Serializer, de},
    serde_with::{DeserializeAs, SerializeAs},
    std::borrow::Cow,
};

/// Serializes a `U256` as a decimal string, e.g. `"1000000000000000000"`.
pub struct DecimalU256;

impl<'de> DeserializeAs<'de, U256> for DecimalU256 {
    fn deserialize_as<D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Cow::<str>::deserialize(deserializer)?;
        parse_decimal(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid decimal amount {s:?}")))
    }
}

impl SerializeAs<U256> for DecimalU256 {
    fn serialize_as<S>(source: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(source)
    }
}

/// Serializes a `U256` as a full 32-byte word: `0x` followed by exactly 64
/// lower-case hex digits. Deserialization accepts an optional `0x` prefix and
/// any casing, and left-pads shorter inputs.
pub struct HexU256;

impl<'de> DeserializeAs<'de, U256> for HexU256 {
    fn deserialize_as<D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Cow::<str>::deserialize(deserializer)?;
        parse_hex_word(&s).ok_or_else(|| de::Error::custom(format!("invalid hex word {s:?}")))
    }
}

impl SerializeAs<U256> for HexU256 {
    fn serialize_as<S>(source: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_hex_word(source))
    }
}

/// Parses a non-empty string of decimal digits. Signs, whitespace and
/// fractional parts are rejected.
pub fn parse_decimal(s: &str) -> Option<U256> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    U256::from_dec_str(s).ok()
}

/// Parses a hex word of at most 64 digits, with or without `0x` prefix.
pub fn parse_hex_word(s: &str) -> Option<U256> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() || digits.len() > 64 {
        return None;
    }

    let padded = format!("{digits:0>64}");
    let mut word = [0_u8; 32];
    hex::decode_to_slice(padded, &mut word).ok()?;
    Some(U256::from_big_endian(&word))
}

/// Formats a value as a `0x`-prefixed, zero-padded, 64-digit hex word.
pub fn format_hex_word(value: &U256) -> String {
    let mut word = [0_u8; 32];
    value.to_big_endian(&mut word);
    format!("0x{}", hex::encode(word))
}
