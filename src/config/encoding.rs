//! Signature encoding definitions.
//!
//! This module provides the [`SignatureEncoding`] enum describing how the
//! sender encodes the raw HMAC-SHA256 digest in the signature header.

use crate::error::ConfigError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Encoding of the HMAC digest carried in the signature header.
///
/// Shopify documents base64 for webhook signatures, which is the default.
/// Some deployments sign with lowercase hexadecimal instead.
///
/// # Example
///
/// ```rust
/// use shopify_webhook::SignatureEncoding;
///
/// assert_eq!(SignatureEncoding::default(), SignatureEncoding::Base64);
///
/// let encoding: SignatureEncoding = "hex".parse().unwrap();
/// assert_eq!(encoding, SignatureEncoding::Hex);
/// assert_eq!(encoding.to_string(), "hex");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SignatureEncoding {
    /// RFC 4648 standard base64 with padding.
    #[default]
    Base64,
    /// Lowercase hexadecimal.
    Hex,
}

impl SignatureEncoding {
    /// Encodes a raw digest into its header representation.
    #[must_use]
    pub fn encode(self, digest: &[u8]) -> String {
        match self {
            Self::Base64 => STANDARD.encode(digest),
            Self::Hex => hex::encode(digest),
        }
    }

    /// Decodes a header value into raw digest bytes.
    ///
    /// Returns `None` when the value is not valid in this encoding.
    #[must_use]
    pub fn decode(self, value: &str) -> Option<Vec<u8>> {
        match self {
            Self::Base64 => STANDARD.decode(value).ok(),
            Self::Hex => hex::decode(value).ok(),
        }
    }
}

impl fmt::Display for SignatureEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base64 => f.write_str("base64"),
            Self::Hex => f.write_str("hex"),
        }
    }
}

impl FromStr for SignatureEncoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "base64" => Ok(Self::Base64),
            "hex" => Ok(Self::Hex),
            _ => Err(ConfigError::InvalidSignatureEncoding { encoding: s }),
        }
    }
}

impl Serialize for SignatureEncoding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SignatureEncoding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_encoding_parses_known_values() {
        assert_eq!(
            "base64".parse::<SignatureEncoding>().unwrap(),
            SignatureEncoding::Base64
        );
        assert_eq!(
            " HEX ".parse::<SignatureEncoding>().unwrap(),
            SignatureEncoding::Hex
        );
    }

    #[test]
    fn test_signature_encoding_rejects_unknown() {
        let result = "base32".parse::<SignatureEncoding>();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSignatureEncoding { ref encoding }) if encoding == "base32"
        ));
    }

    #[test]
    fn test_signature_encoding_display_round_trips_through_parse() {
        for encoding in [SignatureEncoding::Base64, SignatureEncoding::Hex] {
            assert_eq!(encoding.to_string().parse::<SignatureEncoding>(), Ok(encoding));
        }
    }

    #[test]
    fn test_encode_matches_known_values() {
        // HMAC-SHA256("message", "key")
        let digest =
            hex::decode("6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a")
                .unwrap();

        assert_eq!(
            SignatureEncoding::Base64.encode(&digest),
            "bp7ym3X//Ft6uuUn1Y/a2y/kLnIZARl2kXNDBl9Y7Uo="
        );
        assert_eq!(
            SignatureEncoding::Hex.encode(&digest),
            "6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a"
        );
    }

    #[test]
    fn test_decode_rejects_malformed_values() {
        assert_eq!(SignatureEncoding::Base64.decode("7iASoA8WSbw19M/h+"), None);
        assert_eq!(SignatureEncoding::Base64.decode("not base64!"), None);
        assert_eq!(SignatureEncoding::Hex.decode("abc"), None);
        assert_eq!(SignatureEncoding::Hex.decode("zz"), None);
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&SignatureEncoding::Hex).unwrap();
        assert_eq!(json, r#""hex""#);

        let parsed: SignatureEncoding = serde_json::from_str(r#""base64""#).unwrap();
        assert_eq!(parsed, SignatureEncoding::Base64);

        let invalid: Result<SignatureEncoding, _> = serde_json::from_str(r#""rot13""#);
        assert!(invalid.is_err());
    }
}
