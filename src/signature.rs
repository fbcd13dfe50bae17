use crate::hex_bytes;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A signature over a transaction's signing bytes, attached to one of its inputs.
#[derive(Debug, Clone, Default, Hash, Serialize, Deserialize, Eq, PartialEq)]
pub struct Signature(#[serde(with = "hex_bytes")] Vec<u8>);

impl Signature {
    pub fn new(signature: Vec<u8>) -> Self {
        Self(signature)
    }

    /// Placeholder for an input that has not been signed yet.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0[..]
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_signature_has_no_bytes() {
        assert!(Signature::empty().as_slice().is_empty());
        assert_eq!(Signature::empty(), Signature::new(Vec::new()));
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(Signature::new(vec![0x0f, 0xf0]).to_string(), "0ff0");
    }

    #[test]
    fn json_carries_hex_string() {
        let signature = Signature::new(vec![0xbe, 0xef]);
        let json = serde_json::to_string(&signature).unwrap();
        assert_eq!(json, "\"beef\"");
        assert_eq!(serde_json::from_str::<Signature>(&json).unwrap(), signature);
    }

    #[test]
    fn unsigned_input_serializes_as_empty_string() {
        assert_eq!(serde_json::to_string(&Signature::empty()).unwrap(), "\"\"");
    }
}
