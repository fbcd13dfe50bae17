use crate::hex_bytes;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The credential that owns a transaction output.
/// Its bytes are interpreted by the `SignatureVerifier` in use.
#[derive(Debug, Clone, Hash, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd)]
pub struct PublicKey(#[serde(with = "hex_bytes")] Vec<u8>);

impl PublicKey {
    pub fn new(public_key: Vec<u8>) -> Self {
        Self(public_key)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0[..]
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}
