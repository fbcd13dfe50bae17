use crate::{PublicKey, Signature};
use ed25519_dalek::VerifyingKey;
use std::convert::TryFrom;

/// Checks that `signature` was made over `message` by the owner of `public_key`.
///
/// Implementations must be deterministic and free of side effects.
pub trait SignatureVerifier {
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool;
}

/// Verifies Ed25519 signatures. Public keys are the 32-byte compressed points and signatures
/// the 64-byte `R || s` encoding.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
        let key_bytes = match <[u8; 32]>::try_from(public_key.as_slice()) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        let verifying_key = match VerifyingKey::from_bytes(&key_bytes) {
            Ok(key) => key,
            Err(_) => return false,
        };
        let signature = match ed25519_dalek::Signature::from_slice(signature.as_slice()) {
            Ok(signature) => signature,
            Err(_) => return false,
        };
        verifying_key.verify_strict(message, &signature).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn key_pair(seed: u8) -> (SigningKey, PublicKey) {
        let signing_key = SigningKey::from_bytes(&[seed; 32]);
        let public_key = PublicKey::new(signing_key.verifying_key().to_bytes().to_vec());
        (signing_key, public_key)
    }

    fn sign(signing_key: &SigningKey, message: &[u8]) -> Signature {
        Signature::new(signing_key.sign(message).to_bytes().to_vec())
    }

    #[test]
    fn accepts_valid_signature() {
        let (signing_key, public_key) = key_pair(1);
        let signature = sign(&signing_key, b"message");
        assert!(Ed25519Verifier.verify(&public_key, b"message", &signature));
    }

    #[test]
    fn rejects_other_message() {
        let (signing_key, public_key) = key_pair(1);
        let signature = sign(&signing_key, b"message");
        assert!(!Ed25519Verifier.verify(&public_key, b"other message", &signature));
    }

    #[test]
    fn rejects_other_key() {
        let (signing_key, _) = key_pair(1);
        let (_, other_public_key) = key_pair(2);
        let signature = sign(&signing_key, b"message");
        assert!(!Ed25519Verifier.verify(&other_public_key, b"message", &signature));
    }

    #[test]
    fn rejects_malformed_inputs() {
        let (signing_key, public_key) = key_pair(1);
        let signature = sign(&signing_key, b"message");
        assert!(!Ed25519Verifier.verify(&PublicKey::new(vec![1; 5]), b"message", &signature));
        assert!(!Ed25519Verifier.verify(&public_key, b"message", &Signature::empty()));
        assert!(!Ed25519Verifier.verify(
            &public_key,
            b"message",
            &Signature::new(signature.as_slice()[..63].to_vec())
        ));
    }
}
