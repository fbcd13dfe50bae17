#![allow(dead_code)]

use ed25519_dalek::{Signer, SigningKey};
use scroogecoin_lib::{
    Coin, OutputIndex, PublicKey, Sha256, Signature, Transaction, TransactionId,
    TransactionInput, TransactionOutput, Utxo, UtxoPool,
};

/// A deterministic Ed25519 key pair for tests.
pub struct Wallet {
    signing_key: SigningKey,
}

impl Wallet {
    pub fn new(seed: u8) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&[seed; 32]),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::new(self.signing_key.verifying_key().to_bytes().to_vec())
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::new(self.signing_key.sign(message).to_bytes().to_vec())
    }
}

pub fn genesis_id() -> TransactionId {
    TransactionId::new(Sha256::digest(b"tx0"))
}

pub fn utxo(transaction_id: TransactionId, index: u32) -> Utxo {
    Utxo::new(transaction_id, OutputIndex::new(index))
}

pub fn output_of(transaction: &Transaction, index: u32) -> Utxo {
    utxo(transaction.id().unwrap(), index)
}

pub fn pool_with(entries: &[(Utxo, i64, &Wallet)]) -> UtxoPool {
    let mut pool = UtxoPool::new();
    for (utxo, amount, owner) in entries {
        pool.insert(
            *utxo,
            TransactionOutput::new(Coin::new(*amount), owner.public_key()),
        );
    }
    pool
}

/// Builds a transaction spending each claimed UTXO with the signature of its wallet.
pub fn signed_tx(claims: &[(Utxo, &Wallet)], outputs: &[(i64, &Wallet)]) -> Transaction {
    let inputs = claims
        .iter()
        .map(|(utxo, _)| TransactionInput::new(*utxo.transaction_id(), *utxo.output_index()))
        .collect();
    let outputs = outputs
        .iter()
        .map(|(amount, owner)| TransactionOutput::new(Coin::new(*amount), owner.public_key()))
        .collect();
    let mut transaction = Transaction::new(inputs, outputs).unwrap();
    let message = transaction.signing_bytes().unwrap();
    for (index, (_, wallet)) in claims.iter().enumerate() {
        transaction.sign_input(index, wallet.sign(&message)).unwrap();
    }
    transaction
}
