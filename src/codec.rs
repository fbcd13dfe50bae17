//! Canonical byte encoding of transactions.
//!
//! Both encodings use bincode over the serde model, which is deterministic for the same
//! transaction. Byte strings are written raw (see `hex_bytes`), amounts as fixed-width
//! little-endian integers.

use crate::error::Result;
use crate::{OutputIndex, Transaction, TransactionId, TransactionOutput};
use serde::Serialize;

// An input as covered by signatures: the claimed output, without the signature itself.
#[derive(Serialize)]
struct UnsignedInput<'a> {
    utxo_id: &'a TransactionId,
    output_index: &'a OutputIndex,
}

#[derive(Serialize)]
struct UnsignedTransaction<'a> {
    inputs: Vec<UnsignedInput<'a>>,
    outputs: &'a [TransactionOutput],
}

pub struct TransactionCodec;

impl TransactionCodec {
    /// Encodes the transaction with all input signatures left out.
    /// This is the message every input of the transaction signs.
    pub fn signing_bytes(transaction: &Transaction) -> Result<Vec<u8>> {
        let unsigned = UnsignedTransaction {
            inputs: transaction
                .inputs()
                .iter()
                .map(|input| UnsignedInput {
                    utxo_id: input.utxo_id(),
                    output_index: input.output_index(),
                })
                .collect(),
            outputs: transaction.outputs(),
        };
        Ok(bincode::serialize(&unsigned)?)
    }

    /// Encodes the full transaction, signatures included. The transaction id hashes these.
    pub fn raw_bytes(transaction: &Transaction) -> Result<Vec<u8>> {
        Ok(bincode::serialize(transaction)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coin, PublicKey, Sha256, Signature, TransactionInput};

    fn create_transaction() -> Transaction {
        let utxo_id = TransactionId::new(Sha256::digest(b"genesis"));
        let inputs = vec![
            TransactionInput::new(utxo_id, OutputIndex::new(0)),
            TransactionInput::new(utxo_id, OutputIndex::new(1)),
        ];
        let outputs = vec![TransactionOutput::new(
            Coin::new(10),
            PublicKey::new(vec![3; 32]),
        )];
        Transaction::new(inputs, outputs).unwrap()
    }

    #[test]
    fn encoding_is_deterministic() {
        let transaction = create_transaction();
        assert_eq!(
            TransactionCodec::signing_bytes(&transaction).unwrap(),
            TransactionCodec::signing_bytes(&transaction.clone()).unwrap()
        );
        assert_eq!(
            TransactionCodec::raw_bytes(&transaction).unwrap(),
            TransactionCodec::raw_bytes(&transaction.clone()).unwrap()
        );
    }

    #[test]
    fn signing_bytes_ignore_every_signature() {
        let unsigned = create_transaction();
        let mut signed = unsigned.clone();
        signed.sign_input(0, Signature::new(vec![1; 64])).unwrap();
        signed.sign_input(1, Signature::new(vec![2; 64])).unwrap();

        assert_eq!(
            TransactionCodec::signing_bytes(&unsigned).unwrap(),
            TransactionCodec::signing_bytes(&signed).unwrap()
        );
        assert_ne!(
            TransactionCodec::raw_bytes(&unsigned).unwrap(),
            TransactionCodec::raw_bytes(&signed).unwrap()
        );
    }

    #[test]
    fn signing_bytes_cover_the_claimed_outputs() {
        let transaction = create_transaction();
        let mut inputs = transaction.inputs().clone();
        inputs.swap(0, 1);
        let reordered = Transaction::new(inputs, transaction.outputs().clone()).unwrap();

        assert_ne!(
            TransactionCodec::signing_bytes(&transaction).unwrap(),
            TransactionCodec::signing_bytes(&reordered).unwrap()
        );
    }
}
