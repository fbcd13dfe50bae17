use crate::codec::TransactionCodec;
use crate::error::{LedgerError, Result};
use crate::{Coin, PublicKey, Sha256, Signature, Utxo};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

/// A double SHA-256 hash of the transaction data.
#[derive(Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Sha256);

impl Display for TransactionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TransactionId {
    pub fn new(data: Sha256) -> Self {
        Self(data)
    }
}

/// The index of the transaction output.
#[derive(Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputIndex(u32);

impl Display for OutputIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl OutputIndex {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    // A pointer to the transaction containing the UTXO to be spent.
    utxo_id: TransactionId,
    // The number of the UTXO to be spent, the first one is 0.
    output_index: OutputIndex,
    // Signature over the signing bytes of the claiming transaction, made with the key that
    // owns the referenced output.
    signature: Signature,
}

impl Display for TransactionInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.utxo_id, self.output_index)
    }
}

impl TransactionInput {
    /// Creates an unsigned input.
    pub fn new(utxo_id: TransactionId, output_index: OutputIndex) -> Self {
        Self {
            utxo_id,
            output_index,
            signature: Signature::empty(),
        }
    }

    pub fn utxo_id(&self) -> &TransactionId {
        &self.utxo_id
    }

    pub fn output_index(&self) -> &OutputIndex {
        &self.output_index
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The unspent output this input claims.
    pub fn utxo(&self) -> Utxo {
        Utxo::new(self.utxo_id, self.output_index)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransactionOutput {
    amount: Coin,
    public_key: PublicKey,
}

impl Display for TransactionOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.amount, self.public_key)
    }
}

impl TransactionOutput {
    pub fn new(amount: Coin, public_key: PublicKey) -> Self {
        Self { amount, public_key }
    }

    pub fn amount(&self) -> Coin {
        self.amount
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

/// An ordered list of inputs claiming existing outputs and an ordered list of new outputs.
///
/// The transaction id is never stored: it is the hash of the current raw bytes, so it changes
/// whenever an input gets signed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionData")]
pub struct Transaction {
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
}

// Mirror of `Transaction` that deserialization goes through, so that decoded transactions
// are checked by `Transaction::new` as well.
#[derive(Deserialize)]
struct TransactionData {
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
}

impl TryFrom<TransactionData> for Transaction {
    type Error = LedgerError;

    fn try_from(data: TransactionData) -> Result<Self> {
        Transaction::new(data.inputs, data.outputs)
    }
}

impl Transaction {
    pub fn new(inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>) -> Result<Self> {
        let transaction = Self { inputs, outputs };
        transaction.validate_format()?;
        Ok(transaction)
    }

    /// Hashes the raw transaction bytes, signatures included.
    pub fn id(&self) -> Result<TransactionId> {
        let raw_bytes = TransactionCodec::raw_bytes(self)?;
        Ok(TransactionId::new(Sha256::double_digest(&raw_bytes)))
    }

    /// The bytes every input signs: the transaction without any of its signatures.
    pub fn signing_bytes(&self) -> Result<Vec<u8>> {
        TransactionCodec::signing_bytes(self)
    }

    /// Attaches the signature to the input at `input_index`.
    pub fn sign_input(&mut self, input_index: usize, signature: Signature) -> Result<()> {
        let input_count = self.inputs.len();
        match self.inputs.get_mut(input_index) {
            Some(input) => {
                input.signature = signature;
                Ok(())
            }
            None => Err(LedgerError::PreconditionViolation(format!(
                "Cannot sign input: {} of a transaction with {} inputs",
                input_index, input_count
            ))),
        }
    }

    pub fn inputs(&self) -> &Vec<TransactionInput> {
        &self.inputs
    }

    pub fn outputs(&self) -> &Vec<TransactionOutput> {
        &self.outputs
    }

    /// The UTXOs this transaction creates once it is committed under `id`.
    pub fn created_utxos<'a>(
        &'a self,
        id: TransactionId,
    ) -> impl Iterator<Item = (Utxo, &'a TransactionOutput)> + 'a {
        self.outputs
            .iter()
            .enumerate()
            // The output count fits into `OutputIndex`, see `validate_format`.
            .map(move |(index, output)| (Utxo::new(id, OutputIndex::new(index as u32)), output))
    }

    /// Checks that every output is addressable by an `OutputIndex`.
    fn validate_format(&self) -> Result<()> {
        if u32::try_from(self.outputs.len()).is_err() {
            Err(LedgerError::PreconditionViolation(format!(
                "Transaction has {} outputs, which exceeds the addressable output index range.",
                self.outputs.len()
            )))
        } else {
            Ok(())
        }
    }
}
