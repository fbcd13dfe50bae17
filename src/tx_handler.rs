use crate::error::Result;
use crate::{Coin, SignatureVerifier, Transaction, TransactionId, Utxo, UtxoPool};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, trace};

/// The first rule a transaction breaks against the current UTXO pool.
///
/// Rejections are not errors: they only explain why a transaction is not valid.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum TxRejection {
    #[error("input {input_index} claims UTXO {utxo}, which is not in the pool")]
    UnknownUtxo { input_index: usize, utxo: Utxo },

    #[error("input {input_index} is not signed by the owner of UTXO {utxo}")]
    InvalidSignature { input_index: usize, utxo: Utxo },

    #[error("input {input_index} claims UTXO {utxo}, which an earlier input already claims")]
    DoubleSpend { input_index: usize, utxo: Utxo },

    #[error("output {output_index} has a negative value: {amount}")]
    NegativeOutput { output_index: usize, amount: Coin },

    #[error("outputs: {outputs} exceed inputs: {inputs}")]
    InsufficientInput { inputs: Coin, outputs: Coin },

    #[error("the sum of values does not fit into a coin amount")]
    ValueOverflow,

    #[error("transaction {id} has already been committed in this epoch")]
    AlreadyCommitted { id: TransactionId },
}

/// The outcome of validating a transaction: the implicit fee it leaves behind, or the reason
/// it cannot be committed.
pub type Verdict = std::result::Result<Coin, TxRejection>;

/// Validates transactions against a private copy of the UTXO pool, and commits a mutually
/// valid subset of each epoch's transactions to it.
pub struct TxHandler<V> {
    utxo_pool: UtxoPool,
    verifier: V,
}

impl<V: SignatureVerifier> TxHandler<V> {
    /// Creates a ledger whose current UTXO pool is a copy of `utxo_pool`.
    /// The caller's pool is never modified.
    pub fn new(utxo_pool: &UtxoPool, verifier: V) -> Self {
        Self {
            utxo_pool: utxo_pool.clone(),
            verifier,
        }
    }

    pub fn utxo_pool(&self) -> &UtxoPool {
        &self.utxo_pool
    }

    /// Returns true if:
    ///   1. all outputs claimed by the transaction are in the current UTXO pool,
    ///   2. the signature on each input is valid for the owner of the claimed output,
    ///   3. no UTXO is claimed multiple times by the transaction,
    ///   4. all output values are non-negative, and
    ///   5. the sum of the input values is greater than or equal to the sum of the output
    ///      values.
    ///
    /// Fails only if the transaction cannot be encoded.
    pub fn is_valid_tx(&self, transaction: &Transaction) -> Result<bool> {
        Ok(self.check_tx(transaction)?.is_ok())
    }

    /// Same checks as `is_valid_tx`, reporting the fee or the first broken rule.
    pub fn check_tx(&self, transaction: &Transaction) -> Result<Verdict> {
        let message = transaction.signing_bytes()?;
        Ok(self.evaluate(transaction, &message))
    }

    /// Handles an epoch: commits a mutually valid subset of the unordered `possible_txs` to
    /// the UTXO pool and returns it in commit order.
    ///
    /// Candidates are visited in the given order, repeatedly, until a whole pass commits
    /// nothing. A candidate is committed as soon as it is valid against the current pool, so
    /// a transaction spending the output of another one in the same epoch gets committed in
    /// the pass after its parent. Of two transactions claiming the same UTXO, the one visited
    /// first wins and the other is never committed. A resubmitted copy of a committed
    /// transaction is not committed again.
    pub fn handle_txs(&mut self, possible_txs: &[Transaction]) -> Result<Vec<Transaction>> {
        let ids = possible_txs
            .iter()
            .map(Transaction::id)
            .collect::<Result<Vec<TransactionId>>>()?;

        let mut committed = vec![false; possible_txs.len()];
        let mut committed_ids = HashSet::with_capacity(possible_txs.len());
        let mut rejections = vec![None; possible_txs.len()];
        let mut accepted = Vec::new();
        let mut passes = 0;
        loop {
            passes += 1;
            let mut committed_in_pass = 0;
            for (index, transaction) in possible_txs.iter().enumerate() {
                if committed[index] {
                    continue;
                }
                if committed_ids.contains(&ids[index]) {
                    rejections[index] = Some(TxRejection::AlreadyCommitted { id: ids[index] });
                    continue;
                }
                match self.check_tx(transaction)? {
                    Ok(fee) => {
                        self.commit(&ids[index], transaction);
                        debug!("Committed transaction: {} with fee: {}", ids[index], fee);
                        committed[index] = true;
                        committed_ids.insert(ids[index]);
                        rejections[index] = None;
                        accepted.push(transaction.clone());
                        committed_in_pass += 1;
                    }
                    Err(rejection) => rejections[index] = Some(rejection),
                }
            }
            trace!("Pass: {} committed {} transactions", passes, committed_in_pass);
            if committed_in_pass == 0 || accepted.len() == possible_txs.len() {
                break;
            }
        }

        for (id, rejection) in ids.iter().zip(rejections) {
            if let Some(rejection) = rejection {
                debug!("Rejected transaction: {}: {}", id, rejection);
            }
        }
        info!(
            "Epoch committed {} of {} transactions in {} passes",
            accepted.len(),
            possible_txs.len(),
            passes
        );
        Ok(accepted)
    }

    fn evaluate(&self, transaction: &Transaction, message: &[u8]) -> Verdict {
        let inputs = transaction.inputs();
        let mut claimed_utxos = HashSet::with_capacity(inputs.len());
        let mut input_sum = Coin::zero();
        for (input_index, input) in inputs.iter().enumerate() {
            let utxo = input.utxo();
            let claimed_output = match self.utxo_pool.lookup(&utxo) {
                Some(output) => output,
                None => return Err(TxRejection::UnknownUtxo { input_index, utxo }),
            };
            if !self
                .verifier
                .verify(claimed_output.public_key(), message, input.signature())
            {
                return Err(TxRejection::InvalidSignature { input_index, utxo });
            }
            if !claimed_utxos.insert(utxo) {
                return Err(TxRejection::DoubleSpend { input_index, utxo });
            }
            input_sum = input_sum
                .checked_add(claimed_output.amount())
                .ok_or(TxRejection::ValueOverflow)?;
        }
        debug_assert_eq!(
            claimed_utxos.len(),
            inputs.len(),
            "consistency fault: not every input claimed a distinct UTXO"
        );

        let mut output_sum = Coin::zero();
        for (output_index, output) in transaction.outputs().iter().enumerate() {
            if output.amount().is_negative() {
                return Err(TxRejection::NegativeOutput {
                    output_index,
                    amount: output.amount(),
                });
            }
            output_sum = output_sum
                .checked_add(output.amount())
                .ok_or(TxRejection::ValueOverflow)?;
        }

        if input_sum < output_sum {
            return Err(TxRejection::InsufficientInput {
                inputs: input_sum,
                outputs: output_sum,
            });
        }
        Ok(input_sum - output_sum)
    }

    fn commit(&mut self, id: &TransactionId, transaction: &Transaction) {
        for input in transaction.inputs() {
            self.utxo_pool.remove(&input.utxo());
        }
        for (utxo, output) in transaction.created_utxos(*id) {
            self.utxo_pool.insert(utxo, output.clone());
        }
    }
}
