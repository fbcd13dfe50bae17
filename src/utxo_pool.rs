use crate::transaction::{OutputIndex, TransactionId, TransactionOutput};
use crate::Coin;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Identifies an unspent transaction output by the transaction that created it and the
/// output's index in that transaction.
#[derive(Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Serialize, Deserialize)]
pub struct Utxo {
    transaction_id: TransactionId,
    output_index: OutputIndex,
}

impl Utxo {
    pub fn new(transaction_id: TransactionId, output_index: OutputIndex) -> Self {
        Self {
            transaction_id,
            output_index,
        }
    }

    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    pub fn output_index(&self) -> &OutputIndex {
        &self.output_index
    }
}

impl Display for Utxo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.transaction_id, self.output_index)
    }
}

/// Serialized form of a pool entry.
#[derive(Clone, Serialize, Deserialize)]
pub struct UtxoEntry {
    utxo: Utxo,
    output: TransactionOutput,
}

/// A pool of confirmed and unspent transaction outputs.
///
/// This is a plain keyed store: callers are responsible for only removing outputs that have
/// been claimed by a committed transaction.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<UtxoEntry>", into = "Vec<UtxoEntry>")]
pub struct UtxoPool {
    // Unspent transaction outputs, indexed by their transaction ID and their index in the
    // transaction.
    utxos: HashMap<Utxo, TransactionOutput>,
}

impl UtxoPool {
    pub fn new() -> Self {
        Self {
            utxos: HashMap::new(),
        }
    }

    pub fn contains(&self, utxo: &Utxo) -> bool {
        self.utxos.contains_key(utxo)
    }

    pub fn lookup(&self, utxo: &Utxo) -> Option<&TransactionOutput> {
        self.utxos.get(utxo)
    }

    /// Adds the output, replacing any output previously stored under the same UTXO.
    pub fn insert(&mut self, utxo: Utxo, output: TransactionOutput) {
        self.utxos.insert(utxo, output);
    }

    /// Removes the output if it exists.
    pub fn remove(&mut self, utxo: &Utxo) -> Option<TransactionOutput> {
        self.utxos.remove(utxo)
    }

    /// A snapshot of the current UTXOs, in no particular order.
    pub fn all_utxos(&self) -> Vec<Utxo> {
        self.utxos.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    /// Total value held by the pool, or `None` on overflow.
    pub fn total_value(&self) -> Option<Coin> {
        Coin::checked_sum(self.utxos.values().map(TransactionOutput::amount))
    }
}

impl From<Vec<UtxoEntry>> for UtxoPool {
    fn from(entries: Vec<UtxoEntry>) -> Self {
        Self {
            utxos: entries
                .into_iter()
                .map(|entry| (entry.utxo, entry.output))
                .collect(),
        }
    }
}

impl From<UtxoPool> for Vec<UtxoEntry> {
    fn from(pool: UtxoPool) -> Self {
        let mut entries = pool
            .utxos
            .into_iter()
            .map(|(utxo, output)| UtxoEntry { utxo, output })
            .collect::<Vec<_>>();
        // Keep the serialized pool stable across runs.
        entries.sort_by(|lhs, rhs| lhs.utxo.cmp(&rhs.utxo));
        entries
    }
}
