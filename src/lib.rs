pub mod codec;
pub mod coin;
pub mod commands;
pub mod error;
pub mod hash;
mod hex_bytes;
pub mod public_key;
pub mod signature;
pub mod transaction;
pub mod tx_handler;
pub mod utxo_pool;
pub mod verifier;

pub use self::{
    codec::*, coin::*, error::LedgerError, hash::*, public_key::*, signature::*, transaction::*,
    tx_handler::*, utxo_pool::*, verifier::*,
};
