use crate::error::Result;
use crate::{Ed25519Verifier, SignatureVerifier, Transaction, TxHandler, UtxoPool};
use clap::{Arg, ArgMatches, Command};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// The input of a single epoch: the UTXO pool before the epoch and the proposed transactions.
/// Hashes, public keys and signatures are hex-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerFile {
    pub pool: UtxoPool,
    pub transactions: Vec<Transaction>,
}

impl LedgerFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// The state after the epoch: the committed transaction ids in commit order and the pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochSummary {
    pub committed: Vec<String>,
    pub pool: UtxoPool,
}

pub struct EpochCliOptions {
    ledger: PathBuf,
    verbose: bool,
    print_pool: bool,
}

impl EpochCliOptions {
    pub fn parse(matches: &ArgMatches) -> std::result::Result<Self, Box<dyn Error>> {
        let ledger = matches
            .value_of("ledger")
            .ok_or("Missing the ledger file argument.")?;
        Ok(Self {
            ledger: PathBuf::from(ledger),
            verbose: matches.is_present("verbose"),
            print_pool: matches.is_present("print_pool"),
        })
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

pub fn epoch_command() -> Command<'static> {
    Command::new("epoch")
        .version("0.1")
        .about("Commits a mutually valid subset of the proposed transactions to the UTXO pool.")
        .arg(
            Arg::new("ledger")
                .long("ledger")
                .value_name("FILE")
                .help("JSON file with the UTXO pool and the transactions proposed in the epoch.")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("If set, logs why each rejected transaction was not committed.")
                .takes_value(false)
                .required(false),
        )
        .arg(
            Arg::new("print_pool")
                .long("print_pool")
                .help("If set, prints the UTXO pool after the epoch as JSON.")
                .takes_value(false)
                .required(false),
        )
}

/// Runs one epoch of `ledger` with the given verifier.
pub fn run_epoch<V: SignatureVerifier>(ledger: &LedgerFile, verifier: V) -> Result<EpochSummary> {
    let mut handler = TxHandler::new(&ledger.pool, verifier);
    let accepted = handler.handle_txs(&ledger.transactions)?;
    let committed = accepted
        .iter()
        .map(|transaction| transaction.id().map(|id| id.to_string()))
        .collect::<Result<Vec<String>>>()?;
    Ok(EpochSummary {
        committed,
        pool: handler.utxo_pool().clone(),
    })
}

pub fn run_epoch_command(options: &EpochCliOptions) -> std::result::Result<(), Box<dyn Error>> {
    let ledger = LedgerFile::load(&options.ledger)?;
    let summary = run_epoch(&ledger, Ed25519Verifier)?;
    for id in &summary.committed {
        println!("{}", id);
    }
    if options.print_pool {
        println!("{}", serde_json::to_string_pretty(&summary.pool)?);
    }
    Ok(())
}
