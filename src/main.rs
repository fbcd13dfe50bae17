use clap::Command;
use scroogecoin_lib::commands::EpochCliOptions;
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    let matches = Command::new("scroogecoin")
        .about("ScroogeCoin ledger CLI tools.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(scroogecoin_lib::commands::epoch_command())
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("epoch") {
        let options = EpochCliOptions::parse(matches)?;
        init_logging(options.verbose());
        scroogecoin_lib::commands::run_epoch_command(&options)
    } else {
        panic!("Should report help.");
    }
}

/// Logs to stderr so that stdout only carries the command's output.
/// `RUST_LOG` takes precedence over the verbosity flag.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
