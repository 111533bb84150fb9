use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signer::keypair::Keypair;
use tracing::{info, warn};

use crate::{Error, Result};


/// Hard-coded address of the counter program.
pub const DEFAULT_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("D3f2rRzX8fLgqhpULw2gTKo7krV6sMekug4QDqhRWB9E");

/// Location of the Solana CLI keypair relative to the home directory.
const DEFAULT_KEYPAIR: &str = ".config/solana/id.json";


/// Client for the Solana counter program.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Solana RPC endpoint.
    #[arg(
        long,
        env = "COUNTER_RPC_URL",
        default_value = "http://127.0.0.1:8899"
    )]
    pub url: String,

    /// Payer keypair file.  Defaults to the Solana CLI keypair; if that
    /// doesn’t exist a fresh keypair is generated.
    #[arg(long, env = "COUNTER_KEYPAIR")]
    pub keypair: Option<PathBuf>,

    /// Address of the counter program.
    #[arg(
        long,
        env = "COUNTER_PROGRAM_ID",
        default_value_t = DEFAULT_PROGRAM_ID
    )]
    pub program_id: Pubkey,

    /// How many times the RPC node retries sending a transaction.
    #[arg(long, env = "COUNTER_MAX_RETRIES", default_value_t = 5)]
    pub max_retries: usize,

    /// Seconds to wait for a transaction or airdrop to be confirmed.
    #[arg(long, env = "COUNTER_CONFIRM_TIMEOUT", default_value_t = 30)]
    pub confirm_timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests an airdrop to the payer.
    Airdrop { lamports: u64 },
    /// Creates a new counter account.
    Create,
    /// Adds a value to the counter.
    Increment { account: Pubkey, value: u32 },
    /// Subtracts a value from the counter.
    Decrement { account: Pubkey, value: u32 },
    /// Prints the counter.
    Show { account: Pubkey },
    /// Funds the payer, creates a counter, increments it and reads it back.
    Demo {
        #[arg(long, default_value_t = 1)]
        value: u32,
    },
}

impl Args {
    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.confirm_timeout)
    }

    /// Reads the payer keypair.
    ///
    /// An explicitly given keypair file must exist.  Otherwise the Solana CLI
    /// keypair is used if present and a new keypair generated if not.
    pub fn read_keypair(&self) -> Result<Keypair> {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        load_keypair(self.keypair.as_deref(), home.as_deref())
    }
}


/// Reads `explicit` keypair file if given, otherwise the Solana CLI keypair
/// under `home`, falling back to a fresh keypair when there is none.
fn load_keypair(
    explicit: Option<&Path>,
    home: Option<&Path>,
) -> Result<Keypair> {
    if let Some(path) = explicit {
        return read_keypair_file(path);
    }
    match home.map(|home| home.join(DEFAULT_KEYPAIR)) {
        Some(path) if path.exists() => read_keypair_file(&path),
        _ => {
            warn!("No keypair found; generating a fresh one");
            Ok(Keypair::new())
        }
    }
}

fn read_keypair_file(path: &Path) -> Result<Keypair> {
    info!(path = %path.display(), "Reading keypair");
    solana_sdk::signer::keypair::read_keypair_file(path).map_err(Error::from)
}
