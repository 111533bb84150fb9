use std::process::ExitCode;

use clap::Parser;
use solana_counter::{CounterInstruction, CounterState};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::signer::SignerError;
use solana_sdk::transaction::TransactionError;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Args, Command};
use crate::rpc::CounterClient;

mod config;
mod rpc;


type Result<T = (), E = Error> = core::result::Result<T, E>;


/// `usage: counter-client [options] <command>`
fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Args::parse()) {
        eprintln!("{err}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}


/// Executes the command.
fn run(args: Args) -> Result {
    let payer = args.read_keypair()?;
    let client = CounterClient::new(&args, payer);

    match args.command {
        Command::Airdrop { lamports } => {
            client.airdrop(lamports)?;
        }
        Command::Create => {
            let counter = client.create_counter()?;
            println!("{counter}");
        }
        Command::Increment { account, value } => {
            let ix = CounterInstruction::Increment(value);
            print_count(&account, client.execute(&account, ix)?);
        }
        Command::Decrement { account, value } => {
            let ix = CounterInstruction::Decrement(value);
            print_count(&account, client.execute(&account, ix)?);
        }
        Command::Show { account } => {
            print_count(&account, client.fetch(&account)?);
        }
        Command::Demo { value } => demo(&client, value)?,
    }
    Ok(())
}


/// Creates a counter, increments it by `value` and checks the result.
fn demo(client: &CounterClient, value: u32) -> Result {
    let counter = client.create_counter()?;
    let before = client.fetch(&counter)?;
    print_count(&counter, before);

    let ix = CounterInstruction::Increment(value);
    let after = client.execute(&counter, ix)?;
    print_count(&counter, after);

    check_transition(before, ix, after)?;
    info!(%counter, payer = %client.payer(), "Demo finished");
    Ok(())
}


/// Checks that executing `instruction` moved the counter from `before` to
/// `after`.
fn check_transition(
    before: CounterState,
    instruction: CounterInstruction,
    after: CounterState,
) -> Result {
    match before.apply(instruction) {
        Some(want) if want == after => Ok(()),
        _ => Err(Error::Mismatch { before, after }),
    }
}


fn print_count(counter: &Pubkey, state: CounterState) {
    println!("{counter}: {}", state.count);
}


#[derive(Debug, derive_more::From, derive_more::Display)]
enum Error {
    Msg(&'static str),
    Client(solana_client::client_error::ClientError),
    Format(solana_counter::FormatError),
    Transaction(TransactionError),
    Signer(SignerError),
    #[display("transaction {_0} not confirmed in time")]
    #[from(ignore)]
    Unconfirmed(Signature),
    #[display("account {_0} is owned by {_1} rather than the counter program")]
    #[from(ignore)]
    NotCounter(Pubkey, Pubkey),
    #[display(
        "unexpected count change from {} to {}",
        before.count,
        after.count
    )]
    #[from(ignore)]
    Mismatch { before: CounterState, after: CounterState },
    Box(Box<dyn std::error::Error>),
}
