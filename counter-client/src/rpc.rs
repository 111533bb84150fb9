use std::time::{Duration, Instant};

use solana_client::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcSendTransactionConfig, RpcTransactionConfig};
use solana_counter::{encoded_size, CounterInstruction, CounterState, Record};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Signature, Signer};
use solana_sdk::signer::keypair::Keypair;
use solana_sdk::transaction::Transaction;
use solana_transaction_status::option_serializer::OptionSerializer;
use solana_transaction_status::UiTransactionEncoding;
use tracing::{debug, info, warn};

use crate::config::Args;
use crate::{Error, Result};

/// Lamports kept on the payer on top of the rent for transaction fees.
const FEE_RESERVE: u64 = LAMPORTS_PER_SOL / 100;

/// Minimum amount requested when the payer needs to be funded.
const MIN_AIRDROP: u64 = LAMPORTS_PER_SOL;

/// Interval between signature status queries.
const POLL_INTERVAL: Duration = Duration::from_millis(500);


/// Connection to the cluster together with the payer and counter program
/// address.
pub struct CounterClient {
    client: RpcClient,
    payer: Keypair,
    program_id: Pubkey,
    max_retries: usize,
    confirm_timeout: Duration,
}

impl CounterClient {
    pub fn new(args: &Args, payer: Keypair) -> Self {
        let client = RpcClient::new_with_commitment(
            args.url.clone(),
            CommitmentConfig::confirmed(),
        );
        info!(url = %args.url, payer = %payer.pubkey(), "Connecting");
        Self {
            client,
            payer,
            program_id: args.program_id,
            max_retries: args.max_retries,
            confirm_timeout: args.confirm_timeout(),
        }
    }

    pub fn payer(&self) -> Pubkey {
        self.payer.pubkey()
    }

    /// Requests an airdrop to the payer and waits until it’s confirmed.
    pub fn airdrop(&self, lamports: u64) -> Result<Signature> {
        info!(lamports, "Requesting airdrop");
        let sig = self.client.request_airdrop(&self.payer(), lamports)?;
        self.wait_for_confirmation(&sig)?;
        let balance = self.client.get_balance(&self.payer())?;
        info!(%sig, balance, "Airdrop confirmed");
        Ok(sig)
    }

    /// Makes sure the payer holds at least `lamports`; requests an airdrop if
    /// it doesn’t.
    pub fn ensure_balance(&self, lamports: u64) -> Result {
        let balance = self.client.get_balance(&self.payer())?;
        debug!(balance, needed = lamports, "Payer balance");
        if let Some(amount) = airdrop_amount(balance, lamports) {
            self.airdrop(amount)?;
        }
        Ok(())
    }

    /// Creates a new rent-exempt counter account owned by the counter
    /// program.  Returns its address.
    pub fn create_counter(&self) -> Result<Pubkey> {
        let size = encoded_size::<CounterState>();
        let lamports =
            self.client.get_minimum_balance_for_rent_exemption(size)?;
        self.ensure_balance(lamports + FEE_RESERVE)?;

        let counter = Keypair::new();
        info!(counter = %counter.pubkey(), lamports, size, "Creating counter");
        let instruction = solana_counter::instruction::create_counter(
            self.program_id,
            self.payer(),
            counter.pubkey(),
            lamports,
        );
        self.send_and_confirm(instruction, &[&self.payer, &counter])?;
        Ok(counter.pubkey())
    }

    /// Sends instruction to the counter program and returns the resulting
    /// counter state.
    pub fn execute(
        &self,
        counter: &Pubkey,
        instruction: CounterInstruction,
    ) -> Result<CounterState> {
        info!(%counter, ?instruction, "Calling counter program");
        let instruction = solana_counter::instruction::call(
            self.program_id,
            *counter,
            instruction,
        );
        self.send_and_confirm(instruction, &[&self.payer])?;
        self.fetch(counter)
    }

    /// Fetches and decodes the counter account.
    pub fn fetch(&self, counter: &Pubkey) -> Result<CounterState> {
        let account = self.client.get_account(counter)?;
        if account.owner != self.program_id {
            return Err(Error::NotCounter(*counter, account.owner));
        }
        Ok(CounterState::decode(&account.data)?)
    }

    /// Signs and sends a transaction with single instruction, waits for it
    /// to be confirmed and prints its log messages.
    fn send_and_confirm(
        &self,
        instruction: Instruction,
        signers: &[&Keypair],
    ) -> Result<Signature> {
        let blockhash = self.client.get_latest_blockhash()?;
        debug!(%blockhash, "Latest blockhash");

        let message = Message::new_with_blockhash(
            core::slice::from_ref(&instruction),
            Some(&self.payer()),
            &blockhash,
        );
        let mut tx = Transaction::new_unsigned(message);
        tx.try_sign(signers, blockhash)?;

        info!(program = %instruction.program_id, "Sending transaction");
        let config = RpcSendTransactionConfig {
            preflight_commitment: Some(self.client.commitment().commitment),
            max_retries: Some(self.max_retries),
            ..Default::default()
        };
        let sig = self.client.send_transaction_with_config(&tx, config)?;
        self.wait_for_confirmation(&sig)?;
        info!(%sig, "Transaction confirmed");

        self.print_logs(&sig)?;
        Ok(sig)
    }

    /// Polls the signature status until the transaction is confirmed, fails or
    /// the confirmation timeout passes.
    fn wait_for_confirmation(&self, sig: &Signature) -> Result {
        let deadline = Instant::now().checked_add(self.confirm_timeout);
        loop {
            match self.client.get_signature_status(sig)? {
                Some(Ok(())) => return Ok(()),
                Some(Err(err)) => return Err(Error::Transaction(err)),
                None if expired(deadline, Instant::now()) => {
                    return Err(Error::Unconfirmed(*sig))
                }
                None => std::thread::sleep(POLL_INTERVAL),
            }
        }
    }

    /// Prints log messages of an executed transaction.
    ///
    /// The transaction has already been confirmed so missing logs are only
    /// reported as a warning.
    fn print_logs(&self, sig: &Signature) -> Result {
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Binary),
            commitment: Some(self.client.commitment()),
            max_supported_transaction_version: Some(0),
        };
        let resp = self.client.get_transaction_with_config(sig, config)?;
        info!(slot = resp.slot, "Executed");

        let lines =
            log_lines(resp.transaction.meta.map(|meta| meta.log_messages));
        if lines.is_empty() {
            warn!(%sig, "Transaction carries no log messages");
        }
        lines.iter().for_each(|line| println!("{line}"));
        Ok(())
    }
}


/// Returns how much to request from the faucet so that the payer holding
/// `balance` has at least `needed` lamports; `None` if it already does.
fn airdrop_amount(balance: u64, needed: u64) -> Option<u64> {
    needed
        .checked_sub(balance)
        .filter(|&missing| missing > 0)
        .map(|missing| missing.max(MIN_AIRDROP))
}

/// Whether confirmation polling is past its `deadline`.  `None` means the
/// timeout doesn’t fit in an [`Instant`] and never expires.
fn expired(deadline: Option<Instant>, now: Instant) -> bool {
    deadline.is_some_and(|deadline| now >= deadline)
}

/// Extracts program log lines from transaction metadata.
fn log_lines(logs: Option<OptionSerializer<Vec<String>>>) -> Vec<String> {
    match logs {
        Some(OptionSerializer::Some(lines)) => lines,
        _ => Vec::new(),
    }
}
