use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;

use crate::{CounterInstruction, CounterState, Record};

/// Generates instruction creating a new counter account.
///
/// `payer` funds the account with `lamports` and must sign the transaction.
/// `counter` is the address of the new account; since it’s created through
/// the system program rather than as a PDA, it must sign the transaction as
/// well.  The account is allocated [`CounterState::SIZE`] bytes and assigned
/// to `program_id`.  Its data starts zeroed which the program reads as
/// a counter of zero.
///
/// `lamports` should be at least the rent-exemption minimum for
/// [`CounterState::SIZE`] bytes.
///
/// # Example
///
/// ```ignore
/// let counter = Keypair::new();
/// let lamports = client.get_minimum_balance_for_rent_exemption(
///     solana_counter::encoded_size::<CounterState>(),
/// )?;
/// let instruction = create_counter(
///     program_id,
///     payer.pubkey(),
///     counter.pubkey(),
///     lamports,
/// );
/// let transaction = Transaction::new_signed_with_payer(
///     &[instruction],
///     Some(&payer.pubkey()),
///     &[&payer, &counter],
///     blockhash,
/// );
/// ```
pub fn create_counter(
    program_id: Pubkey,
    payer: Pubkey,
    counter: Pubkey,
    lamports: u64,
) -> Instruction {
    solana_system_interface::instruction::create_account(
        &payer,
        &counter,
        lamports,
        CounterState::SIZE as u64,
        &program_id,
    )
}

/// Generates instruction calling the counter program.
///
/// The only account passed to the program is the writable `counter` account
/// which must be owned by `program_id`.
pub fn call(
    program_id: Pubkey,
    counter: Pubkey,
    instruction: CounterInstruction,
) -> Instruction {
    Instruction {
        program_id,
        accounts: vec![AccountMeta::new(counter, false)],
        data: instruction.encode(),
    }
}

/// Generates instruction adding `value` to the counter.
pub fn increment(
    program_id: Pubkey,
    counter: Pubkey,
    value: u32,
) -> Instruction {
    call(program_id, counter, CounterInstruction::Increment(value))
}

/// Generates instruction subtracting `value` from the counter.
pub fn decrement(
    program_id: Pubkey,
    counter: Pubkey,
    value: u32,
) -> Instruction {
    call(program_id, counter, CounterInstruction::Decrement(value))
}
