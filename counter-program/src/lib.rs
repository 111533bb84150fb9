use solana_counter::{CounterInstruction, CounterState, Record};
use solana_program::account_info::AccountInfo;
use solana_program::msg;
use solana_program::program_error::ProgramError;
use solana_program::pubkey::Pubkey;

#[cfg(not(feature = "no-entrypoint"))]
solana_program::entrypoint!(process_instruction);

/// Executes Increment or Decrement on the counter account.
///
/// Expects a single writable account owned by this program whose data is an
/// encoded [`CounterState`].  Overflow and underflow are errors and leave the
/// account unchanged.
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction: &[u8],
) -> Result<(), ProgramError> {
    let instruction = CounterInstruction::decode(instruction).map_err(|err| {
        msg!("Invalid instruction: {}", err);
        ProgramError::InvalidInstructionData
    })?;

    let counter = accounts.first().ok_or(ProgramError::NotEnoughAccountKeys)?;
    if counter.owner != program_id {
        msg!("Counter {} not owned by the program", counter.key);
        return Err(ProgramError::IncorrectProgramId);
    }
    if !counter.is_writable {
        msg!("Counter {} not writable", counter.key);
        return Err(ProgramError::InvalidAccountData);
    }

    let mut data = counter.try_borrow_mut_data()?;
    let state = CounterState::decode(&data).map_err(|err| {
        msg!("Invalid counter data: {}", err);
        ProgramError::InvalidAccountData
    })?;

    msg!("Executing {:?}", instruction);
    let state =
        state.apply(instruction).ok_or(ProgramError::ArithmeticOverflow)?;
    state
        .encode_into(&mut data)
        .map_err(|_| ProgramError::InvalidAccountData)?;
    msg!("Count: {}", state.count);
    Ok(())
}
