// solana-counter — wire format and client helpers for the Solana counter
//                  program
// © 2024 by Composable Foundation
// © 2025 by Michał Nazarewicz <mina86@mina86.com>
//
// This program is free software; you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation; either version 2 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program; if not, see <https://www.gnu.org/licenses/>.

//! Wire format of the Solana counter program.
//!
//! The counter program keeps a single unsigned 32-bit counter in an account it
//! owns and accepts two instructions, Increment and Decrement, each carrying an
//! unsigned 32-bit argument.  Both the account data and the instruction data
//! are fixed-layout records: fields are stored in declaration order as
//! little-endian integers without any length prefix or padding.  This is the
//! same layout Borsh produces for the equivalent Rust types, so programs and
//! clients using Borsh interoperate with this crate.
//!
//! [`CounterState`] describes the account data and [`CounterInstruction`] the
//! instruction data.  Both implement the [`Record`] trait which provides
//! encoding, decoding and the size of the encoded record.  The size is known
//! without a value (see [`encoded_size`]) which lets clients allocate the
//! counter account before it holds any state.
//!
//! When built with the `client` feature, the [`instruction`] module provides
//! builders for Solana instructions creating counter accounts and calling the
//! program.
//!
//! # Features
#![doc = document_features::document_features!()]

mod error;
mod record;
mod state;

#[cfg(feature = "client")]
pub mod instruction;

pub use error::FormatError;
pub use record::{encoded_size, Record};
pub use state::{CounterInstruction, CounterState};
