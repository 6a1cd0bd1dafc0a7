#![cfg_attr(not(test), no_std)]
//! **vaakit** - instruction layouts and account addresses for Solana relayers.
//!
//! Describe instruction data once as a `const` layout, encode and decode it
//! zero-copy, and derive every program address the instruction needs with
//! the ledger's own bump search. Built on [`vaakit_core`], re-exported here
//! with program ids, address helpers and Wormhole core bridge bindings.
//!
//! No alloc required, BPF-safe. `alloc` (default) adds `Vec`-returning
//! encoders; `log` turns on `log` records in the core.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vaakit::prelude::*;
//!
//! let data = PostVaa::decode(instruction_data)?;
//! let (guardian_set, _) = guardian_set_address(data.guardian_set, &CORE_BRIDGE_MAINNET)?;
//! ```
//!
//! # Layout codec
//!
//! | Item | What it does |
//! |---|---|
//! | [`FieldSpec`] / [`Layout`] | declare a wire format in a `const` |
//! | [`Record`] | name -> value map to encode from / decode into |
//! | [`serialize_into`] / [`serialize`] | record -> bytes, all-or-nothing |
//! | [`deserialize`] | bytes -> record, exact length only |
//!
//! # PDA utilities
//!
//! | Macro / Function | What it does |
//! |---|---|
//! | [`find_program_address`] | canonical bump search |
//! | [`create_program_address`] | one derivation with the bump already in the seeds |
//! | `find_pda!` | bump search from a seed list |
//! | `derive_pda!` | derive with a known bump (no search, no curve check) |
//! | `derive_pda_const!` | derive at compile time |
//! | [`derive_ata`] | ATA address for wallet + mint |
//! | [`derive_ata_with_program`] | ATA with explicit token program |
//! | [`derive_ata_with_bump`] | ATA with known bump |
//! | [`program_data_address`] | data account of an upgradeable program |
//!
//! # Wormhole
//!
//! [`wormhole`] module: [`POST_VAA_LAYOUT`](wormhole::POST_VAA_LAYOUT),
//! [`PostVaa`](wormhole::PostVaa), `guardian_set_address`,
//! `posted_vaa_address`, `CORE_BRIDGE_MAINNET`.
//!
//! # Well-known program IDs
//!
//! [`programs`] module: `SYSTEM`, `TOKEN`, `TOKEN_2022`, `ASSOCIATED_TOKEN`,
//! `BPF_LOADER`, `SYSVAR_CLOCK`, `SYSVAR_RENT`.

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "programs")]
pub mod programs;
#[cfg(not(feature = "programs"))]
mod programs;

mod pda;
pub mod prelude;
pub mod wormhole;

pub use pda::*;

#[cfg(feature = "alloc")]
pub use vaakit_core::serialize;
pub use vaakit_core::{
    create_program_address, create_program_address_const, deserialize, find_program_address,
    find_program_address_with, is_on_curve, serialize_into, serialized_len, Constant,
    DataWriter, Endian, FieldKind, FieldSpec, Layout, LayoutError, LengthPrefix, PdaError,
    Record, SliceCursor, Value, MAX_FIELDS, MAX_SEEDS, MAX_SEED_LEN, MAX_UINT_SIZE, PDA_MARKER,
};

// Re-export pinocchio core types so users only need one import.
pub use pinocchio::{error::ProgramError, Address};

// ── Macros ───────────────────────────────────────────────────────────────────

pub use vaakit_core::{require, require_eq, require_lte};

/// Require two [`Address`] values to be equal.
///
/// ```rust,ignore
/// require_keys_eq!(&posted, &expected, ProgramError::InvalidSeeds);
/// ```
#[macro_export]
macro_rules! require_keys_eq {
    ($a:expr, $b:expr, $err:expr) => {
        if *$a != *$b {
            return Err($err.into());
        }
    };
}
