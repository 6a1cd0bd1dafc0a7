//! Convenience re-exports for the common vaakit usage pattern.
//!
//! ```rust,ignore
//! use vaakit::prelude::*;
//! ```

// ── Layout codec ─────────────────────────────────────────────────────────────
#[cfg(feature = "alloc")]
pub use crate::serialize;
pub use crate::{
    deserialize, serialize_into, serialized_len, Endian, FieldSpec, Layout, LayoutError, Record,
    Value,
};

// ── Program-derived addresses ────────────────────────────────────────────────
pub use crate::pda::{derive_ata, derive_ata_with_bump, derive_ata_with_program, program_data_address};
pub use crate::{create_program_address, find_program_address, PdaError};

// ── Wormhole core bridge ─────────────────────────────────────────────────────
pub use crate::wormhole::{
    guardian_set_address, posted_vaa_address, PostVaa, CORE_BRIDGE_MAINNET, POST_VAA_LAYOUT,
};

// ── Macros (re-exported from crate root via #[macro_export]) ─────────────────
pub use crate::{derive_pda, derive_pda_const, find_pda, require, require_eq, require_keys_eq, require_lte};

// ── Pinocchio core types ─────────────────────────────────────────────────────
pub use pinocchio::{error::ProgramError, Address};
