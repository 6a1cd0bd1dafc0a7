#![cfg_attr(not(test), no_std)]
//! **vaakit-core** - declarative binary layouts and program-derived addresses.
//!
//! Describe a wire format once as a `const` [`Layout`], then use it in both
//! directions. Derive the accounts an instruction touches with the same
//! bump search the ledger runs.
//!
//! No alloc by default, no proc macros, BPF-safe. The `alloc` feature adds
//! a `Vec`-returning [`serialize`]; the `log` feature emits `log` records
//! for bump searches and decode failures.
//!
//! # Layouts
//!
//! | Item | What it is |
//! |---|---|
//! | [`FieldSpec`] | one field: name, kind, optional constant, omit flag |
//! | [`FieldKind`] | `Uint`, `Bytes` (fixed) or `VarBytes` (length-prefixed / trailing) |
//! | [`Layout`] | ordered, validated field list; build it in a `const` |
//! | [`Record`] | name -> [`Value`] map, fixed capacity, borrows its byte values |
//!
//! # Codec
//!
//! | Function | What it does |
//! |---|---|
//! | [`serialized_len`] | validate a record against a layout, return its wire size |
//! | [`serialize_into`] | write a record into a caller buffer, all-or-nothing |
//! | [`serialize`] | same, into a fresh `Vec<u8>` (`alloc`) |
//! | [`deserialize`] | zero-copy decode; exact-length input only |
//!
//! # Program-derived addresses
//!
//! | Function | What it does |
//! |---|---|
//! | [`find_program_address`] | canonical (highest) bump search, 255 down to 0 |
//! | [`find_program_address_with`] | same, with an injected on-curve predicate |
//! | [`create_program_address`] | one derivation, rejects on-curve results |
//! | [`create_program_address_const`] | compile-time derivation, no curve check |
//! | [`is_on_curve`] | ed25519 compressed-point membership |
//!
//! ```rust,ignore
//! use vaakit_core::{FieldSpec, Layout, Endian, Record, serialize_into, deserialize};
//!
//! const PING_FIELDS: &[FieldSpec] = &[
//!     FieldSpec::uint("tag", 1, Endian::Big).constant_uint(7).omit(),
//!     FieldSpec::uint("nonce", 4, Endian::Little),
//!     FieldSpec::var_bytes("memo", 2, Endian::Little),
//! ];
//! const PING: Layout = Layout::new(PING_FIELDS);
//!
//! let mut rec = Record::new();
//! rec.push_uint("nonce", 42)?;
//! rec.push_bytes("memo", b"hi")?;
//! let mut buf = [0u8; 16];
//! let n = serialize_into(&PING, &rec, &mut buf)?;
//! assert_eq!(deserialize(&PING, &buf[..n])?, rec);
//! ```

#[cfg(feature = "alloc")]
extern crate alloc;

// ── Logging ──────────────────────────────────────────────────────────────────
//
// Expand to `log` calls only with the `log` feature; otherwise the
// arguments are type-checked and discarded.

#[allow(unused_macros)]
macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
        #[cfg(not(feature = "log"))]
        if false {
            let _ = format_args!($($arg)*);
        }
    }};
}

#[allow(unused_macros)]
macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
        #[cfg(not(feature = "log"))]
        if false {
            let _ = format_args!($($arg)*);
        }
    }};
}

mod codec;
mod cursor;
mod error;
mod layout;
mod pda;
mod record;

#[cfg(feature = "alloc")]
pub use codec::serialize;
pub use codec::{deserialize, serialize_into, serialized_len};
pub use cursor::{DataWriter, SliceCursor};
pub use error::{LayoutError, PdaError};
pub use layout::{
    Constant, Endian, FieldKind, FieldSpec, Layout, LengthPrefix, MAX_FIELDS, MAX_UINT_SIZE,
};
pub use pda::{
    create_program_address, create_program_address_const, find_program_address,
    find_program_address_with, is_on_curve, MAX_SEEDS, MAX_SEED_LEN, PDA_MARKER,
};
pub use record::{Record, Value};

// Re-export the address type so callers only need one import.
pub use pinocchio::Address;

// ── Macros ───────────────────────────────────────────────────────────────────

/// Require a boolean condition: return `$err` (converted via `Into`) if false.
///
/// ```rust,ignore
/// require!(seed.len() <= MAX_SEED_LEN, PdaError::MaxSeedLengthExceeded);
/// ```
#[macro_export]
macro_rules! require {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}

/// Require `a == b` for scalar types.
#[macro_export]
macro_rules! require_eq {
    ($a:expr, $b:expr, $err:expr) => {
        if $a != $b {
            return Err($err.into());
        }
    };
}

/// Require `a <= b`.
#[macro_export]
macro_rules! require_lte {
    ($a:expr, $b:expr, $err:expr) => {
        if $a > $b {
            return Err($err.into());
        }
    };
}
