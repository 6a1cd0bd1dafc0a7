//! Program-derived address (PDA) derivation.
//!
//! A PDA is `sha256(seed_0 || .. || seed_n || program_id || "ProgramDerivedAddress")`
//! that does NOT decode as an ed25519 point, so no private key exists for it.
//! The canonical bump is the highest byte in `255..=0` that, appended as a
//! final seed, lands the hash off the curve.
//!
//! - [`find_program_address`] runs the bump search.
//! - [`find_program_address_with`] is the same loop with the curve test
//!   injected, so callers (and tests) can swap in their own predicate.
//! - [`create_program_address`] checks a single seed set (bump included).
//! - [`create_program_address_const`] hashes at compile time with no curve
//!   check, for `const` addresses whose bump is already known.

use curve25519_dalek::edwards::CompressedEdwardsY;
use pinocchio::Address;
use sha2_const_stable::Sha256;

use crate::{error::PdaError, require, require_lte};

/// Maximum length of a single seed, in bytes.
pub const MAX_SEED_LEN: usize = 32;

/// Maximum number of seeds, counting the bump.
pub const MAX_SEEDS: usize = 16;

/// Domain separator appended after the program id.
pub const PDA_MARKER: &[u8; 21] = b"ProgramDerivedAddress";

/// `true` if `bytes` is a valid compressed ed25519 point.
#[inline]
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    CompressedEdwardsY(*bytes).decompress().is_some()
}

/// Hash seeds, optional bump and program id into a candidate address.
///
/// No curve check and no seed bounds: the caller vouches for both. Usable in
/// `const` context:
///
/// ```rust,ignore
/// const VAULT: [u8; 32] = create_program_address_const(&[b"vault"], Some(254), &PROGRAM_ID);
/// ```
pub const fn create_program_address_const(
    seeds: &[&[u8]],
    bump: Option<u8>,
    program_id: &[u8; 32],
) -> [u8; 32] {
    let mut hasher = Sha256::new();
    let mut i = 0;
    while i < seeds.len() {
        hasher = hasher.update(seeds[i]);
        i += 1;
    }
    if let Some(bump) = bump {
        hasher = hasher.update(&[bump]);
    }
    hasher.update(program_id).update(PDA_MARKER).finalize()
}

#[inline(always)]
fn check_seeds(seeds: &[&[u8]], reserved: usize) -> Result<(), PdaError> {
    require_lte!(seeds.len() + reserved, MAX_SEEDS, PdaError::TooManySeeds);
    for seed in seeds {
        require!(seed.len() <= MAX_SEED_LEN, PdaError::MaxSeedLengthExceeded);
    }
    Ok(())
}

/// Derive the address for one exact seed set (bump, if any, already appended).
///
/// `InvalidSeeds` if the result is on the curve.
pub fn create_program_address(seeds: &[&[u8]], program_id: &Address) -> Result<Address, PdaError> {
    check_seeds(seeds, 0)?;
    let hash = create_program_address_const(seeds, None, program_id.as_array());
    require!(!is_on_curve(&hash), PdaError::InvalidSeeds);
    Ok(Address::new_from_array(hash))
}

/// Find the canonical PDA and bump for `seeds` under `program_id`.
///
/// Tries bumps from 255 down to 0 and returns the first off-curve address.
/// Deterministic: same inputs, same `(address, bump)`, in any process.
///
/// ```rust,ignore
/// let (vaa, bump) = find_program_address(&[b"PostedVAA", &vaa_hash], &CORE_BRIDGE)?;
/// ```
#[inline]
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Address,
) -> Result<(Address, u8), PdaError> {
    find_program_address_with(seeds, program_id, is_on_curve)
}

/// [`find_program_address`] with a caller-supplied on-curve predicate.
///
/// At most 256 hash + predicate calls. `NoValidBumpFound` if the predicate
/// accepts every candidate.
pub fn find_program_address_with<F>(
    seeds: &[&[u8]],
    program_id: &Address,
    on_curve: F,
) -> Result<(Address, u8), PdaError>
where
    F: Fn(&[u8; 32]) -> bool,
{
    // One slot is taken by the bump.
    check_seeds(seeds, 1)?;
    let program_id = program_id.as_array();
    for bump in (0..=u8::MAX).rev() {
        let candidate = create_program_address_const(seeds, Some(bump), program_id);
        if !on_curve(&candidate) {
            debug!("found program address with bump {} ({} seeds)", bump, seeds.len());
            return Ok((Address::new_from_array(candidate), bump));
        }
        trace!("bump {} lands on curve", bump);
    }
    debug!("no off-curve bump for {} seeds", seeds.len());
    Err(PdaError::NoValidBumpFound)
}
