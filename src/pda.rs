//! Address helpers built on the core bump search.
//!
//! - [`find_pda!`] runs the canonical bump search (255 down to 0) and
//!   returns `(Address, u8)`.
//! - [`derive_pda!`] hashes with a known bump. No curve check, no search.
//! - [`derive_pda_const!`] is the compile-time version for `const`/`static`.
//! - [`derive_ata`] / [`derive_ata_with_program`] derive Associated Token
//!   Account addresses; [`derive_ata_with_bump`] skips the search.
//! - [`program_data_address`] locates an upgradeable program's data account.
//!
//! The derivation is pure Rust on every target, so the same call gives the
//! same answer in a test, a client and a program.

use pinocchio::{error::ProgramError, Address};
use vaakit_core::{create_program_address_const, find_program_address};

use crate::programs::{ASSOCIATED_TOKEN, BPF_LOADER, TOKEN};

/// Where `wallet`'s tokens of `mint` live: the associated token account, with
/// the classic token program in the seeds. Canonical bump included.
///
/// ```rust,ignore
/// let (ata, bump) = derive_ata(&wallet, &mint)?;
/// ```
#[inline(always)]
pub fn derive_ata(wallet: &Address, mint: &Address) -> Result<(Address, u8), ProgramError> {
    derive_ata_with_program(wallet, mint, &TOKEN)
}

/// [`derive_ata`] for a mint owned by some other token program.
///
/// ```rust,ignore
/// let (ata, bump) = derive_ata_with_program(&wallet, &mint, &programs::TOKEN_2022)?;
/// ```
#[inline(always)]
pub fn derive_ata_with_program(
    wallet: &Address,
    mint: &Address,
    token_program: &Address,
) -> Result<(Address, u8), ProgramError> {
    let seeds: &[&[u8]] = &[wallet.as_ref(), token_program.as_ref(), mint.as_ref()];
    Ok(find_program_address(seeds, &ASSOCIATED_TOKEN)?)
}

/// Rebuild an ATA from a bump returned by [`derive_ata`]. One hash, no
/// curve check.
///
/// ```rust,ignore
/// let ata = derive_ata_with_bump(&wallet, &mint, bump);
/// ```
#[inline(always)]
pub fn derive_ata_with_bump(wallet: &Address, mint: &Address, bump: u8) -> Address {
    Address::new_from_array(create_program_address_const(
        &[wallet.as_ref(), TOKEN.as_array().as_ref(), mint.as_ref()],
        Some(bump),
        ASSOCIATED_TOKEN.as_array(),
    ))
}

/// Program data account of an upgradeable program: seeds `[program_id]`
/// under the upgradeable BPF loader.
pub fn program_data_address(program_id: &Address) -> Result<(Address, u8), ProgramError> {
    Ok(find_program_address(&[program_id.as_ref()], &BPF_LOADER)?)
}

// ---- Macros ----------------------------------------------------------------

/// Find a PDA and return `Result<(Address, u8), PdaError>` with the
/// canonical bump.
///
/// ```rust,ignore
/// let (pda, bump) = find_pda!(&program_id, b"vault", authority.as_ref())?;
/// ```
#[macro_export]
macro_rules! find_pda {
    ($program_id:expr, $($seed:expr),+ $(,)?) => {{
        let seeds: &[&[u8]] = &[$($seed.as_ref()),+];
        $crate::find_program_address(seeds, $program_id)
    }};
}

/// Derive a PDA with a known bump. No curve check.
///
/// The bump is appended automatically. Returns `Address`.
///
/// ```rust,ignore
/// let pda = derive_pda!(&program_id, bump, b"vault", authority.as_ref());
/// ```
#[macro_export]
macro_rules! derive_pda {
    ($program_id:expr, $bump:expr, $($seed:expr),+ $(,)?) => {{
        let seeds: &[&[u8]] = &[$($seed.as_ref()),+];
        $crate::Address::new_from_array($crate::create_program_address_const(
            seeds,
            Some($bump),
            ($program_id).as_array(),
        ))
    }};
}

/// Derive a PDA at compile time. Requires `const` seeds, bump and program
/// id bytes. Seeds are byte arrays (not references), so byte-string
/// literals are written `*b"..."`. The result is a `const Address`.
///
/// ```rust,ignore
/// const VAULT_PDA: Address = derive_pda_const!(PROGRAM_ID_BYTES, BUMP, *b"vault", AUTHORITY_BYTES);
/// ```
#[macro_export]
macro_rules! derive_pda_const {
    ($program_id:expr, $bump:expr, $($seed:expr),+ $(,)?) => {
        $crate::Address::new_from_array($crate::create_program_address_const(
            &[$(&$seed),+],
            Some($bump),
            &$program_id,
        ))
    };
}

#[cfg(test)]
mod tests {
    use pinocchio_pubkey::pubkey;

    use super::*;
    use crate::programs::TOKEN_2022;

    const WALLET: Address =
        Address::new_from_array(pubkey!("9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM"));
    const MINT: Address =
        Address::new_from_array(pubkey!("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"));

    #[test]
    fn ata_bump_matches_known_bump_path() {
        let (ata, bump) = derive_ata(&WALLET, &MINT).unwrap();
        assert_eq!(derive_ata_with_bump(&WALLET, &MINT, bump).to_bytes(), ata.to_bytes());
    }

    #[test]
    fn token_program_changes_ata() {
        let (classic, _) = derive_ata(&WALLET, &MINT).unwrap();
        let (extensions, _) = derive_ata_with_program(&WALLET, &MINT, &TOKEN_2022).unwrap();
        assert_ne!(classic.to_bytes(), extensions.to_bytes());
    }

    #[test]
    fn macros_agree_with_functions() {
        let program = BPF_LOADER;
        let wallet = WALLET;
        let (found, bump) = crate::find_pda!(&program, b"vault", wallet).unwrap();
        let derived = crate::derive_pda!(&program, bump, b"vault", wallet);
        assert_eq!(found.to_bytes(), derived.to_bytes());

        const LOADER_BYTES: [u8; 32] = BPF_LOADER.to_bytes();
        const WALLET_BYTES: [u8; 32] = WALLET.to_bytes();
        const AT_COMPILE_TIME: Address =
            crate::derive_pda_const!(LOADER_BYTES, 255, *b"vault", WALLET_BYTES);
        assert_eq!(
            AT_COMPILE_TIME.to_bytes(),
            crate::derive_pda!(&program, 255, b"vault", wallet).to_bytes()
        );
    }

    #[test]
    fn program_data_is_found_under_loader() {
        let (data, bump) = program_data_address(&crate::programs::TOKEN).unwrap();
        let direct = vaakit_core::create_program_address(
            &[crate::programs::TOKEN.as_ref(), &[bump]],
            &BPF_LOADER,
        )
        .unwrap();
        assert_eq!(data.to_bytes(), direct.to_bytes());
    }
}
