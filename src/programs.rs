//! Program and sysvar ids a relayer passes alongside a `post_vaa` or a token
//! redemption.

use pinocchio::Address;
use pinocchio_pubkey::pubkey;

pub const SYSTEM: Address = Address::new_from_array([0u8; 32]);

/// Token program seeded into [`derive_ata`](crate::derive_ata).
pub const TOKEN: Address =
    Address::new_from_array(pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"));

/// Token Extensions program, for mints redeemed through
/// [`derive_ata_with_program`](crate::derive_ata_with_program).
pub const TOKEN_2022: Address =
    Address::new_from_array(pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb"));

/// Owner of every ATA: seeds `[wallet, token_program, mint]`.
pub const ASSOCIATED_TOKEN: Address =
    Address::new_from_array(pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJe1bTu"));

/// Upgradeable loader. Program data accounts hang off it, see
/// [`program_data_address`](crate::program_data_address).
pub const BPF_LOADER: Address =
    Address::new_from_array(pubkey!("BPFLoaderUpgradeab1e11111111111111111111111"));

pub const SYSVAR_CLOCK: Address =
    Address::new_from_array(pubkey!("SysvarC1ock11111111111111111111111111111111"));

pub const SYSVAR_RENT: Address =
    Address::new_from_array(pubkey!("SysvarRent111111111111111111111111111111111"));
