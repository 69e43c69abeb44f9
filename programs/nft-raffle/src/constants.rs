use anchor_lang::prelude::*;

#[constant]
pub const LOTTERY_SEED: &[u8] = b"lottery";

#[constant]
pub const TICKET_SEED: &[u8] = b"ticket";

#[constant]
pub const VAULT_SEED: &[u8] = b"vault";

/// Number of leading oracle bytes read as the little-endian draw value.
pub const RANDOM_VALUE_BYTES: usize = 8;

/// Width of the oracle request key chosen by the creator.
pub const SEED_LEN: usize = 32;
