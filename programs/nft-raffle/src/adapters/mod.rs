//! Capabilities the lottery consumes from the outside world.
//!
//! The lottery never reads ambient state: time, prize custody, payments and
//! randomness are all reached through these traits. [memory] holds the
//! implementations used for simulation and tests.

use anchor_lang::prelude::*;

use crate::constants::SEED_LEN;

pub mod memory;

pub trait TimeSource {
    /// Current time in seconds since the Unix epoch.
    fn unix_timestamp(&self) -> Result<i64>;
}

/// Custody of the prize item.
pub trait AssetEscrow {
    /// Move `prize_mint` from `owner` into `vault`.
    fn escrow(&mut self, prize_mint: &Pubkey, owner: &Pubkey, vault: &Pubkey) -> Result<()>;

    /// Move `prize_mint` out of `vault` to `recipient`.
    fn release(&mut self, prize_mint: &Pubkey, vault: &Pubkey, recipient: &Pubkey) -> Result<()>;
}

/// Moves the ticket price between accounts.
pub trait Payments {
    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()>;
}

/// Verifiable randomness keyed by a caller chosen seed.
///
/// Fulfillment happens out of band; consumers poll [RandomnessOracle::read].
pub trait RandomnessOracle {
    fn request(&mut self, payer: &Pubkey, seed: &[u8; SEED_LEN]) -> Result<()>;

    /// The fulfilled randomness, or `None` while the request is pending.
    fn read(&self, seed: &[u8; SEED_LEN]) -> Option<&[u8]>;

    fn is_fulfilled(&self, seed: &[u8; SEED_LEN]) -> bool {
        self.read(seed).is_some()
    }
}
