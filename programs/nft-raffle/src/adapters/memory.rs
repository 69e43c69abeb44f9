//! In-memory collaborators for off-chain simulation and tests.

use std::{cell::Cell, collections::BTreeMap};

use anchor_lang::prelude::*;

use super::{AssetEscrow, Payments, RandomnessOracle, TimeSource};
use crate::constants::SEED_LEN;

#[error_code(offset = 7000)]
#[derive(Eq, PartialEq)]
pub enum AdapterError {
    #[msg("Account balance is too low for this transfer")]
    InsufficientFunds,
    #[msg("Balance overflow")]
    BalanceOverflow,
    #[msg("Prize item is not held by the expected owner")]
    PrizeNotHeld,
    #[msg("Randomness was already requested for this seed")]
    RequestExists,
    #[msg("No randomness request exists for this seed")]
    RequestMissing,
    #[msg("Randomness for this seed is already fulfilled")]
    AlreadyFulfilled,
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn set(&self, now: i64) {
        self.now.set(now);
    }

    /// Moves the clock by `seconds`, saturating at the `i64` bounds.
    pub fn advance(&self, seconds: i64) {
        self.now.set(self.now.get().saturating_add(seconds));
    }
}

impl TimeSource for ManualClock {
    fn unix_timestamp(&self) -> Result<i64> {
        Ok(self.now.get())
    }
}

/// Tracks the current owner of each prize mint.
#[derive(Debug, Default)]
pub struct MemoryEscrow {
    owners: BTreeMap<Pubkey, Pubkey>,
}

impl MemoryEscrow {
    /// Create a prize item owned by `owner`.
    pub fn mint(&mut self, prize_mint: Pubkey, owner: Pubkey) {
        self.owners.insert(prize_mint, owner);
    }

    pub fn owner_of(&self, prize_mint: &Pubkey) -> Option<Pubkey> {
        self.owners.get(prize_mint).copied()
    }

    fn move_item(&mut self, prize_mint: &Pubkey, from: &Pubkey, to: &Pubkey) -> Result<()> {
        let owner = self
            .owners
            .get_mut(prize_mint)
            .ok_or(AdapterError::PrizeNotHeld)?;
        require_keys_eq!(*owner, *from, AdapterError::PrizeNotHeld);
        *owner = *to;
        Ok(())
    }
}

impl AssetEscrow for MemoryEscrow {
    fn escrow(&mut self, prize_mint: &Pubkey, owner: &Pubkey, vault: &Pubkey) -> Result<()> {
        self.move_item(prize_mint, owner, vault)
    }

    fn release(&mut self, prize_mint: &Pubkey, vault: &Pubkey, recipient: &Pubkey) -> Result<()> {
        self.move_item(prize_mint, vault, recipient)
    }
}

/// Account balances in the smallest currency unit.
#[derive(Debug, Default)]
pub struct MemoryBank {
    balances: BTreeMap<Pubkey, u64>,
}

impl MemoryBank {
    pub fn deposit(&mut self, account: Pubkey, amount: u64) -> Result<()> {
        let balance = self.balances.entry(account).or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or(AdapterError::BalanceOverflow)?;
        Ok(())
    }

    pub fn balance(&self, account: &Pubkey) -> u64 {
        self.balances.get(account).copied().unwrap_or_default()
    }
}

impl Payments for MemoryBank {
    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        let from_balance = self
            .balance(from)
            .checked_sub(amount)
            .ok_or(AdapterError::InsufficientFunds)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self
            .balance(to)
            .checked_add(amount)
            .ok_or(AdapterError::BalanceOverflow)?;

        self.balances.insert(*from, from_balance);
        self.balances.insert(*to, to_balance);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RandomnessRequest {
    payer: Pubkey,
    randomness: Option<Vec<u8>>,
}

/// Request/fulfill oracle where fulfillment is driven by the caller.
#[derive(Debug, Default)]
pub struct MemoryOracle {
    requests: BTreeMap<[u8; SEED_LEN], RandomnessRequest>,
}

impl MemoryOracle {
    /// The oracle side of the protocol: publish randomness for a pending request.
    pub fn fulfill(&mut self, seed: &[u8; SEED_LEN], randomness: Vec<u8>) -> Result<()> {
        let request = self
            .requests
            .get_mut(seed)
            .ok_or(AdapterError::RequestMissing)?;
        require!(request.randomness.is_none(), AdapterError::AlreadyFulfilled);
        request.randomness = Some(randomness);
        Ok(())
    }

    pub fn is_requested(&self, seed: &[u8; SEED_LEN]) -> bool {
        self.requests.contains_key(seed)
    }

    pub fn payer(&self, seed: &[u8; SEED_LEN]) -> Option<Pubkey> {
        self.requests.get(seed).map(|r| r.payer)
    }

    /// Seeds waiting for fulfillment.
    pub fn pending(&self) -> impl Iterator<Item = &[u8; SEED_LEN]> {
        self.requests
            .iter()
            .filter(|(_, r)| r.randomness.is_none())
            .map(|(seed, _)| seed)
    }
}

impl RandomnessOracle for MemoryOracle {
    fn request(&mut self, payer: &Pubkey, seed: &[u8; SEED_LEN]) -> Result<()> {
        require!(!self.requests.contains_key(seed), AdapterError::RequestExists);
        self.requests.insert(
            *seed,
            RandomnessRequest {
                payer: *payer,
                randomness: None,
            },
        );
        Ok(())
    }

    fn read(&self, seed: &[u8; SEED_LEN]) -> Option<&[u8]> {
        self.requests.get(seed)?.randomness.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escrow_requires_current_owner() {
        let mut escrow = MemoryEscrow::default();
        let (mint, owner, vault) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        escrow.mint(mint, owner);

        assert_eq!(
            escrow.escrow(&mint, &vault, &vault).unwrap_err(),
            AdapterError::PrizeNotHeld.into()
        );
        escrow.escrow(&mint, &owner, &vault).unwrap();
        assert_eq!(escrow.owner_of(&mint), Some(vault));

        escrow.release(&mint, &vault, &owner).unwrap();
        assert_eq!(escrow.owner_of(&mint), Some(owner));
        assert!(escrow.release(&mint, &vault, &owner).is_err());
    }

    #[test]
    fn bank_rejects_overdraft_without_moving_funds() {
        let mut bank = MemoryBank::default();
        let (alice, bob) = (Pubkey::new_unique(), Pubkey::new_unique());
        bank.deposit(alice, 40).unwrap();

        assert_eq!(
            bank.transfer(&alice, &bob, 50).unwrap_err(),
            AdapterError::InsufficientFunds.into()
        );
        assert_eq!(bank.balance(&alice), 40);
        assert_eq!(bank.balance(&bob), 0);

        bank.transfer(&alice, &bob, 40).unwrap();
        assert_eq!(bank.balance(&alice), 0);
        assert_eq!(bank.balance(&bob), 40);
    }

    #[test]
    fn deposit_overflow_keeps_balance() {
        let mut bank = MemoryBank::default();
        let alice = Pubkey::new_unique();
        bank.deposit(alice, u64::MAX - 1).unwrap();

        assert_eq!(
            bank.deposit(alice, 2).unwrap_err(),
            AdapterError::BalanceOverflow.into()
        );
        assert_eq!(bank.balance(&alice), u64::MAX - 1);

        bank.deposit(alice, 1).unwrap();
        assert_eq!(bank.balance(&alice), u64::MAX);
    }

    #[test]
    fn oracle_request_then_fulfill() {
        let mut oracle = MemoryOracle::default();
        let payer = Pubkey::new_unique();
        let seed = [3; SEED_LEN];

        assert!(oracle.fulfill(&seed, vec![1; 64]).is_err());
        oracle.request(&payer, &seed).unwrap();
        assert!(!oracle.is_fulfilled(&seed));
        assert_eq!(oracle.pending().count(), 1);
        assert_eq!(
            oracle.request(&payer, &seed).unwrap_err(),
            AdapterError::RequestExists.into()
        );

        oracle.fulfill(&seed, vec![1; 64]).unwrap();
        assert_eq!(oracle.read(&seed), Some(&[1u8; 64][..]));
        assert_eq!(oracle.pending().count(), 0);
        assert_eq!(
            oracle.fulfill(&seed, vec![2; 64]).unwrap_err(),
            AdapterError::AlreadyFulfilled.into()
        );
        assert_eq!(oracle.payer(&seed), Some(payer));
    }

    #[test]
    fn manual_clock() {
        let clock = ManualClock::new(10);
        clock.advance(5);
        assert_eq!(clock.unix_timestamp().unwrap(), 15);
        clock.set(3);
        assert_eq!(clock.unix_timestamp().unwrap(), 3);
    }

    #[test]
    fn manual_clock_saturates() {
        let clock = ManualClock::new(i64::MAX - 1);
        clock.advance(10);
        assert_eq!(clock.unix_timestamp().unwrap(), i64::MAX);

        clock.set(i64::MIN + 1);
        clock.advance(-10);
        assert_eq!(clock.unix_timestamp().unwrap(), i64::MIN);
    }
}
