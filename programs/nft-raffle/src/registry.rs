use std::collections::{BTreeMap, BTreeSet};

use anchor_lang::prelude::*;

use crate::{constants::SEED_LEN, error::LotteryError, state::Lottery};

/// Lottery accounts keyed by their derived address, plus every seed ever
/// handed to the oracle through a lottery.
#[derive(Debug, Default)]
pub struct LotteryRegistry {
    lotteries: BTreeMap<Pubkey, Lottery>,
    used_seeds: BTreeSet<[u8; SEED_LEN]>,
}

impl LotteryRegistry {
    pub fn contains(&self, address: &Pubkey) -> bool {
        self.lotteries.contains_key(address)
    }

    pub fn is_seed_used(&self, seed: &[u8; SEED_LEN]) -> bool {
        self.used_seeds.contains(seed)
    }

    pub fn get(&self, address: &Pubkey) -> Result<&Lottery> {
        self.lotteries
            .get(address)
            .ok_or_else(|| LotteryError::LotteryNotFound.into())
    }

    pub fn get_mut(&mut self, address: &Pubkey) -> Result<&mut Lottery> {
        self.lotteries
            .get_mut(address)
            .ok_or_else(|| LotteryError::LotteryNotFound.into())
    }

    /// Store a new lottery. Neither the address nor the seed may have been seen before.
    pub fn insert(&mut self, address: Pubkey, lottery: Lottery) -> Result<()> {
        require!(!self.contains(&address), LotteryError::LotteryAlreadyExists);
        require!(!self.is_seed_used(&lottery.seed), LotteryError::DuplicateSeed);

        self.used_seeds.insert(lottery.seed);
        self.lotteries.insert(address, lottery);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Pubkey, &Lottery)> {
        self.lotteries.iter()
    }

    /// Lotteries opened by `creator`.
    pub fn created_by<'a>(&'a self, creator: &'a Pubkey) -> impl Iterator<Item = (&'a Pubkey, &'a Lottery)> {
        self.lotteries
            .iter()
            .filter(move |(_, lottery)| lottery.creator == *creator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LotteryStatus;

    fn lottery(creator: Pubkey, seed: u8) -> Lottery {
        Lottery {
            creator,
            prize_mint: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            ticket_price: 1,
            sale_start: 0,
            sale_end: 10,
            tickets_sold: 0,
            proceeds: 0,
            seed: [seed; SEED_LEN],
            status: LotteryStatus::Selling,
            winning_ticket: None,
            winner: None,
            randomness_requested_at: None,
            rewarded_at: None,
            bump: 0,
        }
    }

    #[test]
    fn rejects_reused_seed() {
        let mut registry = LotteryRegistry::default();
        let creator = Pubkey::new_unique();
        registry.insert(Pubkey::new_unique(), lottery(creator, 1)).unwrap();

        assert_eq!(
            registry
                .insert(Pubkey::new_unique(), lottery(Pubkey::new_unique(), 1))
                .unwrap_err(),
            LotteryError::DuplicateSeed.into()
        );
        assert_eq!(registry.iter().count(), 1);
    }

    #[test]
    fn rejects_existing_address() {
        let mut registry = LotteryRegistry::default();
        let address = Pubkey::new_unique();
        let creator = Pubkey::new_unique();
        registry.insert(address, lottery(creator, 1)).unwrap();

        assert_eq!(
            registry.insert(address, lottery(creator, 2)).unwrap_err(),
            LotteryError::LotteryAlreadyExists.into()
        );
        assert!(!registry.is_seed_used(&[2; SEED_LEN]));
    }

    #[test]
    fn lookup() {
        let mut registry = LotteryRegistry::default();
        let creator = Pubkey::new_unique();
        let address = Pubkey::new_unique();
        registry.insert(address, lottery(creator, 1)).unwrap();
        registry.insert(Pubkey::new_unique(), lottery(Pubkey::new_unique(), 2)).unwrap();

        assert_eq!(registry.get(&address).unwrap().creator, creator);
        assert_eq!(
            registry.get(&Pubkey::new_unique()).unwrap_err(),
            LotteryError::LotteryNotFound.into()
        );
        assert_eq!(registry.created_by(&creator).count(), 1);
    }
}
