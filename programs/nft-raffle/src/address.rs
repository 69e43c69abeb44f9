//! Deterministic addresses for lottery, ticket and vault records.
//!
//! Every record lives at a program-derived address so a caller can locate it
//! from public data alone, and so a forged record can be detected by deriving
//! the address again.

use solana_program::pubkey::Pubkey;

use crate::constants::{LOTTERY_SEED, TICKET_SEED, VAULT_SEED};

fn derive(seeds: &[&[u8]]) -> (Pubkey, u8) {
    Pubkey::find_program_address(seeds, &crate::ID)
}

/// One lottery per (creator, prize) pair.
pub fn lottery_address(creator: &Pubkey, prize_mint: &Pubkey) -> (Pubkey, u8) {
    derive(&[LOTTERY_SEED, creator.as_ref(), prize_mint.as_ref()])
}

pub fn ticket_address(lottery: &Pubkey, ticket_index: u64) -> (Pubkey, u8) {
    derive(&[TICKET_SEED, lottery.as_ref(), &ticket_index.to_le_bytes()])
}

pub fn vault_address(lottery: &Pubkey) -> (Pubkey, u8) {
    derive(&[VAULT_SEED, lottery.as_ref()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_addresses_are_distinct_per_index() {
        let lottery = Pubkey::new_unique();
        let (first, _) = ticket_address(&lottery, 0);
        let (second, _) = ticket_address(&lottery, 1);
        assert_ne!(first, second);
        assert_eq!(first, ticket_address(&lottery, 0).0);
    }

    #[test]
    fn lottery_address_depends_on_prize() {
        let creator = Pubkey::new_unique();
        let a = lottery_address(&creator, &Pubkey::new_unique()).0;
        let b = lottery_address(&creator, &Pubkey::new_unique()).0;
        assert_ne!(a, b);
    }

    #[test]
    fn vault_differs_from_lottery() {
        let (lottery, _) = lottery_address(&Pubkey::new_unique(), &Pubkey::new_unique());
        assert_ne!(vault_address(&lottery).0, lottery);
    }
}
