use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::{
    address::ticket_address,
    error::LotteryError,
    state::{Lottery, Ticket},
};

/// Append-only store of every ticket ever issued.
///
/// Tickets are stored at the address derived from `(lottery, ticket_index)`
/// and are never modified or removed once written.
#[derive(Debug, Default)]
pub struct TicketLedger {
    tickets: BTreeMap<Pubkey, Ticket>,
    by_index: BTreeMap<(Pubkey, u64), Pubkey>,
}

impl TicketLedger {
    /// Address and bump of the ticket the next sale would create, after
    /// checking that the sale can be recorded.
    pub fn next_ticket(&self, lottery_key: &Pubkey, lottery: &Lottery) -> Result<(Pubkey, u8)> {
        lottery.totals_after_sale()?;

        let (address, bump) = ticket_address(lottery_key, lottery.tickets_sold);
        require!(
            !self.tickets.contains_key(&address),
            LotteryError::TicketAlreadyIssued
        );
        Ok((address, bump))
    }

    /// Issue the next ticket of `lottery` to `buyer`.
    ///
    /// The ticket takes the current `tickets_sold` as its index and the
    /// counter is bumped by one. On error neither the lottery nor the ledger
    /// is modified.
    pub fn append(
        &mut self,
        lottery_key: &Pubkey,
        lottery: &mut Lottery,
        buyer: &Pubkey,
        now: i64,
    ) -> Result<(Pubkey, Ticket)> {
        let ticket_index = lottery.tickets_sold;
        let (address, bump) = self.next_ticket(lottery_key, lottery)?;

        let issued = lottery.record_sale()?;
        debug_assert_eq!(issued, ticket_index);

        let ticket = Ticket {
            buyer: *buyer,
            lottery: *lottery_key,
            ticket_index,
            purchased_at: now,
            bump,
        };
        self.tickets.insert(address, ticket.clone());
        self.by_index.insert((*lottery_key, ticket_index), address);

        Ok((address, ticket))
    }

    pub fn get(&self, address: &Pubkey) -> Result<&Ticket> {
        self.tickets
            .get(address)
            .ok_or_else(|| LotteryError::TicketNotFound.into())
    }

    pub fn get_by_index(&self, lottery: &Pubkey, ticket_index: u64) -> Result<(Pubkey, &Ticket)> {
        let address = self
            .by_index
            .get(&(*lottery, ticket_index))
            .ok_or(LotteryError::TicketNotFound)?;
        Ok((*address, self.get(address)?))
    }

    /// All tickets of `lottery` in index order.
    pub fn tickets_for<'a>(&'a self, lottery: &Pubkey) -> impl Iterator<Item = (Pubkey, &'a Ticket)> + 'a {
        self.by_index
            .range((*lottery, 0)..=(*lottery, u64::MAX))
            .filter_map(move |(_, address)| self.tickets.get(address).map(|t| (*address, t)))
    }

    /// Tickets of `lottery` held by `buyer`.
    pub fn tickets_of<'a>(
        &'a self,
        lottery: &Pubkey,
        buyer: &'a Pubkey,
    ) -> impl Iterator<Item = (Pubkey, &'a Ticket)> + 'a {
        self.tickets_for(lottery)
            .filter(move |(_, ticket)| ticket.buyer == *buyer)
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::SEED_LEN, state::LotteryStatus};

    fn lottery() -> Lottery {
        Lottery {
            creator: Pubkey::new_unique(),
            prize_mint: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            ticket_price: 50,
            sale_start: 0,
            sale_end: 3,
            tickets_sold: 0,
            proceeds: 0,
            seed: [9; SEED_LEN],
            status: LotteryStatus::Selling,
            winning_ticket: None,
            winner: None,
            randomness_requested_at: None,
            rewarded_at: None,
            bump: 0,
        }
    }

    #[test]
    fn indices_are_dense_and_unique() {
        let mut ledger = TicketLedger::default();
        let key = Pubkey::new_unique();
        let mut lottery = lottery();
        let buyers: Vec<Pubkey> = (0..5).map(|_| Pubkey::new_unique()).collect();

        for buyer in &buyers {
            ledger.append(&key, &mut lottery, buyer, 1).unwrap();
        }

        let indices: Vec<u64> = ledger.tickets_for(&key).map(|(_, t)| t.ticket_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(lottery.tickets_sold, 5);
        assert_eq!(lottery.proceeds, 250);

        for (address, ticket) in ledger.tickets_for(&key) {
            assert_eq!(address, ticket_address(&key, ticket.ticket_index).0);
            assert_eq!(ticket.buyer, buyers[ticket.ticket_index as usize]);
        }
    }

    #[test]
    fn tickets_are_scoped_to_their_lottery() {
        let mut ledger = TicketLedger::default();
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        let (mut lottery_a, mut lottery_b) = (lottery(), lottery());
        let buyer = Pubkey::new_unique();

        ledger.append(&a, &mut lottery_a, &buyer, 1).unwrap();
        ledger.append(&b, &mut lottery_b, &buyer, 1).unwrap();
        ledger.append(&b, &mut lottery_b, &Pubkey::new_unique(), 2).unwrap();

        assert_eq!(ledger.tickets_for(&a).count(), 1);
        assert_eq!(ledger.tickets_for(&b).count(), 2);
        assert_eq!(ledger.tickets_of(&b, &buyer).count(), 1);
        assert_eq!(ledger.len(), 3);
        assert_ne!(
            ledger.get_by_index(&a, 0).unwrap().0,
            ledger.get_by_index(&b, 0).unwrap().0
        );
    }

    #[test]
    fn reissuing_an_index_is_rejected() {
        let mut ledger = TicketLedger::default();
        let key = Pubkey::new_unique();
        let mut lottery = lottery();
        ledger.append(&key, &mut lottery, &Pubkey::new_unique(), 1).unwrap();

        lottery.tickets_sold = 0;
        assert_eq!(
            ledger
                .append(&key, &mut lottery, &Pubkey::new_unique(), 1)
                .unwrap_err(),
            LotteryError::TicketAlreadyIssued.into()
        );
        assert_eq!(lottery.tickets_sold, 0);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn missing_ticket() {
        let ledger = TicketLedger::default();
        assert!(ledger.is_empty());
        assert_eq!(
            ledger.get(&Pubkey::new_unique()).unwrap_err(),
            LotteryError::TicketNotFound.into()
        );
        assert!(ledger.get_by_index(&Pubkey::new_unique(), 0).is_err());
    }
}
