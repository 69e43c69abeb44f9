use anchor_lang::prelude::*;

use crate::{constants::SEED_LEN, error::LotteryError};

/// Lifecycle of a lottery. Only ever moves forward, one step at a time.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum LotteryStatus {
    Selling,
    AwaitingRandomness,
    WinnerSelected,
    Rewarded,
}

impl LotteryStatus {
    /// The only status reachable from this one, if any.
    pub fn next(self) -> Option<LotteryStatus> {
        match self {
            LotteryStatus::Selling => Some(LotteryStatus::AwaitingRandomness),
            LotteryStatus::AwaitingRandomness => Some(LotteryStatus::WinnerSelected),
            LotteryStatus::WinnerSelected => Some(LotteryStatus::Rewarded),
            LotteryStatus::Rewarded => None,
        }
    }

    pub fn advance(&mut self, to: LotteryStatus) -> Result<()> {
        require!(self.next() == Some(to), LotteryError::InvalidStatusTransition);
        *self = to;
        Ok(())
    }
}

#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct Lottery {
    /// The party allowed to request randomness and pick the winner.
    pub creator: Pubkey,

    /// Mint of the escrowed prize item.
    pub prize_mint: Pubkey,

    /// Derived account holding the prize and the ticket proceeds.
    pub vault: Pubkey,

    /// Price of a single ticket.
    pub ticket_price: u64,

    /// UNIX timestamp from which tickets can be bought.
    pub sale_start: i64,

    /// UNIX timestamp at which the sale closes. Purchases require `now < sale_end`.
    pub sale_end: i64,

    /// Number of tickets issued, also the index of the next ticket.
    pub tickets_sold: u64,

    /// Sum of all ticket payments received by the vault.
    pub proceeds: u64,

    /// Oracle request key, fixed at creation and never reused.
    pub seed: [u8; SEED_LEN],

    pub status: LotteryStatus,

    /// Index of the winning ticket, set when the winner is picked.
    pub winning_ticket: Option<u64>,

    /// Buyer of the winning ticket.
    pub winner: Option<Pubkey>,

    pub randomness_requested_at: Option<i64>,
    pub rewarded_at: Option<i64>,

    pub bump: u8,
}

impl Lottery {
    /// Tickets sell while the lottery is `Selling` and `sale_start <= now < sale_end`.
    pub fn ensure_selling_at(&self, now: i64) -> Result<()> {
        require!(self.status == LotteryStatus::Selling, LotteryError::SaleClosed);
        require!(now >= self.sale_start, LotteryError::SaleNotStarted);
        require!(now < self.sale_end, LotteryError::SaleClosed);
        Ok(())
    }

    /// Ticket count and proceeds after one more sale.
    pub fn totals_after_sale(&self) -> Result<(u64, u64)> {
        let tickets_sold = self
            .tickets_sold
            .checked_add(1)
            .ok_or(LotteryError::ArithmeticOverflow)?;
        let proceeds = self
            .proceeds
            .checked_add(self.ticket_price)
            .ok_or(LotteryError::ArithmeticOverflow)?;
        Ok((tickets_sold, proceeds))
    }

    /// Reserve the next ticket index and account for its payment.
    pub fn record_sale(&mut self) -> Result<u64> {
        let index = self.tickets_sold;
        (self.tickets_sold, self.proceeds) = self.totals_after_sale()?;
        Ok(index)
    }
}

#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub buyer: Pubkey,
    pub lottery: Pubkey,
    pub ticket_index: u64,
    pub purchased_at: i64,
    pub bump: u8,
}
