use anchor_lang::prelude::*;

use crate::constants::SEED_LEN;

#[event]
pub struct LotteryCreated {
    pub lottery: Pubkey,
    pub creator: Pubkey,
    pub prize_mint: Pubkey,
    pub ticket_price: u64,
    pub sale_start: i64,
    pub sale_end: i64,
    pub seed: [u8; SEED_LEN],
}

#[event]
pub struct TicketPurchased {
    pub lottery: Pubkey,
    pub ticket: Pubkey,
    pub buyer: Pubkey,
    pub ticket_index: u64,
    pub price: u64,
}

#[event]
pub struct RandomnessRequested {
    pub lottery: Pubkey,
    pub seed: [u8; SEED_LEN],
    pub tickets_sold: u64,
    pub timestamp: i64,
}

#[event]
pub struct WinnerPicked {
    pub lottery: Pubkey,
    pub ticket: Pubkey,
    pub winner: Pubkey,
    pub random_value: u64,
    pub winning_ticket: u64,
}

#[event]
pub struct WinnerRewarded {
    pub lottery: Pubkey,
    pub winner: Pubkey,
    pub prize_mint: Pubkey,
    pub timestamp: i64,
}
