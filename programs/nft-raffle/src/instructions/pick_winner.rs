use anchor_lang::prelude::*;

use crate::{
    adapters::RandomnessOracle,
    address::ticket_address,
    draw::{random_value, winning_ticket_index},
    error::LotteryError,
    events::WinnerPicked,
    ledger::TicketLedger,
    registry::LotteryRegistry,
    state::{Lottery, LotteryStatus},
};

use super::Caller;

/// Accounts required to choose a lottery winner.
///
/// This ensures that:
/// 1. Only the lottery creator can pick a winner.
/// 2. Randomness was requested and has been fulfilled.
/// 3. The supplied ticket is the one the randomness points at.
pub struct PickWinner<'a> {
    pub creator: Caller,

    pub lottery: Pubkey,

    /// The ticket the caller claims is the winner. Never trusted, always
    /// recomputed.
    pub winning_ticket: Pubkey,

    pub registry: &'a mut LotteryRegistry,
    pub ledger: &'a TicketLedger,
    pub oracle: &'a dyn RandomnessOracle,
}

impl<'a> PickWinner<'a> {
    pub fn validate(&self, lottery: &Lottery) -> Result<()> {
        require_keys_eq!(
            self.creator.key(),
            lottery.creator,
            LotteryError::Unauthorized
        );

        match lottery.status {
            LotteryStatus::Selling => err!(LotteryError::RandomnessNotRequested),
            LotteryStatus::AwaitingRandomness => Ok(()),
            LotteryStatus::WinnerSelected | LotteryStatus::Rewarded => {
                err!(LotteryError::WinnerAlreadyPicked)
            }
        }
    }
}

/// Resolves the draw and records the winner.
///
/// Fails with [LotteryError::RandomnessNotFulfilled] while the oracle has not
/// answered yet; callers should retry later. Returns the winning ticket index.
pub fn process_pick_winner(ctx: PickWinner) -> Result<u64> {
    let lottery = ctx.registry.get(&ctx.lottery)?;
    ctx.validate(lottery)?;

    let randomness = ctx
        .oracle
        .read(&lottery.seed)
        .ok_or(LotteryError::RandomnessNotFulfilled)?;
    let drawn = random_value(randomness)?;
    let winning_index = winning_ticket_index(randomness, lottery.tickets_sold)?;

    msg!("Randomness result: {}", drawn);
    msg!("Ticket num: {}", lottery.tickets_sold);

    // cross-verify the claimed ticket against the recomputed index
    let (expected, _) = ticket_address(&ctx.lottery, winning_index);
    require_keys_eq!(ctx.winning_ticket, expected, LotteryError::WinnerMismatch);

    let ticket = ctx.ledger.get(&ctx.winning_ticket)?;
    require_keys_eq!(ticket.lottery, ctx.lottery, LotteryError::WinnerMismatch);
    require_eq!(ticket.ticket_index, winning_index, LotteryError::WinnerMismatch);
    let winner = ticket.buyer;

    let lottery = ctx.registry.get_mut(&ctx.lottery)?;
    lottery.status.advance(LotteryStatus::WinnerSelected)?;
    lottery.winning_ticket = Some(winning_index);
    lottery.winner = Some(winner);

    msg!("Winner: {}", winning_index);
    emit!(WinnerPicked {
        lottery: ctx.lottery,
        ticket: ctx.winning_ticket,
        winner,
        random_value: drawn,
        winning_ticket: winning_index,
    });

    Ok(winning_index)
}
