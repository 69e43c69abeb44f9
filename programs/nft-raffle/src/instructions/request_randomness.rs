use anchor_lang::prelude::*;

use crate::{
    adapters::{RandomnessOracle, TimeSource},
    error::LotteryError,
    events::RandomnessRequested,
    registry::LotteryRegistry,
    state::{Lottery, LotteryStatus},
};

use super::Caller;

/// Accounts required to close the sale and ask the oracle for randomness.
pub struct RequestRandomness<'a> {
    /// Must be the lottery creator.
    pub creator: Caller,

    pub lottery: Pubkey,

    pub registry: &'a mut LotteryRegistry,
    pub oracle: &'a mut dyn RandomnessOracle,
    pub clock: &'a dyn TimeSource,
}

impl<'a> RequestRandomness<'a> {
    pub fn validate(&self, lottery: &Lottery, now: i64) -> Result<()> {
        require_keys_eq!(
            self.creator.key(),
            lottery.creator,
            LotteryError::Unauthorized
        );
        require!(
            lottery.status == LotteryStatus::Selling,
            LotteryError::RandomnessAlreadyRequested
        );
        require!(now >= lottery.sale_end, LotteryError::SaleStillOpen);
        require_gt!(lottery.tickets_sold, 0, LotteryError::NoTicketsSold);

        Ok(())
    }
}

/// Submits the lottery seed to the oracle and moves to `AwaitingRandomness`.
///
/// Only succeeds once per lottery; the draw range is fixed from here on.
pub fn process_request_randomness(ctx: RequestRandomness) -> Result<()> {
    let now = ctx.clock.unix_timestamp()?;
    let creator = ctx.creator.key();

    let lottery = ctx.registry.get(&ctx.lottery)?;
    ctx.validate(lottery, now)?;
    let seed = lottery.seed;

    ctx.oracle.request(&creator, &seed)?;

    let lottery = ctx.registry.get_mut(&ctx.lottery)?;
    lottery.status.advance(LotteryStatus::AwaitingRandomness)?;
    lottery.randomness_requested_at = Some(now);

    msg!("Randomness requested for lottery {}", ctx.lottery);
    msg!("Ticket num: {}", lottery.tickets_sold);
    emit!(RandomnessRequested {
        lottery: ctx.lottery,
        seed,
        tickets_sold: lottery.tickets_sold,
        timestamp: now,
    });

    Ok(())
}
