use anchor_lang::prelude::*;

use crate::{
    adapters::{AssetEscrow, TimeSource},
    error::LotteryError,
    events::WinnerRewarded,
    ledger::TicketLedger,
    registry::LotteryRegistry,
    state::{Lottery, LotteryStatus},
};

use super::Caller;

/// Accounts required to release the prize to the winner.
pub struct RewardWinner<'a> {
    /// Must be the buyer of the winning ticket.
    pub winner: Caller,

    pub lottery: Pubkey,

    pub registry: &'a mut LotteryRegistry,
    pub ledger: &'a TicketLedger,
    pub escrow: &'a mut dyn AssetEscrow,
    pub clock: &'a dyn TimeSource,
}

impl<'a> RewardWinner<'a> {
    pub fn validate(&self, lottery: &Lottery) -> Result<()> {
        match lottery.status {
            LotteryStatus::WinnerSelected => {}
            LotteryStatus::Rewarded => return err!(LotteryError::AlreadyRewarded),
            LotteryStatus::Selling | LotteryStatus::AwaitingRandomness => {
                return err!(LotteryError::WinnerNotPicked)
            }
        }

        let winner = lottery.winner.ok_or(LotteryError::WinnerNotPicked)?;
        require_keys_eq!(self.winner.key(), winner, LotteryError::Unauthorized);

        // the recorded winner must still match the ticket at the winning index
        let winning_index = lottery
            .winning_ticket
            .ok_or(LotteryError::WinnerNotPicked)?;
        let (_, ticket) = self.ledger.get_by_index(&self.lottery, winning_index)?;
        require_keys_eq!(ticket.buyer, winner, LotteryError::WinnerMismatch);

        Ok(())
    }
}

/// Transfers the escrowed prize from the lottery vault to the winner.
pub fn process_reward_winner(ctx: RewardWinner) -> Result<()> {
    let now = ctx.clock.unix_timestamp()?;
    let winner = ctx.winner.key();

    let lottery = ctx.registry.get(&ctx.lottery)?;
    ctx.validate(lottery)?;
    let (prize_mint, vault) = (lottery.prize_mint, lottery.vault);

    ctx.escrow.release(&prize_mint, &vault, &winner)?;

    let lottery = ctx.registry.get_mut(&ctx.lottery)?;
    lottery.status.advance(LotteryStatus::Rewarded)?;
    lottery.rewarded_at = Some(now);

    msg!("Prize {} released to {}", prize_mint, winner);
    emit!(WinnerRewarded {
        lottery: ctx.lottery,
        winner,
        prize_mint,
        timestamp: now,
    });

    Ok(())
}
