use anchor_lang::prelude::*;

use crate::{
    adapters::{AssetEscrow, TimeSource},
    address::{lottery_address, vault_address},
    constants::SEED_LEN,
    error::LotteryError,
    events::LotteryCreated,
    registry::LotteryRegistry,
    state::{Lottery, LotteryStatus},
};

use super::Caller;

/// Terms of a new lottery, fixed for its whole lifetime.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LotteryParams {
    /// Price of one ticket, must be positive.
    pub ticket_price: u64,

    /// UNIX timestamp at which the sale opens.
    pub sale_start: i64,

    /// UNIX timestamp at which the sale closes. Must be after `sale_start`
    /// and in the future.
    pub sale_end: i64,

    /// Oracle request key. Must not have been used by any other lottery.
    pub seed: [u8; SEED_LEN],
}

impl LotteryParams {
    pub fn validate(&self, now: i64) -> Result<()> {
        require_gt!(self.ticket_price, 0, LotteryError::InvalidTicketPrice);
        require!(
            self.sale_start < self.sale_end,
            LotteryError::InvalidSaleWindow
        );
        require!(self.sale_end > now, LotteryError::SaleEndInPast);
        Ok(())
    }
}

/// Accounts required to open a lottery and escrow its prize.
pub struct CreateLottery<'a> {
    /// The creator, who must currently own the prize.
    pub creator: Caller,

    /// Mint of the prize item to escrow.
    pub prize_mint: Pubkey,

    pub registry: &'a mut LotteryRegistry,
    pub escrow: &'a mut dyn AssetEscrow,
    pub clock: &'a dyn TimeSource,
}

impl<'a> CreateLottery<'a> {
    /// Returns the derived lottery address and bump.
    pub fn validate(&self, params: &LotteryParams, now: i64) -> Result<(Pubkey, u8)> {
        params.validate(now)?;

        let (lottery, bump) = lottery_address(&self.creator.key(), &self.prize_mint);
        require!(
            !self.registry.contains(&lottery),
            LotteryError::LotteryAlreadyExists
        );
        require!(
            !self.registry.is_seed_used(&params.seed),
            LotteryError::DuplicateSeed
        );

        Ok((lottery, bump))
    }
}

/// Opens a lottery in the `Selling` state.
///
/// Steps performed:
/// 1. Validate the sale terms and that the seed and (creator, prize) pair are unused.
/// 2. Move the prize from the creator into the lottery vault.
/// 3. Store the lottery record.
pub fn process_create_lottery(ctx: CreateLottery, params: LotteryParams) -> Result<Pubkey> {
    let now = ctx.clock.unix_timestamp()?;
    let (lottery_key, bump) = ctx.validate(&params, now)?;
    let (vault, _) = vault_address(&lottery_key);
    let creator = ctx.creator.key();

    ctx.escrow.escrow(&ctx.prize_mint, &creator, &vault)?;

    ctx.registry.insert(
        lottery_key,
        Lottery {
            creator,
            prize_mint: ctx.prize_mint,
            vault,
            ticket_price: params.ticket_price,
            sale_start: params.sale_start,
            sale_end: params.sale_end,
            tickets_sold: 0,
            proceeds: 0,
            seed: params.seed,
            status: LotteryStatus::Selling,
            winning_ticket: None,
            winner: None,
            randomness_requested_at: None,
            rewarded_at: None,
            bump,
        },
    )?;

    msg!("Lottery {} created by {}", lottery_key, creator);
    emit!(LotteryCreated {
        lottery: lottery_key,
        creator,
        prize_mint: ctx.prize_mint,
        ticket_price: params.ticket_price,
        sale_start: params.sale_start,
        sale_end: params.sale_end,
        seed: params.seed,
    });

    Ok(lottery_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> LotteryParams {
        LotteryParams {
            ticket_price: 50,
            sale_start: 100,
            sale_end: 103,
            seed: [1; SEED_LEN],
        }
    }

    #[test]
    fn accepts_future_window() {
        params().validate(100).unwrap();
        params().validate(102).unwrap();
    }

    #[test]
    fn rejects_zero_price() {
        let params = LotteryParams {
            ticket_price: 0,
            ..params()
        };
        assert_eq!(
            params.validate(100).unwrap_err(),
            LotteryError::InvalidTicketPrice.into()
        );
    }

    #[test]
    fn rejects_inverted_or_empty_window() {
        for sale_end in [99, 100] {
            let params = LotteryParams {
                sale_end,
                ..params()
            };
            assert_eq!(
                params.validate(0).unwrap_err(),
                LotteryError::InvalidSaleWindow.into()
            );
        }
    }

    #[test]
    fn rejects_window_already_over() {
        assert_eq!(
            params().validate(103).unwrap_err(),
            LotteryError::SaleEndInPast.into()
        );
    }
}
