use anchor_lang::prelude::*;

use crate::{
    adapters::{Payments, TimeSource},
    events::TicketPurchased,
    ledger::TicketLedger,
    registry::LotteryRegistry,
    state::Lottery,
};

use super::Caller;

/// Accounts required to buy a lottery ticket.
pub struct BuyTicket<'a> {
    /// The account paying for, and owning, the ticket.
    pub buyer: Caller,

    /// Address of the lottery being entered.
    pub lottery: Pubkey,

    pub registry: &'a mut LotteryRegistry,
    pub ledger: &'a mut TicketLedger,
    pub payments: &'a mut dyn Payments,
    pub clock: &'a dyn TimeSource,
}

impl<'a> BuyTicket<'a> {
    pub fn validate(&self, lottery: &Lottery, now: i64) -> Result<()> {
        lottery.ensure_selling_at(now)
    }
}

/// Buys the next ticket of a lottery for the caller.
///
/// Steps performed:
/// 1. Check the lottery is selling and the sale window is open.
/// 2. Check the next ticket slot is free.
/// 3. Transfer the ticket price from the buyer to the lottery vault.
/// 4. Append the ticket and bump the ticket counter.
///
/// Returns the address of the new ticket.
pub fn process_buy_ticket(ctx: BuyTicket) -> Result<Pubkey> {
    let now = ctx.clock.unix_timestamp()?;
    let buyer = ctx.buyer.key();

    let lottery = ctx.registry.get(&ctx.lottery)?;
    ctx.validate(lottery, now)?;
    ctx.ledger.next_ticket(&ctx.lottery, lottery)?;
    let (vault, price) = (lottery.vault, lottery.ticket_price);

    ctx.payments.transfer(&buyer, &vault, price)?;

    let lottery = ctx.registry.get_mut(&ctx.lottery)?;
    let (ticket_key, ticket) = ctx.ledger.append(&ctx.lottery, lottery, &buyer, now)?;

    msg!("Ticket {} sold to {}", ticket.ticket_index, buyer);
    msg!("Tickets sold: {}", lottery.tickets_sold);
    emit!(TicketPurchased {
        lottery: ctx.lottery,
        ticket: ticket_key,
        buyer,
        ticket_index: ticket.ticket_index,
        price,
    });

    Ok(ticket_key)
}
