use anchor_lang::prelude::*;

use crate::{
    adapters::{
        memory::{ManualClock, MemoryBank, MemoryEscrow, MemoryOracle},
        AssetEscrow, Payments, RandomnessOracle, TimeSource,
    },
    address::ticket_address,
    draw::winning_ticket_index,
    error::LotteryError,
    instructions::*,
    ledger::TicketLedger,
    registry::LotteryRegistry,
    state::{Lottery, LotteryStatus, Ticket},
};

/// Host for the lottery records and the collaborators they depend on.
///
/// Each operation takes `&mut self`, so operations never interleave: two
/// purchases against the same lottery are always applied one after the
/// other. An operation that returns an error leaves every record unchanged.
pub struct LotteryProgram<T = ManualClock, E = MemoryEscrow, P = MemoryBank, O = MemoryOracle> {
    registry: LotteryRegistry,
    ledger: TicketLedger,
    clock: T,
    escrow: E,
    payments: P,
    oracle: O,
}

/// A program wired to the in-memory collaborators.
pub type MemoryLotteryProgram = LotteryProgram<ManualClock, MemoryEscrow, MemoryBank, MemoryOracle>;

impl MemoryLotteryProgram {
    pub fn in_memory(now: i64) -> Self {
        Self::new(
            ManualClock::new(now),
            MemoryEscrow::default(),
            MemoryBank::default(),
            MemoryOracle::default(),
        )
    }
}

impl<T, E, P, O> LotteryProgram<T, E, P, O>
where
    T: TimeSource,
    E: AssetEscrow,
    P: Payments,
    O: RandomnessOracle,
{
    pub fn new(clock: T, escrow: E, payments: P, oracle: O) -> Self {
        Self {
            registry: LotteryRegistry::default(),
            ledger: TicketLedger::default(),
            clock,
            escrow,
            payments,
            oracle,
        }
    }

    pub fn create_lottery(
        &mut self,
        creator: Caller,
        prize_mint: Pubkey,
        params: LotteryParams,
    ) -> Result<Pubkey> {
        process_create_lottery(
            CreateLottery {
                creator,
                prize_mint,
                registry: &mut self.registry,
                escrow: &mut self.escrow,
                clock: &self.clock,
            },
            params,
        )
    }

    pub fn buy_ticket(&mut self, buyer: Caller, lottery: &Pubkey) -> Result<Pubkey> {
        process_buy_ticket(BuyTicket {
            buyer,
            lottery: *lottery,
            registry: &mut self.registry,
            ledger: &mut self.ledger,
            payments: &mut self.payments,
            clock: &self.clock,
        })
    }

    pub fn request_randomness(&mut self, creator: Caller, lottery: &Pubkey) -> Result<()> {
        process_request_randomness(RequestRandomness {
            creator,
            lottery: *lottery,
            registry: &mut self.registry,
            oracle: &mut self.oracle,
            clock: &self.clock,
        })
    }

    /// Returns the winning ticket index once the oracle has answered.
    pub fn pick_winner(
        &mut self,
        creator: Caller,
        lottery: &Pubkey,
        winning_ticket: &Pubkey,
    ) -> Result<u64> {
        process_pick_winner(PickWinner {
            creator,
            lottery: *lottery,
            winning_ticket: *winning_ticket,
            registry: &mut self.registry,
            ledger: &self.ledger,
            oracle: &self.oracle,
        })
    }

    pub fn reward_winner(&mut self, winner: Caller, lottery: &Pubkey) -> Result<()> {
        process_reward_winner(RewardWinner {
            winner,
            lottery: *lottery,
            registry: &mut self.registry,
            ledger: &self.ledger,
            escrow: &mut self.escrow,
            clock: &self.clock,
        })
    }

    /// The ticket address a client should hand to [Self::pick_winner].
    ///
    /// Reads the oracle and the final ticket count the same way the draw
    /// does. Once a winner is recorded, returns that ticket instead.
    pub fn winning_ticket_address(&self, lottery: &Pubkey) -> Result<Pubkey> {
        let record = self.registry.get(lottery)?;
        let index = match record.status {
            LotteryStatus::Selling => return err!(LotteryError::RandomnessNotRequested),
            LotteryStatus::AwaitingRandomness => {
                let randomness = self
                    .oracle
                    .read(&record.seed)
                    .ok_or(LotteryError::RandomnessNotFulfilled)?;
                winning_ticket_index(randomness, record.tickets_sold)?
            }
            LotteryStatus::WinnerSelected | LotteryStatus::Rewarded => record
                .winning_ticket
                .ok_or(LotteryError::WinnerNotPicked)?,
        };

        Ok(ticket_address(lottery, index).0)
    }

    pub fn lottery(&self, lottery: &Pubkey) -> Result<&Lottery> {
        self.registry.get(lottery)
    }

    pub fn ticket(&self, ticket: &Pubkey) -> Result<&Ticket> {
        self.ledger.get(ticket)
    }

    /// Tickets of `lottery` in index order.
    pub fn tickets<'a>(&'a self, lottery: &Pubkey) -> impl Iterator<Item = (Pubkey, &'a Ticket)> + 'a {
        self.ledger.tickets_for(lottery)
    }

    pub fn registry(&self) -> &LotteryRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &TicketLedger {
        &self.ledger
    }

    pub fn clock(&self) -> &T {
        &self.clock
    }

    pub fn escrow(&self) -> &E {
        &self.escrow
    }

    pub fn escrow_mut(&mut self) -> &mut E {
        &mut self.escrow
    }

    pub fn payments(&self) -> &P {
        &self.payments
    }

    pub fn payments_mut(&mut self) -> &mut P {
        &mut self.payments
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Access to the oracle, e.g. to deliver fulfillment in a simulation.
    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }
}
