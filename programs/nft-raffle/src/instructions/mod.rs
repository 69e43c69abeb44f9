use anchor_lang::prelude::*;

pub mod buy_ticket;
pub mod create_lottery;
pub mod pick_winner;
pub mod request_randomness;
pub mod reward_winner;

pub use buy_ticket::*;
pub use create_lottery::*;
pub use pick_winner::*;
pub use request_randomness::*;
pub use reward_winner::*;

/// An identity whose signature the host has already verified.
///
/// Every processor takes the caller explicitly; authorization is checked
/// against this value and nothing else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Caller(Pubkey);

impl Caller {
    pub fn new(key: Pubkey) -> Self {
        Self(key)
    }

    pub fn key(&self) -> Pubkey {
        self.0
    }
}

impl From<Pubkey> for Caller {
    fn from(key: Pubkey) -> Self {
        Self(key)
    }
}
