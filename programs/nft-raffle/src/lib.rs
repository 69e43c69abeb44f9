#![allow(unexpected_cfgs)]

//! Escrowed NFT raffle.
//!
//! A creator escrows a prize item and sells fixed price tickets during a
//! sale window. After the window closes the creator requests randomness from
//! an oracle keyed by the lottery seed, the winning ticket is derived from
//! the fulfilled value, and the buyer of that ticket claims the prize.
//!
//! Lottery status only moves forward:
//! `Selling -> AwaitingRandomness -> WinnerSelected -> Rewarded`.

use anchor_lang::prelude::*;

pub mod adapters;
pub mod address;
pub mod constants;
pub mod draw;
pub mod error;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod program;
pub mod registry;
pub mod state;

pub use error::{ErrorKind, LotteryError};
pub use instructions::{Caller, LotteryParams};
pub use program::{LotteryProgram, MemoryLotteryProgram};
pub use state::{Lottery, LotteryStatus, Ticket};

declare_id!("3uondJovFnSvhfyfxs9ddc89tUeEAJyzyPP87w4LKo6v");
