use anchor_lang::prelude::*;

use crate::{constants::RANDOM_VALUE_BYTES, error::LotteryError};

/// Read the leading 8 bytes of the oracle output as a little-endian `u64`.
pub fn random_value(randomness: &[u8]) -> Result<u64> {
    let prefix: [u8; RANDOM_VALUE_BYTES] = randomness
        .get(..RANDOM_VALUE_BYTES)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(LotteryError::RandomnessTooShort)?;

    Ok(u64::from_le_bytes(prefix))
}

/// Map fulfilled randomness onto one of `tickets_sold` tickets.
///
/// Must only be called once the sale is closed, since the result depends on
/// the final ticket count.
pub fn winning_ticket_index(randomness: &[u8], tickets_sold: u64) -> Result<u64> {
    require_gt!(tickets_sold, 0, LotteryError::NoTicketsSold);
    Ok(random_value(randomness)? % tickets_sold)
}
