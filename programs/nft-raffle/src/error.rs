use anchor_lang::prelude::*;

#[error_code]
#[derive(Eq, PartialEq)]
pub enum LotteryError {
    // Validation
    #[msg("Ticket price must be greater than zero")]
    InvalidTicketPrice,
    #[msg("Sale start must be before sale end")]
    InvalidSaleWindow,
    #[msg("Sale end must be in the future")]
    SaleEndInPast,
    #[msg("Seed has already been used by another lottery")]
    DuplicateSeed,
    #[msg("A lottery for this creator and prize already exists")]
    LotteryAlreadyExists,
    #[msg("Lottery account not found")]
    LotteryNotFound,
    #[msg("Ticket account not found")]
    TicketNotFound,

    // Timing
    #[msg("Ticket sale has not started yet")]
    SaleNotStarted,
    #[msg("Ticket sale is still open")]
    SaleStillOpen,
    #[msg("Randomness has not been fulfilled yet")]
    RandomnessNotFulfilled,

    // State
    #[msg("Ticket sale is closed")]
    SaleClosed,
    #[msg("No tickets sold to pick the winner")]
    NoTicketsSold,
    #[msg("Randomness has already been requested")]
    RandomnessAlreadyRequested,
    #[msg("Randomness has not been requested")]
    RandomnessNotRequested,
    #[msg("Winner has already been picked")]
    WinnerAlreadyPicked,
    #[msg("Winner has not been picked")]
    WinnerNotPicked,
    #[msg("Prize has already been rewarded")]
    AlreadyRewarded,
    #[msg("Lottery status cannot move to the requested state")]
    InvalidStatusTransition,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    // Authorization
    #[msg("Caller is not allowed to perform this action")]
    Unauthorized,

    // Integrity
    #[msg("Winning ticket mismatch")]
    WinnerMismatch,
    #[msg("Oracle output is too short to derive a draw value")]
    RandomnessTooShort,
    #[msg("A ticket already exists at this index")]
    TicketAlreadyIssued,
}

/// Broad category of a [LotteryError], used by callers to decide whether to retry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input; fix the request and resubmit.
    Validation,
    /// Too early; wait and retry.
    Timing,
    /// Wrong lottery status for the call.
    State,
    /// Caller lacks the required role.
    Authorization,
    /// The draw could not be verified.
    Integrity,
}

impl LotteryError {
    pub fn kind(&self) -> ErrorKind {
        use LotteryError::*;

        match self {
            InvalidTicketPrice | InvalidSaleWindow | SaleEndInPast | DuplicateSeed
            | LotteryAlreadyExists | LotteryNotFound | TicketNotFound => ErrorKind::Validation,
            SaleNotStarted | SaleStillOpen | RandomnessNotFulfilled => ErrorKind::Timing,
            SaleClosed
            | NoTicketsSold
            | RandomnessAlreadyRequested
            | RandomnessNotRequested
            | WinnerAlreadyPicked
            | WinnerNotPicked
            | AlreadyRewarded
            | InvalidStatusTransition
            | ArithmeticOverflow => ErrorKind::State,
            Unauthorized => ErrorKind::Authorization,
            WinnerMismatch | RandomnessTooShort | TicketAlreadyIssued => ErrorKind::Integrity,
        }
    }

    /// Only timing errors clear up on their own.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Timing
    }
}
