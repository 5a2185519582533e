use anchor_lang::prelude::*;

#[error_code]
pub enum SwapError {
    #[msg("Order amount must be greater than zero")]
    InvalidAmount,

    #[msg("Direction must be 0 (wrapped for native) or 1 (native for wrapped)")]
    InvalidDirection,

    #[msg("Token account mint does not match the wrapped mint")]
    InvalidMint,

    #[msg("Expiration slot is too far in the future (max ~24 hours)")]
    ExpirationTooFar,

    #[msg("Order has expired")]
    OrderExpired,

    #[msg("Order has already been filled")]
    OrderAlreadyFilled,

    #[msg("Only the maker can perform this action")]
    Unauthorized,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("Missing escrow token account (required for the wrapped leg)")]
    MissingEscrowTokenAccount,

    #[msg("Missing maker token account (required for the wrapped leg)")]
    MissingMakerTokenAccount,

    #[msg("Missing taker token account (required for the wrapped leg)")]
    MissingTakerTokenAccount,

    #[msg("Missing taker receive token account (required for the wrapped leg)")]
    MissingTakerReceiveTokenAccount,

    #[msg("Missing maker receive token account (required for the wrapped leg)")]
    MissingMakerReceiveTokenAccount,
}
