use anchor_lang::prelude::*;

/// Mint of the SPL-wrapped representation of the native asset. Both escrow
/// deposits (direction 0) and taker payments (direction 1) must use this mint.
pub const WRAPPED_MINT: Pubkey = pubkey!("65CkQ45T58CcYDC52D8TpPPP6mvuC11tTKriGefYTNkM");

/// Longest an order may stay fillable, in slots (~400ms/slot, about 24 hours).
pub const MAX_ORDER_LIFETIME_SLOTS: u64 = 216_000;
