use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("8iF9MxzGmppbVbfXKJFKjj25H5Vd9YftxsrQB4LBNmbW");

#[program]
pub mod swap_bridge {
    use super::*;

    /// Open a swap order. The maker deposits the committed side into custody:
    ///   - direction 0: wrapped tokens move into a dedicated escrow token account
    ///   - direction 1: native lamports move into the order account itself
    pub fn create_order(
        ctx: Context<CreateOrder>,
        amount: u64,
        direction: u8,
        expiration_slot: u64,
    ) -> Result<()> {
        instructions::create_order::handler(ctx, amount, direction, expiration_slot)
    }

    /// Fill an open order. The taker pays the side the maker asked for and
    /// receives the escrowed side in the same transaction; both the order
    /// account and, for direction 0, the escrow token account are closed with
    /// their rent refunded to the maker.
    pub fn fill_order(ctx: Context<FillOrder>) -> Result<()> {
        instructions::fill_order::handler(ctx)
    }

    /// Cancel an open order and reclaim the escrowed funds. Maker only.
    /// Cancellation stays available after the expiration slot has passed.
    pub fn cancel_order(ctx: Context<CancelOrder>) -> Result<()> {
        instructions::cancel_order::handler(ctx)
    }
}
