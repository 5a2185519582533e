use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{MAX_ORDER_LIFETIME_SLOTS, WRAPPED_MINT};
use crate::error::SwapError;
use crate::state::{SwapDirection, SwapOrder};

#[derive(Accounts)]
#[instruction(amount: u64)]
pub struct CreateOrder<'info> {
    #[account(mut)]
    pub maker: Signer<'info>,

    /// Order PDA, deterministic from maker + amount. A second open order for
    /// the same pair fails here on the address collision.
    #[account(
        init,
        payer = maker,
        space = SwapOrder::SIZE,
        seeds = [SwapOrder::SEED, maker.key().as_ref(), &amount.to_le_bytes()],
        bump
    )]
    pub order: Box<Account<'info, SwapOrder>>,

    /// Escrow for the wrapped side, owned by the order PDA (direction 0 only).
    #[account(
        init_if_needed,
        payer = maker,
        token::mint = wrapped_mint,
        token::authority = order,
        seeds = [SwapOrder::ESCROW_SEED, maker.key().as_ref(), &amount.to_le_bytes()],
        bump
    )]
    pub escrow_token_account: Option<Box<Account<'info, TokenAccount>>>,

    /// Maker's wrapped token account to debit (direction 0 only).
    #[account(mut)]
    pub maker_token_account: Option<Box<Account<'info, TokenAccount>>>,

    /// Wrapped mint, needed to initialize the escrow account (direction 0 only).
    #[account(address = WRAPPED_MINT @ SwapError::InvalidMint)]
    pub wrapped_mint: Option<Box<Account<'info, Mint>>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<CreateOrder>,
    amount: u64,
    direction: u8,
    expiration_slot: u64,
) -> Result<()> {
    require!(amount > 0, SwapError::InvalidAmount);
    let direction = SwapDirection::from_wire(direction)?;

    let clock = Clock::get()?;
    let latest_allowed = clock
        .slot
        .checked_add(MAX_ORDER_LIFETIME_SLOTS)
        .ok_or(SwapError::ArithmeticOverflow)?;
    require!(expiration_slot <= latest_allowed, SwapError::ExpirationTooFar);

    {
        let order = &mut ctx.accounts.order;
        order.maker = ctx.accounts.maker.key();
        order.amount = amount;
        order.direction = direction;
        order.expiration_slot = expiration_slot;
        order.is_filled = false;
        order.bump = ctx.bumps.order;
    }

    match direction {
        // Wrapped tokens move from the maker into the escrow token account.
        SwapDirection::WrappedForNative => {
            let escrow_ta = ctx
                .accounts
                .escrow_token_account
                .as_ref()
                .ok_or(SwapError::MissingEscrowTokenAccount)?;
            let maker_ta = ctx
                .accounts
                .maker_token_account
                .as_ref()
                .ok_or(SwapError::MissingMakerTokenAccount)?;

            require!(maker_ta.mint == WRAPPED_MINT, SwapError::InvalidMint);

            token::transfer(
                CpiContext::new(
                    ctx.accounts.token_program.to_account_info(),
                    Transfer {
                        from: maker_ta.to_account_info(),
                        to: escrow_ta.to_account_info(),
                        authority: ctx.accounts.maker.to_account_info(),
                    },
                ),
                amount,
            )?;
        }
        // Native lamports land in the order account on top of its rent reserve.
        SwapDirection::NativeForWrapped => {
            system_program::transfer(
                CpiContext::new(
                    ctx.accounts.system_program.to_account_info(),
                    system_program::Transfer {
                        from: ctx.accounts.maker.to_account_info(),
                        to: ctx.accounts.order.to_account_info(),
                    },
                ),
                amount,
            )?;
        }
    }

    emit!(OrderCreated {
        order: ctx.accounts.order.key(),
        maker: ctx.accounts.maker.key(),
        amount,
        direction,
        expiration_slot,
    });

    msg!(
        "Order created: {} units, direction {:?}, fillable through slot {}",
        amount,
        direction,
        expiration_slot
    );

    Ok(())
}

#[event]
pub struct OrderCreated {
    pub order: Pubkey,
    pub maker: Pubkey,
    pub amount: u64,
    pub direction: SwapDirection,
    pub expiration_slot: u64,
}
