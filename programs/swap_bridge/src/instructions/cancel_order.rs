use anchor_lang::prelude::*;
use anchor_spl::token::{self, CloseAccount, Token, TokenAccount, Transfer};

use crate::error::SwapError;
use crate::state::{SwapDirection, SwapOrder};

#[derive(Accounts)]
pub struct CancelOrder<'info> {
    #[account(mut)]
    pub maker: Signer<'info>,

    #[account(
        mut,
        close = maker,
        has_one = maker @ SwapError::Unauthorized,
        seeds = [SwapOrder::SEED, order.maker.as_ref(), &order.amount.to_le_bytes()],
        bump = order.bump,
    )]
    pub order: Account<'info, SwapOrder>,

    /// Escrow holding the wrapped side (direction 0 only). Refunded to the
    /// maker and closed.
    #[account(
        mut,
        seeds = [SwapOrder::ESCROW_SEED, order.maker.as_ref(), &order.amount.to_le_bytes()],
        bump,
    )]
    pub escrow_token_account: Option<Account<'info, TokenAccount>>,

    /// Maker's wrapped token account receiving the refund (direction 0 only).
    #[account(mut)]
    pub maker_token_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CancelOrder>) -> Result<()> {
    let order = &ctx.accounts.order;

    require!(order.is_open(), SwapError::OrderAlreadyFilled);

    let amount = order.amount;
    let direction = order.direction;
    let maker_key = order.maker;
    let bump = order.bump;

    let amount_le = amount.to_le_bytes();
    let seeds: &[&[u8]] = &[SwapOrder::SEED, maker_key.as_ref(), &amount_le, &[bump]];

    match direction {
        // Wrapped side goes back to the maker; the emptied escrow closes so
        // its rent comes back too.
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

            token::transfer(
                CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    Transfer {
                        from: escrow_ta.to_account_info(),
                        to: maker_ta.to_account_info(),
                        authority: ctx.accounts.order.to_account_info(),
                    },
                    &[seeds],
                ),
                amount,
            )?;

            token::close_account(CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                CloseAccount {
                    account: escrow_ta.to_account_info(),
                    destination: ctx.accounts.maker.to_account_info(),
                    authority: ctx.accounts.order.to_account_info(),
                },
                &[seeds],
            ))?;
        }
        // Native side comes straight back out of the order account.
        SwapDirection::NativeForWrapped => {
            let order_info = ctx.accounts.order.to_account_info();
            let maker_info = ctx.accounts.maker.to_account_info();

            let order_lamports = order_info
                .lamports()
                .checked_sub(amount)
                .ok_or(SwapError::ArithmeticOverflow)?;
            let maker_lamports = maker_info
                .lamports()
                .checked_add(amount)
                .ok_or(SwapError::ArithmeticOverflow)?;
            **order_info.try_borrow_mut_lamports()? = order_lamports;
            **maker_info.try_borrow_mut_lamports()? = maker_lamports;
        }
    }

    emit!(OrderCancelled {
        order: ctx.accounts.order.key(),
        maker: maker_key,
        amount,
        direction,
    });

    msg!("Order cancelled: {} units, direction {:?}", amount, direction);

    Ok(())
}

#[event]
pub struct OrderCancelled {
    pub order: Pubkey,
    pub maker: Pubkey,
    pub amount: u64,
    pub direction: SwapDirection,
}
