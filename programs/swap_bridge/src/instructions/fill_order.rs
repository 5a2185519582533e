use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, CloseAccount, Token, TokenAccount, Transfer};

use crate::constants::WRAPPED_MINT;
use crate::error::SwapError;
use crate::state::{SwapDirection, SwapOrder};

#[derive(Accounts)]
pub struct FillOrder<'info> {
    #[account(mut)]
    pub taker: Signer<'info>,

    /// CHECK: receives the taker's native payment and the rent refunds; tied
    /// to the order by the constraint below.
    #[account(
        mut,
        constraint = maker.key() == order.maker @ SwapError::Unauthorized
    )]
    pub maker: AccountInfo<'info>,

    #[account(
        mut,
        close = maker,
        seeds = [SwapOrder::SEED, order.maker.as_ref(), &order.amount.to_le_bytes()],
        bump = order.bump,
    )]
    pub order: Account<'info, SwapOrder>,

    /// Escrow holding the wrapped side (direction 0 only). Drained to the
    /// taker and closed to the maker.
    #[account(
        mut,
        seeds = [SwapOrder::ESCROW_SEED, order.maker.as_ref(), &order.amount.to_le_bytes()],
        bump,
    )]
    pub escrow_token_account: Option<Account<'info, TokenAccount>>,

    /// Taker's wrapped token account to pay from (direction 1 only).
    #[account(mut)]
    pub taker_token_account: Option<Account<'info, TokenAccount>>,

    /// Taker's wrapped token account to receive into (direction 0 only).
    #[account(mut)]
    pub taker_receive_token_account: Option<Account<'info, TokenAccount>>,

    /// Maker's wrapped token account to receive into (direction 1 only).
    #[account(mut)]
    pub maker_receive_token_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<FillOrder>) -> Result<()> {
    let order = &ctx.accounts.order;

    require!(order.is_open(), SwapError::OrderAlreadyFilled);
    require!(
        !order.is_expired_at(Clock::get()?.slot),
        SwapError::OrderExpired
    );

    let amount = order.amount;
    let direction = order.direction;
    let maker_key = order.maker;
    let bump = order.bump;

    // The order PDA signs the escrow releases.
    let amount_le = amount.to_le_bytes();
    let seeds: &[&[u8]] = &[SwapOrder::SEED, maker_key.as_ref(), &amount_le, &[bump]];

    match direction {
        SwapDirection::WrappedForNative => {
            // (a) Taker pays native lamports to the maker.
            system_program::transfer(
                CpiContext::new(
                    ctx.accounts.system_program.to_account_info(),
                    system_program::Transfer {
                        from: ctx.accounts.taker.to_account_info(),
                        to: ctx.accounts.maker.to_account_info(),
                    },
                ),
                amount,
            )?;

            // (b) Escrow releases the wrapped side to the taker, then closes
            // so the maker gets the rent back.
            let escrow_ta = ctx
                .accounts
                .escrow_token_account
                .as_ref()
                .ok_or(SwapError::MissingEscrowTokenAccount)?;
            let taker_receive_ta = ctx
                .accounts
                .taker_receive_token_account
                .as_ref()
                .ok_or(SwapError::MissingTakerReceiveTokenAccount)?;

            token::transfer(
                CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    Transfer {
                        from: escrow_ta.to_account_info(),
                        to: taker_receive_ta.to_account_info(),
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
        SwapDirection::NativeForWrapped => {
            // (a) Taker pays wrapped tokens to the maker.
            let taker_ta = ctx
                .accounts
                .taker_token_account
                .as_ref()
                .ok_or(SwapError::MissingTakerTokenAccount)?;
            let maker_receive_ta = ctx
                .accounts
                .maker_receive_token_account
                .as_ref()
                .ok_or(SwapError::MissingMakerReceiveTokenAccount)?;

            require!(taker_ta.mint == WRAPPED_MINT, SwapError::InvalidMint);

            token::transfer(
                CpiContext::new(
                    ctx.accounts.token_program.to_account_info(),
                    Transfer {
                        from: taker_ta.to_account_info(),
                        to: maker_receive_ta.to_account_info(),
                        authority: ctx.accounts.taker.to_account_info(),
                    },
                ),
                amount,
            )?;

            // (b) Release the escrowed lamports straight out of the order
            // account; the rent reserve goes back to the maker on close.
            let order_info = ctx.accounts.order.to_account_info();
            let taker_info = ctx.accounts.taker.to_account_info();

            let order_lamports = order_info
                .lamports()
                .checked_sub(amount)
                .ok_or(SwapError::ArithmeticOverflow)?;
            let taker_lamports = taker_info
                .lamports()
                .checked_add(amount)
                .ok_or(SwapError::ArithmeticOverflow)?;
            **order_info.try_borrow_mut_lamports()? = order_lamports;
            **taker_info.try_borrow_mut_lamports()? = taker_lamports;
        }
    }

    // Marked just before the close constraint destroys the account.
    let order = &mut ctx.accounts.order;
    order.is_filled = true;

    emit!(OrderFilled {
        order: order.key(),
        maker: maker_key,
        taker: ctx.accounts.taker.key(),
        amount,
        direction,
    });

    msg!("Order filled: {} units, direction {:?}", amount, direction);

    Ok(())
}

#[event]
pub struct OrderFilled {
    pub order: Pubkey,
    pub maker: Pubkey,
    pub taker: Pubkey,
    pub amount: u64,
    pub direction: SwapDirection,
}
