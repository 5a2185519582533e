use anchor_lang::prelude::*;

use crate::error::SwapError;

/// Which side of the swap the maker committed into custody.
///
/// The two variants differ in where custody lives: wrapped tokens sit in a
/// dedicated escrow token account owned by the order PDA, while native
/// lamports sit in the order account itself on top of its rent reserve.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SwapDirection {
    /// Maker escrowed wrapped tokens and wants native lamports.
    WrappedForNative,
    /// Maker escrowed native lamports and wants wrapped tokens.
    NativeForWrapped,
}

impl SwapDirection {
    /// Parse the wire encoding (0 or 1). Anything else is rejected before
    /// any funds move.
    pub fn from_wire(raw: u8) -> Result<Self> {
        match raw {
            0 => Ok(Self::WrappedForNative),
            1 => Ok(Self::NativeForWrapped),
            _ => Err(SwapError::InvalidDirection.into()),
        }
    }
}

/// A single open swap commitment.
///
/// The address is a PDA of `(maker, amount)`, so a maker holds at most one
/// open order per amount; a duplicate create fails on the address collision.
/// Filled and cancelled orders are closed outright, and the absence of the
/// account is the durable terminal marker.
#[account]
pub struct SwapOrder {
    /// Party that opened the order and funded the committed side.
    pub maker: Pubkey,

    /// Committed quantity, in base units of the committed side.
    pub amount: u64,

    /// Which side the maker committed.
    pub direction: SwapDirection,

    /// Last slot at which a fill is accepted. Cancels are never gated.
    pub expiration_slot: u64,

    /// Set right before the account is closed on a successful fill.
    pub is_filled: bool,

    /// PDA bump seed.
    pub bump: u8,
}

impl SwapOrder {
    pub const SIZE: usize = 8 +  // discriminator
        32 + // maker
        8 +  // amount
        1 +  // direction
        8 +  // expiration_slot
        1 +  // is_filled
        1;   // bump

    pub const SEED: &'static [u8] = b"order";
    pub const ESCROW_SEED: &'static [u8] = b"escrow";

    /// Derive the order PDA for a maker/amount pair.
    ///
    /// The amount is encoded as 8 little-endian bytes; off-chain callers must
    /// use the same encoding or they derive an unreachable address.
    pub fn find_address(maker: &Pubkey, amount: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[Self::SEED, maker.as_ref(), &amount.to_le_bytes()],
            &crate::ID,
        )
    }

    /// Derive the escrow token account PDA holding the wrapped side of a
    /// direction-0 order.
    pub fn find_escrow_address(maker: &Pubkey, amount: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[Self::ESCROW_SEED, maker.as_ref(), &amount.to_le_bytes()],
            &crate::ID,
        )
    }

    pub fn is_open(&self) -> bool {
        !self.is_filled
    }

    /// Whether a fill at `slot` comes too late. The expiration slot itself
    /// is still fillable.
    pub fn is_expired_at(&self, slot: u64) -> bool {
        slot > self.expiration_slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn order_at(expiration_slot: u64) -> SwapOrder {
        SwapOrder {
            maker: Pubkey::new_unique(),
            amount: 1_000_000_000,
            direction: SwapDirection::WrappedForNative,
            expiration_slot,
            is_filled: false,
            bump: 255,
        }
    }

    #[test]
    fn direction_accepts_only_zero_and_one() {
        assert_eq!(
            SwapDirection::from_wire(0).unwrap(),
            SwapDirection::WrappedForNative
        );
        assert_eq!(
            SwapDirection::from_wire(1).unwrap(),
            SwapDirection::NativeForWrapped
        );
        for raw in [2u8, 5, 17, 255] {
            assert!(SwapDirection::from_wire(raw).is_err());
        }
    }

    #[test]
    fn account_size_covers_every_field() {
        // discriminator + maker + amount + direction + expiration_slot
        // + is_filled + bump
        assert_eq!(SwapOrder::SIZE, 8 + 32 + 8 + 1 + 8 + 1 + 1);
    }

    #[test]
    fn order_address_uses_little_endian_amount() {
        let maker = Pubkey::new_unique();
        let (derived, bump) = SwapOrder::find_address(&maker, 0x0102_0304_0506_0708);
        let (manual, manual_bump) = Pubkey::find_program_address(
            &[
                b"order",
                maker.as_ref(),
                &[0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01],
            ],
            &crate::ID,
        );
        assert_eq!(derived, manual);
        assert_eq!(bump, manual_bump);
    }

    #[test]
    fn derivation_is_deterministic() {
        let maker = Pubkey::new_unique();
        assert_eq!(
            SwapOrder::find_address(&maker, 500_000_000),
            SwapOrder::find_address(&maker, 500_000_000)
        );
        assert_eq!(
            SwapOrder::find_escrow_address(&maker, 500_000_000),
            SwapOrder::find_escrow_address(&maker, 500_000_000)
        );
    }

    #[test]
    fn order_and_escrow_tags_are_domain_separated() {
        let maker = Pubkey::new_unique();
        let (order, _) = SwapOrder::find_address(&maker, 1);
        let (escrow, _) = SwapOrder::find_escrow_address(&maker, 1);
        assert_ne!(order, escrow);
    }

    #[test]
    fn expiration_slot_itself_is_still_fillable() {
        let order = order_at(100);
        assert!(!order.is_expired_at(99));
        assert!(!order.is_expired_at(100));
        assert!(order.is_expired_at(101));
    }

    #[test]
    fn open_until_filled() {
        let mut order = order_at(100);
        assert!(order.is_open());
        order.is_filled = true;
        assert!(!order.is_open());
    }

    proptest! {
        #[test]
        fn distinct_amounts_get_distinct_addresses(a in 1u64.., b in 1u64..) {
            prop_assume!(a != b);
            let maker = Pubkey::new_unique();
            prop_assert_ne!(
                SwapOrder::find_address(&maker, a).0,
                SwapOrder::find_address(&maker, b).0
            );
        }

        #[test]
        fn distinct_makers_get_distinct_addresses(amount in 1u64..) {
            let a = Pubkey::new_unique();
            let b = Pubkey::new_unique();
            prop_assert_ne!(
                SwapOrder::find_address(&a, amount).0,
                SwapOrder::find_address(&b, amount).0
            );
        }
    }
}
