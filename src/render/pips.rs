//! Deterministic pip layouts for number cards.
//!
//! Slots are named positions on a 3x7 grid inside the card face. Slots in
//! the bottom half render their mark rotated, matching a traditional card
//! face.

use crate::cards::Rank;

/// A named grid slot for one pip mark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipSlot {
    TopLeft,
    TopCenter,
    TopRight,
    TopMid,
    TopMidLeft,
    TopMidRight,
    MidLeft,
    MidCenter,
    MidRight,
    BotMidLeft,
    BotMidRight,
    BotMid,
    BotLeft,
    BotCenter,
    BotRight,
}

impl PipSlot {
    /// `(column, row)` on the 3x7 face grid
    pub fn grid(self) -> (u32, u32) {
        match self {
            PipSlot::TopLeft => (0, 0),
            PipSlot::TopCenter => (1, 0),
            PipSlot::TopRight => (2, 0),
            PipSlot::TopMid => (1, 1),
            PipSlot::TopMidLeft => (0, 2),
            PipSlot::MidCenter => (1, 2),
            PipSlot::TopMidRight => (2, 2),
            PipSlot::MidLeft => (0, 3),
            PipSlot::MidRight => (2, 3),
            PipSlot::BotMidLeft => (0, 4),
            PipSlot::BotMidRight => (2, 4),
            PipSlot::BotMid => (1, 5),
            PipSlot::BotLeft => (0, 6),
            PipSlot::BotCenter => (1, 6),
            PipSlot::BotRight => (2, 6),
        }
    }

    /// Bottom-half slots render their mark rotated 180°
    pub fn is_flipped(self) -> bool {
        matches!(
            self,
            PipSlot::BotMidLeft
                | PipSlot::BotMidRight
                | PipSlot::BotMid
                | PipSlot::BotLeft
                | PipSlot::BotCenter
                | PipSlot::BotRight
        )
    }
}

/// Slots for one rank, in paint order.
///
/// The ace entry is a fallback only: aces are face ranks and take the
/// portrait branch, so this entry is never reached through `CardFace::of`.
/// It is kept in case aces are ever treated as number cards.
pub fn pip_slots(rank: Rank) -> &'static [PipSlot] {
    use PipSlot::*;
    match rank {
        Rank::Ace => &[MidCenter],
        Rank::Two => &[TopCenter, BotCenter],
        Rank::Three => &[TopCenter, MidCenter, BotCenter],
        Rank::Four => &[TopLeft, TopRight, BotLeft, BotRight],
        Rank::Five => &[TopLeft, TopRight, MidCenter, BotLeft, BotRight],
        Rank::Six => &[TopLeft, TopRight, MidLeft, MidRight, BotLeft, BotRight],
        Rank::Seven => &[TopLeft, TopRight, TopMid, MidLeft, MidRight, BotLeft, BotRight],
        Rank::Eight => &[
            TopLeft, TopRight, TopMid, MidLeft, MidRight, BotMid, BotLeft, BotRight,
        ],
        Rank::Nine => &[
            TopLeft, TopRight, TopMidLeft, TopMidRight, MidCenter, BotMidLeft, BotMidRight,
            BotLeft, BotRight,
        ],
        Rank::Ten => &[
            TopLeft, TopRight, TopMid, TopMidLeft, TopMidRight, BotMid, BotMidLeft, BotMidRight,
            BotLeft, BotRight,
        ],
        // Face cards always carry portraits, never pips.
        Rank::King | Rank::Queen | Rank::Jack => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_ranks_carry_their_value_in_pips() {
        let cases = [
            (Rank::Two, 2),
            (Rank::Three, 3),
            (Rank::Four, 4),
            (Rank::Five, 5),
            (Rank::Six, 6),
            (Rank::Seven, 7),
            (Rank::Eight, 8),
            (Rank::Nine, 9),
            (Rank::Ten, 10),
        ];
        for (rank, count) in cases {
            assert_eq!(pip_slots(rank).len(), count, "{:?}", rank);
        }
    }

    #[test]
    fn ace_fallback_is_a_single_center_slot() {
        assert_eq!(pip_slots(Rank::Ace), &[PipSlot::MidCenter]);
    }

    #[test]
    fn court_ranks_have_no_pips() {
        assert!(pip_slots(Rank::King).is_empty());
        assert!(pip_slots(Rank::Queen).is_empty());
        assert!(pip_slots(Rank::Jack).is_empty());
    }

    #[test]
    fn bottom_slots_flip() {
        assert!(PipSlot::BotCenter.is_flipped());
        assert!(PipSlot::BotMidLeft.is_flipped());
        assert!(!PipSlot::TopCenter.is_flipped());
        assert!(!PipSlot::MidCenter.is_flipped());
    }

    #[test]
    fn grid_coordinates_stay_on_the_face() {
        for rank in Rank::ALL {
            for slot in pip_slots(rank) {
                let (col, row) = slot.grid();
                assert!(col < 3);
                assert!(row < 7);
            }
        }
    }
}
