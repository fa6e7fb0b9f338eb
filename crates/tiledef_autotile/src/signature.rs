//! Corner constraint signatures

use serde::{Deserialize, Serialize};
use tiledef_core::{Corner, WangId};

/// Desired terrain colors at a cell's four corners, in [`Corner::ALL`] order
/// (TopRight, BottomRight, BottomLeft, TopLeft). A value of 0 is a wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CornerSignature(pub [u8; 4]);

impl CornerSignature {
    pub const WILDCARD: Self = Self([WangId::UNSET; 4]);

    /// A signature requiring one color at every corner
    pub fn filled(color: u8) -> Self {
        Self([color; 4])
    }

    pub fn corner(&self, corner: Corner) -> u8 {
        self.0[corner_slot(corner)]
    }

    pub fn set_corner(&mut self, corner: Corner, color: u8) {
        self.0[corner_slot(corner)] = color;
    }

    /// Number of corners carrying a constraint
    pub fn constrained(&self) -> usize {
        self.0.iter().filter(|&&c| c != WangId::UNSET).count()
    }

    pub fn is_wildcard(&self) -> bool {
        self.constrained() == 0
    }

    /// Count of constrained corners where `wang_id` carries a different color
    pub fn mismatches(&self, wang_id: WangId) -> u32 {
        Corner::ALL
            .iter()
            .filter(|&&corner| {
                let wanted = self.corner(corner);
                wanted != WangId::UNSET && wanted != wang_id.corner(corner)
            })
            .count() as u32
    }
}

fn corner_slot(corner: Corner) -> usize {
    match corner {
        Corner::TopRight => 0,
        Corner::BottomRight => 1,
        Corner::BottomLeft => 2,
        Corner::TopLeft => 3,
    }
}

impl From<[u8; 4]> for CornerSignature {
    fn from(corners: [u8; 4]) -> Self {
        Self(corners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_and_wildcard() {
        assert!(CornerSignature::WILDCARD.is_wildcard());
        let sig = CornerSignature::filled(4);
        assert_eq!(sig.constrained(), 4);
        assert_eq!(sig.corner(Corner::TopLeft), 4);
    }

    #[test]
    fn test_mismatches() {
        // Bottom-right is color 1 in the rule, everything else unset
        let rule = WangId([0, 0, 0, 1, 0, 0, 0, 0]);

        let mut sig = CornerSignature::WILDCARD;
        sig.set_corner(Corner::BottomRight, 1);
        assert_eq!(sig.mismatches(rule), 0);

        sig.set_corner(Corner::TopLeft, 1);
        assert_eq!(sig.mismatches(rule), 1);

        assert_eq!(CornerSignature::WILDCARD.mismatches(rule), 0);
    }
}
