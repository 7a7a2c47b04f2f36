//! Layer masks
//!
//! Notes live on up to 64 layers; the editor keeps one active-layer bitmask.
//! Drawing targets the lowest active layer, and most scoped operations only
//! touch notes whose layer bit is set.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerMask(pub u64);

impl LayerMask {
    pub fn all(layer_count: u32) -> Self {
        if layer_count >= u64::BITS {
            LayerMask(u64::MAX)
        } else {
            LayerMask((1u64 << layer_count) - 1)
        }
    }

    pub fn only(idx: u32) -> Self {
        LayerMask(1u64 << idx)
    }

    pub fn toggle(&mut self, idx: u32) {
        self.0 ^= 1u64 << idx;
    }

    pub fn contains(&self, idx: u32) -> bool {
        self.0 & (1u64 << idx) != 0
    }

    pub fn active_count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Lowest active layer, the draw target.
    pub fn lowest(&self) -> Option<u32> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros())
        }
    }

    pub fn active_layers(&self) -> Vec<u32> {
        let mut layers = Vec::with_capacity(self.active_count() as usize);
        let mut bits = self.0;
        while bits != 0 {
            layers.push(bits.trailing_zeros());
            bits &= bits - 1;
        }
        layers
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::only(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sets_low_bits() {
        assert_eq!(LayerMask::all(9).0, 0b1_1111_1111);
    }

    #[test]
    fn all_saturates_at_the_mask_width() {
        assert_eq!(LayerMask::all(64).0, u64::MAX);
        assert_eq!(LayerMask::all(200).0, u64::MAX);
        assert_eq!(LayerMask::all(0).0, 0);
    }

    #[test]
    fn toggle_and_count() {
        let mut mask = LayerMask::only(2);
        mask.toggle(5);
        assert_eq!(mask.active_count(), 2);
        assert_eq!(mask.active_layers(), vec![2, 5]);
        mask.toggle(2);
        assert_eq!(mask.lowest(), Some(5));
        mask.toggle(5);
        assert_eq!(mask.lowest(), None);
    }
}
