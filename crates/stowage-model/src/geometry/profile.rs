// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::collections::{BTreeMap, BTreeSet};

/// Tier numbers below this are under deck, at or above are on deck.
/// The two regions follow different stacking rules.
pub const ON_DECK_TIER: u32 = 82;

#[inline]
pub const fn is_under_deck(tier_id: u32) -> bool {
    tier_id < ON_DECK_TIER
}

/// A 40-foot slot that is structurally unusable even though both of its
/// 20-foot halves exist. Keyed by the painted even bay number, the row
/// index and the tier number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FortyExclusion {
    pub bay: u32,
    pub row: u32,
    pub tier: u32,
}

impl FortyExclusion {
    #[inline]
    pub const fn new(bay: u32, row: u32, tier: u32) -> Self {
        Self { bay, row, tier }
    }
}

/// Raw physical description of one vessel, as delivered by the ingestion
/// side: coordinate maps per axis, the sparse cell layout, and the special
/// rules for 40-foot placements. Constructed once, never mutated.
#[derive(Debug, Clone, Default)]
pub struct ShipProfile {
    /// Painted bay number (odd, from midship: negative forward) to the
    /// longitudinal arm of that bay.
    pub bay_lcg: BTreeMap<u32, f64>,
    /// Tier number to the vertical arm of that tier.
    pub tier_vcg: BTreeMap<u32, f64>,
    /// Row index to the transverse arm of that row.
    pub row_tcg: BTreeMap<u32, f64>,
    /// Sparse layout: bay number to tier number to the row indices that
    /// physically exist there.
    pub layout: BTreeMap<u32, BTreeMap<u32, Vec<u32>>>,
    /// Even bay numbers over which a 40-foot container may straddle.
    pub allowed_forty_bays: BTreeSet<u32>,
    /// Structural blacklist of 40-foot slots.
    pub excluded_forty_slots: BTreeSet<FortyExclusion>,
}

impl ShipProfile {
    /// Ordered bay numbers, ascending. Index into this sequence is the
    /// bay axis of the slot grid.
    #[inline]
    pub fn bay_ids(&self) -> Vec<u32> {
        self.bay_lcg.keys().copied().collect()
    }

    /// Ordered tier numbers, ascending. Index into this sequence is the
    /// tier axis of the slot grid.
    #[inline]
    pub fn tier_ids(&self) -> Vec<u32> {
        self.tier_vcg.keys().copied().collect()
    }

    /// Row axis extent. Rows are addressed by index directly.
    #[inline]
    pub fn max_rows(&self) -> usize {
        self.row_tcg
            .keys()
            .next_back()
            .map(|&r| r as usize + 1)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_boundary() {
        assert!(is_under_deck(2));
        assert!(is_under_deck(10));
        assert!(is_under_deck(81));
        assert!(!is_under_deck(82));
        assert!(!is_under_deck(92));
    }

    #[test]
    fn test_ordered_axes_from_maps() {
        let mut profile = ShipProfile::default();
        profile.bay_lcg.insert(3, -47.478);
        profile.bay_lcg.insert(1, -53.612);
        profile.tier_vcg.insert(82, 17.055);
        profile.tier_vcg.insert(2, 4.751);
        profile.row_tcg.insert(0, 0.0);
        profile.row_tcg.insert(2, -2.518);
        profile.row_tcg.insert(1, 2.518);

        assert_eq!(profile.bay_ids(), vec![1, 3]);
        assert_eq!(profile.tier_ids(), vec![2, 82]);
        assert_eq!(profile.max_rows(), 3);
    }

    #[test]
    fn test_empty_profile_has_no_rows() {
        assert_eq!(ShipProfile::default().max_rows(), 0);
    }

    #[test]
    fn test_forty_exclusion_ordering() {
        let a = FortyExclusion::new(6, 5, 2);
        let b = FortyExclusion::new(6, 6, 2);
        assert!(a < b);
        let set: BTreeSet<FortyExclusion> = [b, a].into_iter().collect();
        assert!(set.contains(&FortyExclusion::new(6, 5, 2)));
    }
}
