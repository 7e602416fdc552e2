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

use crate::geometry::grid::{Grid3, SlotCoord};
use crate::geometry::profile::FortyExclusion;
use std::collections::{BTreeMap, BTreeSet};
use stowage_core::prelude::MomentArms;

/// Derives every coordinate where a 40-foot container may be placed.
///
/// A placement is the left 20-foot half of a pair of neighboring odd bays
/// that straddle one even bay number. Both halves must be valid 20-foot
/// slots at the same tier and row, the even bay must be in the allow-list,
/// and the (even bay, row, tier) triple must not be blacklisted.
///
/// The placement inherits the mean lcg of its two halves; vcg and tcg are
/// shared by both halves and come from the left one.
pub fn synthesize(
    mask: &Grid3<bool>,
    twenty_slots: &BTreeMap<SlotCoord, MomentArms>,
    bay_ids: &[u32],
    tier_ids: &[u32],
    allowed_forty_bays: &BTreeSet<u32>,
    excluded_forty_slots: &BTreeSet<FortyExclusion>,
) -> (Vec<SlotCoord>, BTreeMap<SlotCoord, MomentArms>) {
    let mut placements = Vec::new();
    let mut arms = BTreeMap::new();
    let shape = mask.shape();

    for b_idx in 0..bay_ids.len().saturating_sub(1) {
        let left_bay = bay_ids[b_idx];
        let right_bay = bay_ids[b_idx + 1];
        if left_bay % 2 != 1 || right_bay != left_bay + 2 {
            continue;
        }
        let even_bay = left_bay + 1;
        if !allowed_forty_bays.contains(&even_bay) {
            continue;
        }

        for t_idx in 0..shape.tiers {
            let tier_id = tier_ids[t_idx];
            for row in 0..shape.rows {
                if excluded_forty_slots.contains(&FortyExclusion::new(
                    even_bay, row as u32, tier_id,
                )) {
                    continue;
                }
                let left = SlotCoord::new(t_idx, b_idx, row);
                let right = left.paired_bay();
                if mask.copied(left) && mask.copied(right) {
                    let left_arms = twenty_slots[&left];
                    let right_arms = twenty_slots[&right];
                    placements.push(left);
                    arms.insert(
                        left,
                        MomentArms::new(
                            (left_arms.lcg + right_arms.lcg) / 2.0,
                            left_arms.vcg,
                            left_arms.tcg,
                        ),
                    );
                }
            }
        }
    }

    (placements, arms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::grid::GridShape;

    struct Fixture {
        mask: Grid3<bool>,
        slots: BTreeMap<SlotCoord, MomentArms>,
        bay_ids: Vec<u32>,
        tier_ids: Vec<u32>,
    }

    /// Three odd bays 1/3/5 (two adjacent pairs), one tier, two rows, all
    /// slots valid.
    fn fixture() -> Fixture {
        let shape = GridShape::new(1, 3, 2);
        let mut mask = Grid3::filled(shape, false);
        let mut slots = BTreeMap::new();
        let lcgs = [-10.0, -4.0, 2.0];
        for b in 0..3 {
            for r in 0..2 {
                let c = SlotCoord::new(0, b, r);
                mask.set(c, true);
                slots.insert(c, MomentArms::new(lcgs[b], 5.0, r as f64));
            }
        }
        Fixture {
            mask,
            slots,
            bay_ids: vec![1, 3, 5],
            tier_ids: vec![2],
        }
    }

    #[test]
    fn test_all_allowed_pairs_found() {
        let f = fixture();
        let allowed: BTreeSet<u32> = [2, 4].into_iter().collect();
        let (placements, arms) = synthesize(
            &f.mask,
            &f.slots,
            &f.bay_ids,
            &f.tier_ids,
            &allowed,
            &BTreeSet::new(),
        );
        assert_eq!(
            placements,
            vec![
                SlotCoord::new(0, 0, 0),
                SlotCoord::new(0, 0, 1),
                SlotCoord::new(0, 1, 0),
                SlotCoord::new(0, 1, 1),
            ]
        );
        // Mean lcg of bays 1 and 3, vcg/tcg from the left half.
        let a = arms[&SlotCoord::new(0, 0, 1)];
        assert_eq!(a.lcg, -7.0);
        assert_eq!(a.vcg, 5.0);
        assert_eq!(a.tcg, 1.0);
    }

    #[test]
    fn test_allow_list_filters_even_bays() {
        let f = fixture();
        let allowed: BTreeSet<u32> = [4].into_iter().collect();
        let (placements, _) = synthesize(
            &f.mask,
            &f.slots,
            &f.bay_ids,
            &f.tier_ids,
            &allowed,
            &BTreeSet::new(),
        );
        // Only the 3/5 pair (even bay 4) survives.
        assert_eq!(
            placements,
            vec![SlotCoord::new(0, 1, 0), SlotCoord::new(0, 1, 1)]
        );
    }

    #[test]
    fn test_exclusion_beats_valid_halves() {
        let f = fixture();
        let allowed: BTreeSet<u32> = [2, 4].into_iter().collect();
        let excluded: BTreeSet<FortyExclusion> =
            [FortyExclusion::new(2, 1, 2)].into_iter().collect();
        let (placements, _) = synthesize(
            &f.mask, &f.slots, &f.bay_ids, &f.tier_ids, &allowed, &excluded,
        );
        assert!(!placements.contains(&SlotCoord::new(0, 0, 1)));
        assert!(placements.contains(&SlotCoord::new(0, 0, 0)));
    }

    #[test]
    fn test_invalid_half_blocks_placement() {
        let mut f = fixture();
        f.mask.set(SlotCoord::new(0, 1, 0), false);
        let allowed: BTreeSet<u32> = [2, 4].into_iter().collect();
        let (placements, _) = synthesize(
            &f.mask,
            &f.slots,
            &f.bay_ids,
            &f.tier_ids,
            &allowed,
            &BTreeSet::new(),
        );
        // Row 0 lost both pairs; row 1 keeps both.
        assert_eq!(
            placements,
            vec![SlotCoord::new(0, 0, 1), SlotCoord::new(0, 1, 1)]
        );
    }

    #[test]
    fn test_non_adjacent_odd_bays_do_not_pair() {
        // Bays 1 and 5 with a gap: no pairing even though both are odd.
        let shape = GridShape::new(1, 2, 1);
        let mut mask = Grid3::filled(shape, false);
        let mut slots = BTreeMap::new();
        for b in 0..2 {
            let c = SlotCoord::new(0, b, 0);
            mask.set(c, true);
            slots.insert(c, MomentArms::zero());
        }
        let allowed: BTreeSet<u32> = [2, 4].into_iter().collect();
        let (placements, _) = synthesize(
            &mask,
            &slots,
            &[1, 5],
            &[2],
            &allowed,
            &BTreeSet::new(),
        );
        assert!(placements.is_empty());
    }
}
