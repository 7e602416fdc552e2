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

use crate::geometry::forty;
use crate::geometry::grid::{Grid3, GridShape, SlotCoord};
use crate::geometry::profile::{is_under_deck, ShipProfile};
use std::collections::BTreeMap;
use stowage_core::prelude::MomentArms;

// Bays 33 and 35 sit on the raised quarterdeck; their lowest on-deck tier
// hangs below the nominal deck height of tier 82.
const QUARTERDECK_TIER: u32 = 82;
const QUARTERDECK_BAYS: [u32; 2] = [33, 35];
const QUARTERDECK_VCG: f64 = 15.055;

/// Static slot geometry of one vessel: the dense validity mask, the moment
/// arms of every valid 20-foot slot, and the synthesized 40-foot
/// placements. Built once from a [`ShipProfile`], immutable afterwards.
#[derive(Debug, Clone)]
pub struct VesselGeometry {
    shape: GridShape,
    tier_ids: Vec<u32>,
    bay_ids: Vec<u32>,
    mask: Grid3<bool>,
    twenty_slots: BTreeMap<SlotCoord, MomentArms>,
    forty_placements: Vec<SlotCoord>,
    forty_slots: BTreeMap<SlotCoord, MomentArms>,
}

impl VesselGeometry {
    /// Builds the slot geometry from a profile.
    ///
    /// Layout entries whose bay or tier number is absent from the
    /// coordinate maps, or whose row index is out of range, are skipped
    /// without error. Source layouts are routinely sparse and slightly
    /// inconsistent; malformed input is the ingestion side's problem.
    pub fn build(profile: &ShipProfile) -> Self {
        let tier_ids = profile.tier_ids();
        let bay_ids = profile.bay_ids();
        let shape = GridShape::new(tier_ids.len(), bay_ids.len(), profile.max_rows());

        let tier_index: BTreeMap<u32, usize> =
            tier_ids.iter().enumerate().map(|(i, &t)| (t, i)).collect();
        let bay_index: BTreeMap<u32, usize> =
            bay_ids.iter().enumerate().map(|(i, &b)| (b, i)).collect();

        let mut mask = Grid3::filled(shape, false);
        let mut twenty_slots = BTreeMap::new();

        for (&bay_id, tiers) in &profile.layout {
            let Some(&b_idx) = bay_index.get(&bay_id) else {
                tracing::trace!(bay = bay_id, "layout bay has no coordinate entry, skipped");
                continue;
            };
            for (&tier_id, rows) in tiers {
                let Some(&t_idx) = tier_index.get(&tier_id) else {
                    tracing::trace!(tier = tier_id, "layout tier has no coordinate entry, skipped");
                    continue;
                };
                for &row in rows {
                    let Some(&tcg) = profile.row_tcg.get(&row) else {
                        tracing::trace!(row, "layout row has no coordinate entry, skipped");
                        continue;
                    };
                    let coord = SlotCoord::new(t_idx, b_idx, row as usize);
                    mask.set(coord, true);

                    let lcg = profile.bay_lcg[&bay_id];
                    let mut vcg = profile.tier_vcg[&tier_id];
                    if tier_id == QUARTERDECK_TIER && QUARTERDECK_BAYS.contains(&bay_id) {
                        vcg = QUARTERDECK_VCG;
                    }
                    twenty_slots.insert(coord, MomentArms::new(lcg, vcg, tcg));
                }
            }
        }

        let (forty_placements, forty_slots) = forty::synthesize(
            &mask,
            &twenty_slots,
            &bay_ids,
            &tier_ids,
            &profile.allowed_forty_bays,
            &profile.excluded_forty_slots,
        );

        Self {
            shape,
            tier_ids,
            bay_ids,
            mask,
            twenty_slots,
            forty_placements,
            forty_slots,
        }
    }

    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    #[inline]
    pub fn tier_ids(&self) -> &[u32] {
        &self.tier_ids
    }

    #[inline]
    pub fn bay_ids(&self) -> &[u32] {
        &self.bay_ids
    }

    #[inline]
    pub fn tier_id(&self, tier_index: usize) -> u32 {
        self.tier_ids[tier_index]
    }

    #[inline]
    pub fn bay_id(&self, bay_index: usize) -> u32 {
        self.bay_ids[bay_index]
    }

    /// Whether the tier at this index is under deck and therefore subject
    /// to the column ceiling rule.
    #[inline]
    pub fn tier_index_under_deck(&self, tier_index: usize) -> bool {
        is_under_deck(self.tier_ids[tier_index])
    }

    #[inline]
    pub fn is_valid_twenty(&self, coord: SlotCoord) -> bool {
        self.shape.contains(coord) && self.mask.copied(coord)
    }

    #[inline]
    pub fn twenty_arms(&self, coord: SlotCoord) -> Option<&MomentArms> {
        self.twenty_slots.get(&coord)
    }

    /// All valid 20-foot coordinates with their arms, in canonical
    /// (tier, bay, row) order.
    #[inline]
    pub fn iter_twenty_slots(&self) -> impl Iterator<Item = (SlotCoord, &MomentArms)> {
        self.twenty_slots.iter().map(|(&c, a)| (c, a))
    }

    #[inline]
    pub fn twenty_slot_count(&self) -> usize {
        self.twenty_slots.len()
    }

    /// Left halves of every valid 40-foot placement, in bay scan order.
    #[inline]
    pub fn forty_placements(&self) -> &[SlotCoord] {
        &self.forty_placements
    }

    #[inline]
    pub fn forty_arms(&self, coord: SlotCoord) -> Option<&MomentArms> {
        self.forty_slots.get(&coord)
    }

    #[inline]
    pub fn forty_slot_count(&self) -> usize {
        self.forty_placements.len()
    }
}
