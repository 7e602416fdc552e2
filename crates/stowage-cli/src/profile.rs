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

//! Built-in profile and loading condition of the reference vessel.
//!
//! Bay arms are measured from midship (negative forward), tier arms from
//! the keel, row arms from the centerline (starboard positive). Rows are
//! numbered center-out, so row indices alternate sides.

use stowage_core::prelude::{MomentArms, Weight};
use stowage_model::geometry::profile::FortyExclusion;
use stowage_model::prelude::ShipProfile;
use stowage_model::vessel::{Lightship, Tank, VesselCondition};

const BAY_LCG: [(u32, f64); 18] = [
    (1, -53.612),
    (3, -47.478),
    (5, -39.932),
    (7, -33.798),
    (9, -26.196),
    (11, -20.062),
    (13, -13.828),
    (15, -7.688),
    (17, -0.036),
    (19, 6.098002),
    (21, 12.332),
    (23, 18.466),
    (25, 26.124),
    (27, 32.258),
    (29, 38.492),
    (31, 44.626),
    (33, 52.588),
    (35, 58.722),
];

const TIER_VCG: [(u32, f64); 11] = [
    (2, 4.751),
    (4, 7.355),
    (6, 9.959),
    (8, 12.563),
    (10, 13.167),
    (82, 17.055),
    (84, 17.671),
    (86, 20.286),
    (88, 22.902),
    (90, 25.517),
    (92, 28.133),
];

const ROW_TCG: [(u32, f64); 9] = [
    (0, 0.0),
    (1, 2.518),
    (2, -2.518),
    (3, 5.036),
    (4, -5.036),
    (5, 7.554),
    (6, -7.554),
    (7, 10.072),
    (8, -10.072),
];

const LAYOUT: [(u32, &[(u32, &[u32])]); 18] = [
    (
        1,
        &[
            (2, &[0, 1, 2]),
            (4, &[0, 1, 2]),
            (6, &[0, 1, 2]),
            (8, &[0, 1, 2]),
            (82, &[0, 1, 2, 3, 4, 5, 6]),
            (84, &[0, 1, 2, 3, 4, 5, 6]),
            (86, &[0, 1, 2, 3, 4, 5, 6]),
            (88, &[0, 1, 2, 3, 4, 5, 6]),
        ],
    ),
    (
        3,
        &[
            (2, &[0, 1, 2, 3, 4]),
            (4, &[0, 1, 2, 3, 4]),
            (6, &[0, 1, 2, 3, 4]),
            (8, &[0, 1, 2, 3, 4]),
            (82, &[0, 1, 2, 3, 4, 5, 6]),
            (84, &[0, 1, 2, 3, 4, 5, 6]),
            (86, &[0, 1, 2, 3, 4, 5, 6]),
            (88, &[0, 1, 2, 3, 4, 5, 6]),
        ],
    ),
    (
        5,
        &[
            (2, &[1, 2, 3, 4]),
            (4, &[1, 2, 3, 4, 5, 6]),
            (6, &[1, 2, 3, 4, 5, 6]),
            (8, &[1, 2, 3, 4, 5, 6]),
            (10, &[1, 2, 3, 4, 5, 6]),
            (82, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (84, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (86, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (88, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
        ],
    ),
    (
        7,
        &[
            (2, &[1, 2, 3, 4, 5, 6]),
            (4, &[1, 2, 3, 4, 5, 6]),
            (6, &[1, 2, 3, 4, 5, 6]),
            (8, &[1, 2, 3, 4, 5, 6]),
            (10, &[1, 2, 3, 4, 5, 6]),
            (82, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (84, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (86, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (88, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (90, &[0, 1, 2, 3, 4]),
        ],
    ),
    (
        9,
        &[
            (2, &[1, 2, 3, 4, 5, 6]),
            (4, &[1, 2, 3, 4, 5, 6]),
            (6, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (8, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (10, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (82, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (84, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (86, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (88, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (90, &[0, 1, 2, 3, 4, 5, 7]),
        ],
    ),
    (
        11,
        &[
            (2, &[1, 2, 3, 4, 5, 6, 7]),
            (4, &[1, 2, 3, 4, 5, 6, 7]),
            (6, &[1, 2, 3, 4, 5, 6, 7]),
            (8, &[1, 2, 3, 4, 5, 6, 7]),
            (10, &[1, 2, 3, 4, 5, 6, 7]),
            (82, &[0, 1, 2, 3, 4, 5, 6, 7]),
            (84, &[0, 1, 2, 3, 4, 5, 6, 7]),
            (86, &[0, 1, 2, 3, 4, 5, 6, 7]),
            (88, &[0, 1, 2, 3, 4, 5, 7]),
            (90, &[0, 1, 2, 3, 4, 5, 7]),
        ],
    ),
    (
        13,
        &[
            (2, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (4, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (6, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (8, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (10, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (82, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (84, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (86, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (88, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (90, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
        ],
    ),
    (
        15,
        &[
            (2, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (4, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (6, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (8, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (10, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (82, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (84, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (86, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (88, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (90, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
        ],
    ),
    (
        17,
        &[
            (2, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (4, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (6, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (8, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (10, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (82, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (84, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (86, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (88, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (90, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
        ],
    ),
    (
        19,
        &[
            (2, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (4, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (6, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (8, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (10, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (82, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (84, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (86, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (88, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (90, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
        ],
    ),
    (
        21,
        &[
            (2, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (4, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (6, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (8, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (10, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (82, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (84, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (86, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (88, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (90, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
        ],
    ),
    (
        23,
        &[
            (2, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (4, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (6, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (8, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (10, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (82, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (84, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (86, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (88, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (90, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
        ],
    ),
    (
        25,
        &[
            (2, &[1, 2, 3, 4, 5, 6, 7]),
            (4, &[1, 2, 3, 4, 5, 6, 7]),
            (6, &[1, 2, 3, 4, 5, 6, 7]),
            (8, &[1, 2, 3, 4, 5, 6, 7]),
            (10, &[1, 2, 3, 4, 5, 6, 7]),
            (82, &[0, 1, 2, 3, 4, 5, 6, 7]),
            (84, &[0, 1, 2, 3, 4, 5, 6, 7]),
            (86, &[0, 1, 2, 3, 4, 5, 6, 7]),
            (88, &[0, 1, 2, 3, 4, 5, 6, 7]),
            (90, &[1, 3, 5, 7]),
        ],
    ),
    (
        27,
        &[
            (2, &[1, 2, 3, 4, 5, 6]),
            (4, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (6, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (8, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (10, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (82, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (84, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (86, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (88, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (90, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
        ],
    ),
    (
        29,
        &[
            (2, &[1, 2, 3, 4, 5, 6]),
            (4, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (6, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (8, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (10, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (82, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (84, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (86, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (88, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (90, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
        ],
    ),
    (
        31,
        &[
            (2, &[1, 2, 3, 4]),
            (4, &[1, 2, 3, 4, 5, 6]),
            (6, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (8, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (10, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (82, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (84, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (86, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (88, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (90, &[0, 1, 2, 3, 4, 5, 6, 7, 8]),
        ],
    ),
    (
        33,
        &[
            (82, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (84, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (86, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (88, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (90, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (92, &[1, 2, 3, 4, 5, 6, 7, 8]),
        ],
    ),
    (
        35,
        &[
            (82, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (84, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (86, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (88, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (90, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (92, &[1, 2, 3, 4, 5, 6, 7, 8]),
        ],
    ),
];

const ALLOWED_FORTY_BAYS: [u32; 9] = [2, 6, 10, 14, 18, 22, 26, 30, 34];

// (even bay, row, tier)
const EXCLUDED_FORTY_SLOTS: [(u32, u32, u32); 31] = [
    (6, 5, 2),
    (6, 6, 2),
    (6, 0, 90),
    (6, 1, 90),
    (6, 2, 90),
    (6, 3, 90),
    (6, 4, 90),
    (10, 7, 2),
    (10, 7, 4),
    (10, 8, 6),
    (10, 8, 8),
    (10, 8, 10),
    (10, 6, 88),
    (10, 8, 82),
    (10, 8, 84),
    (10, 8, 86),
    (10, 8, 88),
    (26, 7, 2),
    (26, 8, 4),
    (26, 8, 6),
    (26, 8, 8),
    (26, 8, 10),
    (26, 8, 82),
    (26, 8, 84),
    (26, 8, 86),
    (26, 8, 88),
    (26, 8, 90),
    (30, 5, 2),
    (30, 6, 2),
    (30, 7, 4),
    (30, 8, 4),
];

/// The built-in ship profile.
pub fn default_profile() -> ShipProfile {
    let mut profile = ShipProfile::default();
    profile.bay_lcg.extend(BAY_LCG);
    profile.tier_vcg.extend(TIER_VCG);
    profile.row_tcg.extend(ROW_TCG);
    for (bay, tiers) in LAYOUT {
        let entry = profile.layout.entry(bay).or_default();
        for &(tier, rows) in tiers {
            entry.insert(tier, rows.to_vec());
        }
    }
    profile.allowed_forty_bays.extend(ALLOWED_FORTY_BAYS);
    profile.excluded_forty_slots.extend(
        EXCLUDED_FORTY_SLOTS
            .iter()
            .map(|&(bay, row, tier)| FortyExclusion::new(bay, row, tier)),
    );
    profile
}

/// Departure condition: lightship plus the ballast and fuel plan.
pub fn default_condition() -> VesselCondition {
    let lightship = Lightship::new(Weight::new(5_560_400.0), MomentArms::new(7.83, 4.0, 0.0));
    let tanks = vec![
        tank("FO Tank 1 Port", 31_618.0, -0.936, 12.647, -6.460),
        tank("FO Tank 1 Stbd", 31_618.0, -0.936, 12.647, 6.460),
        tank("AFT PEAK WB", 131_200.0, -72.192, 8.592, 0.0),
        tank("WB TK NO.1", 547_835.0, -68.995, 6.107, 0.0),
        tank("WB TK (P) NO.2", 343_807.0, -19.49, 2.455, -2.620),
        tank("WB TK (S) NO.2", 240_665.0, -19.49, 2.455, 2.620),
        tank("WB TK (P) NO.3", 140_146.0, -30.6236, 0.825, -3.493),
        tank("WB TK (S) NO.3", 91_095.0, -30.6236, 0.825, 3.493),
        tank("WB TK (P) NO.4", 390_410.0, 39.7517, 0.782, -4.922),
        tank("WB TK (S) NO.4", 253_766.0, 39.7517, 0.782, 4.922),
        tank("WB TK (P) NO.5", 428_948.0, 46.3378, 0.766, -5.347),
        tank("WB TK (S) NO.5", 403_211.0, 46.3378, 0.766, 5.347),
        tank("WB TK (P) NO.6", 290_775.0, 54.6918, 0.821, -4.099),
        tank("WB TK (S) NO.6", 290_775.0, 54.6918, 0.821, 4.099),
        tank("Sludge Tank", 33_430.0, -57.9533, 1.303, 0.0),
        tank("Bilge Holding Tank", 10_165.0, -58.9698, 1.105, -3.131),
    ];
    VesselCondition::new(lightship, tanks)
}

fn tank(name: &str, kg: f64, lcg: f64, vcg: f64, tcg: f64) -> Tank {
    Tank::new(name, Weight::new(kg), MomentArms::new(lcg, vcg, tcg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stowage_model::prelude::{SlotCoord, VesselGeometry};

    #[test]
    fn test_profile_axes() {
        let profile = default_profile();
        assert_eq!(profile.bay_ids().len(), 18);
        assert_eq!(profile.tier_ids().len(), 11);
        assert_eq!(profile.max_rows(), 9);
    }

    #[test]
    fn test_geometry_builds_with_quarterdeck_override() {
        let profile = default_profile();
        let geometry = VesselGeometry::build(&profile);
        // Bay 33 is index 16, tier 82 is index 5; its vcg is overridden.
        let coord = SlotCoord::new(5, 16, 1);
        assert!(geometry.is_valid_twenty(coord));
        assert_eq!(geometry.twenty_arms(coord).unwrap().vcg, 15.055);
        // Bay 31 (index 15) keeps the tier default at the same tier.
        let neighbor = SlotCoord::new(5, 15, 1);
        assert_eq!(geometry.twenty_arms(neighbor).unwrap().vcg, 17.055);
    }

    #[test]
    fn test_excluded_forty_slots_absent() {
        let profile = default_profile();
        let geometry = VesselGeometry::build(&profile);
        let bays = profile.bay_ids();
        let tiers = profile.tier_ids();

        for &(even_bay, row, tier) in EXCLUDED_FORTY_SLOTS.iter() {
            let left_bay = even_bay - 1;
            let (Some(b_idx), Some(t_idx)) = (
                bays.iter().position(|&b| b == left_bay),
                tiers.iter().position(|&t| t == tier),
            ) else {
                continue;
            };
            let coord = SlotCoord::new(t_idx, b_idx, row as usize);
            assert!(
                !geometry.forty_placements().contains(&coord),
                "excluded slot ({even_bay}, {row}, {tier}) was synthesized"
            );
        }

        // The unexcluded neighbor of (6, 5, 2): bay pair 5/7, tier 2,
        // row 4 is a valid placement.
        assert!(geometry
            .forty_placements()
            .contains(&SlotCoord::new(0, 2, 4)));
    }

    #[test]
    fn test_condition_totals() {
        let condition = default_condition();
        assert_eq!(condition.tanks().len(), 16);
        let trim = condition.ballast_trim_lcg();
        assert!(trim.is_finite());
        // The ballast plan trims the ship slightly aft of midship.
        assert!(trim > 0.0 && trim < 15.0);
    }
}
