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

use crate::primitives::{MomentArms, Weight};

/// Streaming sum of weights and their moments about the ship reference
/// point. Feed it every weight item on board, then ask for the resulting
/// center of gravity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MomentAccumulator {
    weight: Weight,
    moment_l: f64,
    moment_v: f64,
    moment_t: f64,
}

/// The resolved center of gravity of a summed weight distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipCenterOfGravity {
    pub total_weight: Weight,
    pub arms: MomentArms,
}

impl MomentAccumulator {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add(&mut self, weight: Weight, arms: MomentArms) {
        self.weight += weight;
        self.moment_l += weight * arms.lcg;
        self.moment_v += weight * arms.vcg;
        self.moment_t += weight * arms.tcg;
    }

    #[inline]
    pub fn merge(&mut self, other: &MomentAccumulator) {
        self.weight += other.weight;
        self.moment_l += other.moment_l;
        self.moment_v += other.moment_v;
        self.moment_t += other.moment_t;
    }

    #[inline]
    pub fn total_weight(&self) -> Weight {
        self.weight
    }

    /// Raw (uncentered) vertical moment of everything added so far.
    #[inline]
    pub fn vertical_moment(&self) -> f64 {
        self.moment_v
    }

    /// Resolves the center of gravity, or `None` when the total weight is
    /// zero and the division is undefined.
    #[inline]
    pub fn center_of_gravity(&self) -> Option<ShipCenterOfGravity> {
        let w = self.weight.kilograms();
        if w == 0.0 {
            return None;
        }
        Some(ShipCenterOfGravity {
            total_weight: self.weight,
            arms: MomentArms::new(self.moment_l / w, self.moment_v / w, self.moment_t / w),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_accumulator_has_no_cg() {
        let acc = MomentAccumulator::new();
        assert!(acc.center_of_gravity().is_none());
        assert_eq!(acc.total_weight(), Weight::ZERO);
        assert_eq!(acc.vertical_moment(), 0.0);
    }

    #[test]
    fn test_single_item_cg_is_its_arms() {
        let mut acc = MomentAccumulator::new();
        acc.add(Weight::new(500.0), MomentArms::new(2.0, 8.0, -1.0));
        let cg = acc.center_of_gravity().unwrap();
        assert_eq!(cg.total_weight.kilograms(), 500.0);
        assert_eq!(cg.arms, MomentArms::new(2.0, 8.0, -1.0));
        assert_eq!(acc.vertical_moment(), 4000.0);
    }

    #[test]
    fn test_two_items_balance() {
        // Equal weights at opposite transverse arms cancel the tcg.
        let mut acc = MomentAccumulator::new();
        acc.add(Weight::new(100.0), MomentArms::new(0.0, 5.0, -3.0));
        acc.add(Weight::new(100.0), MomentArms::new(10.0, 5.0, 3.0));
        let cg = acc.center_of_gravity().unwrap();
        assert_eq!(cg.arms.lcg, 5.0);
        assert_eq!(cg.arms.vcg, 5.0);
        assert_eq!(cg.arms.tcg, 0.0);
    }

    #[test]
    fn test_merge_matches_sequential_adds() {
        let mut left = MomentAccumulator::new();
        left.add(Weight::new(40.0), MomentArms::new(1.0, 2.0, 3.0));

        let mut right = MomentAccumulator::new();
        right.add(Weight::new(60.0), MomentArms::new(-1.0, 4.0, 0.0));

        let mut merged = left;
        merged.merge(&right);

        let mut sequential = MomentAccumulator::new();
        sequential.add(Weight::new(40.0), MomentArms::new(1.0, 2.0, 3.0));
        sequential.add(Weight::new(60.0), MomentArms::new(-1.0, 4.0, 0.0));

        assert_eq!(merged, sequential);
    }

    #[test]
    fn test_zero_weight_item_contributes_nothing() {
        let mut acc = MomentAccumulator::new();
        acc.add(Weight::ZERO, MomentArms::new(100.0, 100.0, 100.0));
        assert!(acc.center_of_gravity().is_none());
    }
}
