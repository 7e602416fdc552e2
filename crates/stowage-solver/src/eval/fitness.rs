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

use crate::state::plan::StowagePlan;
use serde::Serialize;
use stowage_core::prelude::{Fitness, MomentAccumulator, Weight};
use stowage_model::prelude::{ContainerRegistry, SizeClass, VesselGeometry};
use stowage_model::vessel::VesselCondition;

/// The list may heel up to this transverse offset (meters) before the
/// stability penalty kicks in.
pub const TCG_DEAD_BAND: f64 = 0.2;

/// Coefficients of the penalty terms. Immutable for a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PenaltyWeights {
    /// Applied to the raw total vertical moment. Keeps overall stacking
    /// low, not just the resulting vcg.
    pub vertical_moment: f64,
    /// Applied to the deviation of the ship lcg from the target lcg.
    pub longitudinal_balance: f64,
    /// Applied to the transverse offset beyond [`TCG_DEAD_BAND`].
    pub stability_tcg: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            vertical_moment: 0.0001,
            longitudinal_balance: 100.0,
            stability_tcg: 8000.0,
        }
    }
}

/// Stability figures of one evaluated plan. Computed fresh on every
/// evaluation, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StabilitySummary {
    pub fitness: Fitness,
    pub ship_lcg: f64,
    pub ship_vcg: f64,
    pub ship_tcg: f64,
    pub total_weight: Weight,
}

/// Result of evaluating one plan. The summary is absent exactly when the
/// total weight is zero, in which case the fitness is infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub fitness: Fitness,
    pub summary: Option<StabilitySummary>,
}

/// Scores a plan by the resulting ship stability.
///
/// Cargo weight and moments are summed over every occupied primary cell
/// using the size-appropriate slot properties, then combined with the
/// lightship and tank condition. Lower fitness is better.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    geometry: &'a VesselGeometry,
    registry: &'a ContainerRegistry,
    condition: &'a VesselCondition,
    weights: PenaltyWeights,
    target_lcg: f64,
}

impl<'a> FitnessEvaluator<'a> {
    pub fn new(
        geometry: &'a VesselGeometry,
        registry: &'a ContainerRegistry,
        condition: &'a VesselCondition,
        weights: PenaltyWeights,
        target_lcg: f64,
    ) -> Self {
        Self {
            geometry,
            registry,
            condition,
            weights,
            target_lcg,
        }
    }

    #[inline]
    pub fn target_lcg(&self) -> f64 {
        self.target_lcg
    }

    pub fn evaluate(&self, plan: &StowagePlan) -> Evaluation {
        let mut acc = MomentAccumulator::new();

        for (coord, idx) in plan.iter_primary() {
            let container = self.registry.get(idx);
            let arms = match container.size() {
                SizeClass::Twenty => self.geometry.twenty_arms(coord),
                SizeClass::Forty => self.geometry.forty_arms(coord),
            };
            // A primary without a properties entry contributes nothing.
            if let Some(&arms) = arms {
                acc.add(container.weight(), arms);
            }
        }

        self.condition.accumulate(&mut acc);

        let Some(cg) = acc.center_of_gravity() else {
            return Evaluation {
                fitness: Fitness::INFINITE,
                summary: None,
            };
        };

        let mut score = self.weights.vertical_moment * acc.vertical_moment()
            + self.weights.longitudinal_balance * (cg.arms.lcg - self.target_lcg).abs();
        if cg.arms.tcg.abs() > TCG_DEAD_BAND {
            score += self.weights.stability_tcg * (cg.arms.tcg.abs() - TCG_DEAD_BAND);
        }

        let fitness = Fitness::new(score);
        Evaluation {
            fitness,
            summary: Some(StabilitySummary {
                fitness,
                ship_lcg: cg.arms.lcg,
                ship_vcg: cg.arms.vcg,
                ship_tcg: cg.arms.tcg,
                total_weight: cg.total_weight,
            }),
        }
    }
}
