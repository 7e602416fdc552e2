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

use crate::engine::particle::Particle;
use crate::engine::rng::SeedSequencer;
use crate::engine::swap::safe_swap;
use crate::eval::fitness::{FitnessEvaluator, PenaltyWeights, StabilitySummary};
use crate::repair::{RepairEngine, RepairOutcome};
use crate::state::ceiling::CeilingTable;
use crate::state::plan::StowagePlan;
use rayon::prelude::*;
use stowage_core::prelude::Fitness;
use stowage_model::prelude::{LoadList, SlotCoord, VesselGeometry};
use stowage_model::vessel::VesselCondition;

const PROGRESS_INTERVAL: usize = 10;

/// Knobs of the swarm search. Defaults match a production run; tests use
/// much smaller swarms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PsoConfig {
    pub particles: usize,
    pub iterations: usize,
    /// Safe swaps applied to the base plan when a particle is born.
    pub init_swaps: usize,
    /// Safe swaps applied to the personal best on every iteration step.
    pub step_swaps: usize,
    pub seed: u64,
    pub penalty_weights: PenaltyWeights,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            particles: 50,
            iterations: 200,
            init_swaps: 25,
            step_swaps: 5,
            seed: 0xABCD_5EED,
            penalty_weights: PenaltyWeights::default(),
        }
    }
}

/// The best plan the search found, with its stability figures and the
/// number of 20-foot containers that plan had to drop.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub plan: StowagePlan,
    pub fitness: Fitness,
    pub summary: StabilitySummary,
    pub dropped: usize,
}

#[derive(Debug, Clone, Copy)]
struct StepResult {
    fitness: Fitness,
    summary: Option<StabilitySummary>,
    dropped: usize,
}

#[derive(Debug, Clone)]
struct GlobalBest {
    plan: StowagePlan,
    fitness: Fitness,
    summary: StabilitySummary,
    dropped: usize,
}

/// Particle-swarm stowage search.
///
/// Not a textbook PSO: there are no velocity vectors. Each particle
/// re-seeds from its personal best, perturbs it with a handful of safe
/// swaps, repairs, and keeps the better of old and new. The global best
/// only ever improves strictly, first found wins.
///
/// Particles are evaluated in parallel; every particle owns its plan and
/// its random stream, and global-best updates are merged after each batch
/// in particle order. A run is bit-for-bit reproducible for a fixed seed
/// regardless of thread scheduling.
#[derive(Debug)]
pub struct PsoOptimizer<'a> {
    geometry: &'a VesselGeometry,
    load: &'a LoadList,
    config: PsoConfig,
    repair: RepairEngine<'a>,
    evaluator: FitnessEvaluator<'a>,
}

impl<'a> PsoOptimizer<'a> {
    pub fn new(
        geometry: &'a VesselGeometry,
        load: &'a LoadList,
        condition: &'a VesselCondition,
        target_lcg: f64,
        config: PsoConfig,
    ) -> Self {
        let repair = RepairEngine::new(geometry, load.registry());
        let evaluator = FitnessEvaluator::new(
            geometry,
            load.registry(),
            condition,
            config.penalty_weights,
            target_lcg,
        );
        Self {
            geometry,
            load,
            config,
            repair,
            evaluator,
        }
    }

    #[inline]
    pub fn config(&self) -> &PsoConfig {
        &self.config
    }

    /// Builds the deterministic starting plan.
    ///
    /// 40-foot containers go heaviest-first into the 40-foot placements
    /// sorted by ascending vcg; nothing is placed yet, so no collision is
    /// possible. The 20-foot containers then fill the eligible slots under
    /// the resulting ceilings, likewise heaviest-lowest. A final repair
    /// pass normalizes the result.
    pub fn base_plan(&self) -> RepairOutcome {
        let mut plan = StowagePlan::empty(self.geometry.shape());

        let mut slots_forty: Vec<(SlotCoord, f64)> = self
            .geometry
            .forty_placements()
            .iter()
            .filter_map(|&c| self.geometry.forty_arms(c).map(|arms| (c, arms.vcg)))
            .collect();
        slots_forty.sort_by(|a, b| a.1.total_cmp(&b.1));

        for (&container, &(slot, _)) in self.load.forty().iter().zip(slots_forty.iter()) {
            plan.place_forty(slot, container);
        }

        let ceilings = CeilingTable::from_plan(&plan);
        let slots_twenty = self.repair.eligible_twenty_slots(&plan, &ceilings);
        for (&container, &slot) in self.load.twenty().iter().zip(slots_twenty.iter()) {
            plan.place_twenty(slot, container);
        }

        self.repair.repair(&plan)
    }

    /// Runs the full search and returns the global best, or `None` when
    /// no evaluation ever produced a finite fitness.
    pub fn run(&self) -> Option<SearchOutcome> {
        let base = self.base_plan();
        tracing::info!(
            particles = self.config.particles,
            iterations = self.config.iterations,
            twenty = self.load.twenty().len(),
            forty = self.load.forty().len(),
            "starting stowage swarm search"
        );

        let sequencer = SeedSequencer::new(self.config.seed);
        let born: Vec<(Particle, StepResult)> = (0..self.config.particles)
            .into_par_iter()
            .map(|index| {
                let mut rng = SeedSequencer::rng(sequencer.for_particle(index));
                let mut position = base.plan.clone();
                for _ in 0..self.config.init_swaps {
                    safe_swap(&mut position, self.load.registry(), &mut rng);
                }
                let outcome = self.repair.repair(&position);
                let eval = self.evaluator.evaluate(&outcome.plan);
                let result = StepResult {
                    fitness: eval.fitness,
                    summary: eval.summary,
                    dropped: outcome.dropped,
                };
                (Particle::new(outcome.plan, eval.fitness, rng), result)
            })
            .collect();
        let (mut swarm, results): (Vec<Particle>, Vec<StepResult>) = born.into_iter().unzip();

        let mut best: Option<GlobalBest> = None;
        merge_global_best(&mut best, &swarm, &results);
        tracing::debug!("swarm initialized");

        for iteration in 0..self.config.iterations {
            let results: Vec<StepResult> = swarm
                .par_iter_mut()
                .map(|particle| {
                    let mut position = particle.best_position().clone();
                    for _ in 0..self.config.step_swaps {
                        safe_swap(&mut position, self.load.registry(), &mut particle.rng);
                    }
                    let outcome = self.repair.repair(&position);
                    let eval = self.evaluator.evaluate(&outcome.plan);
                    particle.advance(outcome.plan, eval.fitness);
                    StepResult {
                        fitness: eval.fitness,
                        summary: eval.summary,
                        dropped: outcome.dropped,
                    }
                })
                .collect();
            merge_global_best(&mut best, &swarm, &results);

            if (iteration + 1) % PROGRESS_INTERVAL == 0 {
                tracing::info!(
                    "Iteration {}/{} | best fitness {:.2}",
                    iteration + 1,
                    self.config.iterations,
                    best.as_ref()
                        .map(|b| b.fitness.value())
                        .unwrap_or(f64::INFINITY)
                );
            }
        }

        match best {
            Some(best) => {
                tracing::info!(
                    fitness = best.fitness.value(),
                    dropped = best.dropped,
                    "search finished"
                );
                Some(SearchOutcome {
                    plan: best.plan,
                    fitness: best.fitness,
                    summary: best.summary,
                    dropped: best.dropped,
                })
            }
            None => {
                tracing::warn!("search finished without a finite-fitness plan");
                None
            }
        }
    }
}

/// Folds one batch of results into the global best, in particle order,
/// with strict less-than. The first particle reaching the best score wins
/// and later ties never replace it, so the merge is independent of how
/// the batch was scheduled.
fn merge_global_best(
    best: &mut Option<GlobalBest>,
    swarm: &[Particle],
    results: &[StepResult],
) {
    let mut winning = best
        .as_ref()
        .map(|b| b.fitness)
        .unwrap_or(Fitness::INFINITE);
    let mut winner: Option<usize> = None;
    for (index, result) in results.iter().enumerate() {
        if result.fitness.improves(winning) {
            winning = result.fitness;
            winner = Some(index);
        }
    }
    if let Some(index) = winner {
        if let Some(summary) = results[index].summary {
            *best = Some(GlobalBest {
                plan: swarm[index].position().clone(),
                fitness: results[index].fitness,
                summary,
                dropped: results[index].dropped,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::validate::validate_plan;
    use std::collections::BTreeMap;
    use stowage_core::prelude::{MomentArms, Weight};
    use stowage_model::cargo::container::{Container, ContainerIdentifier, SizeClass};
    use stowage_model::prelude::ShipProfile;
    use stowage_model::vessel::Lightship;

    fn small_config() -> PsoConfig {
        PsoConfig {
            particles: 4,
            iterations: 6,
            init_swaps: 10,
            step_swaps: 3,
            seed: 99,
            penalty_weights: PenaltyWeights::default(),
        }
    }

    /// Two bays (1, 3), one under-deck tier (2), two rows, all valid.
    fn flat_geometry() -> VesselGeometry {
        let mut profile = ShipProfile::default();
        profile.bay_lcg.insert(1, -5.0);
        profile.bay_lcg.insert(3, 5.0);
        profile.tier_vcg.insert(2, 4.0);
        profile.row_tcg.insert(0, 0.0);
        profile.row_tcg.insert(1, 2.5);
        for bay in [1u32, 3] {
            let mut tiers = BTreeMap::new();
            tiers.insert(2, vec![0, 1]);
            profile.layout.insert(bay, tiers);
        }
        profile.allowed_forty_bays.insert(2);
        VesselGeometry::build(&profile)
    }

    fn twenty(id: &str, kg: f64) -> Container {
        Container::new(
            ContainerIdentifier::new(id.to_string()),
            Weight::new(kg),
            SizeClass::Twenty,
        )
    }

    fn forty(id: &str, kg: f64) -> Container {
        Container::new(
            ContainerIdentifier::new(id.to_string()),
            Weight::new(kg),
            SizeClass::Forty,
        )
    }

    fn lightship(kg: f64) -> VesselCondition {
        VesselCondition::new(
            Lightship::new(Weight::new(kg), MomentArms::zero()),
            vec![],
        )
    }

    #[test]
    fn test_base_plan_places_heaviest_lowest() {
        let geometry = flat_geometry();
        let manifest = vec![twenty("LIGHT", 1000.0), twenty("HEAVY", 2000.0)];
        let load = LoadList::classify(&manifest, 2, 0).unwrap();
        let condition = lightship(10_000.0);
        let optimizer = PsoOptimizer::new(&geometry, &load, &condition, 0.0, small_config());

        let base = optimizer.base_plan();
        assert_eq!(base.dropped, 0);
        let heavy = load
            .registry()
            .lookup(&ContainerIdentifier::new("HEAVY".to_string()))
            .unwrap();
        // All slots share one vcg, so the first slot in scan order wins.
        assert_eq!(
            base.plan.cell(SlotCoord::new(0, 0, 0)).primary(),
            Some(heavy)
        );
        validate_plan(&base.plan, &geometry, load.registry()).unwrap();
    }

    #[test]
    fn test_base_plan_forty_before_twenty() {
        let mut profile = ShipProfile::default();
        profile.bay_lcg.insert(1, -5.0);
        profile.bay_lcg.insert(3, 5.0);
        profile.tier_vcg.insert(2, 4.0);
        profile.tier_vcg.insert(4, 7.0);
        profile.row_tcg.insert(0, 0.0);
        for bay in [1u32, 3] {
            let mut tiers = BTreeMap::new();
            tiers.insert(2, vec![0]);
            tiers.insert(4, vec![0]);
            profile.layout.insert(bay, tiers);
        }
        profile.allowed_forty_bays.insert(2);
        let geometry = VesselGeometry::build(&profile);

        let manifest = vec![twenty("T", 1000.0), forty("F", 9000.0)];
        let load = LoadList::classify(&manifest, 1, 1).unwrap();
        let condition = lightship(10_000.0);
        let optimizer = PsoOptimizer::new(&geometry, &load, &condition, 0.0, small_config());

        let base = optimizer.base_plan();
        let f = load
            .registry()
            .lookup(&ContainerIdentifier::new("F".to_string()))
            .unwrap();
        // The 40ft takes the lowest placement; its ceiling then forbids
        // every remaining under-deck slot, so the 20ft is dropped.
        assert_eq!(base.plan.cell(SlotCoord::new(0, 0, 0)).primary(), Some(f));
        assert_eq!(base.dropped, 1);
        validate_plan(&base.plan, &geometry, load.registry()).unwrap();
    }

    #[test]
    fn test_run_end_to_end_and_deterministic() {
        let geometry = flat_geometry();
        let manifest = vec![twenty("A", 1000.0), twenty("B", 2000.0)];
        let load = LoadList::classify(&manifest, 2, 0).unwrap();
        let condition = lightship(10_000.0);
        let optimizer = PsoOptimizer::new(&geometry, &load, &condition, 0.0, small_config());

        let first = optimizer.run().unwrap();
        assert!(first.fitness.is_finite());
        assert_eq!(first.dropped, 0);
        validate_plan(&first.plan, &geometry, load.registry()).unwrap();

        // Same seed, same result, bit for bit.
        let second = optimizer.run().unwrap();
        assert_eq!(
            first.fitness.value().to_bits(),
            second.fitness.value().to_bits()
        );
        assert_eq!(first.summary, second.summary);
        assert_eq!(first.plan, second.plan);
    }

    #[test]
    fn test_more_iterations_never_worsen_the_best() {
        let geometry = flat_geometry();
        let manifest = vec![
            twenty("A", 1000.0),
            twenty("B", 2000.0),
            twenty("C", 1500.0),
        ];
        let load = LoadList::classify(&manifest, 3, 0).unwrap();
        let condition = lightship(10_000.0);

        // Same seed: the longer run sees every candidate of the shorter
        // one plus more, and the global best only improves.
        let mut short = small_config();
        short.iterations = 0;
        let mut long = small_config();
        long.iterations = 12;

        let at_init = PsoOptimizer::new(&geometry, &load, &condition, 1.0, short)
            .run()
            .unwrap();
        let after = PsoOptimizer::new(&geometry, &load, &condition, 1.0, long)
            .run()
            .unwrap();
        assert!(after.fitness <= at_init.fitness);
    }

    #[test]
    fn test_run_with_forty_containers_keeps_invariants() {
        let mut profile = ShipProfile::default();
        for (bay, lcg) in [(1u32, -9.0), (3, -3.0), (5, 3.0), (7, 9.0)] {
            profile.bay_lcg.insert(bay, lcg);
            let mut tiers = BTreeMap::new();
            tiers.insert(2, vec![0, 1]);
            tiers.insert(82, vec![0, 1]);
            profile.layout.insert(bay, tiers);
        }
        profile.tier_vcg.insert(2, 4.0);
        profile.tier_vcg.insert(82, 17.0);
        profile.row_tcg.insert(0, 0.0);
        profile.row_tcg.insert(1, 2.5);
        profile.allowed_forty_bays.extend([2, 6]);
        let geometry = VesselGeometry::build(&profile);

        let manifest = vec![
            forty("F1", 8000.0),
            forty("F2", 7000.0),
            twenty("T1", 2000.0),
            twenty("T2", 1000.0),
            twenty("T3", 1500.0),
        ];
        let load = LoadList::classify(&manifest, 3, 2).unwrap();
        let condition = lightship(50_000.0);
        let optimizer = PsoOptimizer::new(&geometry, &load, &condition, 0.0, small_config());

        let outcome = optimizer.run().unwrap();
        validate_plan(&outcome.plan, &geometry, load.registry()).unwrap();
        // Both 40ft containers stay placed through every repair.
        let placed_forty = outcome
            .plan
            .iter_primary()
            .filter(|&(_, idx)| load.registry().get(idx).size() == SizeClass::Forty)
            .count();
        assert_eq!(placed_forty, 2);
    }

    #[test]
    fn test_zero_weight_condition_yields_no_outcome() {
        let geometry = flat_geometry();
        let load = LoadList::classify(&[], 0, 0).unwrap();
        let condition = lightship(0.0);
        let optimizer = PsoOptimizer::new(&geometry, &load, &condition, 0.0, small_config());
        assert!(optimizer.run().is_none());
    }
}
