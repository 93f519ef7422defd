//! Generational genetic optimizer over evaluation coefficients.

use std::path::PathBuf;
use std::time::Instant;

use itertools::Itertools;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::stats::{GenerationStats, PerformanceStats, StatsCounts, TimingStats, persist_or_log};
use super::tournament::{TournamentSettings, evaluate_population};
use crate::book::{openings, select_random_openings};
use crate::engine::prelude::*;
use crate::utils::prelude::*;

/// Contestants drawn per tournament selection.
const TOURNAMENT_SIZE: usize = 5;

/// Uniform mutation deltas, smallest to largest.
const SMALL_DELTA: i32 = 10;
const MEDIUM_DELTA: i32 = 50;
const LARGE_DELTA: i32 = 500;

/// Added to each mutation probability while the population is stalled.
const STALL_BOOST: f64 = 0.2;
const MAX_MUTATION_RATE: f64 = 0.8;

/// One candidate solution and its most recent evaluation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Model {
    pub coeffs: Coefficients,
    pub generation: u32,
    pub fitness: f64,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Model {
    /// A freshly created, not yet evaluated model.
    pub fn seeded(coeffs: Coefficients, generation: u32) -> Model {
        Model {
            coeffs,
            generation,
            fitness: 0.0,
            wins: 0,
            losses: 0,
            draws: 0,
        }
    }
}

/// Per-gene mutation probabilities. Each gene rolls all four dice
/// independently; deltas stack before the clamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MutationRates {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
    pub reroll: f64,
}

impl Default for MutationRates {
    fn default() -> Self {
        MutationRates {
            small: 0.25,
            medium: 0.05,
            large: 0.02,
            reroll: 0.01,
        }
    }
}

impl MutationRates {
    /// Temporarily raised rates for a stalled population.
    pub fn boosted(&self) -> MutationRates {
        let up = |rate: f64| (rate + STALL_BOOST).min(MAX_MUTATION_RATE);
        MutationRates {
            small: up(self.small),
            medium: up(self.medium),
            large: up(self.large),
            reroll: up(self.reroll),
        }
    }
}

/// Which parent supplies each phase slot, per family. Patterns differ per
/// family to break symmetry; no blending takes place.
const CROSSOVER_PATTERNS: [[bool; 3]; 6] = [
    [true, false, true],  // material
    [false, true, false], // mobility
    [true, true, false],  // corners
    [false, false, true], // parity
    [true, false, false], // stability
    [false, true, true],  // frontier
];

/// Coordinate-wise crossover under the fixed per-family patterns.
pub fn crossover(first: &Coefficients, second: &Coefficients, name: &str) -> Coefficients {
    let mut child = first.clone();
    child.name = name.into();
    for (family, pattern) in Family::all().into_iter().zip(CROSSOVER_PATTERNS) {
        let genes = child.family_mut(family);
        for (slot, take_first) in pattern.into_iter().enumerate() {
            genes[slot] = if take_first {
                first.family(family)[slot]
            } else {
                second.family(family)[slot]
            };
        }
    }
    child
}

/// Mutates every gene independently: three stacked uniform deltas of rising
/// size plus a full reroll, then a clamp to the family range. A child that
/// came through unchanged gets one forced reroll so no offspring is a clone.
pub fn mutate<R: Rng + ?Sized>(coeffs: &mut Coefficients, rates: &MutationRates, rng: &mut R) {
    let before = coeffs.clone();

    for family in Family::all() {
        let (lo, hi) = family.range();
        for slot in 0..3 {
            let gene = &mut coeffs.family_mut(family)[slot];
            if rng.gen_bool(rates.small) {
                *gene += rng.gen_range(-SMALL_DELTA..=SMALL_DELTA);
            }
            if rng.gen_bool(rates.medium) {
                *gene += rng.gen_range(-MEDIUM_DELTA..=MEDIUM_DELTA);
            }
            if rng.gen_bool(rates.large) {
                *gene += rng.gen_range(-LARGE_DELTA..=LARGE_DELTA);
            }
            if rng.gen_bool(rates.reroll) {
                *gene = rng.gen_range(lo..=hi);
            }
            *gene = (*gene).clamp(lo, hi);
        }
    }

    if coeffs.material_coeffs == before.material_coeffs
        && coeffs.mobility_coeffs == before.mobility_coeffs
        && coeffs.corners_coeffs == before.corners_coeffs
        && coeffs.parity_coeffs == before.parity_coeffs
        && coeffs.stability_coeffs == before.stability_coeffs
        && coeffs.frontier_coeffs == before.frontier_coeffs
    {
        force_reroll(coeffs, rng);
    }
}

/// Rerolls one random gene to a guaranteed-different in-range value.
fn force_reroll<R: Rng + ?Sized>(coeffs: &mut Coefficients, rng: &mut R) {
    let family = Family::all()[rng.gen_range(0..6)];
    let slot = rng.gen_range(0..3);
    let (lo, hi) = family.range();
    let current = coeffs.family(family)[slot];
    let mut fresh = rng.gen_range(lo..=hi);
    if fresh == current {
        fresh = if current == hi { lo } else { current + 1 };
    }
    coeffs.family_mut(family)[slot] = fresh;
}

/// Tournament selection: sample five contestants uniformly and keep the
/// fittest, ties going to the lower index.
pub fn tournament_select<'p, R: Rng + ?Sized>(population: &'p [Model], rng: &mut R) -> &'p Model {
    debug_assert!(!population.is_empty());
    let mut best = rng.gen_range(0..population.len());
    for _ in 1..TOURNAMENT_SIZE {
        let contender = rng.gen_range(0..population.len());
        let stronger = population[contender].fitness > population[best].fitness
            || (population[contender].fitness == population[best].fitness && contender < best);
        if stronger {
            best = contender;
        }
    }
    &population[best]
}

/// Sorts a population strongest-first. Stable, so equal fitness keeps the
/// existing order.
pub fn sort_by_fitness(population: &mut [Model]) {
    population.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
}

/// The elite head-count for a population of the given size.
pub fn elite_count(size: usize) -> usize {
    size.div_ceil(4)
}

/// Breeds the next generation from a sorted population: the elite quarter
/// survives verbatim, the remainder comes from selection, crossover, and
/// mutation.
pub fn next_generation<R: Rng + ?Sized>(
    population: &[Model],
    generation: u32,
    rates: &MutationRates,
    rng: &mut R,
) -> Vec<Model> {
    let elites = elite_count(population.len());
    let mut next = population[..elites].to_vec();

    while next.len() < population.len() {
        let first = tournament_select(population, rng);
        let second = tournament_select(population, rng);
        let name = format!("g{}-{}", generation, next.len());
        let mut child = crossover(&first.coeffs, &second.coeffs, &name);
        mutate(&mut child, rates, rng);
        next.push(Model::seeded(child, generation));
    }

    next
}

/// Seeds the initial population: the baseline in slot 0, mutated copies of
/// it everywhere else.
pub fn init_population<R: Rng + ?Sized>(
    seed: &Coefficients,
    size: usize,
    rates: &MutationRates,
    rng: &mut R,
) -> Vec<Model> {
    let mut population = vec![Model::seeded(seed.clone(), 1)];
    for slot in 1..size {
        let mut coeffs = seed.clone();
        coeffs.name = format!("g1-{slot}");
        mutate(&mut coeffs, rates, rng);
        population.push(Model::seeded(coeffs, 1));
    }
    population
}

/// Trainer configuration, fully resolved from the command line.
#[derive(Clone, Debug)]
pub struct OptimizerSettings {
    pub name: String,
    pub generations: u32,
    pub population: usize,
    pub games: usize,
    pub depth: u32,
    pub mate_depth: u32,
    pub threads: usize,
    pub seed: u64,
    pub base: String,
    pub output_dir: PathBuf,
}

/// The generational loop: evaluate, rank, persist, breed.
pub struct Optimizer {
    settings: OptimizerSettings,
    reference: Coefficients,
    rates: MutationRates,
    rng: StdRng,
}

impl Optimizer {
    /// Resolves the baseline and prepares a reproducible run.
    pub fn new(settings: OptimizerSettings) -> Result<Optimizer> {
        let reference = Coefficients::baseline(&settings.base)?;
        let rng = StdRng::seed_from_u64(settings.seed);
        Ok(Optimizer {
            settings,
            reference,
            rates: MutationRates::default(),
            rng,
        })
    }

    fn tournament_settings(&self) -> TournamentSettings {
        TournamentSettings {
            depth: self.settings.depth,
            mate_depth: self.settings.mate_depth,
            threads: self.settings.threads,
        }
    }

    /// Runs the configured number of generations and returns the champion.
    pub fn run(&mut self) -> Result<Model> {
        let games = self.settings.games.min(openings().len());
        let mut population =
            init_population(&self.reference, self.settings.population, &self.rates, &mut self.rng);

        for generation in 1..=self.settings.generations {
            let generation_start = Instant::now();

            let selected = select_random_openings(&mut self.rng, games);
            let evaluation = evaluate_population(
                &mut population,
                &self.reference,
                &selected,
                &self.tournament_settings(),
            )?;
            let evaluation_ms = generation_start.elapsed().as_millis() as u64;

            sort_by_fitness(&mut population);
            let best = &population[0];
            let avg_fitness =
                population.iter().map(|m| m.fitness).sum::<f64>() / population.len() as f64;
            log::info!(
                "generation {generation}: best fitness {:.1} ({}), average {avg_fitness:.2}",
                best.fitness,
                best.coeffs.name,
            );
            log::debug!(
                "fitness ranking: {}",
                population.iter().map(|m| format!("{:.1}", m.fitness)).join(", ")
            );

            let breeding_start = Instant::now();
            if generation < self.settings.generations {
                let rates = if self.stalled(generation, &population) {
                    log::warn!("population stalled at zero wins; boosting mutation for one generation");
                    self.rates.boosted()
                } else {
                    self.rates
                };
                let survivors = population;
                population = next_generation(&survivors, generation + 1, &rates, &mut self.rng);
                self.persist_generation(generation, &survivors, evaluation_ms, breeding_start, generation_start, &evaluation);
            } else {
                self.persist_generation(generation, &population, evaluation_ms, breeding_start, generation_start, &evaluation);
            }
        }

        sort_by_fitness(&mut population);
        Ok(population.swap_remove(0))
    }

    /// A population is stalled when, from generation 3 on, not a single
    /// match was won across all models.
    fn stalled(&self, generation: u32, population: &[Model]) -> bool {
        generation >= 3 && population.iter().all(|m| m.wins == 0)
    }

    fn persist_generation(
        &self,
        generation: u32,
        population: &[Model],
        evaluation_ms: u64,
        breeding_start: Instant,
        generation_start: Instant,
        evaluation: &super::tournament::EvaluationStats,
    ) {
        let best = &population[0];
        let stats = GenerationStats {
            generation,
            best_fitness: best.fitness,
            avg_fitness: population.iter().map(|m| m.fitness).sum::<f64>()
                / population.len() as f64,
            best_model: best.clone(),
            all_models: population.to_vec(),
            timestamp: chrono::Utc::now().timestamp(),
            performance: PerformanceStats {
                evaluation_ms,
                evolution_ms: breeding_start.elapsed().as_millis() as u64,
                total_ms: generation_start.elapsed().as_millis() as u64,
            },
            stats_counts: StatsCounts {
                matches: evaluation.matches,
                wins: population.iter().map(|m| m.wins).sum(),
                losses: population.iter().map(|m| m.losses).sum(),
                draws: population.iter().map(|m| m.draws).sum(),
            },
            timing_stats: TimingStats {
                avg_match_ms: evaluation.avg_match_ms,
                min_match_ms: evaluation.min_match_ms,
                max_match_ms: evaluation.max_match_ms,
            },
        };

        let dir = &self.settings.output_dir;
        persist_or_log(&dir.join(format!("stats_gen{generation}.json")), &stats);
        persist_or_log(&dir.join(format!("model_gen{generation}.json")), best);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn crossover_follows_the_fixed_patterns() {
        let mut first = Coefficients::uniform("first");
        let mut second = Coefficients::uniform("second");
        for family in Family::all() {
            first.family_mut(family).copy_from_slice(&[10, 10, 10]);
            second.family_mut(family).copy_from_slice(&[20, 20, 20]);
        }

        let child = crossover(&first, &second, "child");
        for (family, pattern) in Family::all().into_iter().zip(CROSSOVER_PATTERNS) {
            for slot in 0..3 {
                let expected = if pattern[slot] { 10 } else { 20 };
                assert_eq!(child.family(family)[slot], expected, "{family:?}[{slot}]");
            }
        }
        assert_eq!(child.name, "child");
    }

    #[test]
    fn mutation_stays_in_range_and_always_changes_something() {
        let mut rng = rng();
        for _ in 0..200 {
            let mut coeffs = Coefficients::v1();
            mutate(&mut coeffs, &MutationRates::default(), &mut rng);
            assert!(coeffs.in_range());
            let unchanged = Family::all()
                .iter()
                .all(|&f| coeffs.family(f) == Coefficients::v1().family(f));
            assert!(!unchanged);
        }
    }

    #[test]
    fn zero_rates_still_force_one_reroll() {
        let silent = MutationRates {
            small: 0.0,
            medium: 0.0,
            large: 0.0,
            reroll: 0.0,
        };
        let mut rng = rng();
        let mut coeffs = Coefficients::v1();
        mutate(&mut coeffs, &silent, &mut rng);
        assert_ne!(coeffs, Coefficients::v1());
        assert!(coeffs.in_range());
    }

    #[test]
    fn boosted_rates_are_raised_and_capped() {
        let base = MutationRates::default();
        let boosted = base.boosted();
        assert!(boosted.small > base.small);
        assert!(boosted.reroll > base.reroll);

        let near_cap = MutationRates {
            small: 0.75,
            medium: 0.75,
            large: 0.75,
            reroll: 0.75,
        };
        let capped = near_cap.boosted();
        assert_eq!(capped.small, MAX_MUTATION_RATE);
    }

    #[test]
    fn tournament_selection_prefers_fitness_and_breaks_ties_low() {
        let mut population = (0..8)
            .map(|i| {
                let mut model = Model::seeded(Coefficients::uniform(&format!("m{i}")), 1);
                model.fitness = f64::from(i);
                model
            })
            .collect::<Vec<_>>();
        // With every fitness distinct, repeated selection can never return
        // something fitter than the true maximum.
        let mut rng = rng();
        for _ in 0..50 {
            let winner = tournament_select(&population, &mut rng);
            assert!(winner.fitness <= 7.0);
        }

        // All-equal fitness: the lowest sampled index must win. Selecting
        // many times over a two-model population must eventually yield
        // index 0 and never contradict the tie rule.
        for model in &mut population {
            model.fitness = 1.0;
        }
        let pair = &population[..2];
        let mut saw_first = false;
        for _ in 0..50 {
            let winner = tournament_select(pair, &mut rng);
            if std::ptr::eq(winner, &pair[0]) {
                saw_first = true;
            }
        }
        assert!(saw_first);
    }

    #[test]
    fn sorting_is_non_increasing_in_fitness() {
        let mut rng = rng();
        let mut population = init_population(&Coefficients::v1(), 10, &MutationRates::default(), &mut rng);
        for (i, model) in population.iter_mut().enumerate() {
            model.fitness = f64::from((i * 7 % 5) as u32);
        }
        sort_by_fitness(&mut population);
        for pair in population.windows(2) {
            assert!(pair[0].fitness >= pair[1].fitness);
        }
    }

    #[test]
    fn next_generation_keeps_the_elite_verbatim() {
        let mut rng = rng();
        let mut population = init_population(&Coefficients::v1(), 8, &MutationRates::default(), &mut rng);
        for (i, model) in population.iter_mut().enumerate() {
            model.fitness = f64::from(8 - i as u32);
        }
        sort_by_fitness(&mut population);

        let next = next_generation(&population, 2, &MutationRates::default(), &mut rng);
        assert_eq!(next.len(), population.len());
        for slot in 0..elite_count(population.len()) {
            assert_eq!(next[slot].coeffs, population[slot].coeffs);
            assert_eq!(next[slot].fitness, population[slot].fitness);
        }
        for child in &next[elite_count(population.len())..] {
            assert_eq!(child.generation, 2);
            assert_eq!(child.fitness, 0.0);
            assert!(child.coeffs.in_range());
        }
    }

    #[test]
    fn population_seeds_from_the_baseline() {
        let mut rng = rng();
        let population = init_population(&Coefficients::v1(), 6, &MutationRates::default(), &mut rng);
        assert_eq!(population.len(), 6);
        assert_eq!(population[0].coeffs, Coefficients::v1());
        for model in &population[1..] {
            assert_ne!(model.coeffs, Coefficients::v1());
            assert!(model.coeffs.in_range());
        }
    }

    #[test]
    fn elite_quarter_rounds_up() {
        assert_eq!(elite_count(8), 2);
        assert_eq!(elite_count(9), 3);
        assert_eq!(elite_count(16), 4);
        assert_eq!(elite_count(5), 2);
    }

    #[test]
    fn optimizer_runs_end_to_end() {
        let output_dir = std::env::temp_dir().join("othello-rs-optimizer-test");
        let _ = std::fs::remove_dir_all(&output_dir);

        let mut optimizer = Optimizer::new(OptimizerSettings {
            name: "smoke".into(),
            generations: 2,
            population: 4,
            games: 1,
            depth: 1,
            mate_depth: 6,
            threads: 2,
            seed: 3,
            base: "v1".into(),
            output_dir: output_dir.clone(),
        })
        .unwrap();

        let best = optimizer.run().unwrap();
        assert_eq!(best.wins + best.losses + best.draws, 2);
        assert!(output_dir.join("stats_gen1.json").exists());
        assert!(output_dir.join("stats_gen2.json").exists());
        assert!(output_dir.join("model_gen2.json").exists());

        let _ = std::fs::remove_dir_all(&output_dir);
    }

    #[test]
    fn unknown_baseline_is_fatal() {
        let result = Optimizer::new(OptimizerSettings {
            name: "bad".into(),
            generations: 1,
            population: 2,
            games: 1,
            depth: 1,
            mate_depth: 6,
            threads: 1,
            seed: 1,
            base: "v99".into(),
            output_dir: std::env::temp_dir(),
        });
        assert!(result.is_err());
    }

    /// Long-running optimizer progress check; run with
    /// `cargo test -- --ignored optimizer_improves`.
    #[test]
    #[ignore]
    fn optimizer_improves_a_weak_seed() {
        use crate::book::{openings, select_random_openings};
        use crate::trainer::tournament::{TournamentSettings, evaluate_population};

        let settings = TournamentSettings {
            depth: 3,
            mate_depth: 10,
            threads: default_test_threads(),
        };
        let reference = Coefficients::uniform("uniform");
        let games = 4usize.min(openings().len());

        let improved = [1u64, 2, 3].iter().any(|&seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let rates = MutationRates::default();
            let mut population = init_population(&reference, 8, &rates, &mut rng);

            let mut first_best = 0.0;
            let mut last_best = 0.0;
            for generation in 1..=3u32 {
                let selected = select_random_openings(&mut rng, games);
                evaluate_population(&mut population, &reference, &selected, &settings).unwrap();
                sort_by_fitness(&mut population);
                if generation == 1 {
                    first_best = population[0].fitness;
                }
                last_best = population[0].fitness;
                if generation < 3 {
                    population = next_generation(&population, generation + 1, &rates, &mut rng);
                }
            }
            last_best > first_best
        });

        assert!(improved);
    }

    fn default_test_threads() -> usize {
        std::thread::available_parallelism().map_or(2, |v| v.into())
    }
}
