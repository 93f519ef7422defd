//! Parallel round-robin fitness evaluation for a population.
//!
//! One task per (model, opening, colour). Tasks only read the population;
//! all tallying goes through one mutex per model, and the shared progress
//! bar advances inside the same exclusion region.

use std::sync::Mutex;
use std::time::Instant;

use indicatif::ProgressBar;
use rayon::prelude::*;

use super::genetic::Model;
use super::matchup::{MatchOutcome, MatchSettings, SideAssignment, play_match};
use crate::book::Opening;
use crate::engine::prelude::*;
use crate::utils::prelude::*;

/// How a tournament runs its matches.
#[derive(Clone, Copy, Debug)]
pub struct TournamentSettings {
    pub depth: u32,
    pub mate_depth: u32,
    pub threads: usize,
}

impl TournamentSettings {
    fn match_settings(&self) -> MatchSettings {
        MatchSettings {
            depth: self.depth,
            mate_depth: self.mate_depth,
        }
    }
}

/// Aggregate timing of one evaluation round.
#[derive(Clone, Copy, Debug, Default)]
pub struct EvaluationStats {
    pub matches: usize,
    pub avg_match_ms: f64,
    pub min_match_ms: u64,
    pub max_match_ms: u64,
}

#[derive(Default)]
struct Tally {
    wins: u32,
    losses: u32,
    draws: u32,
    total_ms: u64,
    min_ms: u64,
    max_ms: u64,
}

impl Tally {
    fn record(&mut self, outcome: MatchOutcome, elapsed_ms: u64) {
        match outcome {
            MatchOutcome::AWins => self.wins += 1,
            MatchOutcome::BWins => self.losses += 1,
            MatchOutcome::Draw => self.draws += 1,
        }
        self.total_ms += elapsed_ms;
        self.min_ms = if self.min_ms == 0 { elapsed_ms } else { self.min_ms.min(elapsed_ms) };
        self.max_ms = self.max_ms.max(elapsed_ms);
    }

    fn matches(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

/// Evaluates every model against the fixed reference: two matches per
/// opening, colours swapped. Fitness is `wins + 0.5 * draws`, a pure
/// function of (coefficients, reference, openings, depth).
pub fn evaluate_population(
    population: &mut [Model],
    reference: &Coefficients,
    selected: &[&'static Opening],
    settings: &TournamentSettings,
) -> Result<EvaluationStats> {
    let tasks = (0..population.len())
        .flat_map(|model| {
            selected.iter().flat_map(move |&opening| {
                SideAssignment::both()
                    .into_iter()
                    .map(move |assignment| (model, opening, assignment))
            })
        })
        .collect::<Vec<_>>();

    let tallies = (0..population.len())
        .map(|_| Mutex::new(Tally::default()))
        .collect::<Vec<_>>();
    let progress = ProgressBar::new(tasks.len() as u64);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.threads)
        .build()?;

    let match_settings = settings.match_settings();
    let models: &[Model] = population;
    pool.install(|| {
        tasks
            .par_iter()
            .try_for_each(|&(model, opening, assignment)| -> Result<()> {
                let start = Instant::now();
                let outcome = play_match(
                    &models[model].coeffs,
                    reference,
                    opening,
                    assignment,
                    &match_settings,
                )?;
                let elapsed_ms = start.elapsed().as_millis() as u64;

                let mut tally = tallies[model]
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                tally.record(outcome, elapsed_ms);
                progress.inc(1);
                Ok(())
            })
    })?;
    progress.finish_and_clear();

    let mut stats = EvaluationStats::default();
    let mut total_ms = 0u64;
    for (model, tally) in population.iter_mut().zip(&tallies) {
        let tally = tally.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        model.wins = tally.wins;
        model.losses = tally.losses;
        model.draws = tally.draws;
        model.fitness = f64::from(tally.wins) + 0.5 * f64::from(tally.draws);

        stats.matches += tally.matches() as usize;
        total_ms += tally.total_ms;
        stats.min_match_ms = if stats.min_match_ms == 0 {
            tally.min_ms
        } else {
            stats.min_match_ms.min(tally.min_ms)
        };
        stats.max_match_ms = stats.max_match_ms.max(tally.max_ms);
    }
    if stats.matches > 0 {
        stats.avg_match_ms = total_ms as f64 / stats.matches as f64;
    }

    Ok(stats)
}
