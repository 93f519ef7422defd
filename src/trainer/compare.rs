//! Head-to-head comparison of two coefficient sets.
//!
//! Every selected opening is played twice with the colours swapped, one
//! parallel task per (opening, colour). Deterministic matches make equal
//! coefficient sets come out exactly symmetric.

use std::sync::Mutex;

use indicatif::ProgressBar;
use rand::Rng;
use rayon::prelude::*;
use serde::Serialize;

use super::matchup::{MatchOutcome, MatchSettings, SideAssignment, play_match};
use crate::book::select_random_openings;
use crate::engine::prelude::*;
use crate::utils::prelude::*;

/// How a comparison runs its matches.
#[derive(Clone, Copy, Debug)]
pub struct CompareSettings {
    pub games: usize,
    pub depth: u32,
    pub mate_depth: u32,
    pub threads: usize,
}

/// Aggregate outcome over `2 * k` matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CompareReport {
    pub wins_a: u32,
    pub wins_b: u32,
    pub draws: u32,
}

impl CompareReport {
    pub fn total(&self) -> u32 {
        self.wins_a + self.wins_b + self.draws
    }

    fn record(&mut self, outcome: MatchOutcome) {
        match outcome {
            MatchOutcome::AWins => self.wins_a += 1,
            MatchOutcome::BWins => self.wins_b += 1,
            MatchOutcome::Draw => self.draws += 1,
        }
    }
}

/// Plays A against B over `min(games, book)` openings with both colour
/// assignments and aggregates the outcomes from A's point of view.
pub fn compare<R: Rng + ?Sized>(
    coeffs_a: &Coefficients,
    coeffs_b: &Coefficients,
    settings: &CompareSettings,
    rng: &mut R,
) -> Result<CompareReport> {
    let selected = select_random_openings(rng, settings.games);
    let tasks = selected
        .iter()
        .flat_map(|&opening| {
            SideAssignment::both()
                .into_iter()
                .map(move |assignment| (opening, assignment))
        })
        .collect::<Vec<_>>();

    let report = Mutex::new(CompareReport::default());
    let progress = ProgressBar::new(tasks.len() as u64);
    let match_settings = MatchSettings {
        depth: settings.depth,
        mate_depth: settings.mate_depth,
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.threads)
        .build()?;
    pool.install(|| {
        tasks
            .par_iter()
            .try_for_each(|&(opening, assignment)| -> Result<()> {
                let outcome = play_match(coeffs_a, coeffs_b, opening, assignment, &match_settings)?;
                let mut report = report
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                report.record(outcome);
                progress.inc(1);
                Ok(())
            })
    })?;
    progress.finish_and_clear();

    let report = report
        .into_inner()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    log::info!(
        "{} vs {}: +{} -{} ={} over {} matches",
        coeffs_a.name,
        coeffs_b.name,
        report.wins_a,
        report.wins_b,
        report.draws,
        report.total()
    );
    Ok(report)
}
