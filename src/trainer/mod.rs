pub(crate) mod compare;
pub(crate) mod genetic;
pub(crate) mod matchup;
pub(crate) mod options;
pub(crate) mod stats;
pub(crate) mod tournament;

pub mod prelude {
    pub use super::compare::{CompareReport, CompareSettings, compare};
    pub use super::genetic::{
        Model, MutationRates, Optimizer, OptimizerSettings, crossover, elite_count,
        init_population, mutate, next_generation, sort_by_fitness, tournament_select,
    };
    pub use super::matchup::{MatchOutcome, MatchSettings, SideAssignment, play_match};
    pub use super::options::{CompareOptions, TrainOptions};
    pub use super::stats::{GenerationStats, PerformanceStats, StatsCounts, TimingStats};
    pub use super::tournament::{EvaluationStats, TournamentSettings, evaluate_population};
}
