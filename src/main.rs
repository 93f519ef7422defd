use clap::{Parser, Subcommand};
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};
use lib_othello::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

#[derive(Debug, Parser)]
#[command(name = "othello", version, about = "Othello engine and coefficient trainer")]
struct Cli {
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Answer move-history lines on stdin with engine moves.
    Serve(ServeOptions),
    /// Evolve evaluation coefficients with the genetic trainer.
    Train(TrainOptions),
    /// Pit two coefficient baselines against each other.
    Compare(CompareOptions),
}

fn main() -> Result<()> {
    // Initialize program options and environment.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let _logger = Logger::try_with_env_or_str(cli.log_level.clone().unwrap_or("info".into()).as_str())?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .adaptive_format_for_stderr(
            match cfg!(debug_assertions) {
                true => AdaptiveFormat::WithThread,
                _    => AdaptiveFormat::Default
            })
        .set_palette("b196;208;195;111;67".to_owned())
        .start()?;

    match cli.command {
        Command::Serve(options) => MoveServer::new(&options)?.run(),
        Command::Train(options) => {
            let mut optimizer = Optimizer::new(options.resolve())?;
            let best = optimizer.run()?;
            log::info!(
                "training {} finished: best model {} with fitness {:.1} (+{} -{} ={})",
                options.name,
                best.coeffs.name,
                best.fitness,
                best.wins,
                best.losses,
                best.draws
            );
            Ok(())
        }
        Command::Compare(options) => {
            let first = Coefficients::baseline(&options.base_a)?;
            let second = Coefficients::baseline(&options.base_b)?;
            let mut rng = StdRng::seed_from_u64(options.seed);
            let report = compare(&first, &second, &options.settings(), &mut rng)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}
