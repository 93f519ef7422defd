use clap::Args;

use crate::othello::prelude::*;

/// Options for the interactive move server.
#[derive(Clone, Debug, Args)]
pub struct ServeOptions {
    /// Search depth for engine replies.
    #[arg(short, long, default_value_t = 7)]
    pub depth: u32,

    /// Empties threshold for the exact endgame solve.
    #[arg(long, default_value_t = MATE_DEPTH)]
    pub mate_depth: u32,

    /// Coefficient baseline the engine plays with.
    #[arg(short, long, default_value = "v1")]
    pub base: String,

    /// Disable opening-book replies.
    #[arg(long, default_value_t = false)]
    pub no_book: bool,
}
