#![allow(dead_code)]

pub mod book;
pub mod engine;
pub mod othello;
pub mod server;
pub mod trainer;

pub mod utils {
    pub mod prelude {
        pub use anyhow::{Context, Error, anyhow};
        pub type Result<T> = anyhow::Result<T, Error>;
        pub use primitive_types::U128;

        pub use std::collections::HashMap;
    }
}

pub mod prelude {
    pub use super::book::{Opening, match_opening, openings, select_random_openings};
    pub use super::engine::prelude::*;
    pub use super::othello::prelude::*;
    pub use super::server::{MoveServer, ServeOptions};
    pub use super::trainer::prelude::*;
    pub use super::utils::prelude::*;
}
