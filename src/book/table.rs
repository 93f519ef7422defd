//! The static table of known openings.
//!
//! Transcripts are concatenated algebraic moves from the starting position,
//! Black first, always an even number of moves. Every line here must replay
//! legally from the start; the table tests enforce that.

use super::Opening;

pub(super) static OPENINGS: &[Opening] = &[
    Opening {
        name: "Raccoon Dog",
        transcript: "c4c3d3c5b3f4b5b4c6d6",
    },
    Opening {
        name: "Inoue",
        transcript: "c4c3d3e3e2c5f3c2b6c6b5b4",
    },
    Opening {
        name: "Stephenson",
        transcript: "c4c3d3c5d6f4",
    },
    Opening {
        name: "Rose",
        transcript: "c4c3d3c5d6f4f5e6",
    },
    Opening {
        name: "Heath",
        transcript: "c4c3d3c5b4b3",
    },
    Opening {
        name: "Tiger",
        transcript: "c4e3f6e6f5g6",
    },
    Opening {
        name: "Italian",
        transcript: "f5f6e6f4",
    },
    Opening {
        name: "Cow",
        transcript: "f5d6c3d3c4b3",
    },
    Opening {
        name: "Snake",
        transcript: "f5d6c3d3e3f4",
    },
    Opening {
        name: "Mimura",
        transcript: "f5f6e6d6",
    },
    Opening {
        name: "Parallel",
        transcript: "d3c5d6c3",
    },
];
