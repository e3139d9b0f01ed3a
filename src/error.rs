//! Error types
//!
//! The simulation itself never fails; errors come from building levels at
//! the boundary (plan validation) and from loading configuration files.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Only reported by strict parsing; lenient parsing skips the symbol
    #[error("unknown plan symbol {symbol:?} at column {column}, row {row}")]
    UnknownSymbol {
        symbol: char,
        column: usize,
        row: usize,
    },

    #[error("level plan has no player")]
    MissingPlayer,

    #[error("level plan has no rows")]
    EmptyPlan,

    #[error("actor dictionary key {key:?} must be exactly one character")]
    InvalidSymbol { key: String },

    #[error("sim_dt must be a positive, finite number of seconds (got {0})")]
    InvalidTimestep(f32),

    #[error("max_substeps must be at least 1")]
    NoSubsteps,

    #[error("no level plans to play")]
    NoPlans,

    #[error("level plan {index}: {source}")]
    Plan {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
