use crate::analysis::matrix::Relation;
use crate::draft::hero::Hero;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraftError {
    #[error("Malformed format: {0}")]
    Format(String),

    #[error("Unknown draft format: {0}")]
    UnknownFormat(String),

    #[error("Not a hero name: {0}")]
    UnknownHero(String),

    #[error("Invalid pick: {0}")]
    InvalidPick(String),

    #[error("Draft is already complete")]
    DraftComplete,

    #[error("Roster is already full ({capacity} heroes)")]
    CapacityExceeded { capacity: usize },

    #[error("Probability store is missing {relation} value for {hero} -> {other}")]
    IncompleteStore {
        hero: Hero,
        other: Hero,
        relation: Relation,
    },

    #[error("Probability {value} for {hero} -> {other} ({relation}) is outside [0, 1]")]
    InvalidProbability {
        hero: Hero,
        other: Hero,
        relation: Relation,
        value: f64,
    },

    #[error("{heroes} heroes cannot fill a {phases}-phase draft")]
    CatalogTooSmall { heroes: usize, phases: usize },

    #[error("{hero} is in the draft but not in the probability store")]
    CatalogMismatch { hero: Hero },

    #[error("Cannot blend scores of different heroes: {left} and {right}")]
    BlendMismatch { left: Hero, right: Hero },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid distribution: {0}")]
    Distribution(String),

    #[error(transparent)]
    Draft(#[from] DraftError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Configuration error: {key} = {value:?}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}
