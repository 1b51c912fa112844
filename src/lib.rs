//! Draft recommendation engine for a two-team, alternating pick/ban hero
//! draft. A [`ProbabilityStore`] of pairwise counter and synergy odds feeds a
//! [`Scorer`]; the [`Engine`] runs a pruned tree search over a
//! [`DraftSession`] and ranks every option in the pool by blue's odds.

pub mod analysis;
pub mod config;
pub mod data;
pub mod display;
pub mod draft;
pub mod error;
pub mod logging;

pub use analysis::coach::{coach, CoachReport, HeroRank};
pub use analysis::matrix::{ProbabilityStore, ProbabilityStoreBuilder, Relation};
pub use analysis::pick::Pick;
pub use analysis::policy::{
    Backup, BranchContext, BranchingPolicy, DecayingBudget, Exhaustive, FixedBudget, GreedyOnly,
    SearchConfig,
};
pub use analysis::scorer::Scorer;
pub use analysis::search::Engine;
pub use draft::{DraftSession, Format, Hero, Phase, Roster, Side, Strategy};
pub use error::{ConfigError, DraftError, LoadError};
