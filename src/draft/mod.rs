pub mod format;
pub mod hero;
pub mod roster;
pub mod session;

pub use format::{Format, Phase, Side, Strategy};
pub use hero::Hero;
pub use roster::Roster;
pub use session::DraftSession;
