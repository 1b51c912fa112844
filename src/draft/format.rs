use crate::error::DraftError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Blue,
    Red,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }

    pub fn is_blue(self) -> bool {
        self == Side::Blue
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Blue => f.write_str("Blue"),
            Side::Red => f.write_str("Red"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub is_pick: bool,
    pub is_blue: bool,
}

impl Phase {
    pub const BLUE_PICK: Phase = Phase { is_pick: true, is_blue: true };
    pub const RED_PICK: Phase = Phase { is_pick: true, is_blue: false };
    pub const BLUE_BAN: Phase = Phase { is_pick: false, is_blue: true };
    pub const RED_BAN: Phase = Phase { is_pick: false, is_blue: false };

    pub fn side(self) -> Side {
        if self.is_blue {
            Side::Blue
        } else {
            Side::Red
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = if self.is_blue { "BLUE" } else { "RED" };
        let kind = if self.is_pick { "PICK" } else { "BAN" };
        write!(f, "{}_{}", side, kind)
    }
}

/// What a phase is for. Ban intent is derived from the phases that follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Pick,
    /// The opponent picks next: deny their best option.
    DefensiveBan,
    /// The opponent bans next and we pick after that.
    OffensiveBan,
}

/// A fixed, validated sequence of draft phases.
#[derive(Debug, Clone, PartialEq)]
pub struct Format {
    name: String,
    phases: Vec<Phase>,
    strategies: Vec<Strategy>,
}

impl Format {
    pub fn new(name: impl Into<String>, phases: Vec<Phase>) -> Result<Self, DraftError> {
        let strategies = (0..phases.len())
            .map(|i| derive_strategy(&phases, i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Format {
            name: name.into(),
            phases,
            strategies,
        })
    }

    pub fn single_ban() -> Self {
        Format::canonical(
            "SINGLE_BAN",
            vec![
                Phase::BLUE_BAN,
                Phase::RED_BAN,
                Phase::BLUE_PICK,
                Phase::RED_PICK,
                Phase::RED_PICK,
                Phase::BLUE_PICK,
                Phase::BLUE_PICK,
                Phase::RED_PICK,
            ],
        )
    }

    pub fn double_ban() -> Self {
        Format::canonical(
            "DOUBLE_BAN",
            vec![
                Phase::BLUE_BAN,
                Phase::RED_BAN,
                Phase::BLUE_PICK,
                Phase::RED_PICK,
                Phase::RED_BAN,
                Phase::BLUE_BAN,
                Phase::RED_PICK,
                Phase::BLUE_PICK,
                Phase::BLUE_PICK,
                Phase::RED_PICK,
            ],
        )
    }

    fn canonical(name: &str, phases: Vec<Phase>) -> Self {
        let strategies = (0..phases.len())
            .map(|i| match derive_strategy(&phases, i) {
                Ok(strategy) => strategy,
                Err(e) => unreachable!("canonical format {} is malformed: {}", name, e),
            })
            .collect();
        Format {
            name: name.to_string(),
            phases,
            strategies,
        }
    }

    /// Accepts `single_ban`, `SINGLE-BAN`, `double-ban`, ...
    pub fn from_name(name: &str) -> Result<Self, DraftError> {
        match name.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "SINGLE_BAN" => Ok(Format::single_ban()),
            "DOUBLE_BAN" => Ok(Format::double_ban()),
            _ => Err(DraftError::UnknownFormat(name.to_string())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase_at(&self, index: usize) -> Option<Phase> {
        self.phases.get(index).copied()
    }

    pub fn strategy_at(&self, index: usize) -> Option<Strategy> {
        self.strategies.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn pick_count(&self, side: Side) -> usize {
        self.phases
            .iter()
            .filter(|p| p.is_pick && p.side() == side)
            .count()
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }
}

fn derive_strategy(phases: &[Phase], index: usize) -> Result<Strategy, DraftError> {
    let one = phases[index];
    if one.is_pick {
        return Ok(Strategy::Pick);
    }
    let malformed = || {
        DraftError::Format(format!(
            "ban at phase {} must be followed by an opposing pick, or by an opposing ban and then our pick",
            index
        ))
    };
    let two = phases.get(index + 1).ok_or_else(malformed)?;
    if two.is_blue == one.is_blue {
        return Err(malformed());
    }
    if two.is_pick {
        return Ok(Strategy::DefensiveBan);
    }
    match phases.get(index + 2) {
        Some(three) if three.is_pick && three.is_blue == one.is_blue => Ok(Strategy::OffensiveBan),
        _ => Err(malformed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_ban_shape() {
        let format = Format::single_ban();
        assert_eq!(format.len(), 8);
        assert_eq!(format.pick_count(Side::Blue), 3);
        assert_eq!(format.pick_count(Side::Red), 3);
        assert_eq!(format.strategy_at(0), Some(Strategy::OffensiveBan));
        assert_eq!(format.strategy_at(1), Some(Strategy::DefensiveBan));
        assert_eq!(format.strategy_at(2), Some(Strategy::Pick));
        assert_eq!(format.strategy_at(8), None);
    }

    #[test]
    fn double_ban_strategies() {
        let format = Format::double_ban();
        assert_eq!(format.len(), 10);
        assert_eq!(format.strategy_at(0), Some(Strategy::OffensiveBan));
        assert_eq!(format.strategy_at(1), Some(Strategy::DefensiveBan));
        assert_eq!(format.strategy_at(4), Some(Strategy::OffensiveBan));
        assert_eq!(format.strategy_at(5), Some(Strategy::DefensiveBan));
        assert_eq!(format.pick_count(Side::Blue), 3);
        assert_eq!(format.pick_count(Side::Red), 3);
    }

    #[test]
    fn ban_followed_by_own_phase_is_rejected() {
        let result = Format::new("bad", vec![Phase::BLUE_BAN, Phase::BLUE_PICK, Phase::RED_PICK]);
        assert!(matches!(result, Err(DraftError::Format(_))));
    }

    #[test]
    fn trailing_ban_is_rejected() {
        let result = Format::new("bad", vec![Phase::BLUE_PICK, Phase::RED_PICK, Phase::RED_BAN]);
        assert!(matches!(result, Err(DraftError::Format(_))));
    }

    #[test]
    fn offensive_ban_needs_our_pick_after_their_ban() {
        let result = Format::new(
            "bad",
            vec![Phase::BLUE_BAN, Phase::RED_BAN, Phase::RED_PICK, Phase::BLUE_PICK],
        );
        assert!(matches!(result, Err(DraftError::Format(_))));
    }

    #[test]
    fn names_resolve() {
        assert_eq!(Format::from_name("single-ban").unwrap(), Format::single_ban());
        assert_eq!(Format::from_name("DOUBLE_BAN").unwrap(), Format::double_ban());
        assert!(matches!(
            Format::from_name("triple_ban"),
            Err(DraftError::UnknownFormat(_))
        ));
    }
}
