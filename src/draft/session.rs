use super::format::{Format, Phase, Side, Strategy};
use super::hero::Hero;
use super::roster::Roster;
use crate::error::DraftError;
use std::sync::Arc;

/// The live state of one draft: both rosters, the bans, and the phase pointer.
///
/// Cloning is cheap (two small rosters, the ban list and two `Arc`s), which is
/// what every hypothetical branch in the search relies on.
#[derive(Debug, Clone)]
pub struct DraftSession {
    format: Arc<Format>,
    catalog: Arc<[Hero]>,
    blue: Roster,
    red: Roster,
    banned: Vec<Hero>,
    index: usize,
}

impl DraftSession {
    /// Fails when the catalog has fewer heroes than the format has phases,
    /// since the pool would run dry before the last pick.
    pub fn new(format: Arc<Format>, catalog: Arc<[Hero]>) -> Result<Self, DraftError> {
        if catalog.len() < format.len() {
            return Err(DraftError::CatalogTooSmall {
                heroes: catalog.len(),
                phases: format.len(),
            });
        }
        let blue = Roster::new(format.pick_count(Side::Blue));
        let red = Roster::new(format.pick_count(Side::Red));
        Ok(DraftSession {
            format,
            catalog,
            blue,
            red,
            banned: Vec::new(),
            index: 0,
        })
    }

    /// Applies the current phase. `None` skips a ban and is rejected at a pick.
    pub fn pick_or_ban(&mut self, next: Option<Hero>) -> Result<(), DraftError> {
        let phase = self.current_phase().ok_or(DraftError::DraftComplete)?;
        match next {
            None if phase.is_pick => {
                return Err(DraftError::InvalidPick(format!(
                    "cannot skip {} at phase {}",
                    phase, self.index
                )));
            }
            None => {}
            Some(hero) => {
                if !self.is_available(hero) {
                    return Err(DraftError::InvalidPick(format!(
                        "{} is not in the current pool",
                        hero
                    )));
                }
                if phase.is_pick {
                    self.roster_mut(phase.side()).add(hero)?;
                } else {
                    self.banned.push(hero);
                }
            }
        }
        self.index += 1;
        Ok(())
    }

    /// A copy of this session with `hero` applied at the current phase.
    pub fn what_if(&self, hero: Hero) -> Result<DraftSession, DraftError> {
        let mut next = self.clone();
        next.pick_or_ban(Some(hero))?;
        Ok(next)
    }

    pub fn is_full(&self) -> bool {
        self.index >= self.format.len()
    }

    /// Heroes still available, in catalog order. Recomputed on every call.
    pub fn current_pool(&self) -> Vec<Hero> {
        self.catalog
            .iter()
            .copied()
            .filter(|&h| self.is_available(h))
            .collect()
    }

    fn is_available(&self, hero: Hero) -> bool {
        self.catalog.contains(&hero)
            && !self.blue.contains(hero)
            && !self.red.contains(hero)
            && !self.banned.contains(&hero)
    }

    pub fn current_phase(&self) -> Option<Phase> {
        self.format.phase_at(self.index)
    }

    pub fn current_strategy(&self) -> Option<Strategy> {
        self.format.strategy_at(self.index)
    }

    /// Side of the current phase; `None` once the draft is complete.
    pub fn acting_side(&self) -> Option<Side> {
        self.current_phase().map(Phase::side)
    }

    pub fn phase_index(&self) -> usize {
        self.index
    }

    /// Roster of the side acting now. Blue once the draft is complete.
    pub fn picking_team(&self) -> &Roster {
        self.roster(self.acting_side().unwrap_or(Side::Blue))
    }

    pub fn enemy_team(&self) -> &Roster {
        self.roster(self.acting_side().unwrap_or(Side::Blue).opponent())
    }

    pub fn roster(&self, side: Side) -> &Roster {
        match side {
            Side::Blue => &self.blue,
            Side::Red => &self.red,
        }
    }

    fn roster_mut(&mut self, side: Side) -> &mut Roster {
        match side {
            Side::Blue => &mut self.blue,
            Side::Red => &mut self.red,
        }
    }

    pub fn blue(&self) -> &Roster {
        &self.blue
    }

    pub fn red(&self) -> &Roster {
        &self.red
    }

    pub fn banned(&self) -> &[Hero] {
        &self.banned
    }

    pub fn format(&self) -> &Format {
        &self.format
    }

    pub fn catalog(&self) -> &[Hero] {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> DraftSession {
        DraftSession::new(Arc::new(Format::single_ban()), Arc::from(&Hero::ALL[..])).unwrap()
    }

    #[test]
    fn picks_go_to_acting_side_and_bans_to_ban_list() {
        let mut s = session();
        s.pick_or_ban(Some(Hero::Krul)).unwrap();
        s.pick_or_ban(Some(Hero::Rona)).unwrap();
        s.pick_or_ban(Some(Hero::Vox)).unwrap();
        s.pick_or_ban(Some(Hero::Lyra)).unwrap();

        assert_eq!(s.banned(), &[Hero::Krul, Hero::Rona]);
        assert_eq!(s.blue().heroes(), &[Hero::Vox]);
        assert_eq!(s.red().heroes(), &[Hero::Lyra]);
        assert_eq!(s.phase_index(), 4);
        assert_eq!(s.current_pool().len(), Hero::ALL.len() - 4);
    }

    #[test]
    fn skipping_a_ban_still_advances() {
        let mut s = session();
        s.pick_or_ban(None).unwrap();
        assert_eq!(s.phase_index(), 1);
        assert!(s.banned().is_empty());
    }

    #[test]
    fn skipping_a_pick_is_rejected() {
        let mut s = session();
        s.pick_or_ban(None).unwrap();
        s.pick_or_ban(None).unwrap();
        assert!(matches!(s.pick_or_ban(None), Err(DraftError::InvalidPick(_))));
        assert_eq!(s.phase_index(), 2);
    }

    #[test]
    fn unavailable_hero_is_rejected() {
        let mut s = session();
        s.pick_or_ban(Some(Hero::Ozo)).unwrap();
        assert!(matches!(
            s.pick_or_ban(Some(Hero::Ozo)),
            Err(DraftError::InvalidPick(_))
        ));
    }

    #[test]
    fn hero_outside_catalog_is_rejected() {
        let mut s = DraftSession::new(
            Arc::new(Format::single_ban()),
            Arc::from(&Hero::ALL[..8]),
        )
        .unwrap();
        assert!(matches!(
            s.pick_or_ban(Some(Hero::Vox)),
            Err(DraftError::InvalidPick(_))
        ));
    }

    #[test]
    fn catalog_smaller_than_format_is_rejected() {
        let err = DraftSession::new(Arc::new(Format::single_ban()), Arc::from(&Hero::ALL[..7]))
            .unwrap_err();
        assert_eq!(err, DraftError::CatalogTooSmall { heroes: 7, phases: 8 });
    }

    #[test]
    fn what_if_does_not_touch_parent() {
        let s = session();
        let child = s.what_if(Hero::Baron).unwrap();
        assert_eq!(s.phase_index(), 0);
        assert!(s.banned().is_empty());
        assert_eq!(child.banned(), &[Hero::Baron]);
        assert_eq!(child.phase_index(), 1);
    }

    #[test]
    fn complete_session_rejects_further_calls() {
        let mut s = session();
        for hero in Hero::ALL.iter().take(8) {
            s.pick_or_ban(Some(*hero)).unwrap();
        }
        assert!(s.is_full());
        assert_eq!(s.current_phase(), None);
        assert_eq!(s.pick_or_ban(Some(Hero::Vox)), Err(DraftError::DraftComplete));
    }
}
