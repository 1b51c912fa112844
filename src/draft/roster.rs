use super::hero::Hero;
use crate::analysis::pick::Pick;
use crate::error::DraftError;

/// One side's picked heroes, in pick order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    capacity: usize,
    picked: Vec<Hero>,
}

impl Roster {
    pub fn new(capacity: usize) -> Self {
        Roster {
            capacity,
            picked: Vec::with_capacity(capacity),
        }
    }

    pub fn add(&mut self, hero: Hero) -> Result<(), DraftError> {
        if self.is_full() {
            return Err(DraftError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.picked.push(hero);
        Ok(())
    }

    /// A copy of this roster with `hero` added; `self` is left untouched.
    pub fn what_if(&self, hero: Hero) -> Result<Roster, DraftError> {
        let mut next = self.clone();
        next.add(hero)?;
        Ok(next)
    }

    /// A copy of this roster topped up from `ranked`, best first, until full.
    /// The caller guarantees the list holds no duplicates or unavailable heroes.
    pub fn fill(&self, ranked: &[Pick]) -> Roster {
        let mut next = self.clone();
        for pick in ranked.iter().take(self.room()) {
            next.picked.push(pick.hero());
        }
        next
    }

    pub fn size(&self) -> usize {
        self.picked.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn room(&self) -> usize {
        self.capacity - self.picked.len()
    }

    pub fn is_full(&self) -> bool {
        self.picked.len() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.picked.is_empty()
    }

    pub fn contains(&self, hero: Hero) -> bool {
        self.picked.contains(&hero)
    }

    pub fn heroes(&self) -> &[Hero] {
        &self.picked
    }

    pub fn iter(&self) -> impl Iterator<Item = Hero> + '_ {
        self.picked.iter().copied()
    }
}
