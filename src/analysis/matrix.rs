use super::pick::{sort_desc, Pick};
use crate::draft::hero::Hero;
use crate::error::DraftError;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// P(hero beats other) head to head.
    Counter,
    /// P(hero and other win together).
    Synergy,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Counter => f.write_str("counter"),
            Relation::Synergy => f.write_str("synergy"),
        }
    }
}

const SELF_PAIR: f64 = 0.5;

/// Pairwise counter and synergy probabilities over a fixed set of heroes.
///
/// Only [`ProbabilityStoreBuilder::build`] produces one, and it refuses to do so
/// until every ordered pair is populated, so lookups never miss.
#[derive(Debug, Clone)]
pub struct ProbabilityStore {
    heroes: Arc<[Hero]>,
    slots: [Option<usize>; Hero::ALL.len()],
    counter: Vec<f64>,
    synergy: Vec<f64>,
    counter_ranked: Vec<Vec<Pick>>,
    synergy_ranked: Vec<Vec<Pick>>,
}

impl ProbabilityStore {
    /// Every non-self pair set to `p` for both relations.
    pub fn uniform(heroes: &[Hero], p: f64) -> Result<Self, DraftError> {
        Self::from_fn(heroes, |_, _, _| p)
    }

    pub fn from_fn(
        heroes: &[Hero],
        f: impl Fn(Hero, Hero, Relation) -> f64,
    ) -> Result<Self, DraftError> {
        let mut builder = ProbabilityStoreBuilder::new(heroes);
        for &a in heroes {
            for &b in heroes {
                if a != b {
                    builder.set(a, b, Relation::Counter, f(a, b, Relation::Counter));
                    builder.set(a, b, Relation::Synergy, f(a, b, Relation::Synergy));
                }
            }
        }
        builder.build()
    }

    /// The store's heroes in catalog order; this is the draft's key space.
    pub fn heroes(&self) -> Arc<[Hero]> {
        Arc::clone(&self.heroes)
    }

    pub fn contains(&self, hero: Hero) -> bool {
        self.slots[hero as usize].is_some()
    }

    pub fn get(&self, hero: Hero, other: Hero, relation: Relation) -> f64 {
        let n = self.heroes.len();
        let cell = self.slot(hero) * n + self.slot(other);
        match relation {
            Relation::Counter => self.counter[cell],
            Relation::Synergy => self.synergy[cell],
        }
    }

    pub fn counter(&self, hero: Hero, other: Hero) -> f64 {
        self.get(hero, other, Relation::Counter)
    }

    pub fn synergy(&self, hero: Hero, other: Hero) -> f64 {
        self.get(hero, other, Relation::Synergy)
    }

    /// Every other hero, strongest first (best victims for `Counter`, best
    /// partners for `Synergy`).
    pub fn ranked(&self, hero: Hero, relation: Relation) -> &[Pick] {
        let slot = self.slot(hero);
        match relation {
            Relation::Counter => &self.counter_ranked[slot],
            Relation::Synergy => &self.synergy_ranked[slot],
        }
    }

    // Engine entry points reject foreign catalogs first; reaching the panic
    // means a roster-level primitive was handed a hero from another store.
    fn slot(&self, hero: Hero) -> usize {
        match self.slots[hero as usize] {
            Some(slot) => slot,
            None => panic!("{} is not part of this probability store", hero),
        }
    }
}

/// Collects pair values; [`build`](Self::build) checks that nothing is missing.
#[derive(Debug, Clone)]
pub struct ProbabilityStoreBuilder {
    heroes: Vec<Hero>,
    slots: [Option<usize>; Hero::ALL.len()],
    counter: Vec<Option<f64>>,
    synergy: Vec<Option<f64>>,
}

impl ProbabilityStoreBuilder {
    pub fn new(heroes: &[Hero]) -> Self {
        let mut heroes = heroes.to_vec();
        heroes.sort();
        heroes.dedup();

        let mut slots = [None; Hero::ALL.len()];
        for (i, hero) in heroes.iter().enumerate() {
            slots[*hero as usize] = Some(i);
        }

        let n = heroes.len();
        let mut counter = vec![None; n * n];
        let mut synergy = vec![None; n * n];
        for i in 0..n {
            counter[i * n + i] = Some(SELF_PAIR);
            synergy[i * n + i] = Some(SELF_PAIR);
        }

        ProbabilityStoreBuilder {
            heroes,
            slots,
            counter,
            synergy,
        }
    }

    /// Self-pairs stay at 0.5 whatever is passed here. Heroes outside the
    /// builder's set are ignored.
    pub fn set(&mut self, hero: Hero, other: Hero, relation: Relation, p: f64) -> &mut Self {
        if hero == other {
            return self;
        }
        if let (Some(a), Some(b)) = (self.slots[hero as usize], self.slots[other as usize]) {
            let n = self.heroes.len();
            match relation {
                Relation::Counter => self.counter[a * n + b] = Some(p),
                Relation::Synergy => self.synergy[a * n + b] = Some(p),
            }
        }
        self
    }

    pub fn build(self) -> Result<ProbabilityStore, DraftError> {
        let counter = self.complete(&self.counter, Relation::Counter)?;
        let synergy = self.complete(&self.synergy, Relation::Synergy)?;
        let counter_ranked = self.rank(&counter);
        let synergy_ranked = self.rank(&synergy);

        tracing::debug!(heroes = self.heroes.len(), "probability store built");

        Ok(ProbabilityStore {
            heroes: Arc::from(self.heroes),
            slots: self.slots,
            counter,
            synergy,
            counter_ranked,
            synergy_ranked,
        })
    }

    fn complete(&self, cells: &[Option<f64>], relation: Relation) -> Result<Vec<f64>, DraftError> {
        let n = self.heroes.len();
        cells
            .iter()
            .enumerate()
            .map(|(cell, value)| {
                let hero = self.heroes[cell / n];
                let other = self.heroes[cell % n];
                match value {
                    None => Err(DraftError::IncompleteStore {
                        hero,
                        other,
                        relation,
                    }),
                    Some(p) if !p.is_finite() || !(0.0..=1.0).contains(p) => {
                        Err(DraftError::InvalidProbability {
                            hero,
                            other,
                            relation,
                            value: *p,
                        })
                    }
                    Some(p) => Ok(*p),
                }
            })
            .collect()
    }

    fn rank(&self, matrix: &[f64]) -> Vec<Vec<Pick>> {
        let n = self.heroes.len();
        (0..n)
            .map(|a| {
                let mut row: Vec<Pick> = (0..n)
                    .filter(|&b| b != a)
                    .map(|b| Pick::new(self.heroes[b], matrix[a * n + b]))
                    .collect();
                sort_desc(&mut row);
                row
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEW: [Hero; 3] = [Hero::Catherine, Hero::Fortress, Hero::Grumpjaw];

    #[test]
    fn self_pairs_are_even() {
        let store = ProbabilityStore::uniform(&Hero::ALL, 0.62).unwrap();
        for hero in Hero::ALL {
            assert_eq!(store.counter(hero, hero), 0.5);
            assert_eq!(store.synergy(hero, hero), 0.5);
        }
        assert_eq!(store.counter(Hero::Alpha, Hero::Vox), 0.62);
    }

    #[test]
    fn missing_pair_fails_to_build() {
        let mut builder = ProbabilityStoreBuilder::new(&FEW);
        for &a in &FEW {
            for &b in &FEW {
                builder.set(a, b, Relation::Counter, 0.5);
                builder.set(a, b, Relation::Synergy, 0.5);
            }
        }
        let mut partial = builder.clone();
        partial.synergy[1] = None;
        assert_eq!(
            partial.build().unwrap_err(),
            DraftError::IncompleteStore {
                hero: Hero::Catherine,
                other: Hero::Fortress,
                relation: Relation::Synergy,
            }
        );
        assert!(builder.build().is_ok());
    }

    #[test]
    fn out_of_range_probability_fails_to_build() {
        let result = ProbabilityStore::from_fn(&FEW, |a, _, _| {
            if a == Hero::Grumpjaw {
                1.5
            } else {
                0.5
            }
        });
        assert!(matches!(
            result,
            Err(DraftError::InvalidProbability { value, .. }) if value == 1.5
        ));
    }

    #[test]
    fn ranked_lists_exclude_self_and_sort_descending() {
        let store = ProbabilityStore::from_fn(&FEW, |_, b, relation| match (b, relation) {
            (Hero::Fortress, Relation::Counter) => 0.8,
            (Hero::Grumpjaw, Relation::Synergy) => 0.9,
            _ => 0.3,
        })
        .unwrap();

        let ranked = store.ranked(Hero::Catherine, Relation::Counter);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].hero(), Hero::Fortress);

        let ranked = store.ranked(Hero::Catherine, Relation::Synergy);
        assert_eq!(ranked[0].hero(), Hero::Grumpjaw);
    }

    #[test]
    fn builder_sorts_catalog() {
        let store = ProbabilityStore::uniform(&[Hero::Vox, Hero::Adagio, Hero::Vox], 0.5).unwrap();
        assert_eq!(&*store.heroes(), &[Hero::Adagio, Hero::Vox]);
        assert!(store.contains(Hero::Vox));
        assert!(!store.contains(Hero::Koshka));
    }

    #[test]
    #[should_panic(expected = "not part of this probability store")]
    fn lookup_outside_store_panics() {
        let store = ProbabilityStore::uniform(&[Hero::Vox, Hero::Adagio], 0.5).unwrap();
        store.counter(Hero::Vox, Hero::Koshka);
    }
}
