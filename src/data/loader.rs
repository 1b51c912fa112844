use crate::analysis::matrix::{ProbabilityStore, ProbabilityStoreBuilder, Relation};
use crate::draft::hero::Hero;
use crate::error::LoadError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

// Pseudo-counts added to every tally so sparse pairs drift toward even odds.
const VERSUS_WINS_WEIGHT: f64 = 10.0;
const SYNERGY_WINS_WEIGHT: f64 = 5.0;
const SYNERGY_PLAYS_WEIGHT: f64 = 10.0;

pub const DEFAULT_STD_DEV: f64 = 0.15;

/// Historical tallies keyed by hero name.
#[derive(Debug, Default, Deserialize)]
pub struct MatchRecords {
    /// `versus[hero][opponent]` = games `hero` won against `opponent`.
    #[serde(default)]
    pub versus: HashMap<String, HashMap<String, Option<u64>>>,
    #[serde(default)]
    pub synergy: HashMap<String, HashMap<String, SynergyTally>>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct SynergyTally {
    #[serde(default)]
    pub wins_with: Option<u64>,
    #[serde(default)]
    pub plays_with: Option<u64>,
}

pub fn load_records(path: &Path) -> Result<ProbabilityStore, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let store = parse_records(&content)?;
    tracing::info!(
        path = %path.display(),
        heroes = store.heroes().len(),
        "loaded match records"
    );
    Ok(store)
}

pub fn parse_records(json: &str) -> Result<ProbabilityStore, LoadError> {
    let records: MatchRecords = serde_json::from_str(json)?;
    records.into_store()
}

impl MatchRecords {
    /// Every hero named anywhere in the records becomes part of the store.
    pub fn into_store(self) -> Result<ProbabilityStore, LoadError> {
        let versus = resolve(&self.versus)?;
        let synergy = resolve(&self.synergy)?;

        let mut heroes = BTreeSet::new();
        for (hero, row) in &versus {
            heroes.insert(*hero);
            heroes.extend(row.keys().copied());
        }
        for (hero, row) in &synergy {
            heroes.insert(*hero);
            heroes.extend(row.keys().copied());
        }
        let heroes: Vec<Hero> = heroes.into_iter().collect();

        let wins = |a: Hero, b: Hero| -> f64 {
            versus
                .get(&a)
                .and_then(|row| row.get(&b))
                .copied()
                .flatten()
                .unwrap_or(0) as f64
                + VERSUS_WINS_WEIGHT
        };
        let tally = |a: Hero, b: Hero| -> SynergyTally {
            synergy
                .get(&a)
                .and_then(|row| row.get(&b))
                .copied()
                .unwrap_or_default()
        };

        let mut builder = ProbabilityStoreBuilder::new(&heroes);
        for &a in &heroes {
            for &b in &heroes {
                let (won, lost) = (wins(a, b), wins(b, a));
                builder.set(a, b, Relation::Counter, won / (won + lost));

                let t = tally(a, b);
                let wins_with = t.wins_with.unwrap_or(0) as f64 + SYNERGY_WINS_WEIGHT;
                let plays_with = t.plays_with.unwrap_or(0) as f64 + SYNERGY_PLAYS_WEIGHT;
                builder.set(a, b, Relation::Synergy, wins_with / (wins_with + plays_with));
            }
        }
        Ok(builder.build()?)
    }
}

fn resolve<V: Clone>(
    table: &HashMap<String, HashMap<String, V>>,
) -> Result<HashMap<Hero, HashMap<Hero, V>>, LoadError> {
    let mut resolved = HashMap::with_capacity(table.len());
    for (name, row) in table {
        let hero = Hero::from_name(name)?;
        let mut cells = HashMap::with_capacity(row.len());
        for (other, value) in row {
            cells.insert(Hero::from_name(other)?, value.clone());
        }
        resolved.insert(hero, cells);
    }
    Ok(resolved)
}

/// Simulated data: values drawn around 0.5 and clamped to [0, 1]. Counters
/// are complementary (`c(b,a) = 1 - c(a,b)`), synergy is symmetric, and the
/// same seed always gives the same store.
pub fn random_store(heroes: &[Hero], seed: u64, std_dev: f64) -> Result<ProbabilityStore, LoadError> {
    let normal = Normal::new(0.5, std_dev).map_err(|e| LoadError::Distribution(e.to_string()))?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut heroes = heroes.to_vec();
    heroes.sort();
    heroes.dedup();

    let mut builder = ProbabilityStoreBuilder::new(&heroes);
    for (i, &one) in heroes.iter().enumerate() {
        for &two in &heroes[..i] {
            let score: f64 = normal.sample(&mut rng).clamp(0.0, 1.0);
            let synergy: f64 = normal.sample(&mut rng).clamp(0.0, 1.0);
            builder
                .set(one, two, Relation::Counter, score)
                .set(two, one, Relation::Counter, 1.0 - score)
                .set(one, two, Relation::Synergy, synergy)
                .set(two, one, Relation::Synergy, synergy);
        }
    }
    tracing::info!(seed, heroes = heroes.len(), "generated simulated probability store");
    Ok(builder.build()?)
}
