use super::matrix::ProbabilityStore;
use super::pick::{sort_desc, Pick};
use crate::draft::hero::Hero;
use crate::draft::roster::Roster;

const FIFTY_FIFTY: f64 = 0.5;

/// Scores rosters as they stand. Nothing here predicts or fills picks.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    store: &'a ProbabilityStore,
}

impl<'a> Scorer<'a> {
    pub fn new(store: &'a ProbabilityStore) -> Self {
        Scorer { store }
    }

    pub fn store(&self) -> &'a ProbabilityStore {
        self.store
    }

    /// How well `hero` fares against the enemy roster.
    pub fn matchup_score(&self, hero: Hero, enemy: &Roster) -> f64 {
        geo_mean(enemy.iter().map(|e| self.store.counter(hero, e)))
    }

    /// How well `hero` fits with the allied roster.
    pub fn synergy_score(&self, hero: Hero, ally: &Roster) -> f64 {
        geo_mean(ally.iter().map(|a| self.store.synergy(hero, a)))
    }

    /// Geometric mean over every ordered pair of distinct heroes.
    pub fn team_synergy(&self, roster: &Roster) -> f64 {
        geo_mean(roster.iter().flat_map(|h1| {
            roster
                .iter()
                .filter(move |&h2| h2 != h1)
                .map(move |h2| self.store.synergy(h1, h2))
        }))
    }

    pub fn team_matchup(&self, us: &Roster, them: &Roster) -> f64 {
        geo_mean(
            us.iter()
                .flat_map(|h| them.iter().map(move |e| self.store.counter(h, e))),
        )
    }

    /// P(we win | exactly one side's synergy pays off), treating both sides'
    /// synergy as independent events.
    pub fn synergy_war(&self, us: &Roster, them: &Roster) -> f64 {
        let ours = self.team_synergy(us);
        let theirs = self.team_synergy(them);
        let we_win = ours * (1.0 - theirs);
        let they_win = theirs * (1.0 - ours);
        if we_win + they_win == 0.0 {
            return FIFTY_FIFTY;
        }
        we_win / (we_win + they_win)
    }

    /// Probability that `us` beats `them`.
    ///
    /// Head-to-head matchups are weighted by the number of heroes on the field
    /// and the synergy war by the number of ordered ally pairs (doubled), so
    /// synergy matters more as rosters fill.
    pub fn win_probability(&self, us: &Roster, them: &Roster) -> f64 {
        if us.is_empty() || them.is_empty() {
            return FIFTY_FIFTY;
        }
        let fights = (us.size() + them.size()) as f64;
        let pairs = (us.size() * (us.size() - 1) + them.size() * (them.size() - 1)) as f64;
        weighted_geo_mean(&[
            (self.team_matchup(us, them), fights),
            (self.synergy_war(us, them), 2.0 * pairs),
        ])
    }

    /// Single-step value of adding `candidate` to `us`: synergy with allies
    /// weighted by ally count, matchup weighted by twice the enemy count.
    pub fn marginal_value(&self, candidate: Hero, us: &Roster, them: &Roster) -> f64 {
        weighted_geo_mean(&[
            (self.synergy_score(candidate, us), us.size() as f64),
            (self.matchup_score(candidate, them), 2.0 * them.size() as f64),
        ])
    }

    /// The pool ranked by [`marginal_value`](Self::marginal_value), best first.
    pub fn rank_next_picks(&self, us: &Roster, them: &Roster, pool: &[Hero]) -> Vec<Pick> {
        let mut picks: Vec<Pick> = pool
            .iter()
            .map(|&hero| Pick::new(hero, self.marginal_value(hero, us, them)))
            .collect();
        sort_desc(&mut picks);
        picks
    }
}

/// 0.5 when there is nothing to average.
pub fn geo_mean(scores: impl Iterator<Item = f64>) -> f64 {
    let (product, count) = scores.fold((1.0, 0usize), |(p, n), s| (p * s, n + 1));
    if count == 0 {
        return FIFTY_FIFTY;
    }
    product.powf(1.0 / count as f64)
}

/// Product of `value^weight`, rooted by the total weight. 0.5 when every
/// weight is zero.
pub fn weighted_geo_mean(terms: &[(f64, f64)]) -> f64 {
    let total: f64 = terms.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return FIFTY_FIFTY;
    }
    let product: f64 = terms.iter().map(|(v, w)| v.powf(*w)).product();
    product.powf(1.0 / total)
}
