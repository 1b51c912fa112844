use super::matrix::ProbabilityStore;
use super::pick::{sort_desc, Pick};
use super::policy::{Backup, BranchContext, SearchConfig};
use super::scorer::Scorer;
use crate::draft::format::{Format, Side, Strategy};
use crate::draft::hero::Hero;
use crate::draft::roster::Roster;
use crate::draft::session::DraftSession;
use crate::error::DraftError;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Ranks draft options by the odds they lead to for blue.
///
/// Every option gets a cheap baseline (greedy fill to the end of the draft,
/// then score). The most promising options for whoever acts are then explored
/// further as a tree, with the width at each level set by the configured
/// [`BranchingPolicy`](super::policy::BranchingPolicy).
#[derive(Debug, Clone)]
pub struct Engine {
    store: Arc<ProbabilityStore>,
    config: SearchConfig,
}

impl Engine {
    pub fn new(store: Arc<ProbabilityStore>, config: SearchConfig) -> Self {
        Engine { store, config }
    }

    pub fn store(&self) -> &ProbabilityStore {
        &self.store
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn scorer(&self) -> Scorer<'_> {
        Scorer::new(&self.store)
    }

    /// A fresh session over this engine's heroes. Fails when the store has
    /// too few heroes for the format.
    pub fn new_session(&self, format: Format) -> Result<DraftSession, DraftError> {
        DraftSession::new(Arc::new(format), self.store.heroes())
    }

    /// Every hero a session can offer must have store entries.
    fn check_catalog(&self, session: &DraftSession) -> Result<(), DraftError> {
        match session.catalog().iter().find(|&&h| !self.store.contains(h)) {
            Some(&hero) => Err(DraftError::CatalogMismatch { hero }),
            None => Ok(()),
        }
    }

    /// Every hero in the current pool with the odds for blue it leads to,
    /// best for the side about to act first. Empty once the draft is full.
    pub fn suggestions(&self, session: &DraftSession) -> Result<Vec<Pick>, DraftError> {
        self.suggestions_with_progress(session, |_| {})
    }

    /// Like [`suggestions`](Self::suggestions), calling `on_progress(done)`
    /// each time one of the current pool's options is fully evaluated.
    pub fn suggestions_with_progress(
        &self,
        session: &DraftSession,
        on_progress: impl Fn(usize) + Sync + Send,
    ) -> Result<Vec<Pick>, DraftError> {
        self.check_catalog(session)?;
        let Some(acting) = session.acting_side() else {
            return Ok(Vec::new());
        };
        let pool = session.current_pool();
        if pool.is_empty() {
            tracing::error!(
                phase = session.phase_index(),
                format = session.format().name(),
                "empty pool before the draft is complete; format and catalog disagree"
            );
            return Ok(Vec::new());
        }

        let started = Instant::now();
        let mut children = self.children(session, &pool)?;
        order_for(acting, &mut children);

        let width = self.width(session, 0, pool.len());
        let per_subtree = self.config.node_limit.map(|limit| limit / pool.len());
        let deadline = self.config.deadline.map(|d| started + d);

        let done = AtomicUsize::new(pool.len() - width);
        on_progress(done.load(Ordering::Relaxed));

        let explore = |child: &mut SearchNode| -> Result<usize, DraftError> {
            let mut budget = Budget::new(per_subtree, deadline);
            self.expand(child, 1, &mut budget)?;
            on_progress(done.fetch_add(1, Ordering::Relaxed) + 1);
            Ok(budget.created)
        };
        let created: usize = if self.config.parallel {
            children[..width]
                .par_iter_mut()
                .map(explore)
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .sum()
        } else {
            children[..width]
                .iter_mut()
                .map(explore)
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .sum()
        };

        // equal values (common under `Backup::Max`) fall back to the baseline
        children.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.baseline.partial_cmp(&a.baseline).unwrap_or(std::cmp::Ordering::Equal))
        });
        let mut picks: Vec<Pick> = children
            .iter()
            .filter_map(|node| node.hero.map(|hero| Pick::new(hero, node.value)))
            .collect();
        if acting == Side::Red {
            picks.reverse();
        }

        tracing::debug!(
            phase = session.phase_index(),
            options = picks.len(),
            explored = width,
            nodes = created + pool.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "suggestions ranked"
        );
        Ok(picks)
    }

    /// Blue's odds now: scored directly once the draft is complete, otherwise
    /// after the acting side takes its top suggestion.
    pub fn current_odds_for_blue(&self, session: &DraftSession) -> Result<f64, DraftError> {
        self.check_catalog(session)?;
        let scorer = self.scorer();
        if session.is_full() {
            return Ok(scorer.win_probability(session.blue(), session.red()));
        }
        match self.suggestions(session)?.first() {
            Some(best) => {
                let next = session.what_if(best.hero())?;
                Ok(scorer.win_probability(next.blue(), next.red()))
            }
            None => Ok(scorer.win_probability(session.blue(), session.red())),
        }
    }

    /// Baseline estimate: finish the draft greedily on a copy, then score it.
    pub fn fill_and_score(&self, session: &DraftSession) -> Result<f64, DraftError> {
        self.check_catalog(session)?;
        self.greedy_fill(session)
    }

    fn greedy_fill(&self, session: &DraftSession) -> Result<f64, DraftError> {
        let mut filled = session.clone();
        while !filled.is_full() {
            let Some(best) = self.selections(&filled).first().copied() else {
                tracing::error!(
                    phase = filled.phase_index(),
                    "greedy fill ran out of heroes before the draft completed"
                );
                break;
            };
            filled.pick_or_ban(Some(best.hero()))?;
        }
        Ok(self
            .scorer()
            .win_probability(filled.blue(), filled.red()))
    }

    /// Single-step ranking of the current pool for the current phase's intent.
    pub fn next_selections(&self, session: &DraftSession) -> Result<Vec<Pick>, DraftError> {
        self.check_catalog(session)?;
        Ok(self.selections(session))
    }

    fn selections(&self, session: &DraftSession) -> Vec<Pick> {
        let pool = session.current_pool();
        let us = session.picking_team();
        let them = session.enemy_team();
        match session.current_strategy() {
            None => Vec::new(),
            Some(Strategy::Pick) => self.scorer().rank_next_picks(us, them, &pool),
            // their best next pick is our best ban
            Some(Strategy::DefensiveBan) => self.scorer().rank_next_picks(them, us, &pool),
            Some(Strategy::OffensiveBan) => self.offensive_bans(us, them, &pool),
        }
    }

    /// Values each ban by how good our second-best pick remains once the
    /// banned hero is gone from the pool. Every hero passed in must be in the
    /// store.
    pub fn offensive_bans(&self, banning: &Roster, enemy: &Roster, pool: &[Hero]) -> Vec<Pick> {
        let scorer = self.scorer();
        let mut bans: Vec<Pick> = pool
            .iter()
            .map(|&ban| {
                let rest: Vec<Hero> = pool.iter().copied().filter(|&h| h != ban).collect();
                let picks = scorer.rank_next_picks(banning, enemy, &rest);
                let value = picks
                    .get(1)
                    .or_else(|| picks.first())
                    .map(Pick::score)
                    .unwrap_or(0.5);
                Pick::new(ban, value)
            })
            .collect();
        sort_desc(&mut bans);
        bans
    }

    fn expand(
        &self,
        node: &mut SearchNode,
        depth: usize,
        budget: &mut Budget,
    ) -> Result<(), DraftError> {
        let Some(acting) = node.session.acting_side() else {
            return Ok(());
        };
        let pool = node.session.current_pool();
        if pool.is_empty() {
            tracing::error!(
                phase = node.session.phase_index(),
                depth,
                "empty pool during search; treating node as complete"
            );
            return Ok(());
        }
        if !budget.try_consume(pool.len()) {
            return Ok(());
        }

        node.children = self.children(&node.session, &pool)?;
        order_for(acting, &mut node.children);

        let width = self.width(&node.session, depth, pool.len());
        for child in node.children.iter_mut().take(width) {
            self.expand(child, depth + 1, budget)?;
        }
        node.value = self.backup(node, acting);
        tracing::trace!(
            depth,
            phase = node.session.phase_index(),
            children = node.children.len(),
            explored = width,
            value = node.value,
            "node expanded"
        );
        Ok(())
    }

    fn children(&self, session: &DraftSession, pool: &[Hero]) -> Result<Vec<SearchNode>, DraftError> {
        let build = |&hero: &Hero| -> Result<SearchNode, DraftError> {
            let next = session.what_if(hero)?;
            let baseline = self.greedy_fill(&next)?;
            Ok(SearchNode::new(Some(hero), next, baseline))
        };
        if self.config.parallel {
            pool.par_iter().map(build).collect()
        } else {
            pool.iter().map(build).collect()
        }
    }

    fn width(&self, session: &DraftSession, depth: usize, pool_size: usize) -> usize {
        let ctx = BranchContext {
            depth,
            phase_index: session.phase_index(),
            phase_count: session.format().len(),
            hero_count: session.catalog().len(),
            pool_size,
        };
        self.config.policy.width(&ctx).min(pool_size)
    }

    fn backup(&self, node: &SearchNode, acting: Side) -> f64 {
        let values = node.children.iter().map(|c| c.value);
        match (self.config.backup, acting) {
            (Backup::Max, _) => values.fold(node.baseline, f64::max),
            (Backup::ActingSide, Side::Blue) => values.fold(f64::NEG_INFINITY, f64::max),
            (Backup::ActingSide, Side::Red) => values.fold(f64::INFINITY, f64::min),
        }
    }
}

/// Best for `acting` first: descending odds for blue, reversed for red.
fn order_for(acting: Side, nodes: &mut [SearchNode]) {
    nodes.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
    if acting == Side::Red {
        nodes.reverse();
    }
}

/// One hypothetical draft state. Lives only for a single `suggestions` call.
#[derive(Debug)]
struct SearchNode {
    hero: Option<Hero>,
    session: DraftSession,
    baseline: f64,
    /// The baseline until children are expanded, then the backed-up value.
    value: f64,
    children: Vec<SearchNode>,
}

impl SearchNode {
    fn new(hero: Option<Hero>, session: DraftSession, baseline: f64) -> Self {
        SearchNode {
            hero,
            session,
            baseline,
            value: baseline,
            children: Vec::new(),
        }
    }
}

struct Budget {
    nodes: Option<usize>,
    deadline: Option<Instant>,
    created: usize,
}

impl Budget {
    fn new(nodes: Option<usize>, deadline: Option<Instant>) -> Self {
        Budget {
            nodes,
            deadline,
            created: 0,
        }
    }

    fn try_consume(&mut self, count: usize) -> bool {
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return false;
        }
        match self.nodes.as_mut() {
            Some(remaining) if *remaining < count => return false,
            Some(remaining) => *remaining -= count,
            None => {}
        }
        self.created += count;
        true
    }
}
