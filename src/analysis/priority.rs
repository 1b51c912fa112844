//! Experimental alternate ranker: each pool hero is a node whose weighted edges
//! point at the allies it would join and the enemies it would face. It ignores
//! the rest of the draft, so it is a quick second opinion rather than a
//! replacement for [`Engine::suggestions`](super::search::Engine::suggestions).

use super::matrix::{ProbabilityStore, Relation};
use super::pick::{sort_desc, Pick};
use super::scorer::geo_mean;
use crate::draft::format::Strategy;
use crate::draft::hero::Hero;
use crate::draft::roster::Roster;
use crate::draft::session::DraftSession;
use crate::error::DraftError;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: Hero,
    pub weight: f64,
    pub relation: Relation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeroNode {
    hero: Hero,
    edges: Vec<Edge>,
}

impl HeroNode {
    pub fn new(hero: Hero) -> Self {
        HeroNode {
            hero,
            edges: Vec::new(),
        }
    }

    pub fn hero(&self) -> Hero {
        self.hero
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Adds the edge unless one to the same hero with the same relation exists.
    pub fn add_edge(&mut self, edge: Edge) {
        let exists = self
            .edges
            .iter()
            .any(|e| e.to == edge.to && e.relation == edge.relation);
        if !exists {
            self.edges.push(edge);
        }
    }

    /// Geometric mean of every edge weight; 0.5 with no edges.
    pub fn score(&self) -> f64 {
        geo_mean(self.edges.iter().map(|e| e.weight))
    }

    /// Union of both nodes' edges.
    pub fn absorb(&mut self, other: &HeroNode) -> Result<(), DraftError> {
        if other.hero != self.hero {
            return Err(DraftError::BlendMismatch {
                left: self.hero,
                right: other.hero,
            });
        }
        for edge in &other.edges {
            self.add_edge(*edge);
        }
        Ok(())
    }
}

/// Nodes for every pool hero with synergy edges to `allies`.
pub fn partners(store: &ProbabilityStore, allies: &Roster, pool: &[Hero]) -> BTreeMap<Hero, HeroNode> {
    edges_to(store, allies, pool, Relation::Synergy)
}

/// Nodes for every pool hero with counter edges to `enemies`.
pub fn counters(store: &ProbabilityStore, enemies: &Roster, pool: &[Hero]) -> BTreeMap<Hero, HeroNode> {
    edges_to(store, enemies, pool, Relation::Counter)
}

fn edges_to(
    store: &ProbabilityStore,
    targets: &Roster,
    pool: &[Hero],
    relation: Relation,
) -> BTreeMap<Hero, HeroNode> {
    pool.iter()
        .map(|&hero| {
            let mut node = HeroNode::new(hero);
            for target in targets.iter() {
                node.add_edge(Edge {
                    to: target,
                    weight: store.get(hero, target, relation),
                    relation,
                });
            }
            (hero, node)
        })
        .collect()
}

/// Merges node sets hero by hero; membership comes from the first set.
pub fn blend_nodes(sets: Vec<BTreeMap<Hero, HeroNode>>) -> Result<BTreeMap<Hero, HeroNode>, DraftError> {
    let mut sets = sets.into_iter();
    let Some(mut result) = sets.next() else {
        return Ok(BTreeMap::new());
    };
    for set in sets {
        for (hero, node) in result.iter_mut() {
            if let Some(other) = set.get(hero) {
                node.absorb(other)?;
            }
        }
    }
    Ok(result)
}

/// Ranks the pool for whichever team has the next pick at stake.
pub fn priority_ranking(store: &ProbabilityStore, session: &DraftSession) -> Result<Vec<Pick>, DraftError> {
    let Some(strategy) = session.current_strategy() else {
        return Ok(Vec::new());
    };
    let (next_picker, other) = match strategy {
        Strategy::DefensiveBan => (session.enemy_team(), session.picking_team()),
        Strategy::Pick | Strategy::OffensiveBan => (session.picking_team(), session.enemy_team()),
    };
    let pool = session.current_pool();
    let nodes = blend_nodes(vec![
        partners(store, next_picker, &pool),
        counters(store, other, &pool),
    ])?;

    let mut picks: Vec<Pick> = nodes
        .values()
        .map(|node| Pick::new(node.hero(), node.score()))
        .collect();
    sort_desc(&mut picks);
    Ok(picks)
}
