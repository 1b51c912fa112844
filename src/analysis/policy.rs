use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Where the search is when it asks how many children to expand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchContext {
    /// Recursion depth below the root (the root is 0).
    pub depth: usize,
    pub phase_index: usize,
    pub phase_count: usize,
    pub hero_count: usize,
    pub pool_size: usize,
}

/// Decides how many of a node's best children get expanded further. The
/// engine clamps the answer to the pool size.
pub trait BranchingPolicy: fmt::Debug + Send + Sync {
    fn width(&self, ctx: &BranchContext) -> usize;
}

/// `(hero_count * hero_factor - phase_count * phase_factor + phase_index * progress_factor)
///   / (1 + depth * depth_decay)`, floored at zero.
///
/// Wide early, narrower as depth grows; later phases get more width because
/// their subtrees are shallower.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayingBudget {
    pub hero_factor: f64,
    pub phase_factor: i64,
    pub progress_factor: i64,
    pub depth_decay: i64,
}

impl Default for DecayingBudget {
    fn default() -> Self {
        DecayingBudget {
            hero_factor: 0.5,
            phase_factor: 1,
            progress_factor: 4,
            depth_decay: 4,
        }
    }
}

impl BranchingPolicy for DecayingBudget {
    fn width(&self, ctx: &BranchContext) -> usize {
        let heroes = (ctx.hero_count as f64 * self.hero_factor).floor() as i64;
        let numerator = heroes - ctx.phase_count as i64 * self.phase_factor
            + ctx.phase_index as i64 * self.progress_factor;
        let denominator = 1 + ctx.depth as i64 * self.depth_decay;
        if numerator <= 0 || denominator <= 0 {
            return 0;
        }
        (numerator / denominator) as usize
    }
}

/// The same width at every depth, down to `max_depth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBudget {
    pub width: usize,
    pub max_depth: usize,
}

impl BranchingPolicy for FixedBudget {
    fn width(&self, ctx: &BranchContext) -> usize {
        if ctx.depth < self.max_depth {
            self.width
        } else {
            0
        }
    }
}

/// Expands everything. Only sensible for tiny catalogs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exhaustive;

impl BranchingPolicy for Exhaustive {
    fn width(&self, ctx: &BranchContext) -> usize {
        ctx.pool_size
    }
}

/// Never expands below the root's children: every option keeps its greedy
/// baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyOnly;

impl BranchingPolicy for GreedyOnly {
    fn width(&self, _ctx: &BranchContext) -> usize {
        0
    }
}

/// How a node's value is derived from its expanded children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backup {
    /// `max(baseline, best child)` on blue's scale regardless of who acts.
    #[default]
    Max,
    /// Best child for the side acting at the node: max for blue, min for red.
    ActingSide,
}

impl FromStr for Backup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" => Ok(Backup::Max),
            "acting-side" | "acting_side" | "minimax" => Ok(Backup::ActingSide),
            other => Err(format!("unknown backup rule: {}", other)),
        }
    }
}

/// Parses `decaying`, `greedy`, `exhaustive` or `fixed:WIDTH:DEPTH`.
pub fn parse_policy(spec: &str) -> Result<Arc<dyn BranchingPolicy>, String> {
    let lowered = spec.trim().to_ascii_lowercase();
    let mut parts = lowered.split(':');
    match parts.next() {
        Some("decaying") => Ok(Arc::new(DecayingBudget::default())),
        Some("greedy") => Ok(Arc::new(GreedyOnly)),
        Some("exhaustive") => Ok(Arc::new(Exhaustive)),
        Some("fixed") => {
            let mut number = |name: &str| {
                parts
                    .next()
                    .ok_or_else(|| format!("fixed policy needs a {}", name))?
                    .parse::<usize>()
                    .map_err(|e| format!("bad fixed policy {}: {}", name, e))
            };
            let width = number("width")?;
            let max_depth = number("depth")?;
            Ok(Arc::new(FixedBudget { width, max_depth }))
        }
        _ => Err(format!("unknown branching policy: {}", spec)),
    }
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub backup: Backup,
    pub policy: Arc<dyn BranchingPolicy>,
    /// Total nodes the search may create, shared evenly across root children.
    pub node_limit: Option<usize>,
    /// Wall-clock budget for one call. Results under a deadline depend on
    /// machine speed.
    pub deadline: Option<Duration>,
    /// Evaluate root subtrees on the rayon pool.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            backup: Backup::default(),
            policy: Arc::new(DecayingBudget::default()),
            node_limit: None,
            deadline: None,
            parallel: false,
        }
    }
}

impl SearchConfig {
    pub fn with_policy(mut self, policy: impl BranchingPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    pub fn with_backup(mut self, backup: Backup) -> Self {
        self.backup = backup;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(depth: usize, phase_index: usize) -> BranchContext {
        BranchContext {
            depth,
            phase_index,
            phase_count: 8,
            hero_count: 31,
            pool_size: 29,
        }
    }

    #[test]
    fn decaying_budget_matches_reference_numbers() {
        let policy = DecayingBudget::default();
        // (15 - 8 + 0) / 1
        assert_eq!(policy.width(&ctx(0, 0)), 7);
        // (15 - 8 + 12) / 5
        assert_eq!(policy.width(&ctx(1, 3)), 3);
        // (15 - 8 + 28) / 25
        assert_eq!(policy.width(&ctx(6, 7)), 1);
    }

    #[test]
    fn decaying_budget_floors_at_zero() {
        let policy = DecayingBudget::default();
        let small = BranchContext {
            depth: 0,
            phase_index: 0,
            phase_count: 10,
            hero_count: 6,
            pool_size: 6,
        };
        assert_eq!(policy.width(&small), 0);
    }

    #[test]
    fn fixed_budget_stops_at_depth() {
        let policy = FixedBudget { width: 2, max_depth: 1 };
        assert_eq!(policy.width(&ctx(0, 2)), 2);
        assert_eq!(policy.width(&ctx(1, 3)), 0);
    }

    #[test]
    fn policies_parse() {
        assert_eq!(parse_policy("greedy").unwrap().width(&ctx(0, 0)), 0);
        assert_eq!(parse_policy("Exhaustive").unwrap().width(&ctx(3, 5)), 29);
        assert_eq!(parse_policy("fixed:3:2").unwrap().width(&ctx(1, 5)), 3);
        assert!(parse_policy("fixed:3").is_err());
        assert!(parse_policy("beam").is_err());
        assert_eq!("acting-side".parse::<Backup>().unwrap(), Backup::ActingSide);
    }
}
