use super::pick::Pick;
use super::search::Engine;
use crate::draft::format::Format;
use crate::draft::hero::Hero;
use crate::draft::session::DraftSession;
use crate::error::DraftError;
use serde::Serialize;
use std::collections::BTreeMap;

// absorbs float noise so a score exactly on a bucket edge lands in the upper one
const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroRank {
    pub hero: Hero,
    /// 1 (weakest bucket) to 10 (strongest) for the side about to act.
    pub rank: u8,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoachReport {
    pub format: String,
    /// Same order as the suggestions: best for the acting side first.
    pub ranks: Vec<HeroRank>,
    /// Blue's odds as a truncated percentage.
    pub odds: u32,
}

impl CoachReport {
    /// Hero name to rank, plus an `"odds"` entry.
    pub fn to_map(&self) -> BTreeMap<String, u32> {
        let mut map: BTreeMap<String, u32> = self
            .ranks
            .iter()
            .map(|r| (r.hero.name().to_string(), u32::from(r.rank)))
            .collect();
        map.insert("odds".to_string(), self.odds);
        map
    }
}

/// A fresh session with `selected` applied in order. `none` or `skip` passes
/// on a ban.
pub fn replay<S: AsRef<str>>(
    engine: &Engine,
    format_name: &str,
    selected: &[S],
) -> Result<DraftSession, DraftError> {
    let format = Format::from_name(format_name)?;
    let mut session = engine.new_session(format)?;
    for name in selected {
        let name = name.as_ref().trim();
        let hero = if name.eq_ignore_ascii_case("none") || name.eq_ignore_ascii_case("skip") {
            None
        } else {
            Some(Hero::from_name(name)?)
        };
        session.pick_or_ban(hero)?;
    }
    Ok(session)
}

/// Replays `selected` (see [`replay`]) and buckets every remaining option.
pub fn coach<S: AsRef<str>>(
    engine: &Engine,
    format_name: &str,
    selected: &[S],
) -> Result<CoachReport, DraftError> {
    let session = replay(engine, format_name, selected)?;

    if session.is_full() {
        let odds = engine
            .scorer()
            .win_probability(session.blue(), session.red());
        return Ok(CoachReport {
            format: session.format().name().to_string(),
            ranks: Vec::new(),
            odds: percent(odds),
        });
    }

    let suggestions = engine.suggestions(&session)?;
    let odds = suggestions.first().map(Pick::score).unwrap_or(0.5);
    Ok(CoachReport {
        format: session.format().name().to_string(),
        ranks: bucket(&suggestions),
        odds: percent(odds),
    })
}

/// Linear 1-10 buckets between the first (best) and last (worst) scores.
pub fn bucket(suggestions: &[Pick]) -> Vec<HeroRank> {
    let (Some(best), Some(worst)) = (suggestions.first(), suggestions.last()) else {
        return Vec::new();
    };
    let span = best.score() - worst.score();
    suggestions
        .iter()
        .map(|pick| {
            let rank = if span == 0.0 {
                1
            } else {
                let raw = (10.0 - 10.0 * (best.score() - pick.score()) / span + EPSILON).floor();
                raw.clamp(1.0, 10.0) as u8
            };
            HeroRank {
                hero: pick.hero(),
                rank,
                score: pick.score(),
            }
        })
        .collect()
}

fn percent(p: f64) -> u32 {
    (p * 100.0).floor().clamp(0.0, 100.0) as u32
}
