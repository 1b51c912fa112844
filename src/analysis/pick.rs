use crate::draft::hero::Hero;
use crate::error::DraftError;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A hero paired with an estimated probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pick {
    hero: Hero,
    score: f64,
}

impl Pick {
    pub fn new(hero: Hero, score: f64) -> Self {
        Pick { hero, score }
    }

    pub fn hero(&self) -> Hero {
        self.hero
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Same hero, geometric mean of both scores.
    pub fn blend(&self, other: &Pick) -> Result<Pick, DraftError> {
        if self.hero != other.hero {
            return Err(DraftError::BlendMismatch {
                left: self.hero,
                right: other.hero,
            });
        }
        Ok(Pick::new(self.hero, (self.score * other.score).sqrt()))
    }
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}: {:.3})", self.hero, self.score)
    }
}

/// Higher scores first: (.70, .65, .55, ...)
pub fn by_score_desc(a: &Pick, b: &Pick) -> Ordering {
    b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
}

/// Stable descending sort; equal scores keep their incoming order.
pub fn sort_desc(picks: &mut [Pick]) {
    picks.sort_by(by_score_desc);
}

/// Merges rankings of the same heroes. Membership comes from the first list;
/// each entry is blended with its match in every later list that has one.
pub fn blend_rankings(lists: &[Vec<Pick>]) -> Result<Vec<Pick>, DraftError> {
    let Some((first, rest)) = lists.split_first() else {
        return Ok(Vec::new());
    };
    let mut result = Vec::with_capacity(first.len());
    for pick in first {
        let mut merged = *pick;
        for other in rest {
            if let Some(matching) = other.iter().find(|o| o.hero == pick.hero) {
                merged = merged.blend(matching)?;
            }
        }
        result.push(merged);
    }
    sort_desc(&mut result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn blend_is_geometric_mean() {
        let a = Pick::new(Hero::Gwen, 0.8);
        let b = Pick::new(Hero::Gwen, 0.2);
        assert_approx_eq!(a.blend(&b).unwrap().score(), 0.4);
    }

    #[test]
    fn blend_rejects_different_heroes() {
        let a = Pick::new(Hero::Gwen, 0.8);
        let b = Pick::new(Hero::Idris, 0.2);
        assert_eq!(
            a.blend(&b),
            Err(DraftError::BlendMismatch {
                left: Hero::Gwen,
                right: Hero::Idris
            })
        );
    }

    #[test]
    fn sort_puts_highest_first_and_is_stable() {
        let mut picks = vec![
            Pick::new(Hero::Adagio, 0.4),
            Pick::new(Hero::Alpha, 0.6),
            Pick::new(Hero::Ardan, 0.4),
        ];
        sort_desc(&mut picks);
        let heroes: Vec<_> = picks.iter().map(Pick::hero).collect();
        assert_eq!(heroes, vec![Hero::Alpha, Hero::Adagio, Hero::Ardan]);
    }

    #[test]
    fn blend_rankings_merges_and_resorts() {
        let lists = vec![
            vec![Pick::new(Hero::Phinn, 0.9), Pick::new(Hero::Reim, 0.4)],
            vec![Pick::new(Hero::Reim, 0.9), Pick::new(Hero::Phinn, 0.1)],
        ];
        let merged = blend_rankings(&lists).unwrap();
        assert_eq!(merged[0].hero(), Hero::Reim);
        assert_approx_eq!(merged[0].score(), 0.6);
        assert_approx_eq!(merged[1].score(), 0.3);
    }
}
