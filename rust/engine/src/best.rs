use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::{evaluate_five, HandScore};

/// The strongest five-card hand found among a player's available cards.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BestHand {
    pub cards: [Card; 5],
    pub score: HandScore,
}

/// Best hand from hole cards plus whatever community cards are out.
pub fn best_hand(hole: &[Card], community: &[Card]) -> Result<BestHand, GameError> {
    let mut all = Vec::with_capacity(hole.len() + community.len());
    all.extend_from_slice(hole);
    all.extend_from_slice(community);
    best_of(&all)
}

/// Scores every 5-card subset (21 of them for seven cards) and keeps the
/// maximum. Equal-scoring subsets keep the first one found.
pub fn best_of(cards: &[Card]) -> Result<BestHand, GameError> {
    let mut best: Option<BestHand> = None;
    for idx in FiveSubsets::new(cards.len()) {
        let five = idx.map(|i| cards[i]);
        let score = evaluate_five(&five);
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(BestHand { cards: five, score });
        }
    }
    best.ok_or(GameError::InsufficientCards {
        available: cards.len(),
    })
}

/// Lexicographic walk over all 5-element index sets of `0..n`.
struct FiveSubsets {
    n: usize,
    idx: [usize; 5],
    done: bool,
}

impl FiveSubsets {
    fn new(n: usize) -> Self {
        Self {
            n,
            idx: [0, 1, 2, 3, 4],
            done: n < 5,
        }
    }
}

impl Iterator for FiveSubsets {
    type Item = [usize; 5];

    fn next(&mut self) -> Option<[usize; 5]> {
        if self.done {
            return None;
        }
        let current = self.idx;
        // rightmost slot that can still move right
        match (0..5).rev().find(|&i| self.idx[i] < self.n - 5 + i) {
            Some(i) => {
                self.idx[i] += 1;
                for j in i + 1..5 {
                    self.idx[j] = self.idx[j - 1] + 1;
                }
            }
            None => self.done = true,
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsets_of_seven_are_twenty_one() {
        assert_eq!(FiveSubsets::new(7).count(), 21);
    }

    #[test]
    fn subsets_of_five_is_one() {
        let all: Vec<_> = FiveSubsets::new(5).collect();
        assert_eq!(all, vec![[0, 1, 2, 3, 4]]);
    }

    #[test]
    fn fewer_than_five_yields_nothing() {
        assert_eq!(FiveSubsets::new(4).count(), 0);
    }
}
