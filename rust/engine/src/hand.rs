use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandCategory {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HandCategory::HighCard => "High Card",
            HandCategory::Pair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        })
    }
}

/// Category plus tie-break ranks, most significant first.
///
/// Field order matters: the derived `Ord` compares the category, then the
/// tie-break vectors lexicographically, which is exactly poker ordering.
/// Two scores are equal only when both parts match.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandScore {
    pub category: HandCategory,
    pub tiebreak: Vec<u8>,
}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category, self.tiebreak)
    }
}

/// Scores exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> HandScore {
    // counts indexed by rank value, 2..=14 used
    let mut rank_counts = [0u8; 15];
    for c in cards.iter() {
        rank_counts[c.rank.value() as usize] += 1;
    }

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = straight_high(&rank_counts);
    let groups = rank_groups(&rank_counts);

    if let (Some(high), true) = (straight, is_flush) {
        // a straight whose low card is 10 tops out at the Ace
        return if high == 14 {
            score(HandCategory::RoyalFlush, vec![14])
        } else {
            score(HandCategory::StraightFlush, vec![high])
        };
    }

    let shape = (groups[0].0, groups.get(1).map_or(0, |g| g.0));
    let by_groups = || groups.iter().map(|&(_, r)| r).collect::<Vec<u8>>();

    match shape {
        (4, _) => score(HandCategory::FourOfAKind, by_groups()),
        (3, 2) => score(HandCategory::FullHouse, by_groups()),
        _ if is_flush => score(HandCategory::Flush, ranks_descending(cards)),
        _ if straight.is_some() => {
            score(HandCategory::Straight, straight.into_iter().collect())
        }
        (3, _) => score(HandCategory::ThreeOfAKind, by_groups()),
        (2, 2) => score(HandCategory::TwoPair, by_groups()),
        (2, _) => score(HandCategory::Pair, by_groups()),
        _ => score(HandCategory::HighCard, ranks_descending(cards)),
    }
}

pub fn compare_hands(a: &HandScore, b: &HandScore) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.tiebreak.cmp(&b.tiebreak),
        ord => ord,
    }
}

fn score(category: HandCategory, tiebreak: Vec<u8>) -> HandScore {
    HandScore { category, tiebreak }
}

/// (count, rank) pairs ordered by count, then rank, both descending.
/// Walking the table from the Ace down and sorting stably keeps kicker
/// order deterministic when counts tie.
fn rank_groups(rank_counts: &[u8; 15]) -> Vec<(u8, u8)> {
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_by(|a, b| b.0.cmp(&a.0));
    groups
}

fn ranks_descending(cards: &[Card; 5]) -> Vec<u8> {
    let mut ranks: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    ranks
}

/// High card of the straight, if the five ranks form one. The wheel
/// (A-2-3-4-5) is 5-high.
fn straight_high(rank_counts: &[u8; 15]) -> Option<u8> {
    let distinct: Vec<u8> = (2..=14u8)
        .filter(|&r| rank_counts[r as usize] > 0)
        .collect();
    if distinct.len() != 5 {
        return None;
    }
    let (low, high) = (distinct[0], distinct[4]);
    if high - low == 4 {
        Some(high)
    } else if distinct == [2, 3, 4, 5, 14] {
        Some(5)
    } else {
        None
    }
}
