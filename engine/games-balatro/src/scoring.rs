//! Poker-hand scoring for a single play.
//!
//! Categories are tested from strongest to weakest and the first match wins.
//! Kickers (cards outside the made hand) add one point each.

use std::fmt;

use crate::card::Card;

const KICKER: u32 = 1;

/// Hand categories, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandRank {
    RoyalFlush,
    StraightFlush,
    FourOfAKind,
    FullHouse,
    Flush,
    Straight,
    ThreeOfAKind,
    TwoPair,
    Pair,
    HighCard,
}

impl HandRank {
    /// Points for the made hand before kickers
    pub fn base_score(self) -> u32 {
        match self {
            HandRank::RoyalFlush => 800,
            HandRank::StraightFlush => 500,
            HandRank::FourOfAKind => 300,
            HandRank::FullHouse => 150,
            HandRank::Flush => 85,
            HandRank::Straight => 55,
            HandRank::ThreeOfAKind => 35,
            HandRank::TwoPair => 20,
            HandRank::Pair => 5,
            HandRank::HighCard => 0,
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandRank::RoyalFlush => "Royal Flush",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::FullHouse => "Full House",
            HandRank::Flush => "Flush",
            HandRank::Straight => "Straight",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::TwoPair => "Two Pair",
            HandRank::Pair => "Pair",
            HandRank::HighCard => "High Card",
        };
        f.write_str(name)
    }
}

/// Category and points for one play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandScore {
    pub rank: HandRank,
    pub points: u32,
}

/// Score a played set of cards. An empty play scores nothing.
pub fn score_hand(cards: &[Card]) -> HandScore {
    let n = cards.len() as u32;
    if cards.is_empty() {
        return HandScore {
            rank: HandRank::HighCard,
            points: 0,
        };
    }

    let groups = rank_groups(cards);
    let has_group = |size: u32| groups.iter().any(|&g| g == size);
    let outside = |size: u32| -> u32 { groups.iter().filter(|&&g| g != size).sum() };
    let same_suit = is_same_suit(cards);
    let sequential = is_sequential(cards);

    let (rank, kickers) = if n >= 5 && same_suit && is_royal(cards) {
        (HandRank::RoyalFlush, 0)
    } else if n >= 5 && sequential && same_suit {
        (HandRank::StraightFlush, 0)
    } else if has_group(4) {
        (HandRank::FourOfAKind, n - 4)
    } else if groups.len() == 2 && n == 5 && has_group(2) && has_group(3) {
        (HandRank::FullHouse, 0)
    } else if n > 4 && same_suit {
        (HandRank::Flush, n)
    } else if n >= 5 && sequential {
        (HandRank::Straight, n)
    } else if has_group(3) {
        (HandRank::ThreeOfAKind, outside(3))
    } else if groups.iter().filter(|&&g| g == 2).count() >= 2 {
        (HandRank::TwoPair, outside(2))
    } else if has_group(2) {
        (HandRank::Pair, outside(2))
    } else {
        (HandRank::HighCard, n)
    };

    HandScore {
        rank,
        points: rank.base_score() + kickers * KICKER,
    }
}

/// Sizes of the same-rank groups (non-empty only).
fn rank_groups(cards: &[Card]) -> Vec<u32> {
    let mut counts = [0u32; 14];
    for card in cards {
        counts[card.rank() as usize] += 1;
    }
    counts.into_iter().filter(|&c| c > 0).collect()
}

/// At least three cards, all of one suit.
fn is_same_suit(cards: &[Card]) -> bool {
    if cards.len() < 3 {
        return false;
    }
    let suit = cards[0].suit();
    cards.iter().all(|c| c.suit() == suit)
}

fn is_royal(cards: &[Card]) -> bool {
    [1, 10, 11, 12, 13]
        .iter()
        .all(|&r| cards.iter().any(|c| c.rank() == r))
}

/// Five or more distinct ranks in a run; the ace may sit below the two or above the king.
fn is_sequential(cards: &[Card]) -> bool {
    if cards.len() < 5 {
        return false;
    }
    let mut ranks: Vec<u8> = cards.iter().map(Card::rank).collect();
    ranks.sort_unstable();
    ranks.dedup();

    if ranks.contains(&1) {
        let mut ace_high: Vec<u8> = ranks.iter().copied().filter(|&r| r != 1).collect();
        ace_high.push(14);
        is_consecutive(&ranks) || is_consecutive(&ace_high)
    } else {
        is_consecutive(&ranks)
    }
}

fn is_consecutive(sorted_distinct: &[u8]) -> bool {
    sorted_distinct.len() >= 5 && sorted_distinct.windows(2).all(|w| w[1] == w[0] + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit::{self, Clubs, Diamonds, Hearts, Spades};

    fn hand(cards: &[(u8, Suit)]) -> Vec<Card> {
        cards.iter().map(|&(r, s)| Card::new(r, s)).collect()
    }

    fn check(cards: &[(u8, Suit)], rank: HandRank, points: u32) {
        let score = score_hand(&hand(cards));
        assert_eq!(score.rank, rank, "cards {:?}", cards);
        assert_eq!(score.points, points, "cards {:?}", cards);
    }

    #[test]
    fn test_royal_flush() {
        check(
            &[(1, Spades), (10, Spades), (11, Spades), (12, Spades), (13, Spades)],
            HandRank::RoyalFlush,
            800,
        );
    }

    #[test]
    fn test_straight_flush() {
        check(
            &[(5, Hearts), (6, Hearts), (7, Hearts), (8, Hearts), (9, Hearts)],
            HandRank::StraightFlush,
            500,
        );
        // Wheel with the ace low
        check(
            &[(1, Clubs), (2, Clubs), (3, Clubs), (4, Clubs), (5, Clubs)],
            HandRank::StraightFlush,
            500,
        );
    }

    #[test]
    fn test_four_of_a_kind() {
        check(
            &[(7, Clubs), (7, Diamonds), (7, Hearts), (7, Spades)],
            HandRank::FourOfAKind,
            300,
        );
        check(
            &[(7, Clubs), (7, Diamonds), (7, Hearts), (7, Spades), (2, Clubs)],
            HandRank::FourOfAKind,
            301,
        );
    }

    #[test]
    fn test_full_house() {
        check(
            &[(3, Clubs), (3, Hearts), (3, Spades), (9, Clubs), (9, Hearts)],
            HandRank::FullHouse,
            150,
        );
    }

    #[test]
    fn test_flush() {
        check(
            &[(2, Diamonds), (5, Diamonds), (9, Diamonds), (11, Diamonds), (13, Diamonds)],
            HandRank::Flush,
            90,
        );
        // Three suited cards are not a flush
        check(&[(2, Diamonds), (5, Diamonds), (9, Diamonds)], HandRank::HighCard, 3);
    }

    #[test]
    fn test_straight() {
        check(
            &[(9, Clubs), (10, Hearts), (11, Spades), (12, Clubs), (13, Diamonds)],
            HandRank::Straight,
            60,
        );
        // Ace high
        check(
            &[(10, Clubs), (11, Hearts), (12, Spades), (13, Clubs), (1, Diamonds)],
            HandRank::Straight,
            60,
        );
        // No wrap-around
        check(
            &[(11, Clubs), (12, Hearts), (13, Spades), (1, Clubs), (2, Diamonds)],
            HandRank::HighCard,
            5,
        );
    }

    #[test]
    fn test_three_of_a_kind() {
        check(&[(4, Clubs), (4, Hearts), (4, Spades)], HandRank::ThreeOfAKind, 35);
        check(
            &[(4, Clubs), (4, Hearts), (4, Spades), (8, Clubs), (12, Hearts)],
            HandRank::ThreeOfAKind,
            37,
        );
    }

    #[test]
    fn test_two_pair() {
        check(
            &[(4, Clubs), (4, Hearts), (8, Spades), (8, Clubs)],
            HandRank::TwoPair,
            20,
        );
        check(
            &[(4, Clubs), (4, Hearts), (8, Spades), (8, Clubs), (1, Hearts)],
            HandRank::TwoPair,
            21,
        );
    }

    #[test]
    fn test_pair_and_high_card() {
        check(&[(6, Clubs), (6, Hearts)], HandRank::Pair, 5);
        check(&[(6, Clubs), (6, Hearts), (2, Spades)], HandRank::Pair, 6);
        check(&[(13, Clubs)], HandRank::HighCard, 1);
        check(&[(13, Clubs), (2, Hearts)], HandRank::HighCard, 2);
    }

    #[test]
    fn test_empty_play() {
        assert_eq!(score_hand(&[]).points, 0);
    }
}
