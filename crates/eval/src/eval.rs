// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! [HandValue::eval5] ranks exactly five cards, [HandValue::eval] takes 5 to 7
//! cards and returns the best five cards hand. The returned value keeps the
//! five cards that make the hand, useful for UIs to show a winning hand.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use cardroom_cards::Card;

/// The category of a poker hand, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// No combination.
    HighCard,
    /// Two cards of the same rank.
    OnePair,
    /// Two different pairs.
    TwoPair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Five consecutive ranks.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four cards of the same rank.
    FourOfAKind,
    /// A straight in a single suit.
    StraightFlush,
    /// Ace high straight flush.
    RoyalFlush,
}

impl HandRank {
    /// The number of hand categories.
    pub const COUNT: usize = 10;

    /// The category position, from 0 for a high card to 9 for a royal flush.
    pub fn ordinal(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        };

        write!(f, "{label}")
    }
}

/// The value of a five cards hand.
///
/// Values are ordered by category, then by the category value (the quads
/// rank for four of a kind, the high pair for two pair, the straight high card
/// for straights, ...) and then by the kickers in order. The cards are not
/// part of the comparison so two hands with the same value are a tie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandValue {
    rank: HandRank,
    value: u8,
    kickers: Vec<u8>,
    hand: [Card; 5],
}

impl HandValue {
    /// Evaluates a 5, 6 or 7 cards hand and returns the best five cards value.
    ///
    /// Panics if the number of cards is not 5 <= n <= 7.
    pub fn eval(cards: &[Card]) -> HandValue {
        let n = cards.len();
        assert!((5..=7).contains(&n), "5 <= cards <= 7, got {n}");

        let mut best = Self::eval5(&[cards[0], cards[1], cards[2], cards[3], cards[4]]);

        for c1 in 0..n {
            for c2 in (c1 + 1)..n {
                for c3 in (c2 + 1)..n {
                    for c4 in (c3 + 1)..n {
                        for c5 in (c4 + 1)..n {
                            let hand = [cards[c1], cards[c2], cards[c3], cards[c4], cards[c5]];
                            let hv = Self::eval5(&hand);
                            if hv > best {
                                best = hv;
                            }
                        }
                    }
                }
            }
        }

        best
    }

    /// Evaluates exactly five cards.
    pub fn eval5(cards: &[Card; 5]) -> HandValue {
        let mut hand = *cards;
        hand.sort_by_key(|c| std::cmp::Reverse(c.value()));

        let values = hand.map(|c| c.value());

        // (count, value) pairs sorted by count and then value, highest first.
        let mut groups: Vec<(u8, u8)> = Vec::with_capacity(5);
        for v in values {
            match groups.iter_mut().find(|g| g.1 == v) {
                Some(g) => g.0 += 1,
                None => groups.push((1, v)),
            }
        }
        groups.sort_by(|a, b| b.cmp(a));

        let is_flush = hand.iter().all(|c| c.suit() == hand[0].suit());
        let straight_high = if groups.len() < 5 {
            None
        } else if values[0] - values[4] == 4 {
            Some(values[0])
        } else if values == [14, 5, 4, 3, 2] {
            // The wheel, ace plays low.
            Some(5)
        } else {
            None
        };

        let group = |idx: usize| groups[idx].1;
        let (rank, value, kickers) = match (straight_high, is_flush) {
            (Some(14), true) => (HandRank::RoyalFlush, 14, vec![]),
            (Some(high), true) => (HandRank::StraightFlush, high, vec![]),
            _ if groups[0].0 == 4 => (HandRank::FourOfAKind, group(0), vec![group(1)]),
            _ if groups[0].0 == 3 && groups[1].0 == 2 => {
                (HandRank::FullHouse, group(0), vec![group(1)])
            }
            (_, true) => (HandRank::Flush, values[0], values[1..].to_vec()),
            (Some(high), false) => (HandRank::Straight, high, vec![]),
            _ if groups[0].0 == 3 => (HandRank::ThreeOfAKind, group(0), vec![group(1), group(2)]),
            _ if groups[0].0 == 2 && groups[1].0 == 2 => {
                (HandRank::TwoPair, group(0), vec![group(1), group(2)])
            }
            _ if groups[0].0 == 2 => (
                HandRank::OnePair,
                group(0),
                vec![group(1), group(2), group(3)],
            ),
            _ => (HandRank::HighCard, values[0], values[1..].to_vec()),
        };

        HandValue {
            rank,
            value,
            kickers,
            hand,
        }
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The category primary value (2..=14).
    pub fn value(&self) -> u8 {
        self.value
    }

    /// The tie break values after the primary value.
    pub fn kickers(&self) -> &[u8] {
        &self.kickers
    }

    /// The five cards that make this hand, highest value first.
    pub fn hand(&self) -> &[Card; 5] {
        &self.hand
    }
}

impl PartialEq for HandValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HandValue {}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then(self.value.cmp(&other.value))
            .then_with(|| self.kickers.cmp(&other.kickers))
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.rank)?;
        for (idx, card) in self.hand.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashMap;
    use cardroom_cards::Deck;

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    fn eval(s: &str) -> HandValue {
        HandValue::eval(&cards(s))
    }

    #[test]
    fn royal_flush() {
        let hv = eval("AS KS QS JS TS");
        assert_eq!(hv.rank(), HandRank::RoyalFlush);
        assert_eq!(hv.value(), 14);
        assert!(hv.kickers().is_empty());
    }

    #[test]
    fn full_house_value_and_kicker() {
        let hv = eval("2C 2D 2H 5S 5C");
        assert_eq!(hv.rank(), HandRank::FullHouse);
        assert_eq!(hv.value(), 2);
        assert_eq!(hv.kickers(), &[5]);
    }

    #[test]
    fn seven_cards_picks_best_subset() {
        let hv = eval("7H 7D 3C 3S 9C 9D KC");
        assert_eq!(hv.rank(), HandRank::TwoPair);
        assert_eq!(hv.value(), 9);
        assert_eq!(hv.kickers(), &[7, 13]);

        let mut best = hv.hand().map(|c| c.to_string()).to_vec();
        best.sort();
        assert_eq!(best, vec!["7D", "7H", "9C", "9D", "KC"]);
    }

    #[test]
    fn wheel_straight() {
        let hv = eval("AD 2C 3H 4S 5D");
        assert_eq!(hv.rank(), HandRank::Straight);
        assert_eq!(hv.value(), 5);

        // Six high straight beats the wheel.
        assert!(eval("2C 3H 4S 5D 6C") > hv);

        let hv = eval("AH 2H 3H 4H 5H");
        assert_eq!(hv.rank(), HandRank::StraightFlush);
        assert_eq!(hv.value(), 5);
    }

    #[test]
    fn no_wrap_around_straight() {
        let hv = eval("QD KC AH 2S 3D");
        assert_eq!(hv.rank(), HandRank::HighCard);
        assert_eq!(hv.value(), 14);
        assert_eq!(hv.kickers(), &[13, 12, 3, 2]);
    }

    #[test]
    fn categories_values_and_kickers() {
        let hv = eval("9H 9D 9C 9S 4D");
        assert_eq!(
            (hv.rank(), hv.value(), hv.kickers()),
            (HandRank::FourOfAKind, 9, &[4][..])
        );

        let hv = eval("KH 9H 7H 4H 2H");
        assert_eq!(
            (hv.rank(), hv.value(), hv.kickers()),
            (HandRank::Flush, 13, &[9, 7, 4, 2][..])
        );

        let hv = eval("8C 8D 8H KS 3C");
        assert_eq!(
            (hv.rank(), hv.value(), hv.kickers()),
            (HandRank::ThreeOfAKind, 8, &[13, 3][..])
        );

        let hv = eval("JC JD 4H 9S 2C");
        assert_eq!(
            (hv.rank(), hv.value(), hv.kickers()),
            (HandRank::OnePair, 11, &[9, 4, 2][..])
        );

        let hv = eval("9H TD JC QS KD");
        assert_eq!(
            (hv.rank(), hv.value(), hv.kickers()),
            (HandRank::Straight, 13, &[][..])
        );
    }

    #[test]
    fn kickers_break_ties() {
        assert!(eval("AH AD KC 7S 3D") > eval("AC AS QC JS TD"));
        assert!(eval("KH KD 5C 5S AD") > eval("KC KS 5H 5D QD"));
        assert!(eval("QH QD QC 2S 2D") < eval("KC KS KH 2H 2C"));

        // Same values with different suits is a tie.
        let h1 = eval("AH KD 9C 7S 3D");
        let h2 = eval("AC KS 9D 7H 3C");
        assert_eq!(h1, h2);
        assert_eq!(h1.cmp(&h2), Ordering::Equal);
    }

    #[test]
    fn board_plays_for_both() {
        let board = "AS KS QS JS TS";
        let h1 = eval(&format!("{board} 2C 3D"));
        let h2 = eval(&format!("{board} 9H 9D"));
        assert_eq!(h1, h2);
        assert_eq!(h1.rank(), HandRank::RoyalFlush);
    }

    #[test]
    fn six_cards_hand() {
        let hv = eval("2H 3H 4H 5H 9H 6H");
        assert_eq!(hv.rank(), HandRank::StraightFlush);
        assert_eq!(hv.value(), 6);
    }

    #[test]
    fn total_order() {
        let hands = [
            "AS KS QS JS TS",
            "9C TC JC QC KC",
            "AH 2H 3H 4H 5H",
            "9H 9D 9C 9S 4D",
            "9H 9D 9C 9S 2D",
            "2C 2D 2H 5S 5C",
            "KH 9H 7H 4H 2H",
            "KD 9D 7D 4D 2D",
            "AD 2C 3H 4S 5D",
            "8C 8D 8H KS 3C",
            "7H 7D 9C 9D KC",
            "7H 7D 9C 9D QC",
            "JC JD 4H 9S 2C",
            "AH KD 9C 7S 3D",
            "AC KS 9D 7H 2C",
        ]
        .map(eval);

        for a in &hands {
            for b in &hands {
                let outcomes = [a > b, a < b, a == b];
                assert_eq!(outcomes.iter().filter(|o| **o).count(), 1);

                for c in &hands {
                    if a > b && b > c {
                        assert!(a > c);
                    }
                    if a == b && b == c {
                        assert!(a == c);
                    }
                }
            }
        }

        // The list is sorted from strongest to weakest.
        for pair in hands.windows(2) {
            assert!(pair[0] >= pair[1], "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn all_five_cards_hands() {
        let deck = Deck::default().into_iter().collect::<Vec<_>>();
        let n = deck.len();

        let mut counts = AHashMap::new();
        for c1 in 0..n {
            for c2 in (c1 + 1)..n {
                for c3 in (c2 + 1)..n {
                    for c4 in (c3 + 1)..n {
                        for c5 in (c4 + 1)..n {
                            let hand = [deck[c1], deck[c2], deck[c3], deck[c4], deck[c5]];
                            *counts.entry(HandValue::eval5(&hand).rank()).or_insert(0) += 1;
                        }
                    }
                }
            }
        }

        assert_eq!(counts[&HandRank::RoyalFlush], 4);
        assert_eq!(counts[&HandRank::StraightFlush], 36);
        assert_eq!(counts[&HandRank::FourOfAKind], 624);
        assert_eq!(counts[&HandRank::FullHouse], 3_744);
        assert_eq!(counts[&HandRank::Flush], 5_108);
        assert_eq!(counts[&HandRank::Straight], 10_200);
        assert_eq!(counts[&HandRank::ThreeOfAKind], 54_912);
        assert_eq!(counts[&HandRank::TwoPair], 123_552);
        assert_eq!(counts[&HandRank::OnePair], 1_098_240);
        assert_eq!(counts[&HandRank::HighCard], 1_302_540);
    }

    #[test]
    #[should_panic]
    fn too_few_cards() {
        HandValue::eval(&cards("AS KS QS JS"));
    }
}
