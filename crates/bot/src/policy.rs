// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Heuristic decision policy.
use rand::Rng;

use cardroom_core::{
    action::Action,
    poker::{Card, Chips, HandRank, HandValue, PlayerCards},
    round::RoundState,
};

/// What a bot sees of the table when it is its turn to act.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotView {
    /// The bot hole cards.
    pub hole_cards: (Card, Card),
    /// The board cards.
    pub board: Vec<Card>,
    /// The chips the bot has to pay to call.
    pub amount_to_call: Chips,
    /// The chips committed in this hand.
    pub pot: Chips,
    /// The bot chips.
    pub chips: Chips,
    /// The highest street bet.
    pub current_bet: Chips,
    /// The bot street bet.
    pub street_bet: Chips,
    /// The minimum raise increment.
    pub min_raise: Chips,
    /// The big blind amount.
    pub big_blind: Chips,
}

impl BotView {
    /// Builds the view of a seat, `None` if the seat has no cards.
    pub fn from_round(round: &RoundState, seat: usize) -> Option<Self> {
        let player = round.player(seat)?;
        let PlayerCards::Cards(c1, c2) = player.hole_cards else {
            return None;
        };

        let betting = round.betting();
        Some(Self {
            hole_cards: (c1, c2),
            board: round.board().to_vec(),
            amount_to_call: round.amount_to_call(seat),
            pot: round.pot(),
            chips: player.chips,
            current_bet: betting.current_bet,
            street_bet: player.street_bet,
            min_raise: betting.min_raise,
            big_blind: round.big_blind(),
        })
    }

    /// The largest street bet the bot can make.
    fn all_in(&self) -> Chips {
        self.street_bet + self.chips
    }

    fn can_raise(&self) -> bool {
        self.all_in() > self.current_bet
    }
}

/// Tuning knobs for the heuristic policy, probabilities are in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotConfig {
    /// Probability of underrating the hand on a decision.
    pub weaken_probability: f64,
    /// Strength multiplier applied when underrating.
    pub weaken_factor: f64,
    /// Minimum strength for a raise.
    pub raise_threshold: f64,
    /// Probability of betting a strong hand when there is nothing to call.
    pub raise_probability: f64,
    /// Edge over the pot odds needed to raise.
    pub raise_margin: f64,
    /// Edge over the pot odds needed to call.
    pub call_margin: f64,
    /// Probability of calling with a thin edge over the pot odds.
    pub marginal_call_probability: f64,
    /// Probability of calling without an edge.
    pub bluff_call_probability: f64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            weaken_probability: 0.1,
            weaken_factor: 0.7,
            raise_threshold: 0.7,
            raise_probability: 0.6,
            raise_margin: 0.2,
            call_margin: 0.05,
            marginal_call_probability: 0.5,
            bluff_call_probability: 0.05,
        }
    }
}

/// Scores two hole cards in `[0, 1]`.
pub fn preflop_strength(c1: Card, c2: Card) -> f64 {
    let (hi, lo) = if c1.value() >= c2.value() {
        (c1.value(), c2.value())
    } else {
        (c2.value(), c1.value())
    };

    let strength = if hi == lo {
        // Deuces 0.5 up to aces 0.9, plus a bonus for premium pairs.
        let mut s = 0.5 + f64::from(hi - 2) / 12.0 * 0.4;
        if hi >= 11 {
            s += 0.1;
        }
        s
    } else {
        // Seven-deuce 0, ace-king 0.55.
        let mut s = (f64::from(hi + lo) - 9.0) / 18.0 * 0.55;
        if c1.suit() == c2.suit() {
            s += 0.08;
        }

        match hi - lo {
            1 => s += 0.06,
            2 => s += 0.03,
            _ => {}
        }

        if lo >= 10 {
            s += 0.1;
        }
        s
    };

    strength.clamp(0.0, 1.0)
}

/// Scores the made hand category in `[0, 1]`.
pub fn postflop_strength(hole_cards: (Card, Card), board: &[Card]) -> f64 {
    let mut cards = Vec::with_capacity(7);
    cards.extend([hole_cards.0, hole_cards.1]);
    cards.extend_from_slice(board);

    let value = HandValue::eval(&cards);
    value.rank().ordinal() as f64 / (HandRank::COUNT - 1) as f64
}

/// The bot hand strength for the current street.
pub fn hand_strength(view: &BotView) -> f64 {
    if view.board.len() < 3 {
        preflop_strength(view.hole_cards.0, view.hole_cards.1)
    } else {
        postflop_strength(view.hole_cards, &view.board)
    }
}

/// The raise target: the current bet plus half the pot or a min raise,
/// capped at the bot stack.
pub fn raise_target(view: &BotView) -> Chips {
    let increment = view.min_raise.max(view.pot / 2).max(view.big_blind);
    (view.current_bet + increment).min(view.all_in())
}

/// Picks an action for the bot.
pub fn decide<R: Rng>(view: &BotView, config: &BotConfig, rng: &mut R) -> Action {
    let mut strength = hand_strength(view);
    if rng.random::<f64>() < config.weaken_probability {
        strength *= config.weaken_factor;
    }

    let strong = strength >= config.raise_threshold && view.can_raise();

    if view.amount_to_call == Chips::ZERO {
        if strong && rng.random::<f64>() < config.raise_probability {
            return Action::Raise(raise_target(view));
        }

        return Action::Check;
    }

    let to_call = f64::from(view.amount_to_call.amount());
    let odds = to_call / (f64::from(view.pot.amount()) + to_call);

    if strong && strength >= odds + config.raise_margin {
        Action::Raise(raise_target(view))
    } else if strength >= odds + config.call_margin {
        Action::Call
    } else if strength >= odds && rng.random::<f64>() < config.marginal_call_probability {
        Action::Call
    } else if rng.random::<f64>() < config.bluff_call_probability {
        Action::Call
    } else {
        Action::Fold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(card).collect()
    }

    fn view(hole: &str, board: &str, to_call: u32, pot: u32) -> BotView {
        let hole = cards(hole);
        BotView {
            hole_cards: (hole[0], hole[1]),
            board: cards(board),
            amount_to_call: Chips::new(to_call),
            pot: Chips::new(pot),
            chips: Chips::new(200),
            current_bet: Chips::new(to_call),
            street_bet: Chips::ZERO,
            min_raise: Chips::new(2),
            big_blind: Chips::new(2),
        }
    }

    /// A policy without randomness.
    fn fixed() -> BotConfig {
        BotConfig {
            weaken_probability: 0.0,
            raise_probability: 1.0,
            marginal_call_probability: 0.0,
            bluff_call_probability: 0.0,
            ..BotConfig::default()
        }
    }

    #[test]
    fn preflop_ranking() {
        let aa = preflop_strength(card("AS"), card("AH"));
        let kk = preflop_strength(card("KS"), card("KH"));
        let twos = preflop_strength(card("2S"), card("2H"));
        let aks = preflop_strength(card("AS"), card("KS"));
        let ako = preflop_strength(card("AS"), card("KD"));
        let seven_two = preflop_strength(card("7S"), card("2D"));

        assert_eq!(aa, 1.0);
        assert!(aa > kk && kk > aks);
        assert!(aks > ako);
        assert!(ako > twos && twos > seven_two);
        assert_eq!(seven_two, 0.0);

        for c1 in cards("2C 5D 9H JS AC") {
            for c2 in cards("3H 6C TD QS AD") {
                let s = preflop_strength(c1, c2);
                assert!((0.0..=1.0).contains(&s));
                assert_eq!(s, preflop_strength(c2, c1));
            }
        }
    }

    #[test]
    fn postflop_uses_category() {
        let royal = postflop_strength((card("AS"), card("KS")), &cards("QS JS TS"));
        assert_eq!(royal, 1.0);

        let nothing = postflop_strength((card("2S"), card("7D")), &cards("9H JC KD"));
        assert_eq!(nothing, 0.0);

        let pair = postflop_strength((card("2S"), card("2D")), &cards("9H JC KD 4S"));
        assert_eq!(pair, 1.0 / 9.0);
    }

    #[test]
    fn strong_hand_bets_when_checked_to() {
        let mut rng = StdRng::seed_from_u64(1);
        let v = view("AS AH", "", 0, 12);
        assert_eq!(
            decide(&v, &fixed(), &mut rng),
            Action::Raise(Chips::new(6))
        );

        let passive = BotConfig {
            raise_probability: 0.0,
            ..fixed()
        };
        assert_eq!(decide(&v, &passive, &mut rng), Action::Check);
    }

    #[test]
    fn weak_hand_checks_or_folds() {
        let mut rng = StdRng::seed_from_u64(2);
        let config = fixed();

        let v = view("7S 2D", "", 0, 4);
        assert_eq!(decide(&v, &config, &mut rng), Action::Check);

        let v = view("7S 2D", "", 50, 60);
        assert_eq!(decide(&v, &config, &mut rng), Action::Fold);

        let bluff = BotConfig {
            bluff_call_probability: 1.0,
            ..config
        };
        assert_eq!(decide(&v, &bluff, &mut rng), Action::Call);
    }

    #[test]
    fn calls_with_good_odds() {
        let mut rng = StdRng::seed_from_u64(3);

        // A pair of sevens against a small bet: odds 2 / 22.
        let v = view("7S 7D", "", 2, 20);
        assert_eq!(decide(&v, &fixed(), &mut rng), Action::Call);
    }

    #[test]
    fn marginal_edge_calls_by_probability() {
        let mut rng = StdRng::seed_from_u64(4);

        // Pair strength 1/9 against odds 10 / 100.
        let v = view("2S 2D", "9H JC KD", 10, 90);
        assert_eq!(decide(&v, &fixed(), &mut rng), Action::Fold);

        let config = BotConfig {
            marginal_call_probability: 1.0,
            ..fixed()
        };
        assert_eq!(decide(&v, &config, &mut rng), Action::Call);
    }

    #[test]
    fn raise_is_capped_all_in() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut v = view("AS AH", "", 10, 100);
        v.chips = Chips::new(30);
        assert_eq!(
            decide(&v, &fixed(), &mut rng),
            Action::Raise(Chips::new(30))
        );

        // Cannot raise with chips only for a call.
        v.chips = Chips::new(8);
        assert_eq!(decide(&v, &fixed(), &mut rng), Action::Call);
    }

    #[test]
    fn weakened_hand_plays_passive() {
        let mut rng = StdRng::seed_from_u64(6);
        let config = BotConfig {
            weaken_probability: 1.0,
            weaken_factor: 0.0,
            ..fixed()
        };

        assert_eq!(
            decide(&view("AS AH", "", 0, 4), &config, &mut rng),
            Action::Check
        );
        assert_eq!(
            decide(&view("AS AH", "", 20, 30), &config, &mut rng),
            Action::Fold
        );
    }

    #[test]
    fn seeded_decisions_repeat() {
        let config = BotConfig::default();
        let views = [
            view("AS KD", "", 2, 3),
            view("9C 9D", "2H 9S KD", 10, 40),
            view("4C 8D", "2H 9S KD QC", 30, 40),
        ];

        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut actions = Vec::new();
            for _ in 0..50 {
                for v in &views {
                    actions.push(decide(v, &config, &mut rng));
                }
            }
            actions
        };

        assert_eq!(run(7), run(7));
    }
}
