// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cardroom bots.
//!
//! A bot is a [Strategy] the table drives when it is the bot's turn to act,
//! [HeuristicBot] plays the hand strength against the pot odds with some
//! randomness:
//!
//! ```
//! # use cardroom_bot::{BotConfig, BotView, HeuristicBot, Strategy};
//! # use cardroom_core::{action::Action, poker::Chips};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut bot = HeuristicBot::new(StdRng::seed_from_u64(1), BotConfig::default());
//! let view = BotView {
//!     hole_cards: ("7S".parse().unwrap(), "2D".parse().unwrap()),
//!     board: Vec::new(),
//!     amount_to_call: Chips::ZERO,
//!     pot: Chips::new(4),
//!     chips: Chips::new(200),
//!     current_bet: Chips::new(2),
//!     street_bet: Chips::new(2),
//!     min_raise: Chips::new(2),
//!     big_blind: Chips::new(2),
//! };
//!
//! assert_eq!(bot.decide(&view), Action::Check);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use log::debug;
use rand::Rng;

use cardroom_core::action::Action;

mod policy;
pub use policy::{
    BotConfig, BotView, decide, hand_strength, postflop_strength, preflop_strength, raise_target,
};

/// A Poker bot strategy.
pub trait Strategy: Send + 'static {
    /// Picks an action given what the bot sees of the table.
    fn decide(&mut self, view: &BotView) -> Action;
}

/// A bot that plays the heuristic policy with its own random source.
#[derive(Debug)]
pub struct HeuristicBot<R> {
    rng: R,
    config: BotConfig,
}

impl<R: Rng> HeuristicBot<R> {
    /// Creates a bot with the given random source and policy.
    pub fn new(rng: R, config: BotConfig) -> Self {
        Self { rng, config }
    }
}

impl<R: Rng + Send + 'static> Strategy for HeuristicBot<R> {
    fn decide(&mut self, view: &BotView) -> Action {
        let action = decide(view, &self.config, &mut self.rng);
        debug!(
            "Bot strength {:.2} to call {} action {action}",
            hand_strength(view),
            view.amount_to_call
        );
        action
    }
}
