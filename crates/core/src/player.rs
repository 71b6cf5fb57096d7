// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table player types.
use serde::{Deserialize, Serialize};

use crate::{
    action::PlayerAction,
    poker::{Chips, PlayerCards},
};

/// A table player state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// This player name.
    pub name: String,
    /// This player chips.
    pub chips: Chips,
    /// This player private cards.
    pub hole_cards: PlayerCards,
    /// The chips committed on the current street.
    pub street_bet: Chips,
    /// The chips committed in the current hand.
    pub hand_bet: Chips,
    /// The last player action.
    pub action: PlayerAction,
    /// The player has folded or sits out this hand.
    pub folded: bool,
    /// The player is driven by a bot strategy.
    pub is_bot: bool,
}

impl Player {
    /// Creates a new player.
    pub fn new(name: impl Into<String>, chips: Chips, is_bot: bool) -> Self {
        Self {
            name: name.into(),
            chips,
            hole_cards: PlayerCards::None,
            street_bet: Chips::ZERO,
            hand_bet: Chips::ZERO,
            action: PlayerAction::None,
            folded: false,
            is_bot,
        }
    }

    /// Creates a human player.
    pub fn human(name: impl Into<String>, chips: Chips) -> Self {
        Self::new(name, chips, false)
    }

    /// Creates a bot player.
    pub fn bot(name: impl Into<String>, chips: Chips) -> Self {
        Self::new(name, chips, true)
    }

    /// The player is in the hand and has chips to bet.
    pub fn can_act(&self) -> bool {
        !self.folded && self.chips > Chips::ZERO
    }

    /// The player is in the hand with all its chips committed.
    pub fn is_all_in(&self) -> bool {
        !self.folded && self.chips == Chips::ZERO
    }

    /// Updates this player street bet to the given chips amount and returns the
    /// chips moved from the player stack.
    pub(crate) fn bet(&mut self, action: PlayerAction, chips: Chips) -> Chips {
        // How much to bet considering previous bets.
        let remainder = chips - self.street_bet;

        // Player run out of chips goes all in.
        let paid = remainder.min(self.chips);
        self.street_bet += paid;
        self.hand_bet += paid;
        self.chips -= paid;

        self.action = action;
        paid
    }

    /// Sets this player in fold state.
    pub(crate) fn fold(&mut self) {
        self.folded = true;
        self.action = PlayerAction::Fold;
    }

    /// Reset state for a new hand, a player without chips sits out.
    pub(crate) fn start_hand(&mut self) {
        self.folded = self.chips == Chips::ZERO;
        self.street_bet = Chips::ZERO;
        self.hand_bet = Chips::ZERO;
        self.action = PlayerAction::None;
        self.hole_cards = PlayerCards::None;
    }

    /// Reset state for a new street.
    pub(crate) fn start_street(&mut self) {
        self.street_bet = Chips::ZERO;
        if !self.folded {
            self.action = PlayerAction::None;
        }
    }
}
