// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Events sent by a table to its observer.
use cardroom_core::{
    action::{LegalActions, PlayerAction},
    poker::{Card, Chips, PlayerCards},
    round::{Payout, RevealedHand, Street},
};

/// A table event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// A new hand started and the blinds have been posted.
    HandStarted {
        /// The hand number starting from 1.
        hand: u64,
        /// The dealer button seat.
        dealer: usize,
        /// The players stacks after the blinds.
        stacks: Vec<Chips>,
    },
    /// A player has been dealt the hole cards, covered for bots.
    CardsDealt {
        /// The player seat.
        seat: usize,
        /// The player cards.
        cards: PlayerCards,
    },
    /// A player has to act.
    BettingTurn {
        /// The player seat.
        seat: usize,
        /// The actions the player can take.
        legal: LegalActions,
        /// The chips the player has to pay to call.
        amount_to_call: Chips,
    },
    /// A player action has been applied.
    ActionTaken {
        /// The player seat.
        seat: usize,
        /// The recorded action.
        action: PlayerAction,
        /// The player street bet after the action.
        bet: Chips,
        /// The player chips after the action.
        chips: Chips,
        /// The pot after the action.
        pot: Chips,
    },
    /// The board cards for a new street have been dealt.
    StreetAdvanced {
        /// The new street.
        street: Street,
        /// The board cards.
        board: Vec<Card>,
    },
    /// The hand is over and the pot has been paid.
    HandResolved {
        /// The seats that won chips.
        winners: Vec<usize>,
        /// The chips won by each winner.
        payouts: Vec<Payout>,
        /// The hands shown at showdown.
        revealed: Vec<RevealedHand>,
    },
    /// A player stack has been topped up between hands.
    PlayerReplenished {
        /// The player seat.
        seat: usize,
        /// The chips added.
        added: Chips,
        /// The player chips after the top up.
        chips: Chips,
    },
}
