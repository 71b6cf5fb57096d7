// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Player actions.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::poker::Chips;

/// An action submitted by the player whose turn it is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Give up the hand.
    Fold,
    /// Pass without betting, only legal when there is nothing to call.
    Check,
    /// Match the current bet, or go all in with fewer chips.
    Call,
    /// Raise the street bet to the given total amount.
    Raise(Chips),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "fold"),
            Action::Check => write!(f, "check"),
            Action::Call => write!(f, "call"),
            Action::Raise(to) => write!(f, "raise to {to}"),
        }
    }
}

/// The last action taken by a player, as shown at the table.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// No action.
    #[default]
    None,
    /// Player pays small blind.
    SmallBlind,
    /// Player pays big blind.
    BigBlind,
    /// Player calls.
    Call,
    /// Player checks.
    Check,
    /// Player opens the betting on a street.
    Bet,
    /// Player raises.
    Raise,
    /// Player folds.
    Fold,
}

impl PlayerAction {
    /// The action label.
    pub fn label(&self) -> &'static str {
        match self {
            PlayerAction::SmallBlind => "SB",
            PlayerAction::BigBlind => "BB",
            PlayerAction::Call => "CALL",
            PlayerAction::Check => "CHECK",
            PlayerAction::Bet => "BET",
            PlayerAction::Raise => "RAISE",
            PlayerAction::Fold => "FOLD",
            PlayerAction::None => "",
        }
    }
}

/// A raise range, amounts are total street bets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaiseRange {
    /// The minimum raise, or the player stack if that is smaller.
    pub min: Chips,
    /// The maximum raise, all the player chips.
    pub max: Chips,
}

/// The actions a player can take on its turn, fold is always legal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalActions {
    /// The player can check.
    pub check: bool,
    /// The amount the player pays to call, if there is a bet to call.
    pub call: Option<Chips>,
    /// The raise targets, if the player has chips to raise.
    pub raise: Option<RaiseRange>,
}

impl LegalActions {
    /// Checks if the given action is offered, raise amounts are checked
    /// against the range.
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Fold => true,
            Action::Check => self.check,
            Action::Call => self.call.is_some(),
            Action::Raise(to) => self
                .raise
                .map(|r| r.min <= to && to <= r.max)
                .unwrap_or(false),
        }
    }
}
