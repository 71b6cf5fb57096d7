// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game errors.
use thiserror::Error;

use crate::poker::{Chips, DeckError};

/// Errors returned by the round state machine.
///
/// Action errors are protocol violations, the state is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// There is no betting round in progress.
    #[error("no betting round in progress")]
    NoBettingRound,
    /// The seat does not exist.
    #[error("seat {0} does not exist")]
    InvalidSeat(usize),
    /// A player acted out of turn.
    #[error("seat {seat} acted out of turn")]
    NotYourTurn {
        /// The seat that tried to act.
        seat: usize,
        /// The seat whose turn it is.
        expected: Option<usize>,
    },
    /// An action was submitted for a seat played by a bot.
    #[error("seat {0} is played by a bot")]
    BotSeat(usize),
    /// A folded player tried to act.
    #[error("seat {0} has folded")]
    PlayerFolded(usize),
    /// Check facing a bet.
    #[error("cannot check with {to_call} to call")]
    CannotCheck {
        /// The amount to call.
        to_call: Chips,
    },
    /// The raise does not increase the bet.
    #[error("raise to {target} is not above the current bet {current_bet}")]
    RaiseNotAboveBet {
        /// The raise target.
        target: Chips,
        /// The street bet to beat.
        current_bet: Chips,
    },
    /// The raise increment is below the minimum raise.
    #[error("raise to {target} is below the minimum raise to {min}")]
    RaiseTooSmall {
        /// The raise target.
        target: Chips,
        /// The minimum raise target.
        min: Chips,
    },
    /// The player cannot pay for the raise.
    #[error("raise to {target} needs {needed} chips, player has {chips}")]
    InsufficientChips {
        /// The raise target.
        target: Chips,
        /// The chips needed for the raise.
        needed: Chips,
        /// The player chips.
        chips: Chips,
    },
    /// The street still has players to act.
    #[error("the betting round is not complete")]
    StreetInProgress,
    /// The hand is not ready to be settled.
    #[error("the hand is still in progress")]
    HandInProgress,
    /// A hand needs at least two players with chips.
    #[error("not enough players with chips to start a hand")]
    NotEnoughPlayers,
    /// A player in the showdown has no cards.
    #[error("seat {0} has no cards at showdown")]
    MissingCards(usize),
    /// The deck ran out of cards.
    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
