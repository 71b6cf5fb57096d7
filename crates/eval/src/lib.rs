// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cardroom poker hand evaluator.
//!
//! Evaluates 5, 6 and 7 cards hands by checking every 5 cards subset of the
//! input and keeping the best one, hands are compared by category, then by
//! the category value and then by kickers.
//!
//! To use the evaluator create a hand and use [HandValue] to evaluate the hand
//! and get its rank:
//!
//! ```
//! # use cardroom_eval::*;
//! let cards = ["AS", "KS", "QS", "JS", "TS", "2D", "3C"]
//!     .iter()
//!     .map(|c| c.parse::<Card>().unwrap())
//!     .collect::<Vec<_>>();
//! let v1 = HandValue::eval(&cards);
//! assert_eq!(v1.rank(), HandRank::RoyalFlush);
//!
//! let v2 = HandValue::eval(&cards[2..]);
//! assert!(v1 > v2);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{HandRank, HandValue};

// Reexport cards types.
pub use cardroom_cards::{Card, Deck, Rank, Suit};
