// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cardroom cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use cardroom_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! assert_eq!(ah.value(), 14);
//! assert_eq!(ah, "AH".parse().unwrap());
//! ```
//!
//! and a [Deck] type for shuffling and dealing cards. A deck must be shuffled
//! with a cryptographically secure random source:
//!
//! ```
//! # use cardroom_cards::Deck;
//! let mut deck = Deck::new_and_shuffled(&mut rand::rng());
//! let mut dealt = 0;
//! while deck.deal().is_ok() {
//!     dealt += 1;
//! }
//! assert_eq!(dealt, Deck::SIZE);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, DeckError, ParseCardError, Rank, Suit};
