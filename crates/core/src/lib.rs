// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cardroom Texas Hold'em core.
//!
//! Types shared by the table orchestrator and the bots: chips, players and
//! actions, and [RoundState](round::RoundState), the betting state machine
//! that drives a hand from the blinds to the showdown.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod action;
pub mod error;
pub mod player;
pub mod poker;
pub mod pots;
pub mod round;
