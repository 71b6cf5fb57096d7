// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pots and pot splitting.
use serde::{Deserialize, Serialize};

use crate::{player::Player, poker::Chips};

/// A pot that contains players bets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    /// The chips in this pot.
    pub chips: Chips,
    /// The seats that can win this pot.
    pub eligible: Vec<usize>,
}

/// Builds the main pot and the side pots from the players hand contributions.
///
/// A pot is created for each distinct contribution of a player still in the
/// hand, folded players chips are dead money added to the pots they reached.
/// The returned pots hold exactly the sum of all contributions.
pub fn side_pots(players: &[Player]) -> Vec<Pot> {
    let mut levels = players
        .iter()
        .filter(|p| !p.folded && p.hand_bet > Chips::ZERO)
        .map(|p| p.hand_bet)
        .collect::<Vec<_>>();
    levels.sort();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::with_capacity(levels.len());
    let mut prev_level = Chips::ZERO;
    for level in levels {
        let chips = players
            .iter()
            .map(|p| p.hand_bet.min(level) - p.hand_bet.min(prev_level))
            .sum();

        let eligible = players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.folded && p.hand_bet >= level)
            .map(|(seat, _)| seat)
            .collect::<Vec<_>>();

        // Merge pots with the same players, a level can only add players.
        match pots.last_mut() {
            Some(last) if last.eligible == eligible => last.chips += chips,
            _ => pots.push(Pot { chips, eligible }),
        }

        prev_level = level;
    }

    // Chips committed above the highest live contribution belong to the last pot.
    let dead = players
        .iter()
        .map(|p| p.hand_bet - p.hand_bet.min(prev_level))
        .sum::<Chips>();
    if let Some(last) = pots.last_mut() {
        last.chips += dead;
    }

    pots
}

/// Splits chips among the winners.
///
/// Each winner gets `chips / winners`, the remaining odd chips are given one
/// at a time to the winners in clockwise order starting from the seat after
/// the dealer button. The returned shares follow that order.
pub fn split(chips: Chips, winners: &[usize], dealer: usize, seats: usize) -> Vec<(usize, Chips)> {
    if winners.is_empty() {
        return Vec::new();
    }

    let mut order = winners.to_vec();
    order.sort_by_key(|seat| (seat + seats - dealer - 1) % seats);

    let n = order.len() as u32;
    let share = chips / n;
    let mut odd = (chips % n).amount();

    order
        .into_iter()
        .map(|seat| {
            let mut amount = share;
            if odd > 0 {
                amount += Chips::new(1);
                odd -= 1;
            }
            (seat, amount)
        })
        .collect()
}
